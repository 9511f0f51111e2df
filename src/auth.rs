use std::{collections::HashMap, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::{sync::RwLock, time::Instant};

use crate::dashboard::Dashboard;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    Unauthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
}

/// 已登录用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// 只有管理员可以编辑文章
    pub fn can_edit(&self) -> bool {
        self.role == Role::Admin
    }
}

struct Account {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
}

const ACCOUNTS: [Account; 2] = [
    Account {
        id: "1",
        name: "Admin User",
        email: "admin@example.com",
        password: "admin123",
        role: Role::Admin,
    },
    Account {
        id: "2",
        name: "Editor User",
        email: "editor@example.com",
        password: "editor123",
        role: Role::Editor,
    },
];

/// 模拟登录，内置两个固定账号
///
/// 每次登录前等待 `delay`，模拟网络延迟。
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        tokio::time::sleep(self.delay).await;

        ACCOUNTS
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| User {
                id: a.id.to_string(),
                name: a.name.to_string(),
                email: a.email.to_string(),
                role: a.role,
            })
            .ok_or(AuthError::InvalidCredentials)
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}

/// 会话表默认容量，超出后淘汰最早创建的会话
pub const MAX_SESSIONS: usize = 1024;

/// 一次登录会话：用户身份和该用户的看板视图
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub dashboard: Dashboard,
    created_at: Instant,
}

/// 会话表，以随机 token 为键
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// 创建会话，返回新 token
    pub async fn create(&self, user: User, dashboard: Dashboard) -> String {
        let token = format!("{:032x}", rand::random::<u128>());
        let mut sessions = self.sessions.write().await;

        while sessions.len() >= self.capacity {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, s)| s.created_at)
                .map(|(token, _)| token.clone())
            else {
                break;
            };
            if let Some(evicted) = sessions.remove(&oldest) {
                tracing::info!(user = %evicted.user.email, "session evicted");
            }
        }

        sessions.insert(
            token.clone(),
            Session {
                user,
                dashboard,
                created_at: Instant::now(),
            },
        );
        token
    }

    pub async fn user(&self, token: &str) -> Option<User> {
        self.sessions.read().await.get(token).map(|s| s.user.clone())
    }

    pub async fn remove(&self, token: &str) -> Option<User> {
        self.sessions.write().await.remove(token).map(|s| s.user)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// 以只读方式访问会话
    pub async fn read_session<R>(
        &self,
        token: &str,
        f: impl FnOnce(&Session) -> R,
    ) -> Result<R, AuthError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(token).ok_or(AuthError::Unauthenticated)?;
        Ok(f(session))
    }

    /// 以可变方式访问会话
    pub async fn with_session<R>(
        &self,
        token: &str,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, AuthError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(token).ok_or(AuthError::Unauthenticated)?;
        Ok(f(session))
    }
}
