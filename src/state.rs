use std::{sync::Arc, time::Duration};

use tokio::sync::RwLock;

use crate::{
    auth::{MockAuthenticator, SessionStore},
    dashboard::Dashboard,
    storage::{ArticleStore, SharedStore},
};

/// 应用程序上下文
///
/// [`AppState`] 封装了文章集合、登录器与会话表，提供统一访问入口。
#[derive(Clone)]
pub struct AppState {
    store: SharedStore,
    auth: MockAuthenticator,
    sessions: Arc<SessionStore>,
    search_delay: Duration,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(store: ArticleStore, auth: MockAuthenticator, search_delay: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth,
            sessions: Arc::new(SessionStore::default()),
            search_delay,
        }
    }

    /// 获取文章集合
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn auth(&self) -> &MockAuthenticator {
        &self.auth
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// 为新会话创建看板
    pub fn new_dashboard(&self) -> Dashboard {
        Dashboard::new(self.search_delay)
    }
}
