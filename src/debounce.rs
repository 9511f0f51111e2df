use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle};

/// 搜索框的默认防抖间隔
pub const SEARCH_DELAY: Duration = Duration::from_millis(300);

/// 尾沿防抖
///
/// 每次 [`push`](Debouncer::push) 都会重新计时，输入在 `delay` 内保持不变后
/// 输出才更新为最后一次输入的值。被丢弃时取消尚未触发的更新。
///
/// 需要在 tokio 运行时内调用 `push`。
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: Arc<watch::Sender<T>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            delay,
            tx: Arc::new(tx),
            pending: None,
        }
    }

    /// 提交新的输入，取消上一次尚未触发的更新
    pub fn push(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send_replace(value);
        }));
    }

    /// 当前已稳定的值
    pub fn get(&self) -> T {
        T::clone(&self.tx.borrow())
    }

    /// 订阅输出的变化
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// 立即设置输出并取消等待中的更新
    pub fn reset(&mut self, value: T) {
        self.cancel();
        self.tx.send_replace(value);
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
