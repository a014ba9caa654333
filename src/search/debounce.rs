use crate::runtime::{self, AsyncHandle};
use std::time::Duration;

/// At most one scheduled task; scheduling a new one cancels the previous
pub struct Debouncer {
    delay: Duration,
    pending: Option<Box<dyn AsyncHandle>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `task` once the delay elapses without another call to `schedule`
    pub fn schedule<F>(&mut self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        log::trace!("Debounce scheduled for {:?}", self.delay);
        self.pending = Some(runtime::spawn_after(self.delay, task));
    }

    /// Drops the pending task, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                log::trace!("Debounce cancelled");
                handle.cancel();
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_task_fires() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut debouncer = Debouncer::new(Duration::from_millis(350));

        for text in ["t", "te", "tel"] {
            let tx = tx.clone();
            debouncer.schedule(move || {
                let _ = tx.send(text);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["tel"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut debouncer = Debouncer::new(Duration::from_millis(350));
        debouncer.schedule(move || {
            let _ = tx.send(());
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}
