//! Runtime abstraction layer for async operations
//!
//! Location fixes, place lookups and the screen's timers all run as spawned
//! tasks. Callers hold an [`AsyncHandle`] so a superseded task can be
//! cancelled, which is how debounced searches and pending camera retries are
//! replaced.

use crate::prelude::{Future, Pin};
use std::time::Duration;

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Spawns a future on the global runtime
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    log::trace!("runtime::spawn()");
    runtime().spawn_boxed(Box::pin(future))
}

/// Spawns a task that resolves after `delay` by running `then`
pub fn spawn_after<F>(delay: Duration, then: F) -> Box<dyn AsyncHandle>
where
    F: FnOnce() + Send + 'static,
{
    spawn(async move {
        async_utils::async_delay(delay).await;
        then();
    })
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::*;
        use ::tokio::task::JoinHandle;

        /// Tokio-based async spawner
        ///
        /// Uses the ambient runtime when called from inside one, otherwise the
        /// handle registered at startup.
        pub struct TokioSpawner {
            fallback: Option<::tokio::runtime::Handle>,
        }

        impl TokioSpawner {
            pub fn new() -> Self {
                Self { fallback: None }
            }

            /// Spawner that targets `handle` when no runtime is entered
            pub fn with_handle(handle: ::tokio::runtime::Handle) -> Self {
                Self {
                    fallback: Some(handle),
                }
            }
        }

        impl Default for TokioSpawner {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                let handle = match ::tokio::runtime::Handle::try_current() {
                    Ok(current) => current.spawn(future),
                    Err(_) => match &self.fallback {
                        Some(fallback) => fallback.spawn(future),
                        None => {
                            log::error!("No tokio runtime available; task dropped");
                            return Box::new(DroppedHandle);
                        }
                    },
                };
                Box::new(TokioHandle(handle))
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }
    }

    /// Handle for a task that never started
    pub struct DroppedHandle;

    impl AsyncHandle for DroppedHandle {
        fn is_finished(&self) -> bool {
            true
        }

        fn cancel(&self) {}
    }
}

pub use spawners::DroppedHandle;

/// Async helpers shared by the screen's timers
pub mod async_utils {
    /// Async delay that works across runtimes
    pub async fn async_delay(duration: std::time::Duration) {
        #[cfg(feature = "tokio-runtime")]
        {
            tokio::time::sleep(duration).await;
        }

        #[cfg(not(feature = "tokio-runtime"))]
        {
            let start = std::time::Instant::now();
            while start.elapsed() < duration {
                std::hint::spin_loop();
            }
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Initialize the runtime with a specific spawner; later calls are ignored
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) {
    if RUNTIME.set(spawner).is_err() {
        log::debug!("Runtime already initialized");
    }
}

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME
        .get_or_init(|| {
            #[cfg(feature = "tokio-runtime")]
            {
                Box::new(spawners::tokio_impl::TokioSpawner::new())
            }

            #[cfg(not(feature = "tokio-runtime"))]
            {
                Box::new(NoRuntime)
            }
        })
        .as_ref()
}

#[cfg(not(feature = "tokio-runtime"))]
struct NoRuntime;

#[cfg(not(feature = "tokio-runtime"))]
impl AsyncSpawner for NoRuntime {
    fn spawn_boxed(
        &self,
        _future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Box<dyn AsyncHandle> {
        log::error!("No async runtime available. Enable the 'tokio-runtime' feature.");
        Box::new(DroppedHandle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "tokio-runtime")]
    #[::tokio::test(start_paused = true)]
    async fn test_tokio_spawner() {
        let handle = spawn(async {
            ::tokio::time::sleep(Duration::from_millis(10)).await;
        });

        assert!(!handle.is_finished());

        ::tokio::time::sleep(Duration::from_millis(20)).await;
        ::tokio::task::yield_now().await;
        assert!(handle.is_finished());
    }

    #[cfg(feature = "tokio-runtime")]
    #[::tokio::test(start_paused = true)]
    async fn test_cancelled_task_never_runs() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = spawn_after(Duration::from_millis(50), move || {
            let _ = tx.send(());
        });
        handle.cancel();

        ::tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
    }
}
