//! One-time right-to-left layout flip.
//!
//! The first launch records a durable flag and restarts once so the new
//! direction applies everywhere. Later launches see the flag and do nothing.
//! The process-wide direction is set exactly once through
//! [`init_layout_direction`].

use crate::core::constants::{RTL_APPLIED_KEY, RTL_APPLIED_VALUE};
use crate::traits::{KeyValueStore, Restarter};
use crate::Result;
use once_cell::sync::OnceCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    pub fn is_rtl(self) -> bool {
        self == Self::RightToLeft
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Flag already stored; nothing to do
    AlreadyApplied,
    /// Direction already matches; flag left untouched
    NotNeeded,
    /// Flag stored and the restart was issued
    Restarted,
    /// Flag stored but the restart failed; running in the old direction
    FlippedPendingRestart,
}

pub struct LayoutBootstrap<'a> {
    store: &'a dyn KeyValueStore,
    restarter: &'a dyn Restarter,
    target: LayoutDirection,
}

impl<'a> LayoutBootstrap<'a> {
    pub fn new(store: &'a dyn KeyValueStore, restarter: &'a dyn Restarter) -> Self {
        Self {
            store,
            restarter,
            target: LayoutDirection::RightToLeft,
        }
    }

    pub fn with_target(mut self, target: LayoutDirection) -> Self {
        self.target = target;
        self
    }

    /// Runs the flip check against the direction the process started with
    pub fn run(&self, current: LayoutDirection) -> Result<BootstrapOutcome> {
        if is_flag_set(self.store)? {
            log::debug!("Layout direction flip already applied");
            return Ok(BootstrapOutcome::AlreadyApplied);
        }
        if current == self.target {
            log::debug!("Layout direction already {:?}", current);
            return Ok(BootstrapOutcome::NotNeeded);
        }

        self.store.set(RTL_APPLIED_KEY, RTL_APPLIED_VALUE)?;
        log::info!("Layout direction flipped to {:?}; restarting", self.target);

        match self.restarter.restart() {
            Ok(()) => Ok(BootstrapOutcome::Restarted),
            Err(e) => {
                log::error!("Restart after layout flip failed: {}", e);
                Ok(BootstrapOutcome::FlippedPendingRestart)
            }
        }
    }
}

fn is_flag_set(store: &dyn KeyValueStore) -> Result<bool> {
    Ok(store.get(RTL_APPLIED_KEY)?.as_deref() == Some(RTL_APPLIED_VALUE))
}

/// Direction recorded in `store`
pub fn stored_direction(store: &dyn KeyValueStore) -> Result<LayoutDirection> {
    Ok(if is_flag_set(store)? {
        LayoutDirection::RightToLeft
    } else {
        LayoutDirection::LeftToRight
    })
}

static LAYOUT_DIRECTION: OnceCell<LayoutDirection> = OnceCell::new();

/// Initializes the process-wide direction from `store`; later calls return
/// the value from the first one
pub fn init_layout_direction(store: &dyn KeyValueStore) -> LayoutDirection {
    *LAYOUT_DIRECTION.get_or_init(|| match stored_direction(store) {
        Ok(direction) => direction,
        Err(e) => {
            log::warn!("Cannot read layout flag, defaulting to left-to-right: {}", e);
            LayoutDirection::LeftToRight
        }
    })
}

/// Process-wide direction; left-to-right until initialized
pub fn layout_direction() -> LayoutDirection {
    LAYOUT_DIRECTION.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::store::MemoryStore;
    use crate::MapError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingRestarter {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Restarter for CountingRestarter {
        fn restart(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(MapError::Restart("simulated".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_first_launch_flips_and_restarts_once() {
        let store = MemoryStore::new();
        let restarter = CountingRestarter::default();
        let bootstrap = LayoutBootstrap::new(&store, &restarter);

        let outcome = bootstrap.run(LayoutDirection::LeftToRight).unwrap();
        assert_eq!(outcome, BootstrapOutcome::Restarted);
        assert_eq!(restarter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(RTL_APPLIED_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_second_launch_does_not_flip_again() {
        let store = MemoryStore::new();
        let restarter = CountingRestarter::default();
        let bootstrap = LayoutBootstrap::new(&store, &restarter);

        bootstrap.run(LayoutDirection::LeftToRight).unwrap();
        // In-memory direction reset to the platform default on the next launch
        let outcome = bootstrap.run(LayoutDirection::LeftToRight).unwrap();

        assert_eq!(outcome, BootstrapOutcome::AlreadyApplied);
        assert_eq!(restarter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_matching_direction_without_flag_is_not_needed() {
        let store = MemoryStore::new();
        let restarter = CountingRestarter::default();

        let outcome = LayoutBootstrap::new(&store, &restarter)
            .run(LayoutDirection::RightToLeft)
            .unwrap();

        assert_eq!(outcome, BootstrapOutcome::NotNeeded);
        assert_eq!(restarter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.get(RTL_APPLIED_KEY).unwrap(), None);
    }

    #[test]
    fn test_restart_failure_is_not_fatal() {
        let store = MemoryStore::new();
        let restarter = CountingRestarter {
            fail: true,
            ..Default::default()
        };

        let outcome = LayoutBootstrap::new(&store, &restarter)
            .run(LayoutDirection::LeftToRight)
            .unwrap();

        assert_eq!(outcome, BootstrapOutcome::FlippedPendingRestart);
        assert_eq!(stored_direction(&store).unwrap(), LayoutDirection::RightToLeft);
    }

    #[test]
    fn test_init_is_idempotent() {
        let store = MemoryStore::new();
        store.set(RTL_APPLIED_KEY, RTL_APPLIED_VALUE).unwrap();

        let first = init_layout_direction(&store);
        let empty = MemoryStore::new();
        let second = init_layout_direction(&empty);

        assert_eq!(first, second);
        assert_eq!(layout_direction(), first);
    }
}
