use incident_map::bootstrap::stored_direction;
use incident_map::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Layout flip across simulated launches sharing one state file
#[cfg(test)]
mod bootstrap_tests {
    use super::*;

    #[derive(Default)]
    struct CountingRestarter {
        calls: AtomicUsize,
    }

    impl Restarter for CountingRestarter {
        fn restart(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// One process start: read the stored direction, then run the bootstrap
    fn launch(path: &std::path::Path, restarter: &CountingRestarter) -> BootstrapOutcome {
        let store = JsonFileStore::new(path);
        let current = stored_direction(&store).unwrap();
        LayoutBootstrap::new(&store, restarter).run(current).unwrap()
    }

    #[test]
    fn test_flag_survives_restart_and_never_retriggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let restarter = CountingRestarter::default();

        assert_eq!(launch(&path, &restarter), BootstrapOutcome::Restarted);
        for _ in 0..3 {
            assert_eq!(launch(&path, &restarter), BootstrapOutcome::AlreadyApplied);
        }

        assert_eq!(restarter.calls.load(Ordering::SeqCst), 1);
        let store = JsonFileStore::new(&path);
        assert_eq!(stored_direction(&store).unwrap(), LayoutDirection::RightToLeft);
    }

    #[test]
    fn test_state_file_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::new(&path);
        store.set("theme", "dark").unwrap();

        let restarter = CountingRestarter::default();
        launch(&path, &restarter);

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(
            reopened
                .get(incident_map::constants::RTL_APPLIED_KEY)
                .unwrap()
                .as_deref(),
            Some("true")
        );
    }
}
