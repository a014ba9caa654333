use crate::core::config::PlacementMode;
use crate::data::catalog::EventCategory;

/// What choosing a category asks the screen to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerOutcome {
    /// Place now at the best-known position
    PlaceNow(&'static EventCategory),
    /// Wait for the next map tap
    Armed(&'static EventCategory),
}

/// Modal category picker
#[derive(Debug)]
pub struct EventPicker {
    mode: PlacementMode,
    open: bool,
    armed: Option<&'static EventCategory>,
}

impl EventPicker {
    pub fn new(mode: PlacementMode) -> Self {
        Self {
            mode,
            open: false,
            armed: None,
        }
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Category waiting for a map tap
    pub fn armed(&self) -> Option<&'static EventCategory> {
        self.armed
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes without choosing; any armed placement stays armed
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    pub fn choose(&mut self, category: &'static EventCategory) -> PickerOutcome {
        self.open = false;
        match self.mode {
            PlacementMode::Eager => PickerOutcome::PlaceNow(category),
            PlacementMode::TapToPlace => {
                log::info!("Tap the map to place {}", category.id);
                self.armed = Some(category);
                PickerOutcome::Armed(category)
            }
        }
    }

    pub fn take_armed(&mut self) -> Option<&'static EventCategory> {
        self.armed.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog;

    #[test]
    fn test_eager_places_immediately() {
        let mut picker = EventPicker::new(PlacementMode::Eager);
        picker.open();
        let fire = catalog::by_id("fire").unwrap();

        assert_eq!(picker.choose(fire), PickerOutcome::PlaceNow(fire));
        assert!(!picker.is_open());
        assert!(picker.armed().is_none());
    }

    #[test]
    fn test_tap_to_place_arms_once() {
        let mut picker = EventPicker::new(PlacementMode::TapToPlace);
        picker.open();
        let rockets = catalog::by_id("rockets").unwrap();

        assert_eq!(picker.choose(rockets), PickerOutcome::Armed(rockets));
        assert_eq!(picker.take_armed(), Some(rockets));
        assert_eq!(picker.take_armed(), None);
    }

    #[test]
    fn test_dismiss_changes_nothing() {
        let mut picker = EventPicker::new(PlacementMode::TapToPlace);
        picker.open();
        picker.dismiss();
        assert!(!picker.is_open());
        assert!(picker.armed().is_none());
    }
}
