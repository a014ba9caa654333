use crate::camera::CameraView;
use crate::core::geo::Coordinate;
use crate::data::catalog::EventCategory;
use crate::layers::marker::MarkerId;
use crate::screen::menu::MenuItem;

/// Everything the views and the map surface report to the screen
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    /// Map finished its initial style/render pass
    MapReady,
    /// Finger (or pointer) went down on the map
    MapTouchStart,
    /// Tap on the map at a geographic position
    MapTapped(Coordinate),
    /// Gesture moved the camera
    ViewChanged(CameraView),
    /// Live position from the device
    LocationUpdated(Coordinate),

    QueryChanged(String),
    /// Return key in the search field
    QuerySubmitted,
    SearchFocused,
    ResultSelected(usize),

    AddEventPressed,
    CategoryChosen(&'static EventCategory),
    PickerDismissed,

    RecenterPressed,
    DistressPressed,

    MenuToggled,
    MenuItemSelected(MenuItem),

    MarkerLongPressed(MarkerId),
    ConfirmationResolved(bool),
    AlertDismissed,
}
