pub mod menu;
pub mod picker;
pub mod state;

use crate::layers::marker::MarkerId;
use menu::MenuItem;

pub use state::MapScreen;

/// Blocking message with a single acknowledge button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Blocking yes/no prompt awaiting the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    RemoveMarker(MarkerId),
}

/// Work handed to the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalAction {
    Menu(MenuItem),
    /// Distress button pressed
    Distress,
}
