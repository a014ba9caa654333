//! Capability interfaces between the screen and the outside world
//!
//! Each collaborator the screen drives (camera surface, device location,
//! geocoding backend, durable storage, process restart) sits behind one trait
//! so hosts and tests can plug their own implementation in.

use crate::camera::{CameraTarget, CameraView};
use crate::core::geo::Coordinate;
use crate::location::{Accuracy, PermissionStatus};
use crate::search::geocoding::SearchResult;
use crate::Result;
use async_trait::async_trait;

/// The one camera capability interface a rendering surface implements
pub trait CameraSurface: Send {
    /// Animate (or move immediately for a zero duration) to the target
    fn jump_to(&mut self, target: &CameraTarget);

    /// Toggle continuous tracking of the user position
    fn set_follow(&mut self, follow: bool);

    fn is_following(&self) -> bool;

    /// Advance running animations by `delta_time` seconds
    fn advance(&mut self, delta_time: f64);

    fn is_animating(&self) -> bool;

    /// Live device position; surfaces in follow mode recenter on it
    fn user_position_changed(&mut self, coordinate: Coordinate);

    /// Current center and zoom
    fn view(&self) -> CameraView;

    /// Immediate move used by gestures; stops any running animation
    fn set_view(&mut self, view: CameraView);
}

/// Device location backend
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn permission_status(&self) -> PermissionStatus;

    /// Prompts the user when the platform allows it
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinate>;
}

/// Forward geocoding backend
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Results in backend order; transport and parse failures are errors
    async fn forward(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Durable string key-value storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Restarts the application so a new layout direction takes effect
pub trait Restarter: Send + Sync {
    fn restart(&self) -> Result<()>;
}
