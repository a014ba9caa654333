//! Device location adapter
//!
//! [`LocationService`] wraps a [`LocationProvider`] with the permission flow
//! and caches the most recent fix. Fresh fixes are requested through a future
//! that owns only an `Arc` of the provider, so the screen can spawn it and
//! record the outcome when the message comes back.

use crate::core::geo::Coordinate;
use crate::prelude::{Arc, Future};
use crate::traits::LocationProvider;
use crate::{MapError, Result};
use async_trait::async_trait;

/// Accuracy hint passed to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accuracy {
    Balanced,
    #[default]
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Undetermined,
    Granted,
    Denied,
}

pub struct LocationService {
    provider: Arc<dyn LocationProvider>,
    last_fix: Option<Coordinate>,
}

impl LocationService {
    pub fn new(provider: Arc<dyn LocationProvider>) -> Self {
        Self {
            provider,
            last_fix: None,
        }
    }

    /// Permission check, prompt if needed, then a high-accuracy fix
    pub fn request_current_fix(&self) -> impl Future<Output = Result<Coordinate>> + Send + 'static {
        let provider = Arc::clone(&self.provider);
        async move { fetch_fix(provider.as_ref()).await }
    }

    /// Requests a fix and caches it on success
    pub async fn current_fix(&mut self) -> Result<Coordinate> {
        let coordinate = self.request_current_fix().await?;
        self.record_fix(coordinate);
        Ok(coordinate)
    }

    /// Most recent fix from any source, without querying the device
    pub fn last_known_fix(&self) -> Option<Coordinate> {
        self.last_fix
    }

    /// Caches a fix from a completed request or a live update
    pub fn record_fix(&mut self, coordinate: Coordinate) {
        if !coordinate.is_valid() {
            log::warn!("Ignoring invalid location fix {}", coordinate);
            return;
        }
        self.last_fix = Some(coordinate);
    }
}

async fn fetch_fix(provider: &dyn LocationProvider) -> Result<Coordinate> {
    let mut status = provider.permission_status().await;
    if status != PermissionStatus::Granted {
        log::debug!("Location permission {:?}; requesting", status);
        status = provider.request_permission().await;
    }
    if status != PermissionStatus::Granted {
        return Err(MapError::PermissionDenied);
    }

    match provider.current_position(Accuracy::High).await {
        Ok(coordinate) if coordinate.is_valid() => Ok(coordinate),
        Ok(coordinate) => Err(MapError::LocationUnavailable(format!(
            "provider returned invalid fix {}",
            coordinate
        ))),
        Err(MapError::PermissionDenied) => Err(MapError::PermissionDenied),
        Err(MapError::LocationUnavailable(reason)) => Err(MapError::LocationUnavailable(reason)),
        Err(other) => Err(MapError::LocationUnavailable(other.to_string())),
    }
}

impl std::fmt::Debug for LocationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationService")
            .field("last_fix", &self.last_fix)
            .finish()
    }
}

/// Provider with a fixed position, for desktops without a GPS
#[derive(Debug, Clone)]
pub struct StaticLocationProvider {
    fix: Option<Coordinate>,
    permission: PermissionStatus,
}

impl StaticLocationProvider {
    pub fn new(fix: Option<Coordinate>) -> Self {
        Self {
            fix,
            permission: PermissionStatus::Granted,
        }
    }

    pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
        self.permission = permission;
        self
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn permission_status(&self) -> PermissionStatus {
        self.permission
    }

    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn current_position(&self, _accuracy: Accuracy) -> Result<Coordinate> {
        self.fix
            .ok_or_else(|| MapError::LocationUnavailable("no position configured".to_string()))
    }
}
