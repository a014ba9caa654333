use crate::core::geo::Coordinate;
use crate::data::catalog::EventCategory;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier assigned when a marker is created
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(String);

impl MarkerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed incident; never mutated after creation
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    coordinate: Coordinate,
    category: &'static EventCategory,
}

impl Marker {
    pub fn id(&self) -> &MarkerId {
        &self.id
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn category(&self) -> &'static EventCategory {
        self.category
    }

    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id.as_str(),
            "coordinate": self.coordinate,
            "category": self.category.id,
        })
    }
}

/// Ordered marker list; insertion order is draw order
#[derive(Debug, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
    sequence: u64,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a marker with a fresh `<unix-millis>-<sequence>` id
    pub fn add(&mut self, coordinate: Coordinate, category: &'static EventCategory) -> Marker {
        let marker = Marker {
            id: self.next_id(),
            coordinate,
            category,
        };
        log::info!(
            "Marker {} ({}) placed at {}",
            marker.id,
            category.id,
            coordinate
        );
        self.markers.push(marker.clone());
        marker
    }

    /// Removes the marker with `id`; absent ids are a no-op
    pub fn remove(&mut self, id: &MarkerId) -> Option<Marker> {
        let index = self.markers.iter().position(|marker| &marker.id == id)?;
        let removed = self.markers.remove(index);
        log::info!("Marker {} removed", removed.id);
        Some(removed)
    }

    pub fn get(&self, id: &MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| &marker.id == id)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn next_id(&mut self) -> MarkerId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        self.sequence += 1;
        MarkerId(format!("{}-{}", millis, self.sequence))
    }
}
