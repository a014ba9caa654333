//! Fixed catalog of incident categories

use std::path::{Path, PathBuf};

/// One incident category; the catalog is known at build time
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EventCategory {
    /// Stable machine id
    pub id: &'static str,
    /// Hebrew display label
    pub label: &'static str,
    /// PNG file name inside the icon directory
    pub icon: &'static str,
    /// Emoji used when markers are drawn as text
    pub glyph: &'static str,
}

impl EventCategory {
    pub fn icon_path(&self, asset_dir: impl AsRef<Path>) -> PathBuf {
        asset_dir.as_ref().join(self.icon)
    }
}

pub static CATEGORIES: [EventCategory; 8] = [
    EventCategory {
        id: "stabbing",
        label: "פיגוע דקירה",
        icon: "knife.png",
        glyph: "🔪",
    },
    EventCategory {
        id: "ramming",
        label: "פיגוע דריסה",
        icon: "rollOver.png",
        glyph: "🚗",
    },
    EventCategory {
        id: "shooting",
        label: "פיגוע ירי",
        icon: "gun.png",
        glyph: "🔫",
    },
    EventCategory {
        id: "stone_throwing",
        label: "זריקת אבנים",
        icon: "rock.png",
        glyph: "🪨",
    },
    EventCategory {
        id: "suspicious_object",
        label: "חפץ חשוד",
        icon: "case.png",
        glyph: "🧳",
    },
    EventCategory {
        id: "firebomb",
        label: "בקבוק תבערה",
        icon: "bottle.png",
        glyph: "🍾",
    },
    EventCategory {
        id: "rockets",
        label: "טילים / כלי טיס",
        icon: "rocket.png",
        glyph: "🚀",
    },
    EventCategory {
        id: "fire",
        label: "שריפה",
        icon: "fire.png",
        glyph: "🔥",
    },
];

pub fn all() -> &'static [EventCategory] {
    &CATEGORIES
}

pub fn by_id(id: &str) -> Option<&'static EventCategory> {
    CATEGORIES.iter().find(|category| category.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_entries_are_distinct() {
        assert_eq!(all().len(), 8);
        let ids: HashSet<_> = all().iter().map(|c| c.id).collect();
        let labels: HashSet<_> = all().iter().map(|c| c.label).collect();
        assert_eq!(ids.len(), 8);
        assert_eq!(labels.len(), 8);
    }

    #[test]
    fn test_lookup_and_icon_path() {
        let fire = by_id("fire").unwrap();
        assert_eq!(fire.label, "שריפה");
        assert_eq!(fire.icon_path("assets/icons"), Path::new("assets/icons/fire.png"));
        assert!(by_id("parade").is_none());
    }
}
