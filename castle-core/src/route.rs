//! Screens of the app and their hash ids.

use std::fmt;

/// A top-level screen, addressed by `#id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Manifesto,
    Map,
    Map2,
    Messages,
}

impl Screen {
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Manifesto,
        Self::Map,
        Self::Map2,
        Self::Messages,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Manifesto => "manifesto",
            Self::Map => "map",
            Self::Map2 => "map2",
            Self::Messages => "messages",
        }
    }

    /// Label in the bottom navigation.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Manifesto => "Manifesto",
            Self::Map => "Map",
            Self::Map2 => "Area",
            Self::Messages => "Messages",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|screen| screen.id() == id)
    }

    /// Resolve a location hash; unknown or empty hashes land on the dashboard.
    pub fn from_hash(hash: &str) -> Self {
        Self::from_id(hash.strip_prefix('#').unwrap_or(hash)).unwrap_or_default()
    }

    pub fn hash(self) -> String {
        format!("#{}", self.id())
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
