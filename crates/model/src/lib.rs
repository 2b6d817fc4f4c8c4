use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
pub use serde_with;

pub mod equipment;
pub mod event;
pub mod location;
pub mod waybill;

pub trait ExampleData {
    fn example_data() -> Self;
}

/// One of the four datasets describing railcar movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Locations,
    Equipment,
    Waybills,
    Events,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Locations,
        EntityKind::Equipment,
        EntityKind::Waybills,
        EntityKind::Events,
    ];

    /// Name of the dataset. Also used as table name and csv file stem.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Locations => "locations",
            Self::Equipment => "equipment",
            Self::Waybills => "waybills",
            Self::Events => "events",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntityKind(pub String);

impl fmt::Display for UnknownEntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid kind {}", self.0)
    }
}

impl std::error::Error for UnknownEntityKind {}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownEntityKind(s.to_owned()))
    }
}

/// A record that belongs to one dataset and is identified by a string id.
pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::EntityKind;

    #[test]
    fn kind_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.name().parse::<EntityKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "trains".parse::<EntityKind>().unwrap_err();
        assert_eq!(err.to_string(), "invalid kind trains");
    }
}
