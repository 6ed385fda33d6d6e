//! Type-safe identifiers for search-result entities.
//!
//! String identifiers use Arc<str> for cheap cloning and minimal memory overhead.
//! Connection ids are small integers handed out by the search stage.

use std::sync::Arc;
use std::fmt;
use std::hash::{Hash, Hasher};

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

impl_identifier!(StationIdentifier);
impl_identifier!(LineIdentifier);

/// Identifier of one alternative itinerary ("connection") in a search result.
///
/// Ids are not necessarily contiguous and do not have to start at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(pub u32);

impl ConnectionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Signed distance from `base`, used for palette slot selection.
    pub fn offset_from(self, base: ConnectionId) -> i64 {
        i64::from(self.0) - i64::from(base.0)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ConnectionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = StationIdentifier::new("8000105");
        let id2 = StationIdentifier::new("8000105");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0)); // Clone shares Arc
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(StationIdentifier::new("test"), 42);

        assert_eq!(map.get(&StationIdentifier::new("test")), Some(&42));
    }

    #[test]
    fn test_identifier_display() {
        let id = LineIdentifier::new("ICE 599");
        assert_eq!(format!("{}", id), "ICE 599");
        assert_eq!(format!("{}", ConnectionId::new(17)), "17");
    }

    #[test]
    fn test_connection_id_ordering() {
        let mut ids = vec![ConnectionId(9), ConnectionId(2), ConnectionId(5)];
        ids.sort();
        assert_eq!(ids, vec![ConnectionId(2), ConnectionId(5), ConnectionId(9)]);
    }

    #[test]
    fn test_connection_id_offset() {
        assert_eq!(ConnectionId(7).offset_from(ConnectionId(5)), 2);
        assert_eq!(ConnectionId(3).offset_from(ConnectionId(5)), -2);
    }
}
