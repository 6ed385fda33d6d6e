//! Core data types for search results.

use chrono::{DateTime, Utc};

use crate::identifiers::*;

// ============================================================================
// Data Structures
// ============================================================================

/// Identity of a scheduled trip independent of the timetable it came from.
///
/// A trip is identified by where and when it departs, where and when it
/// arrives, its train number and the line it runs on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExternTrip {
    pub station_id: StationIdentifier,
    pub train_nr: u32,
    pub time: DateTime<Utc>,
    pub target_station_id: StationIdentifier,
    pub target_time: DateTime<Utc>,
    pub line_id: LineIdentifier,
}

impl ExternTrip {
    /// Build a trip from unix timestamps (seconds), as delivered by the search stage
    pub fn from_unix(
        station_id: StationIdentifier,
        train_nr: u32,
        time: i64,
        target_station_id: StationIdentifier,
        target_time: i64,
        line_id: LineIdentifier,
    ) -> Result<Self> {
        let time = timestamp(time)?;
        let target_time = timestamp(target_time)?;

        if target_time < time {
            return Err(TransitError::InvalidData(format!(
                "Trip {} arrives ({}) before it departs ({})",
                train_nr, target_time, time
            )));
        }

        Ok(Self {
            station_id,
            train_nr,
            time,
            target_station_id,
            target_time,
            line_id,
        })
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| TransitError::InvalidData(format!("Timestamp out of range: {}", secs)))
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, TransitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let invalid = TransitError::InvalidData("odd coordinate array".into());
        assert_eq!(invalid.to_string(), "Invalid data: odd coordinate array");

        let serialization = TransitError::SerializationError("eof".into());
        assert_eq!(serialization.to_string(), "Serialization error: eof");
    }

    #[test]
    fn test_extern_trip_from_unix() {
        let trip = ExternTrip::from_unix(
            StationIdentifier::new("8000105"),
            599,
            1_700_000_000,
            StationIdentifier::new("8000261"),
            1_700_010_000,
            LineIdentifier::new("ICE"),
        )
        .unwrap();

        assert_eq!(trip.time.timestamp(), 1_700_000_000);
        assert_eq!(trip.target_time.timestamp(), 1_700_010_000);
    }

    #[test]
    fn test_extern_trip_rejects_reversed_times() {
        let trip = ExternTrip::from_unix(
            StationIdentifier::new("a"),
            1,
            2_000,
            StationIdentifier::new("b"),
            1_000,
            LineIdentifier::new(""),
        );

        assert!(matches!(trip, Err(TransitError::InvalidData(_))));
    }

    #[test]
    fn test_timestamp_out_of_range() {
        assert!(timestamp(i64::MAX).is_err());
    }
}
