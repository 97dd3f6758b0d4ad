use serde::{Deserialize, Serialize};

use crate::libraries::distance::great_circle_km;

/// Check that a latitude/longitude pair is finite and within valid GPS ranges
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("Invalid coordinates provided: ({latitude}, {longitude})")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A WGS84 coordinate in degrees that is known to be valid.
///
/// Catalog points hold `Coordinate`s, so distances between them never fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !is_valid_coordinate(latitude, longitude) {
            return Err(InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            lat: latitude,
            lon: longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.lat
    }

    pub fn longitude(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to another coordinate in kilometers
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        great_circle_km(self.lat, self.lon, other.lat, other.lon)
    }
}

impl From<Coordinate> for Location {
    fn from(coordinate: Coordinate) -> Self {
        Location::new(coordinate.lat, coordinate.lon)
    }
}

/// A position reported for a single search. Never persisted.
///
/// Values arrive from outside (device fixes, map picks, query strings), so a
/// `Location` may be invalid; call [`Location::coordinate`] before measuring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>, // Horizontal accuracy in meters
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
        }
    }

    pub fn with_accuracy(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: Some(accuracy),
        }
    }

    pub fn coordinate(&self) -> Result<Coordinate, InvalidCoordinate> {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(44.6166, 33.5254).is_ok());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
        assert!(Coordinate::new(90.0, -180.0).is_ok());

        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, 181.0).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_error_carries_input() {
        let err = Coordinate::new(95.5, 10.0).unwrap_err();
        assert_eq!(err.latitude, 95.5);
        assert_eq!(err.longitude, 10.0);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let ok: Result<Coordinate, _> = serde_json::from_str(r#"{"lat": 44.6, "lon": 33.5}"#);
        assert!(ok.is_ok());

        let bad: Result<Coordinate, _> = serde_json::from_str(r#"{"lat": 144.6, "lon": 33.5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_location_validity() {
        let coordinate = Location::with_accuracy(44.6, 33.5, 12.0).coordinate().unwrap();
        assert_eq!(coordinate.latitude(), 44.6);
        assert!(Location::with_accuracy(44.6, 200.0, 12.0).coordinate().is_err());
        assert!(Location::new(f64::NAN, 33.5).coordinate().is_err());
    }

    #[test]
    fn test_location_accuracy_is_optional_in_json() {
        let location: Location =
            serde_json::from_str(r#"{"latitude": 44.6, "longitude": 33.5}"#).unwrap();
        assert_eq!(location.accuracy, None);

        let json = serde_json::to_value(Location::new(44.6, 33.5)).unwrap();
        assert!(json.get("accuracy").is_none());
    }
}
