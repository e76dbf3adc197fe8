use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GpsLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DecodeError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(DecodeError::Coordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_coordinates() {
        let loc = GpsLocation::new(47.6062, -122.3321).unwrap();
        assert_eq!(loc.latitude, 47.6062);
        assert_eq!(loc.longitude, -122.3321);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(GpsLocation::new(91.0, 0.0).is_err());
        assert!(GpsLocation::new(0.0, -180.5).is_err());
        assert!(GpsLocation::new(f64::NAN, 0.0).is_err());
    }
}
