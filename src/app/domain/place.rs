use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Finite and inside the latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceImage {
    /// Path relative to the place service root, e.g. `forest-waterfall.jpg`.
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// A catalog or saved place, exactly as the place service serves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub title: String,
    pub image: PlaceImage,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    /// Descriptive text shown next to the title.
    pub fn description(&self) -> &str {
        &self.image.alt
    }
}

#[cfg(test)]
pub(crate) fn test_place(id: &str, lat: f64, lon: f64) -> Place {
    Place {
        id: PlaceId::new(id),
        title: format!("Place {}", id),
        image: PlaceImage {
            src: format!("{}.jpg", id),
            alt: format!("A picture of place {}", id),
        },
        lat,
        lon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_wire_format() {
        let json = r#"{
            "id": "p1",
            "title": "Forest Waterfall",
            "image": { "src": "forest-waterfall.jpg", "alt": "A tranquil forest with a cascading waterfall amidst greenery." },
            "lat": 44.5588,
            "lon": -80.344
        }"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.id, PlaceId::new("p1"));
        assert_eq!(place.title, "Forest Waterfall");
        assert_eq!(place.coordinates(), Coordinates::new(44.5588, -80.344));
        assert!(place.description().starts_with("A tranquil forest"));
    }

    #[test]
    fn test_place_id_serializes_as_plain_string() {
        let place = test_place("p7", 1.0, 2.0);
        let json = serde_json::to_string(&place).unwrap();
        assert!(json.contains("\"id\":\"p7\""));
    }

    #[test]
    fn test_missing_alt_defaults_to_empty() {
        let json = r#"{"id":"p2","title":"T","image":{"src":"x.jpg"},"lat":0.0,"lon":0.0}"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.description(), "");
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinates::new(45.0, 120.0).is_valid());
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::INFINITY).is_valid());
    }
}
