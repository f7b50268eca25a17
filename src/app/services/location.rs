use serde::Deserialize;

use crate::app::domain::{Coordinates, LocationSource};
use crate::app::infrastructure::error::LocationError;

/// Single-shot source of the user's current position.
pub trait LocationProvider: Send + Sync {
    fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the same configured position.
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        validated(self.0)
    }
}

/// Looks up an approximate position from the machine's public IP.
pub struct IpLocation {
    url: String,
    timeout_secs: u64,
}

/// Accepts both `lat`/`lon` and `latitude`/`longitude` field names.
#[derive(Deserialize)]
struct IpLookupResponse {
    #[serde(alias = "latitude")]
    lat: Option<f64>,
    #[serde(alias = "longitude")]
    lon: Option<f64>,
    status: Option<String>,
    message: Option<String>,
}

impl IpLocation {
    pub fn new(url: &str, timeout_secs: u64) -> Self {
        Self {
            url: url.trim().to_string(),
            timeout_secs,
        }
    }
}

impl LocationProvider for IpLocation {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        let response = minreq::get(&self.url)
            .with_timeout(self.timeout_secs)
            .send()
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        if !(200..300).contains(&response.status_code) {
            return Err(LocationError::Unavailable(format!(
                "lookup returned status {}",
                response.status_code
            )));
        }

        let body: IpLookupResponse = response
            .json()
            .map_err(|e| LocationError::Unavailable(format!("unreadable lookup response: {}", e)))?;
        parse_lookup(body)
    }
}

fn parse_lookup(body: IpLookupResponse) -> Result<Coordinates, LocationError> {
    if body.status.as_deref() == Some("fail") {
        let reason = body.message.unwrap_or_else(|| "lookup failed".to_string());
        return Err(LocationError::Unavailable(reason));
    }
    match (body.lat, body.lon) {
        (Some(lat), Some(lon)) => validated(Coordinates::new(lat, lon)),
        _ => Err(LocationError::Unavailable("lookup response has no coordinates".into())),
    }
}

fn validated(coords: Coordinates) -> Result<Coordinates, LocationError> {
    if coords.is_valid() {
        Ok(coords)
    } else {
        Err(LocationError::Invalid {
            latitude: coords.latitude,
            longitude: coords.longitude,
        })
    }
}

/// Build the provider configured in settings.
pub fn provider_for(source: &LocationSource, timeout_secs: u64) -> Box<dyn LocationProvider> {
    match source {
        LocationSource::Fixed { latitude, longitude } => {
            Box::new(FixedLocation(Coordinates::new(*latitude, *longitude)))
        }
        LocationSource::IpLookup { url } => Box::new(IpLocation::new(url, timeout_secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Coordinates, LocationError> {
        parse_lookup(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_fixed_location() {
        let provider = FixedLocation(Coordinates::new(52.52, 13.405));
        assert_eq!(provider.current_position(), Ok(Coordinates::new(52.52, 13.405)));
    }

    #[test]
    fn test_fixed_location_out_of_range() {
        let provider = FixedLocation(Coordinates::new(95.0, 0.0));
        assert!(matches!(provider.current_position(), Err(LocationError::Invalid { .. })));
    }

    #[test]
    fn test_lookup_short_field_names() {
        let coords = parse(r#"{"status":"success","lat":40.7128,"lon":-74.006,"city":"New York"}"#);
        assert_eq!(coords, Ok(Coordinates::new(40.7128, -74.006)));
    }

    #[test]
    fn test_lookup_long_field_names() {
        let coords = parse(r#"{"latitude":-33.86,"longitude":151.2}"#);
        assert_eq!(coords, Ok(Coordinates::new(-33.86, 151.2)));
    }

    #[test]
    fn test_lookup_failure_status() {
        let err = parse(r#"{"status":"fail","message":"private range"}"#).unwrap_err();
        assert_eq!(err, LocationError::Unavailable("private range".into()));
    }

    #[test]
    fn test_lookup_missing_coordinates() {
        assert!(matches!(parse(r#"{"city":"Nowhere"}"#), Err(LocationError::Unavailable(_))));
    }

    #[test]
    fn test_provider_for_fixed_source() {
        let provider = provider_for(&LocationSource::Fixed { latitude: 1.0, longitude: 2.0 }, 5);
        assert_eq!(provider.current_position(), Ok(Coordinates::new(1.0, 2.0)));
    }
}
