use std::cmp::Ordering;

use crate::app::domain::{Coordinates, Place};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points (haversine), in kilometres.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Return a copy of `places` ordered by ascending distance from `origin`.
///
/// The sort is stable. Places with invalid coordinates go last, in their
/// input order. An invalid origin leaves the input order unchanged.
pub fn sort_by_distance(places: &[Place], origin: Coordinates) -> Vec<Place> {
    if !origin.is_valid() {
        return places.to_vec();
    }

    let mut keyed: Vec<(Option<f64>, &Place)> = places
        .iter()
        .map(|p| {
            let coords = p.coordinates();
            let key = coords.is_valid().then(|| distance_km(origin, coords));
            (key, p)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_distance(*a, *b));
    keyed.into_iter().map(|(_, p)| p.clone()).collect()
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
