//! Geographic [`Coordinates`] and distances between them.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Point on the Earth surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Coordinates {
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub latitude: f64,

    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(alias = "lng", alias = "lon"))]
    pub longitude: f64,
}

impl Coordinates {
    /// Creates new [`Coordinates`].
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Indicates whether both components carry a real value.
    ///
    /// A zero or `NaN` component means the location is unknown.
    #[must_use]
    pub fn is_known(&self) -> bool {
        [self.latitude, self.longitude]
            .iter()
            .all(|c| *c != 0.0 && !c.is_nan())
    }

    /// Returns the great-circle distance to the `other` point in kilometers,
    /// rounded to one decimal place.
    ///
    /// [`None`] is returned if any of the points is not [known].
    ///
    /// [known]: Coordinates::is_known
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> Option<f64> {
        distance_km(*self, *other)
    }
}

/// Haversine distance between `from` and `to` in kilometers, rounded to one
/// decimal place.
///
/// [`None`] is returned if any coordinate is zero or `NaN`, meaning the
/// location data is missing.
#[must_use]
pub fn distance_km(from: Coordinates, to: Coordinates) -> Option<f64> {
    if !from.is_known() || !to.is_known() {
        return None;
    }

    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Some((EARTH_RADIUS_KM * c * 10.0).round() / 10.0)
}

#[cfg(test)]
mod spec {
    use super::{distance_km, Coordinates};

    const DELHI: Coordinates = Coordinates::new(28.6139, 77.2090);
    const MUMBAI: Coordinates = Coordinates::new(19.0760, 72.8777);
    const KORAMANGALA: Coordinates = Coordinates::new(12.9352, 77.6245);
    const MG_ROAD: Coordinates = Coordinates::new(12.9716, 77.5946);

    #[test]
    fn measures_known_distances() {
        assert_eq!(distance_km(DELHI, MUMBAI), Some(1148.1));
        assert_eq!(distance_km(MG_ROAD, KORAMANGALA), Some(5.2));
    }

    #[test]
    fn is_symmetric() {
        assert_eq!(distance_km(DELHI, MUMBAI), distance_km(MUMBAI, DELHI));
        assert_eq!(
            MG_ROAD.distance_km(&KORAMANGALA),
            KORAMANGALA.distance_km(&MG_ROAD),
        );
    }

    #[test]
    fn is_zero_for_same_point() {
        assert_eq!(distance_km(DELHI, DELHI), Some(0.0));
        assert_eq!(distance_km(KORAMANGALA, KORAMANGALA), Some(0.0));
    }

    #[test]
    fn is_none_for_missing_components() {
        assert_eq!(distance_km(Coordinates::new(0.0, 77.2), DELHI), None);
        assert_eq!(distance_km(DELHI, Coordinates::new(28.6, 0.0)), None);
        assert_eq!(distance_km(Coordinates::new(f64::NAN, 77.2), DELHI), None);
        assert_eq!(distance_km(DELHI, Coordinates::default()), None);
    }
}
