use crate::error::{ProjectionError, Result};
use crate::math::Point2;

use super::{CrsId, LonLat, Reprojector};

/// WGS84 semi-major axis (m).
const SEMI_MAJOR: f64 = 6_378_137.0;
/// WGS84 flattening.
const FLATTENING: f64 = 1.0 / 298.257_223_563;
/// UTM central scale factor.
const K0: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;
/// Latitude band covered by UTM; polar regions use UPS instead.
const MIN_LAT: f64 = -80.0;
const MAX_LAT: f64 = 84.0;

/// Multipliers `2j` of the Krüger series terms.
const HARMONICS: [f64; 4] = [2.0, 4.0, 6.0, 8.0];

/// A UTM zone on the WGS84 datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtmZone {
    number: u8,
    north: bool,
}

impl UtmZone {
    /// Creates a zone from its number (1–60) and hemisphere.
    #[must_use]
    pub fn new(number: u8, north: bool) -> Option<Self> {
        (1..=60)
            .contains(&number)
            .then_some(Self { number, north })
    }

    /// Returns the zone containing the given position.
    #[must_use]
    pub fn containing(position: LonLat) -> Self {
        let lon = normalize_lon(position.lon);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let number = (((lon + 180.0) / 6.0).floor() as u8 + 1).clamp(1, 60);
        Self {
            number,
            north: position.lat >= 0.0,
        }
    }

    /// Selects a working zone for a set of positions: the zone of the centre
    /// of their bounding box. Returns `None` for an empty or non-finite set.
    #[must_use]
    pub fn for_extent(positions: &[LonLat]) -> Option<Self> {
        let mut min = LonLat::new(f64::INFINITY, f64::INFINITY);
        let mut max = LonLat::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in positions {
            if !(p.lon.is_finite() && p.lat.is_finite()) {
                return None;
            }
            min.lon = min.lon.min(p.lon);
            min.lat = min.lat.min(p.lat);
            max.lon = max.lon.max(p.lon);
            max.lat = max.lat.max(p.lat);
        }
        if positions.is_empty() {
            return None;
        }
        Some(Self::containing(LonLat::new(
            (min.lon + max.lon) / 2.0,
            (min.lat + max.lat) / 2.0,
        )))
    }

    /// Recognizes the WGS84 / UTM EPSG codes 32601–32660 and 32701–32760.
    #[must_use]
    pub fn from_crs(crs: CrsId) -> Option<Self> {
        let code = crs.epsg();
        let (base, north) = match code {
            32601..=32660 => (32600, true),
            32701..=32760 => (32700, false),
            _ => return None,
        };
        u8::try_from(code - base)
            .ok()
            .and_then(|number| Self::new(number, north))
    }

    /// Returns the EPSG identifier of this zone.
    #[must_use]
    pub fn crs(self) -> CrsId {
        let base = if self.north { 32600 } else { 32700 };
        CrsId::from_epsg(base + u32::from(self.number))
    }

    /// Zone number, 1–60.
    #[must_use]
    pub fn number(self) -> u8 {
        self.number
    }

    /// Whether this is a northern-hemisphere zone.
    #[must_use]
    pub fn is_north(self) -> bool {
        self.north
    }

    /// Longitude of the zone's central meridian in degrees.
    #[must_use]
    pub fn central_meridian(self) -> f64 {
        f64::from(self.number) * 6.0 - 183.0
    }

    fn false_northing(self) -> f64 {
        if self.north {
            0.0
        } else {
            FALSE_NORTHING_SOUTH
        }
    }
}

fn normalize_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Transverse Mercator coefficients for the WGS84 ellipsoid, from the
/// Krüger series in the third flattening `n` truncated at `n^4`.
#[derive(Debug, Clone)]
struct KrugerSeries {
    /// Rectifying radius.
    radius: f64,
    eccentricity: f64,
    alpha: [f64; 4],
    beta: [f64; 4],
    delta: [f64; 4],
}

impl KrugerSeries {
    fn wgs84() -> Self {
        let n = FLATTENING / (2.0 - FLATTENING);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        Self {
            radius: SEMI_MAJOR / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0),
            eccentricity: 2.0 * n.sqrt() / (1.0 + n),
            alpha: [
                n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0,
                13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0,
                61.0 * n3 / 240.0 - 103.0 * n4 / 140.0,
                49561.0 * n4 / 161_280.0,
            ],
            beta: [
                n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0,
                n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0,
                17.0 * n3 / 480.0 - 37.0 * n4 / 840.0,
                4397.0 * n4 / 161_280.0,
            ],
            delta: [
                2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3 + 116.0 * n4 / 45.0,
                7.0 * n2 / 3.0 - 8.0 * n3 / 5.0 - 227.0 * n4 / 45.0,
                56.0 * n3 / 15.0 - 136.0 * n4 / 35.0,
                4279.0 * n4 / 630.0,
            ],
        }
    }

    /// Geographic (radians, relative to the central meridian) to scaled
    /// `(easting, northing)` before false origin offsets.
    fn forward(&self, phi: f64, lambda: f64) -> (f64, f64) {
        let e = self.eccentricity;
        let sin_phi = phi.sin();
        let t = (sin_phi.atanh() - e * (e * sin_phi).atanh()).sinh();
        let xi_p = t.atan2(lambda.cos());
        let eta_p = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (k, a) in HARMONICS.iter().zip(&self.alpha) {
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }
        let scale = K0 * self.radius;
        (scale * eta, scale * xi)
    }

    /// Inverse of [`Self::forward`], returning `(phi, lambda)` in radians.
    fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let scale = K0 * self.radius;
        let xi = northing / scale;
        let eta = easting / scale;

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (k, b) in HARMONICS.iter().zip(&self.beta) {
            xi_p -= b * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let chi = (xi_p.sin() / eta_p.cosh()).asin();
        let mut phi = chi;
        for (k, d) in HARMONICS.iter().zip(&self.delta) {
            phi += d * (k * chi).sin();
        }
        let lambda = eta_p.sinh().atan2(xi_p.cos());
        (phi, lambda)
    }
}

/// [`Reprojector`] for WGS84 / UTM working systems.
#[derive(Debug, Clone)]
pub struct UtmReprojector {
    series: KrugerSeries,
}

impl UtmReprojector {
    /// Creates a WGS84 / UTM reprojector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            series: KrugerSeries::wgs84(),
        }
    }

    fn zone(crs: CrsId) -> Result<UtmZone> {
        UtmZone::from_crs(crs).ok_or_else(|| ProjectionError::UnsupportedCrs(crs).into())
    }
}

impl Default for UtmReprojector {
    fn default() -> Self {
        Self::new()
    }
}

impl Reprojector for UtmReprojector {
    fn to_geographic(&self, crs: CrsId, point: &Point2) -> Result<LonLat> {
        let zone = Self::zone(crs)?;
        let (phi, lambda) = self
            .series
            .inverse(point.x - FALSE_EASTING, point.y - zone.false_northing());
        let position = LonLat::new(
            normalize_lon(zone.central_meridian() + lambda.to_degrees()),
            phi.to_degrees(),
        );
        if !(position.lon.is_finite() && position.lat.is_finite()) {
            return Err(ProjectionError::NonFinite { crs: CrsId::WGS84 }.into());
        }
        Ok(position)
    }

    fn to_projected(&self, crs: CrsId, position: LonLat) -> Result<Point2> {
        let zone = Self::zone(crs)?;
        if !(position.lon.is_finite() && (MIN_LAT..=MAX_LAT).contains(&position.lat)) {
            return Err(ProjectionError::OutOfDomain {
                crs,
                lon: position.lon,
                lat: position.lat,
            }
            .into());
        }
        let lambda = normalize_lon(position.lon - zone.central_meridian()).to_radians();
        let (easting, northing) = self.series.forward(position.lat.to_radians(), lambda);
        let point = Point2::new(
            easting + FALSE_EASTING,
            northing + zone.false_northing(),
        );
        if !(point.x.is_finite() && point.y.is_finite()) {
            return Err(ProjectionError::NonFinite { crs }.into());
        }
        Ok(point)
    }
}
