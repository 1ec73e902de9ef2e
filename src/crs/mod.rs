//! Coordinate reference systems and point reprojection.
//!
//! Geometric work happens in a projected, metric *working CRS*; results are
//! handed back in geographic WGS84 longitude/latitude. The [`Reprojector`]
//! trait is the seam between the two, and [`UtmReprojector`] is the built-in
//! backend for the UTM zones that local road surveys use.

mod utm;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::math::Point2;

pub use utm::{UtmReprojector, UtmZone};

/// EPSG code of geographic WGS84 (longitude/latitude in degrees).
pub const WGS84_EPSG: u32 = 4326;

/// Identifier of a coordinate reference system, printed as `EPSG:<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CrsId {
    epsg: u32,
}

impl CrsId {
    /// Geographic WGS84.
    pub const WGS84: Self = Self { epsg: WGS84_EPSG };

    /// Creates an identifier from an EPSG code.
    #[must_use]
    pub const fn from_epsg(epsg: u32) -> Self {
        Self { epsg }
    }

    /// Returns the EPSG code.
    #[must_use]
    pub const fn epsg(self) -> u32 {
        self.epsg
    }
}

impl fmt::Display for CrsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

impl FromStr for CrsId {
    type Err = ProjectionError;

    /// Parses `EPSG:32723` (any case) or a bare EPSG code.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let code = match trimmed.split_once(':') {
            Some((authority, code)) if authority.eq_ignore_ascii_case("epsg") => code,
            Some(_) => return Err(ProjectionError::MalformedCrs(s.to_owned())),
            None => trimmed,
        };
        code.trim()
            .parse::<u32>()
            .map(Self::from_epsg)
            .map_err(|_| ProjectionError::MalformedCrs(s.to_owned()))
    }
}

impl From<CrsId> for String {
    fn from(crs: CrsId) -> Self {
        crs.to_string()
    }
}

impl TryFrom<String> for CrsId {
    type Error = ProjectionError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// A geographic WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    /// Creates a new geographic position.
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Point-by-point transform between a projected working CRS and WGS84.
pub trait Reprojector {
    /// Transforms a point of the projected CRS `crs` into WGS84.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError`] when `crs` is not supported by this backend
    /// or the point cannot be transformed.
    fn to_geographic(&self, crs: CrsId, point: &Point2) -> Result<LonLat>;

    /// Transforms a WGS84 position into the projected CRS `crs`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError`] when `crs` is not supported by this backend
    /// or the position lies outside its domain.
    fn to_projected(&self, crs: CrsId, position: LonLat) -> Result<Point2>;
}

impl<R: Reprojector + ?Sized> Reprojector for &R {
    fn to_geographic(&self, crs: CrsId, point: &Point2) -> Result<LonLat> {
        (**self).to_geographic(crs, point)
    }

    fn to_projected(&self, crs: CrsId, position: LonLat) -> Result<Point2> {
        (**self).to_projected(crs, position)
    }
}
