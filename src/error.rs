use std::path::PathBuf;

use thiserror::Error;

use crate::crs::CrsId;

/// Top-level error type for the Estaca sampling kernel.
#[derive(Debug, Error)]
pub enum EstacaError {
    #[error(transparent)]
    InvalidParameter(#[from] ParameterError),

    #[error(transparent)]
    DegenerateGeometry(#[from] GeometryError),

    #[error(transparent)]
    ReprojectionFailure(#[from] ProjectionError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A sampling parameter outside its admissible range.
#[derive(Debug, Error)]
#[error("invalid parameter {name} = {value}: {requirement}")]
pub struct ParameterError {
    pub name: &'static str,
    pub value: f64,
    pub requirement: &'static str,
}

impl ParameterError {
    /// Checks that `value` is finite and strictly positive.
    pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Self {
                name,
                value,
                requirement: "must be finite and > 0",
            }
            .into())
        }
    }

    /// Checks that `value` is finite and not negative.
    pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(Self {
                name,
                value,
                requirement: "must be finite and >= 0",
            }
            .into())
        }
    }
}

/// Errors raised by malformed road geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polyline needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },

    #[error("road length {length} m is too short to sample")]
    ZeroLength { length: f64 },

    #[error("zero-length tangent at station {station:.3} m")]
    ZeroTangent { station: f64 },
}

/// Errors raised by the coordinate reprojection backend.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("unsupported working CRS {0}")]
    UnsupportedCrs(CrsId),

    #[error("malformed CRS identifier {0:?}")]
    MalformedCrs(String),

    #[error("coordinate ({lon}, {lat}) is outside the domain of {crs}")]
    OutOfDomain { crs: CrsId, lon: f64, lat: f64 },

    #[error("transform to {crs} produced a non-finite coordinate")]
    NonFinite { crs: CrsId },
}

/// Errors raised when the caller's decoded features do not describe one road.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no line feature found")]
    NoLineFeature,

    #[error("expected a single line feature, found {0}")]
    MultipleLineFeatures(usize),
}

/// Errors raised while loading a parameter file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for results using [`EstacaError`].
pub type Result<T> = std::result::Result<T, EstacaError>;
