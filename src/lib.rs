pub mod cache;
pub mod config;
pub mod crs;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod pipeline;

pub use cache::SampleCache;
pub use config::{load_params, SamplingParams};
pub use crs::{CrsId, LonLat, Reprojector, UtmReprojector};
pub use error::{EstacaError, Result};
pub use geometry::{LinearGeometry, RoadGeometry};
pub use operations::{compute_minimum_count, CountPolicy, LateralRole};
pub use pipeline::{generate_samples, generate_samples_with, SampleRecord, SampleRun};
