pub mod vector_2d;

/// 2D point type in a projected (metric) coordinate system.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;
