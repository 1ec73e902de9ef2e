use std::f64::consts::FRAC_PI_2;

use estaca::crs::CrsId;
use estaca::math::Point2;
use estaca::RoadGeometry;

pub const WORKING_CRS: CrsId = CrsId::from_epsg(32723);

/// Origin of the synthetic roads, inside UTM zone 23S.
pub const ORIGIN: (f64, f64) = (450_000.0, 7_400_000.0);

pub fn straight_road(length: f64) -> RoadGeometry {
    let (x0, y0) = ORIGIN;
    RoadGeometry::from_projected(
        vec![Point2::new(x0, y0), Point2::new(x0 + length, y0)],
        WORKING_CRS,
    )
    .unwrap_or_else(|e| panic!("straight road: {e}"))
}

/// 3 km east, a 90° left bend of radius `radius` drawn every 5 m, 3 km north.
pub fn bend_road(radius: f64) -> RoadGeometry {
    let (x0, y0) = ORIGIN;
    let mut vertices = vec![Point2::new(x0, y0), Point2::new(x0 + 3_000.0, y0)];
    let (cx, cy) = (x0 + 3_000.0, y0 + radius);
    let arc_len = radius * FRAC_PI_2;
    let steps = (arc_len / 5.0).ceil() as u32;
    for i in 1..=steps {
        let theta = -FRAC_PI_2 + FRAC_PI_2 * f64::from(i) / f64::from(steps);
        vertices.push(Point2::new(cx + radius * theta.cos(), cy + radius * theta.sin()));
    }
    let end = vertices[vertices.len() - 1];
    vertices.push(Point2::new(end.x, end.y + 3_000.0));
    RoadGeometry::from_projected(vertices, WORKING_CRS)
        .unwrap_or_else(|e| panic!("bend road: {e}"))
}
