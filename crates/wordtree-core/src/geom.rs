#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Converts a polar position (angle in degrees, distance from the center) into Cartesian
/// coordinates.
///
/// Angle `0` points up: the angle is shifted by -90° before conversion, so the tree grows
/// clockwise starting at twelve o'clock.
pub fn project(angle_deg: f64, radius: f64) -> Point {
    if radius == 0.0 {
        return Point::origin();
    }
    let theta = (angle_deg - 90.0).to_radians();
    point(radius * theta.cos(), radius * theta.sin())
}

/// Rotates `(distance, 0)` by `angle_deg`, matching SVG `rotate(angle)` on a local x axis.
pub fn along(angle_deg: f64, distance: f64) -> Vector {
    let theta = angle_deg.to_radians();
    vector(distance * theta.cos(), distance * theta.sin())
}
