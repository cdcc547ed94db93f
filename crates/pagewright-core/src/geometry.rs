//! Element geometry and the host-side geometry query.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Deserializer, Serialize};

/// Replace NaN and infinities with zero.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Sanitize a point so both coordinates are finite.
pub fn sanitize_point(point: Point) -> Point {
    Point::new(finite_or_zero(point.x), finite_or_zero(point.y))
}

/// Sanitize an extent: non-finite or negative dimensions become zero.
pub fn sanitize_size(size: Size) -> Size {
    Size::new(
        finite_or_zero(size.width).max(0.0),
        finite_or_zero(size.height).max(0.0),
    )
}

/// Deserialize a size through [`sanitize_size`].
pub fn deserialize_size<'de, D>(deserializer: D) -> Result<Size, D::Error>
where
    D: Deserializer<'de>,
{
    Size::deserialize(deserializer).map(sanitize_size)
}

/// Position and extent of a rectangular element inside its page.
///
/// `offset` is the top-left corner relative to the page's element area.
/// Values are sanitized on construction and when loaded, so the center is
/// always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredGeometry")]
pub struct ElementGeometry {
    /// Top-left corner.
    pub offset: Point,
    /// Measured width and height.
    pub size: Size,
}

/// Geometry as written in a document file, before sanitizing.
#[derive(Deserialize)]
struct StoredGeometry {
    #[serde(default)]
    offset: Option<Point>,
    size: Size,
}

impl From<StoredGeometry> for ElementGeometry {
    fn from(stored: StoredGeometry) -> Self {
        Self::new(stored.offset.unwrap_or(Point::ZERO), stored.size)
    }
}

impl ElementGeometry {
    /// Create a geometry record.
    pub fn new(offset: Point, size: Size) -> Self {
        Self {
            offset: sanitize_point(offset),
            size: sanitize_size(size),
        }
    }

    /// Geometry whose center lands on `center`.
    pub fn from_center(center: Point, size: Size) -> Self {
        let size = sanitize_size(size);
        let center = sanitize_point(center);
        Self {
            offset: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    /// Midpoint of the element.
    pub fn center(&self) -> Point {
        Point::new(
            self.offset.x + self.size.width / 2.0,
            self.offset.y + self.size.height / 2.0,
        )
    }

    /// Bounding rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.size)
    }

    /// Geometry moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.offset + delta, self.size)
    }
}

impl Default for ElementGeometry {
    fn default() -> Self {
        Self::new(Point::ZERO, Size::ZERO)
    }
}

/// Geometry queries a host answers for the snapper.
///
/// `Id` identifies an element within the container.
pub trait GeometrySource {
    type Id: PartialEq;

    /// Extent of the container the elements live in.
    fn container_extent(&self) -> Size;

    /// Centers of every element in the container except `exclude`,
    /// in stacking order.
    fn sibling_centers(&self, exclude: &Self::Id) -> Vec<Point>;
}
