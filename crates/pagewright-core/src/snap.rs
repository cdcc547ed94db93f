//! Center alignment snapping for dragged elements.

use crate::geometry::{ElementGeometry, GeometrySource, finite_or_zero, sanitize_point, sanitize_size};
use kurbo::{Point, Size};

/// Default snap tolerance in page pixels.
pub const DEFAULT_SNAP_TOLERANCE: f64 = 2.0;

/// An alignment guide line to display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    /// Coordinate the guide sits on: y for a horizontal guide, x for a
    /// vertical one.
    pub position: f64,
    /// Length of the line: container width for a horizontal guide,
    /// container height for a vertical one.
    pub length: f64,
}

/// Result of an alignment snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// New top-left offset of the moving element.
    pub offset: Point,
    /// Center the offset was derived from.
    pub center: Point,
    /// Guide shown when the vertical centers lined up.
    pub horizontal: Option<Guide>,
    /// Guide shown when the horizontal centers lined up.
    pub vertical: Option<Guide>,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(geometry: ElementGeometry) -> Self {
        Self {
            offset: geometry.offset,
            center: geometry.center(),
            horizontal: None,
            vertical: None,
        }
    }

    /// Whether the horizontal guide should be shown (y snapped).
    pub fn shows_horizontal(&self) -> bool {
        self.horizontal.is_some()
    }

    /// Whether the vertical guide should be shown (x snapped).
    pub fn shows_vertical(&self) -> bool {
        self.vertical.is_some()
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.horizontal.is_some() || self.vertical.is_some()
    }
}

/// Snap the center of `moving` onto sibling centers and the container
/// center.
///
/// Siblings are scanned in order, then the container center is tried as
/// an implicit target. Each axis is compared independently and every match
/// within `tolerance` overwrites the previous one, so the last match wins.
/// Non-finite coordinates count as zero and a negative tolerance as zero.
pub fn snap_to_alignment<I>(
    moving: ElementGeometry,
    siblings: I,
    container: Size,
    tolerance: f64,
) -> SnapResult
where
    I: IntoIterator<Item = Point>,
{
    let moving = ElementGeometry::new(moving.offset, moving.size);
    let container = sanitize_size(container);
    let tolerance = finite_or_zero(tolerance).max(0.0);

    let mut center = moving.center();
    let mut snapped_x = false;
    let mut snapped_y = false;

    let container_center = Point::new(container.width / 2.0, container.height / 2.0);
    let targets = siblings
        .into_iter()
        .map(sanitize_point)
        .chain(std::iter::once(container_center));

    for target in targets {
        if (target.x - center.x).abs() <= tolerance {
            center.x = target.x;
            snapped_x = true;
        }
        if (target.y - center.y).abs() <= tolerance {
            center.y = target.y;
            snapped_y = true;
        }
    }

    SnapResult {
        offset: ElementGeometry::from_center(center, moving.size).offset,
        center,
        horizontal: snapped_y.then_some(Guide {
            position: center.y,
            length: container.width,
        }),
        vertical: snapped_x.then_some(Guide {
            position: center.x,
            length: container.height,
        }),
    }
}

/// Snap an element against the siblings and extent reported by `source`.
pub fn snap_in<S: GeometrySource>(
    source: &S,
    moving_id: &S::Id,
    moving: ElementGeometry,
    tolerance: f64,
) -> SnapResult {
    snap_to_alignment(
        moving,
        source.sibling_centers(moving_id),
        source.container_extent(),
        tolerance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered(x: f64, y: f64) -> ElementGeometry {
        ElementGeometry::from_center(Point::new(x, y), Size::new(100.0, 50.0))
    }

    #[test]
    fn test_snap_sibling_x_and_container_y() {
        let container = Size::new(800.0, 600.0);
        let result = snap_to_alignment(
            centered(198.0, 300.0),
            [Point::new(200.0, 150.0)],
            container,
            2.0,
        );

        assert_eq!(result.center, Point::new(200.0, 300.0));
        assert_eq!(result.offset, Point::new(150.0, 275.0));
        assert_eq!(
            result.vertical,
            Some(Guide {
                position: 200.0,
                length: 600.0
            })
        );
        assert_eq!(
            result.horizontal,
            Some(Guide {
                position: 300.0,
                length: 800.0
            })
        );
    }

    #[test]
    fn test_no_match_returns_input() {
        let moving = centered(123.0, 77.0);
        let result = snap_to_alignment(
            moving,
            [Point::new(10.0, 10.0), Point::new(500.0, 20.0)],
            Size::new(800.0, 600.0),
            2.0,
        );

        assert_eq!(result, SnapResult::none(moving));
        assert!(!result.shows_horizontal());
        assert!(!result.shows_vertical());
        assert!(!result.is_snapped());
    }

    #[test]
    fn test_last_match_wins() {
        let result = snap_to_alignment(
            centered(100.0, 50.0),
            [Point::new(99.0, 0.0), Point::new(100.5, 0.0)],
            Size::new(1000.0, 1000.0),
            2.0,
        );
        assert_eq!(result.center.x, 100.5);
        assert!(result.shows_vertical());
        assert!(!result.shows_horizontal());
    }

    #[test]
    fn test_later_match_compares_against_snapped_value() {
        // After snapping to 101, 104 is within 3 of the snapped center but
        // not of the original 100.
        let result = snap_to_alignment(
            centered(100.0, 0.0),
            [Point::new(101.0, 900.0), Point::new(104.0, 900.0)],
            Size::new(1000.0, 1000.0),
            3.0,
        );
        assert_eq!(result.center.x, 104.0);
    }

    #[test]
    fn test_container_center_overrides_siblings() {
        let result = snap_to_alignment(
            centered(399.0, 10.0),
            [Point::new(398.0, 500.0)],
            Size::new(800.0, 600.0),
            2.0,
        );
        assert_eq!(result.center.x, 400.0);
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let result = snap_to_alignment(
            centered(97.0, 10.0),
            [Point::new(100.0, 900.0)],
            Size::new(1000.0, 1000.0),
            3.0,
        );
        assert_eq!(result.center.x, 100.0);

        let result = snap_to_alignment(
            centered(96.5, 10.0),
            [Point::new(100.0, 900.0)],
            Size::new(1000.0, 1000.0),
            3.0,
        );
        assert_eq!(result.center.x, 96.5);
    }

    #[test]
    fn test_zero_tolerance_requires_exact_match() {
        let result = snap_to_alignment(
            centered(50.0, 60.0),
            [Point::new(50.0, 61.0)],
            Size::new(1000.0, 1000.0),
            0.0,
        );
        assert!(result.shows_vertical());
        assert!(!result.shows_horizontal());
    }

    #[test]
    fn test_malformed_input_treated_as_zero() {
        let result = snap_to_alignment(
            centered(1.0, 1.0),
            [Point::new(f64::NAN, f64::NAN)],
            Size::new(-10.0, f64::NAN),
            f64::NAN,
        );
        // Tolerance collapses to zero and the container center to the
        // origin, so nothing lines up with (1, 1).
        assert!(!result.is_snapped());
        assert_eq!(result.center, Point::new(1.0, 1.0));
    }

    struct Fixture {
        centers: Vec<(u32, Point)>,
    }

    impl GeometrySource for Fixture {
        type Id = u32;

        fn container_extent(&self) -> Size {
            Size::new(800.0, 600.0)
        }

        fn sibling_centers(&self, exclude: &u32) -> Vec<Point> {
            self.centers
                .iter()
                .filter(|(id, _)| id != exclude)
                .map(|(_, p)| *p)
                .collect()
        }
    }

    #[test]
    fn test_snap_in_excludes_moving_element() {
        let fixture = Fixture {
            centers: vec![(1, Point::new(51.0, 51.0)), (2, Point::new(10.0, 200.0))],
        };
        // Element 1 must not snap to its own stale center.
        let result = snap_in(&fixture, &1, centered(50.0, 50.0), 2.0);
        assert!(!result.is_snapped());

        let result = snap_in(&fixture, &2, centered(50.0, 50.0), 2.0);
        assert_eq!(result.center, Point::new(51.0, 51.0));
    }
}
