use super::frame::{to_radians, Point};

/// Rotating vector and its projections for one angle.
///
/// All points are in local coordinates (y up) of the viewport named by the
/// field; the renderer maps them to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vector tip, lower viewport.
    pub tip: Point,
    /// Tip projected onto the upper viewport's horizontal axis.
    pub upper: Point,
    /// Tip projected onto the lower viewport's horizontal axis.
    pub lower: Point,
}

/// Compute the vector tip and its horizontal projections.
///
/// `angle_degrees` is not normalized; any finite value works.
pub fn project(angle_degrees: f32, radius: f32) -> Projection {
    let (sin, cos) = to_radians(angle_degrees).sin_cos();
    let x = radius * cos;
    Projection {
        tip: Point::new(x, radius * sin),
        upper: Point::new(x, 0.0),
        lower: Point::new(x, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_stays_on_circle() {
        let radius = 480.0f32;
        let mut angle = -720.0f32;
        while angle <= 10_000.0 {
            let p = project(angle, radius);
            let r2 = p.tip.x * p.tip.x + p.tip.y * p.tip.y;
            assert!(
                (r2 - radius * radius).abs() / (radius * radius) < 1e-4,
                "angle {angle}: {r2}"
            );
            angle += 7.5;
        }
    }

    #[test]
    fn test_projections_share_x() {
        let p = project(60.0, 100.0);
        assert!((p.tip.x - 50.0).abs() < 1e-3);
        assert!((p.tip.y - 86.602_54).abs() < 1e-3);
        assert_eq!(p.upper, Point::new(p.tip.x, 0.0));
        assert_eq!(p.lower, Point::new(p.tip.x, 0.0));
    }

    #[test]
    fn test_zero_angle_projection_at_radius() {
        let p = project(0.0, 480.0);
        assert_eq!(p.tip, Point::new(480.0, 0.0));
        assert_eq!(p.upper.x, 480.0);
    }

    #[test]
    fn test_zero_radius() {
        let p = project(123.0, 0.0);
        assert_eq!(p.tip.x.abs() + p.tip.y.abs(), 0.0);
    }
}
