use super::frame::{Point, Transform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    QuadTo { control: Point, end: Point },
}

/// A curve made of quadratic segments.
///
/// `reset` keeps the allocation so one path can be rebuilt every frame.
#[derive(Debug, Clone, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

/// Subdivisions per quadratic segment when flattening.
const QUAD_STEPS: usize = 8;

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.segments.clear();
    }

    pub fn move_to(&mut self, p: Point) {
        self.segments.push(Segment::MoveTo(p));
    }

    pub fn quad_to(&mut self, control: Point, end: Point) {
        self.segments.push(Segment::QuadTo { control, end });
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flatten into polylines, one per contour, with `transform` applied.
    ///
    /// Output contours are appended to `out`; each contour starts at a
    /// `MoveTo`. Segments before the first `MoveTo` start from the origin.
    pub fn flatten_into(&self, transform: &Transform, out: &mut Vec<Vec<Point>>) {
        let mut current = Point::ORIGIN;
        let mut contour: Vec<Point> = Vec::new();

        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) => {
                    if contour.len() > 1 {
                        out.push(std::mem::take(&mut contour));
                    }
                    contour.clear();
                    contour.push(transform.apply(p));
                    current = p;
                }
                Segment::QuadTo { control, end } => {
                    if contour.is_empty() {
                        contour.push(transform.apply(current));
                    }
                    for step in 1..=QUAD_STEPS {
                        let t = step as f32 / QUAD_STEPS as f32;
                        contour.push(transform.apply(quad_point(current, control, end, t)));
                    }
                    current = end;
                }
            }
        }

        if contour.len() > 1 {
            out.push(contour);
        }
    }
}

fn quad_point(start: Point, control: Point, end: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * start.x + 2.0 * mt * t * control.x + t * t * end.x,
        mt * mt * start.y + 2.0 * mt * t * control.y + t * t * end.y,
    )
}

/// Position and unit direction at arc length `distance` along a polyline.
///
/// Returns `None` when `distance` is negative or past the end.
pub fn point_at_length(polyline: &[Point], distance: f32) -> Option<(Point, Point)> {
    if distance < 0.0 {
        return None;
    }
    let mut walked = 0.0;
    for pair in polyline.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = a.distance(b);
        if len <= f32::EPSILON {
            continue;
        }
        if walked + len >= distance {
            let t = (distance - walked) / len;
            let dir = Point::new((b.x - a.x) / len, (b.y - a.y) / len);
            return Some((Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t), dir));
        }
        walked += len;
    }
    None
}
