//! Per-frame composition of the scene.

use super::frame::{
    local_transform, offset, raster_transform, to_surface, to_surface_rotated, Point, SceneLayout,
};
use super::paint::{SceneMetrics, SceneStyles};
use super::path::Path;
use super::projector::project;
use super::surface::{with_transform, Rect, Surface};
use super::wave::WaveSampler;

/// Draws the full scene for one angle.
///
/// Owns the styles and the wave buffers so that frames reuse them.
pub struct SceneRenderer {
    sampler: WaveSampler,
    metrics: SceneMetrics,
    styles: SceneStyles,
    label: String,
    caption: String,
    wave_points: Vec<Point>,
    wave_path: Path,
}

impl SceneRenderer {
    pub fn new(
        sampler: WaveSampler,
        metrics: SceneMetrics,
        styles: SceneStyles,
        label: String,
        caption: String,
    ) -> Self {
        Self {
            wave_points: Vec::with_capacity(sampler.count + 1),
            wave_path: Path::new(),
            sampler,
            metrics,
            styles,
            label,
            caption,
        }
    }

    pub fn metrics(&self) -> &SceneMetrics {
        &self.metrics
    }

    /// Draw every step in order. Nothing is drawn on an empty surface.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S, layout: &SceneLayout, angle: f32) {
        if layout.extent.is_empty() {
            return;
        }
        self.sample_wave(layout, angle);
        self.draw_axes(surface, layout);
        self.draw_label(surface);
        self.draw_dashed_circle(surface, layout);
        self.draw_vector(surface, layout, angle);
        self.draw_projections(surface, layout, angle);
        self.draw_wave(surface, layout);
    }

    fn sample_wave(&mut self, layout: &SceneLayout, angle: f32) {
        self.sampler.sample_into(
            &mut self.wave_points,
            angle,
            layout.radius,
            layout.extent.height,
        );
        WaveSampler::build_path(&self.wave_points, &mut self.wave_path);
    }

    fn draw_axes<S: Surface + ?Sized>(&self, surface: &mut S, layout: &SceneLayout) {
        let half_w = layout.extent.width / 2.0;
        let half_h = layout.extent.height / 2.0;
        let paint = &self.styles.axis;

        with_transform(surface, local_transform(layout.upper_center), |s| {
            s.line(Point::new(-half_w, 0.0), Point::new(half_w, 0.0), paint);
            s.line(Point::new(0.0, -half_h), Point::new(0.0, half_h), paint);
        });
        with_transform(surface, local_transform(layout.lower_center), |s| {
            s.line(Point::new(-half_w, 0.0), Point::new(half_w, 0.0), paint);
        });
    }

    fn draw_label<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (left, top, right, bottom) = self.metrics.label_box;
        let (x, y) = self.metrics.label_origin;
        surface.rect(Rect::new(left, top, right, bottom), &self.styles.axis);
        surface.text(&self.label, Point::new(x, y), &self.styles.label);
    }

    fn draw_dashed_circle<S: Surface + ?Sized>(&self, surface: &mut S, layout: &SceneLayout) {
        with_transform(surface, local_transform(layout.lower_center), |s| {
            s.circle(Point::ORIGIN, layout.radius, &self.styles.circle);
        });
    }

    fn draw_vector<S: Surface + ?Sized>(&self, surface: &mut S, layout: &SceneLayout, angle: f32) {
        let tip = to_surface_rotated(layout.lower_center, angle, Point::new(layout.radius, 0.0));
        surface.line(layout.lower_center, tip, &self.styles.vector);
    }

    fn draw_projections<S: Surface + ?Sized>(&self, surface: &mut S, layout: &SceneLayout, angle: f32) {
        let projection = project(angle, layout.radius);
        let marker = self.metrics.marker_radius;

        with_transform(surface, local_transform(layout.upper_center), |s| {
            s.circle(projection.upper, marker, &self.styles.marker);
        });
        with_transform(surface, local_transform(layout.lower_center), |s| {
            s.circle(projection.lower, marker, &self.styles.marker);
        });

        // Solid drop from the tip to the lower axis, dashed rise to the wave head.
        let tip = to_surface(layout.lower_center, projection.tip);
        let head = match self.wave_points.first() {
            Some(&anchor) => offset(layout.upper_center, anchor),
            None => to_surface(layout.upper_center, projection.upper),
        };
        surface.line(
            tip,
            to_surface(layout.lower_center, projection.lower),
            &self.styles.axis,
        );
        surface.line(tip, head, &self.styles.circle);
    }

    fn draw_wave<S: Surface + ?Sized>(&self, surface: &mut S, layout: &SceneLayout) {
        let (h_offset, v_offset) = self.metrics.caption_offset;
        let path = &self.wave_path;
        let styles = &self.styles;
        let caption = &self.caption;
        with_transform(surface, raster_transform(layout.upper_center), |s| {
            s.path(path, &styles.vector);
            s.text_on_path(caption, path, h_offset, v_offset, &styles.label);
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::color::BuiltinResources;
    use crate::scene::frame::{SurfaceExtent, Transform};
    use crate::scene::paint::Paint;
    use crate::scene::surface::TransformStack;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Line(Point, Point),
        Circle(Point, f32),
        Rect(Rect),
        Text(String, Point),
        TextOnPath(String, f32, f32),
        Path(Vec<Point>),
    }

    /// Records every primitive in surface coordinates.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub ops: Vec<(Op, Paint)>,
        transforms: TransformStack,
    }

    impl RecordingSurface {
        pub fn kinds(&self) -> Vec<&'static str> {
            self.ops
                .iter()
                .map(|(op, _)| match op {
                    Op::Line(..) => "line",
                    Op::Circle(..) => "circle",
                    Op::Rect(..) => "rect",
                    Op::Text(..) => "text",
                    Op::TextOnPath(..) => "text_on_path",
                    Op::Path(..) => "path",
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn push_transform(&mut self, transform: Transform) {
            self.transforms.push(transform);
        }

        fn pop_transform(&mut self) {
            self.transforms.pop();
        }

        fn line(&mut self, from: Point, to: Point, paint: &Paint) {
            let op = Op::Line(self.transforms.apply(from), self.transforms.apply(to));
            self.ops.push((op, *paint));
        }

        fn circle(&mut self, center: Point, radius: f32, paint: &Paint) {
            let op = Op::Circle(self.transforms.apply(center), radius);
            self.ops.push((op, *paint));
        }

        fn rect(&mut self, rect: Rect, paint: &Paint) {
            self.ops.push((Op::Rect(rect), *paint));
        }

        fn text(&mut self, text: &str, origin: Point, paint: &Paint) {
            let op = Op::Text(text.to_string(), self.transforms.apply(origin));
            self.ops.push((op, *paint));
        }

        fn text_on_path(&mut self, text: &str, _path: &Path, h: f32, v: f32, paint: &Paint) {
            self.ops.push((Op::TextOnPath(text.to_string(), h, v), *paint));
        }

        fn path(&mut self, path: &Path, paint: &Paint) {
            let mut contours = Vec::new();
            path.flatten_into(&self.transforms.current(), &mut contours);
            let points = contours.into_iter().flatten().collect();
            self.ops.push((Op::Path(points), *paint));
        }
    }

    fn renderer() -> SceneRenderer {
        let metrics = SceneMetrics::default();
        SceneRenderer::new(
            WaveSampler::default(),
            metrics,
            SceneStyles::new(&BuiltinResources, &metrics),
            "label".to_string(),
            "caption".to_string(),
        )
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-2 && (a.y - b.y).abs() < 1e-2
    }

    fn layout() -> SceneLayout {
        SceneLayout::from_extent(SurfaceExtent::new(1000.0, 2000.0), 20.0)
    }

    #[test]
    fn test_draw_order() {
        let mut surface = RecordingSurface::default();
        renderer().render(&mut surface, &layout(), 10.0);
        assert_eq!(
            surface.kinds(),
            vec![
                "line", "line", "line", // axes
                "rect", "text", // label
                "circle", // dashed circle
                "line",   // vector
                "circle", "circle", "line", "line", // projections
                "path", "text_on_path", // wave
            ]
        );
        assert_eq!(surface.transforms.depth(), 0);
    }

    #[test]
    fn test_empty_surface_draws_nothing() {
        let mut surface = RecordingSurface::default();
        renderer().render(&mut surface, &SceneLayout::default(), 10.0);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_zero_angle_geometry() {
        let mut surface = RecordingSurface::default();
        renderer().render(&mut surface, &layout(), 0.0);
        let ops = &surface.ops;

        // Dashed circle on the lower center with the fitted radius
        assert_eq!(ops[5].0, Op::Circle(Point::new(500.0, 1500.0), 480.0));
        assert!(ops[5].1.dash.is_some());

        // Vector points right along the lower axis
        match &ops[6].0 {
            Op::Line(from, to) => {
                assert!(close(*from, Point::new(500.0, 1500.0)));
                assert!(close(*to, Point::new(980.0, 1500.0)));
            }
            other => panic!("expected vector line, got {other:?}"),
        }

        // Projection markers at local x = 480
        assert_eq!(ops[7].0, Op::Circle(Point::new(980.0, 1000.0), 20.0));
        assert_eq!(ops[8].0, Op::Circle(Point::new(980.0, 1500.0), 20.0));

        // Wave starts at the upper projection and rises toward the top edge
        match &ops[11].0 {
            Op::Path(points) => {
                assert!(close(points[0], Point::new(980.0, 1000.0)));
                let last = points[points.len() - 1];
                assert!(last.y < 1000.0 && last.y >= 0.0);
            }
            other => panic!("expected wave path, got {other:?}"),
        }
    }

    #[test]
    fn test_vector_turns_counter_clockwise() {
        let mut surface = RecordingSurface::default();
        renderer().render(&mut surface, &layout(), 90.0);
        match &surface.ops[6].0 {
            Op::Line(_, to) => assert!(close(*to, Point::new(500.0, 1020.0))),
            other => panic!("expected vector line, got {other:?}"),
        }

        // Connectors: tip down to the lower axis, tip up to the upper axis
        match (&surface.ops[9].0, &surface.ops[10].0) {
            (Op::Line(a0, a1), Op::Line(b0, b1)) => {
                assert!(close(*a0, Point::new(500.0, 1020.0)));
                assert!(close(*a1, Point::new(500.0, 1500.0)));
                assert!(close(*b0, *a0));
                assert!(close(*b1, Point::new(500.0, 1000.0)));
            }
            other => panic!("expected connector lines, got {other:?}"),
        }
    }

    #[test]
    fn test_connectors_meet_vector_tip_and_wave_head() {
        let mut surface = RecordingSurface::default();
        renderer().render(&mut surface, &layout(), 37.0);
        let ops = &surface.ops;
        let vector_tip = match &ops[6].0 {
            Op::Line(_, to) => *to,
            other => panic!("expected vector line, got {other:?}"),
        };
        let wave_head = match &ops[11].0 {
            Op::Path(points) => points[0],
            other => panic!("expected wave path, got {other:?}"),
        };
        match (&ops[9].0, &ops[10].0) {
            (Op::Line(solid, _), Op::Line(dashed_from, dashed_to)) => {
                assert!(close(*solid, vector_tip));
                assert!(close(*dashed_from, vector_tip));
                assert!(close(*dashed_to, wave_head));
            }
            other => panic!("expected connector lines, got {other:?}"),
        }
    }

    #[test]
    fn test_styles_do_not_vary_with_angle() {
        let mut r = renderer();
        let mut a = RecordingSurface::default();
        let mut b = RecordingSurface::default();
        r.render(&mut a, &layout(), 0.0);
        r.render(&mut b, &layout(), 275.0);
        let paints_a: Vec<Paint> = a.ops.iter().map(|(_, p)| *p).collect();
        let paints_b: Vec<Paint> = b.ops.iter().map(|(_, p)| *p).collect();
        assert_eq!(paints_a, paints_b);
    }
}
