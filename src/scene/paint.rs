use palette::Srgb;

use crate::color::Resources;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Typeface {
    #[default]
    Default,
    Bold,
}

/// On/off dash intervals, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub on: f32,
    pub off: f32,
    pub phase: f32,
}

impl Dash {
    pub fn new(on: f32, off: f32) -> Self {
        Self { on, off, phase: 0.0 }
    }

    /// Whether the stroke is drawn at arc length `distance`.
    pub fn is_on(&self, distance: f32) -> bool {
        let period = self.on + self.off;
        if period <= 0.0 || self.off <= 0.0 {
            return true;
        }
        (distance + self.phase).rem_euclid(period) < self.on
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Srgb<u8>,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub dash: Option<Dash>,
    pub text_size: f32,
    pub typeface: Typeface,
}

impl Paint {
    pub fn stroke(color: Srgb<u8>, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: width,
            dash: None,
            text_size: 0.0,
            typeface: Typeface::Default,
        }
    }

    pub fn fill(color: Srgb<u8>) -> Self {
        Self {
            style: PaintStyle::Fill,
            ..Self::stroke(color, 0.0)
        }
    }

    pub fn text(color: Srgb<u8>, size: f32, typeface: Typeface) -> Self {
        Self {
            text_size: size,
            typeface,
            ..Self::fill(color)
        }
    }

    pub fn dashed(mut self, dash: Dash) -> Self {
        self.dash = Some(dash);
        self
    }
}

/// Pixel metrics for the scene's fixed elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneMetrics {
    /// Subtracted from the fitted radius.
    pub margin: f32,
    pub stroke_width: f32,
    pub marker_radius: f32,
    pub dash_on: f32,
    pub dash_off: f32,
    /// Label box as (left, top, right, bottom).
    pub label_box: (f32, f32, f32, f32),
    pub label_origin: (f32, f32),
    pub text_size: f32,
    /// Caption offsets along and across the wave path.
    pub caption_offset: (f32, f32),
}

impl Default for SceneMetrics {
    fn default() -> Self {
        Self {
            margin: 20.0,
            stroke_width: 5.0,
            marker_radius: 20.0,
            dash_on: 10.0,
            dash_off: 10.0,
            label_box: (20.0, 20.0, 500.0, 120.0),
            label_origin: (35.0, 90.0),
            text_size: 50.0,
            caption_offset: (1000.0, -20.0),
        }
    }
}

impl SceneMetrics {
    /// Every metric multiplied by `factor`; strokes never drop below one pixel.
    pub fn scaled(&self, factor: f32) -> Self {
        let s = |v: f32| v * factor;
        Self {
            margin: s(self.margin),
            stroke_width: s(self.stroke_width).max(1.0),
            marker_radius: s(self.marker_radius),
            dash_on: s(self.dash_on).max(1.0),
            dash_off: s(self.dash_off).max(1.0),
            label_box: (
                s(self.label_box.0),
                s(self.label_box.1),
                s(self.label_box.2),
                s(self.label_box.3),
            ),
            label_origin: (s(self.label_origin.0), s(self.label_origin.1)),
            text_size: s(self.text_size),
            caption_offset: (s(self.caption_offset.0), s(self.caption_offset.1)),
        }
    }
}

/// One paint per draw step, built once and reused for every frame.
#[derive(Debug, Clone)]
pub struct SceneStyles {
    pub axis: Paint,
    pub label: Paint,
    pub circle: Paint,
    pub vector: Paint,
    pub marker: Paint,
}

/// Fallback for roles the resources do not define.
pub fn white() -> Srgb<u8> {
    Srgb::new(0xFF, 0xFF, 0xFF)
}

impl SceneStyles {
    pub fn new(resources: &dyn Resources, metrics: &SceneMetrics) -> Self {
        let color = |role: &str| resources.color(role).unwrap_or_else(white);
        let width = metrics.stroke_width;

        Self {
            axis: Paint::stroke(color("axis"), width),
            label: Paint::text(color("label"), metrics.text_size, resources.typeface()),
            circle: Paint::stroke(color("circle"), width)
                .dashed(Dash::new(metrics.dash_on, metrics.dash_off)),
            vector: Paint::stroke(color("vector"), width),
            marker: Paint::fill(color("marker")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BuiltinResources;

    #[test]
    fn test_dash_pattern() {
        let dash = Dash::new(10.0, 10.0);
        assert!(dash.is_on(0.0));
        assert!(dash.is_on(9.9));
        assert!(!dash.is_on(10.0));
        assert!(!dash.is_on(19.9));
        assert!(dash.is_on(20.0));
        assert!(Dash::new(5.0, 0.0).is_on(7.0));
    }

    #[test]
    fn test_scaled_metrics_keep_strokes_visible() {
        let m = SceneMetrics::default().scaled(0.1);
        assert_eq!(m.stroke_width, 1.0);
        assert!((m.margin - 2.0).abs() < 1e-5);
        assert!((m.label_box.2 - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_styles_are_distinct_per_step() {
        let styles = SceneStyles::new(&BuiltinResources, &SceneMetrics::default());
        assert_eq!(styles.axis.style, PaintStyle::Stroke);
        assert!(styles.axis.dash.is_none());
        assert_eq!(styles.marker.style, PaintStyle::Fill);
        assert!(styles.circle.dash.is_some());
        assert_ne!(styles.circle.color, styles.vector.color);
        assert_eq!(styles.label.typeface, Typeface::Bold);
        assert_eq!(styles.label.text_size, 50.0);
    }
}
