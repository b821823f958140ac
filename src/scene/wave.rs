//! Sampling of the cosine trace left behind by the rotating vector.

use super::frame::{to_radians, Point};
use super::path::Path;

pub const DEFAULT_SAMPLES: usize = 100;
/// Phase offset between consecutive samples, radians.
pub const DEFAULT_PHASE_STEP: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSampler {
    pub count: usize,
    pub phase_step: f32,
}

impl Default for WaveSampler {
    fn default() -> Self {
        Self {
            count: DEFAULT_SAMPLES,
            phase_step: DEFAULT_PHASE_STEP,
        }
    }
}

impl WaveSampler {
    pub fn new(count: usize, phase_step: f32) -> Self {
        Self { count, phase_step }
    }

    /// Anchor point followed by `count` samples.
    #[cfg(test)]
    pub fn sample(&self, angle_degrees: f32, radius: f32, viewport_height: f32) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.count + 1);
        self.sample_into(&mut points, angle_degrees, radius, viewport_height);
        points
    }

    /// Clear `points` and refill it, keeping its allocation.
    ///
    /// Point `i` of the samples is `(r·cos(a - i·phase_step), -(h/2/count)·i)`.
    pub fn sample_into(
        &self,
        points: &mut Vec<Point>,
        angle_degrees: f32,
        radius: f32,
        viewport_height: f32,
    ) {
        points.clear();
        let phase = to_radians(angle_degrees);
        points.push(Point::new(radius * phase.cos(), 0.0));

        if self.count == 0 {
            return;
        }

        let dy = viewport_height / 2.0 / self.count as f32;
        points.extend((0..self.count).map(|i| {
            let i = i as f32;
            Point::new(radius * (phase - i * self.phase_step).cos(), -dy * i)
        }));
    }

    /// Rebuild `path` from sampled points: a move to the anchor, then one
    /// quadratic segment per sample with control and end point coinciding.
    pub fn build_path(points: &[Point], path: &mut Path) {
        path.reset();
        let Some((anchor, samples)) = points.split_first() else {
            return;
        };
        path.move_to(*anchor);
        for &p in samples {
            path.quad_to(p, p);
        }
    }
}
