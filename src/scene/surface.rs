use super::frame::{Point, Transform};
use super::paint::Paint;
use super::path::Path;

/// Axis-aligned rectangle in the current coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Drawing target for the scene.
///
/// Coordinates passed to the primitives are mapped through the current
/// transform: the composition of every transform pushed and not yet popped.
pub trait Surface {
    /// Compose `transform` onto the current transform.
    fn push_transform(&mut self, transform: Transform);
    /// Restore the transform in effect before the matching push.
    fn pop_transform(&mut self);

    fn line(&mut self, from: Point, to: Point, paint: &Paint);
    fn circle(&mut self, center: Point, radius: f32, paint: &Paint);
    fn rect(&mut self, rect: Rect, paint: &Paint);
    /// Text with its baseline starting at `origin`.
    fn text(&mut self, text: &str, origin: Point, paint: &Paint);
    /// Text laid along `path`, starting `h_offset` into the path and shifted
    /// `v_offset` across it.
    fn text_on_path(&mut self, text: &str, path: &Path, h_offset: f32, v_offset: f32, paint: &Paint);
    fn path(&mut self, path: &Path, paint: &Paint);
}

/// Run `draw` with `transform` pushed, popping it afterwards.
pub fn with_transform<S, F>(surface: &mut S, transform: Transform, draw: F)
where
    S: Surface + ?Sized,
    F: FnOnce(&mut S),
{
    surface.push_transform(transform);
    draw(surface);
    surface.pop_transform();
}

/// Stack of composed transforms, for surfaces that map coordinates eagerly.
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<Transform>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            stack: vec![Transform::IDENTITY],
        }
    }
}

impl TransformStack {
    pub fn current(&self) -> Transform {
        self.stack.last().copied().unwrap_or_default()
    }

    pub fn push(&mut self, transform: Transform) {
        let composed = self.current().then_inner(&transform);
        self.stack.push(composed);
    }

    /// The base identity is never popped.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    #[cfg(test)]
    pub fn apply(&self, p: Point) -> Point {
        self.current().apply(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_composes_and_unwinds() {
        let mut stack = TransformStack::default();
        stack.push(Transform::translate(10.0, 0.0));
        stack.push(Transform::translate(0.0, 5.0));
        assert_eq!(stack.apply(Point::ORIGIN), Point::new(10.0, 5.0));
        assert_eq!(stack.depth(), 2);

        stack.pop();
        assert_eq!(stack.apply(Point::ORIGIN), Point::new(10.0, 0.0));
        stack.pop();
        stack.pop();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current(), Transform::IDENTITY);
    }
}
