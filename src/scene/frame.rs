//! Coordinate frames for the two stacked viewports.
//!
//! Scene content is authored in *local* coordinates: origin at a viewport
//! center, y pointing up. Surfaces are rasters with y pointing down. Every
//! conversion between the two goes through this module, either as a direct
//! point mapping or as an affine [`Transform`] pushed onto a surface.

use std::f32::consts::PI;

/// Degrees to radians.
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees / 180.0 * PI
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceExtent {
    pub width: f32,
    pub height: f32,
}

impl SurfaceExtent {
    /// Build an extent, clamping negative or non-finite sizes to 0.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

fn clamp_dimension(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// 2D affine transform in surface space.
///
/// Maps `(x, y)` to `(a*x + c*y + tx, b*x + d*y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translate(dx: f32, dy: f32) -> Self {
        Self {
            tx: dx,
            ty: dy,
            ..Self::IDENTITY
        }
    }

    /// Rotation in raster space. Positive degrees turn clockwise on screen.
    pub fn rotate(degrees: f32) -> Self {
        let (sin, cos) = to_radians(degrees).sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Mirror across the x axis (math y-up to raster y-down).
    pub fn flip_y() -> Self {
        Self {
            d: -1.0,
            ..Self::IDENTITY
        }
    }

    /// `self` applied after `inner`: `self.then_inner(inner).apply(p) == self.apply(inner.apply(p))`.
    pub fn then_inner(&self, inner: &Transform) -> Transform {
        Transform {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            tx: self.a * inner.tx + self.c * inner.ty + self.tx,
            ty: self.b * inner.tx + self.d * inner.ty + self.ty,
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.tx,
            y: self.b * p.x + self.d * p.y + self.ty,
        }
    }

    /// Uniform scale factor of the linear part (1.0 for rigid motions).
    pub fn scale_factor(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

/// Transform from local coordinates around `center` to surface coordinates.
pub fn local_transform(center: Point) -> Transform {
    Transform::translate(center.x, center.y).then_inner(&Transform::flip_y())
}

/// Like [`local_transform`], with the content rotated by `-angle_degrees`
/// around `center` in surface space.
pub fn rotated_transform(center: Point, angle_degrees: f32) -> Transform {
    Transform::translate(center.x, center.y)
        .then_inner(&Transform::rotate(-angle_degrees))
        .then_inner(&Transform::flip_y())
}

/// Translation only, for content already authored in raster orientation.
pub fn raster_transform(center: Point) -> Transform {
    Transform::translate(center.x, center.y)
}

/// Map a local point (y up) around `center` into surface coordinates (y down).
#[inline]
pub fn to_surface(center: Point, local: Point) -> Point {
    Point::new(center.x + local.x, center.y - local.y)
}

/// Rotate `local` by `-angle_degrees` around `center`, then map to surface
/// coordinates. A positive angle turns the point counter-clockwise on screen.
pub fn to_surface_rotated(center: Point, angle_degrees: f32, local: Point) -> Point {
    rotated_transform(center, angle_degrees).apply(local)
}

/// Offset a raster-oriented point (y down) from `center`.
#[inline]
pub fn offset(center: Point, raster: Point) -> Point {
    Point::new(center.x + raster.x, center.y + raster.y)
}

/// Radius and viewport centers derived from the surface extent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneLayout {
    pub extent: SurfaceExtent,
    pub radius: f32,
    /// Center of the upper viewport: full axis cross, wave trace.
    pub upper_center: Point,
    /// Center of the lower viewport: dashed circle and rotating vector.
    pub lower_center: Point,
}

impl SceneLayout {
    pub fn from_extent(extent: SurfaceExtent, margin: f32) -> Self {
        let radius = ((extent.width / 2.0).min(extent.height / 4.0) - margin).max(0.0);
        Self {
            extent,
            radius,
            upper_center: Point::new(extent.width / 2.0, extent.height / 2.0),
            lower_center: Point::new(extent.width / 2.0, extent.height / 4.0 * 3.0),
        }
    }
}
