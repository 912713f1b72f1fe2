//! Math type aliases and helper functions.
//!
//! The editor works in 2D: positions and scales are [`Vec2`], node
//! transforms are 3x3 affine matrices ([`Mat3`]) and angles are expressed in
//! degrees, the unit shown in the property panel.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3x3 matrix (f32), used as a 2D affine transform.
pub type Mat3 = nalgebra::Matrix3<f32>;

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque white, the default tint of a new sprite.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a color from its components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Returns `[r, g, b, a]`.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

// ===== Helper functions =====

/// Build a 2D affine matrix from translation, scale and rotation (degrees).
///
/// Scale is applied first, then rotation, then translation.
pub fn affine_2d(position: Vec2, scale: Vec2, angle_degrees: f32) -> Mat3 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    #[rustfmt::skip]
    let result = Mat3::new(
        cos * scale.x, -sin * scale.y, position.x,
        sin * scale.x,  cos * scale.y, position.y,
        0.0,            0.0,           1.0,
    );
    result
}

/// Transform a point (translation applies).
pub fn transform_point(m: &Mat3, p: Vec2) -> Vec2 {
    let v = m * nalgebra::Vector3::new(p.x, p.y, 1.0);
    Vec2::new(v.x, v.y)
}

/// Transform a direction (translation ignored).
pub fn transform_vector(m: &Mat3, v: Vec2) -> Vec2 {
    let r = m * nalgebra::Vector3::new(v.x, v.y, 0.0);
    Vec2::new(r.x, r.y)
}

/// Invert an affine matrix, falling back to identity when degenerate
/// (for example a node scaled to zero).
pub fn invert_affine(m: &Mat3) -> Mat3 {
    m.try_inverse().unwrap_or_else(Mat3::identity)
}

/// Translation part of an affine matrix.
pub fn translation(m: &Mat3) -> Vec2 {
    Vec2::new(m[(0, 2)], m[(1, 2)])
}

/// Rotate a vector counter-clockwise by `angle_degrees`.
pub fn rotate_vector(v: Vec2, angle_degrees: f32) -> Vec2 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Angle of a vector in degrees, measured from the +X axis.
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}
