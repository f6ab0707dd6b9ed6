//! Affine matrix algebra.
//!
//! Matrices are stored as the six numbers `(a, b, c, d, e, f)` of the
//! column-major 2x3 form:
//!
//! ```text
//! | a  c  e |
//! | b  d  f |
//! ```
//!
//! which is exactly the layout of [`glam::DAffine2::from_cols_array`], so
//! composition and point mapping delegate to glam.

use crate::error::{CanvasError, CanvasResult};
use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A 2D point or vector.
pub type Point = DVec2;

/// Below this magnitude a determinant is treated as zero.
const DETERMINANT_EPSILON: f64 = 1e-12;

/// Immutable 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Result of [`AffineMatrix::decompose`], also accepted by
/// [`AffineMatrix::compose`]. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformOptions {
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl AffineMatrix {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn from_translation(offset: Point) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, offset.x, offset.y)
    }

    pub fn from_rotation(angle_degrees: f64) -> Self {
        if angle_degrees == 0.0 {
            return Self::IDENTITY;
        }
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    pub fn from_scale(scale_x: f64, scale_y: f64) -> Self {
        Self::new(scale_x, 0.0, 0.0, scale_y, 0.0, 0.0)
    }

    pub fn from_skew_x(skew_degrees: f64) -> Self {
        Self::new(1.0, 0.0, skew_degrees.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    pub fn from_skew_y(skew_degrees: f64) -> Self {
        Self::new(1.0, skew_degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    pub fn to_cols_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    #[inline]
    pub fn to_affine(&self) -> DAffine2 {
        DAffine2::from_cols_array(&self.to_cols_array())
    }

    #[inline]
    pub fn from_affine(affine: DAffine2) -> Self {
        let [a, b, c, d, e, f] = affine.to_cols_array();
        Self::new(a, b, c, d, e, f)
    }

    pub fn translation(&self) -> Point {
        Point::new(self.e, self.f)
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() > DETERMINANT_EPSILON
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Composes two matrices; `other` is applied first.
    pub fn multiply(&self, other: &AffineMatrix) -> AffineMatrix {
        Self::from_affine(self.to_affine() * other.to_affine())
    }

    /// Inverse of the matrix, or the identity when the matrix is singular.
    ///
    /// Singular matrices show up routinely (zero-scaled shapes, zero-length
    /// drags), so this never fails. Use [`AffineMatrix::try_invert`] when the
    /// caller needs to know.
    pub fn invert(&self) -> AffineMatrix {
        match self.try_invert() {
            Ok(inverse) => inverse,
            Err(_) => {
                tracing::trace!(matrix = ?self.to_cols_array(), "singular matrix, using identity");
                Self::IDENTITY
            }
        }
    }

    pub fn try_invert(&self) -> CanvasResult<AffineMatrix> {
        if !self.is_invertible() {
            return Err(CanvasError::SingularMatrix {
                determinant: self.determinant(),
            });
        }
        Ok(Self::from_affine(self.to_affine().inverse()))
    }

    /// Maps a position through the matrix.
    #[inline]
    pub fn transform_point(&self, point: Point) -> Point {
        self.to_affine().transform_point2(point)
    }

    /// Maps a vector through the matrix, ignoring the translation terms.
    #[inline]
    pub fn transform_vector(&self, vector: Point) -> Point {
        self.to_affine().transform_vector2(vector)
    }

    /// Splits the matrix into rotation, scale, horizontal skew and translation.
    ///
    /// `skew_y` is always reported as zero: any vertical skew is folded into
    /// the other components. Composing the result gives back the same matrix.
    pub fn decompose(&self) -> TransformOptions {
        let denom = self.a * self.a + self.b * self.b;
        if denom == 0.0 {
            return TransformOptions {
                angle: 0.0,
                scale_x: 0.0,
                scale_y: 0.0,
                skew_x: 0.0,
                skew_y: 0.0,
                translate_x: self.e,
                translate_y: self.f,
            };
        }
        let scale_x = denom.sqrt();
        TransformOptions {
            angle: self.b.atan2(self.a).to_degrees(),
            scale_x,
            scale_y: (self.a * self.d - self.c * self.b) / scale_x,
            skew_x: (self.a * self.c + self.b * self.d).atan2(denom).to_degrees(),
            skew_y: 0.0,
            translate_x: self.e,
            translate_y: self.f,
        }
    }

    /// Builds `translate · rotate · scale · skewX · skewY`.
    pub fn compose(options: &TransformOptions) -> AffineMatrix {
        let mut matrix =
            Self::from_translation(Point::new(options.translate_x, options.translate_y));
        if options.angle != 0.0 {
            matrix = matrix * Self::from_rotation(options.angle);
        }
        let dimensions =
            Self::dimensions(options.scale_x, options.scale_y, options.skew_x, options.skew_y);
        if !dimensions.is_identity() {
            matrix = matrix * dimensions;
        }
        matrix
    }

    /// The scale and skew part of a composed matrix, without rotation or translation.
    pub fn dimensions(scale_x: f64, scale_y: f64, skew_x: f64, skew_y: f64) -> AffineMatrix {
        let mut matrix = Self::from_scale(scale_x, scale_y);
        if skew_x != 0.0 {
            matrix = matrix * Self::from_skew_x(skew_x);
        }
        if skew_y != 0.0 {
            matrix = matrix * Self::from_skew_y(skew_y);
        }
        matrix
    }

    pub fn approx_eq(&self, other: &AffineMatrix, epsilon: f64) -> bool {
        self.to_cols_array()
            .iter()
            .zip(other.to_cols_array())
            .all(|(lhs, rhs)| (lhs - rhs).abs() <= epsilon)
    }
}

impl Mul for AffineMatrix {
    type Output = AffineMatrix;

    fn mul(self, rhs: AffineMatrix) -> AffineMatrix {
        self.multiply(&rhs)
    }
}

impl From<DAffine2> for AffineMatrix {
    fn from(affine: DAffine2) -> Self {
        Self::from_affine(affine)
    }
}

impl From<AffineMatrix> for DAffine2 {
    fn from(matrix: AffineMatrix) -> Self {
        matrix.to_affine()
    }
}

/// Rotates `point` around `origin` by `angle_degrees`.
pub fn rotate_point(point: Point, origin: Point, angle_degrees: f64) -> Point {
    if angle_degrees == 0.0 {
        return point;
    }
    origin + AffineMatrix::from_rotation(angle_degrees).transform_vector(point - origin)
}

/// Converts a point from the plane described by `from` to the plane
/// described by `to`. `None` stands for the scene plane.
pub fn send_point_to_plane(
    point: Point,
    from: Option<&AffineMatrix>,
    to: Option<&AffineMatrix>,
) -> Point {
    let from = from.copied().unwrap_or_default();
    let inverse_to = to.map(AffineMatrix::invert).unwrap_or_default();
    (inverse_to * from).transform_point(point)
}

/// Like [`send_point_to_plane`] but ignores translation.
pub fn send_vector_to_plane(
    vector: Point,
    from: Option<&AffineMatrix>,
    to: Option<&AffineMatrix>,
) -> Point {
    let from = from.copied().unwrap_or_default();
    let inverse_to = to.map(AffineMatrix::invert).unwrap_or_default();
    (inverse_to * from).transform_vector(vector)
}

/// Collapses a stack of nested plane matrices, outermost first, into the
/// single matrix mapping the innermost plane to the scene.
pub fn flatten_planes(stack: &[AffineMatrix]) -> AffineMatrix {
    stack.iter().fold(AffineMatrix::IDENTITY, |acc, plane| acc * *plane)
}

/// Converts a point between two arbitrarily nested planes, each described by
/// its stack of matrices from the outermost container inwards.
pub fn send_point_through_planes(
    point: Point,
    from_stack: &[AffineMatrix],
    to_stack: &[AffineMatrix],
) -> Point {
    let from = flatten_planes(from_stack);
    let to = flatten_planes(to_stack);
    send_point_to_plane(point, Some(&from), Some(&to))
}
