//! Square matrix types in row major order
//!
//! Named constructors are associated functions returning values, so
//! building a transform reads as `Mat4::translate(..) * Mat4::rotation(..)`.
//! Storage is a flat array indexed `row * dim + col`; `mat[i]` gives flat
//! access to it.

use std::ops::{Index, IndexMut, Mul};

use crate::scalar::Scalar;
use crate::vec::{Vec3, Vec4};

/// A 4x4 row major matrix
///
/// The translation components live in the last column (flat indices 3, 7
/// and 11), points transform as row · vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4<T> {
    m: [T; 16],
}

/// A 3x3 row major matrix for 2D homogeneous transforms
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3<T> {
    m: [T; 9],
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Mat4<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Mat4<T> {}
unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Mat3<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Mat3<T> {}

impl<T: Scalar> Mat4<T> {
    /// The identity matrix
    pub fn identity() -> Self {
        let mut mat = Self::splat(T::ZERO);
        mat.fill_diagonal(T::ONE);
        mat
    }

    /// A matrix with every entry set to `value`
    pub fn splat(value: T) -> Self {
        Self { m: [value; 16] }
    }

    /// A translation by `(tx, ty, tz)`
    pub fn translate(tx: T, ty: T, tz: T) -> Self {
        let mut mat = Self::identity();
        mat.m[3] = tx;
        mat.m[7] = ty;
        mat.m[11] = tz;
        mat
    }

    /// A scale by `(sx, sy, sz)`
    pub fn scale(sx: T, sy: T, sz: T) -> Self {
        let mut mat = Self::identity();
        mat.m[0] = sx;
        mat.m[5] = sy;
        mat.m[10] = sz;
        mat
    }

    /// A rotation of `angle` radians around `axis`
    pub fn rotation(angle: T, axis: Vec3<T>) -> Self {
        let ax = axis.normalize();
        let s = angle.sin();
        let c = angle.cos();
        let c1 = T::ONE - c;
        let (x, y, z) = (ax.x, ax.y, ax.z);

        let mut mat = Self::identity();
        mat.set_row(0, Vec3::new(x * x * c1 + c, x * y * c1 - z * s, x * z * c1 + y * s));
        mat.set_row(1, Vec3::new(x * y * c1 + z * s, y * y * c1 + c, y * z * c1 - x * s));
        mat.set_row(2, Vec3::new(x * z * c1 - y * s, y * z * c1 + x * s, z * z * c1 + c));
        mat
    }

    /// A full model transform from Euler angles (radians), translation and
    /// scale
    ///
    /// Rotation order is Rx * Ry * Rz (pitch about X, yaw about Y, roll
    /// about Z), applied after the scale and before the translation.
    pub fn transform(rotation: Vec3<T>, translation: Vec3<T>, scale: Vec3<T>) -> Self {
        let sx = rotation.x.sin();
        let cx = rotation.x.cos();
        let sy = rotation.y.sin();
        let cy = rotation.y.cos();
        let sz = rotation.z.sin();
        let cz = rotation.z.cos();

        let left = Vec3::new(
            cy * cz * scale.x,
            (sx * sy * cz + cx * sz) * scale.x,
            (-cx * sy * cz + sx * sz) * scale.x,
        );
        let up = Vec3::new(
            -cy * sz * scale.y,
            (-sx * sy * sz + cx * cz) * scale.y,
            (cx * sy * sz + sx * cz) * scale.y,
        );
        let forward = Vec3::new(sy * scale.z, -sx * cy * scale.z, cx * cy * scale.z);

        let mut result = Self::identity();
        result.set_col(0, left);
        result.set_col(1, up);
        result.set_col(2, forward);
        result.set_col(3, translation);
        result
    }

    /// Overwrite the first three entries of `row`
    pub fn set_row(&mut self, row: usize, val: Vec3<T>) {
        let start = row * 4;
        self.m[start] = val.x;
        self.m[start + 1] = val.y;
        self.m[start + 2] = val.z;
    }

    /// Overwrite the first three entries of `col`
    pub fn set_col(&mut self, col: usize, val: Vec3<T>) {
        self.m[col] = val.x;
        self.m[col + 4] = val.y;
        self.m[col + 8] = val.z;
    }

    /// Write `value` along the main diagonal
    pub fn fill_diagonal(&mut self, value: T) {
        for row in 0..4 {
            self.m[row * 4 + row] = value;
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// The transpose as a new matrix
    pub fn transposed(&self) -> Self {
        let mut out = *self;
        for row in 0..4 {
            for col in (row + 1)..4 {
                out.m.swap(row * 4 + col, col * 4 + row);
            }
        }
        out
    }

    /// Transpose only the upper left 3x3 block, in place
    ///
    /// Inverts a pure rotation without touching translation or the last
    /// row.
    pub fn transpose_block3(&mut self) -> &mut Self {
        self.m.swap(1, 4);
        self.m.swap(2, 8);
        self.m.swap(6, 9);
        self
    }

    /// The entries as a flat row major array
    pub fn to_array(self) -> [T; 16] {
        self.m
    }
}

impl<T: Scalar> Default for Mat4<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T> From<[T; 16]> for Mat4<T> {
    fn from(m: [T; 16]) -> Self {
        Self { m }
    }
}

impl<T> Index<usize> for Mat4<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.m[i]
    }
}

impl<T> IndexMut<usize> for Mat4<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.m[i]
    }
}

impl<T: Scalar> Mul for Mat4<T> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let mut out = Self::splat(T::ZERO);
        for row in 0..4 {
            for col in 0..4 {
                let mut acc = T::ZERO;
                for k in 0..4 {
                    acc = acc + self.m[row * 4 + k] * other.m[k * 4 + col];
                }
                out.m[row * 4 + col] = acc;
            }
        }
        out
    }
}

impl<T: Scalar> Mul<Vec4<T>> for Mat4<T> {
    type Output = Vec4<T>;

    fn mul(self, p: Vec4<T>) -> Vec4<T> {
        let m = &self.m;
        Vec4::new(
            m[0] * p.x + m[1] * p.y + m[2] * p.z + m[3] * p.w,
            m[4] * p.x + m[5] * p.y + m[6] * p.z + m[7] * p.w,
            m[8] * p.x + m[9] * p.y + m[10] * p.z + m[11] * p.w,
            m[12] * p.x + m[13] * p.y + m[14] * p.z + m[15] * p.w,
        )
    }
}

impl<T: Scalar> Mat3<T> {
    /// The identity matrix
    pub fn identity() -> Self {
        let mut mat = Self::splat(T::ZERO);
        for row in 0..3 {
            mat.m[row * 3 + row] = T::ONE;
        }
        mat
    }

    /// A matrix with every entry set to `value`
    pub fn splat(value: T) -> Self {
        Self { m: [value; 9] }
    }

    /// A 2D translation by `(tx, ty)`
    pub fn translate(tx: T, ty: T) -> Self {
        let mut mat = Self::identity();
        mat.m[2] = tx;
        mat.m[5] = ty;
        mat
    }

    /// A 2D scale by `(sx, sy)`
    pub fn scale(sx: T, sy: T) -> Self {
        let mut mat = Self::identity();
        mat.m[0] = sx;
        mat.m[4] = sy;
        mat
    }

    /// A 2D rotation of `angle` radians
    pub fn rotation(angle: T) -> Self {
        let s = angle.sin();
        let c = angle.cos();
        let mut mat = Self::identity();
        mat.m[0] = c;
        mat.m[1] = -s;
        mat.m[3] = s;
        mat.m[4] = c;
        mat
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// The transpose as a new matrix
    pub fn transposed(&self) -> Self {
        let mut out = *self;
        for row in 0..3 {
            for col in (row + 1)..3 {
                out.m.swap(row * 3 + col, col * 3 + row);
            }
        }
        out
    }

    /// The entries as a flat row major array
    pub fn to_array(self) -> [T; 9] {
        self.m
    }
}

impl<T: Scalar> Default for Mat3<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T> From<[T; 9]> for Mat3<T> {
    fn from(m: [T; 9]) -> Self {
        Self { m }
    }
}

impl<T> Index<usize> for Mat3<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.m[i]
    }
}

impl<T> IndexMut<usize> for Mat3<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.m[i]
    }
}

impl<T: Scalar> Mul for Mat3<T> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let mut out = Self::splat(T::ZERO);
        for row in 0..3 {
            for col in 0..3 {
                let mut acc = T::ZERO;
                for k in 0..3 {
                    acc = acc + self.m[row * 3 + k] * other.m[k * 3 + col];
                }
                out.m[row * 3 + col] = acc;
            }
        }
        out
    }
}

impl<T: Scalar> Mul<Vec3<T>> for Mat3<T> {
    type Output = Vec3<T>;

    fn mul(self, p: Vec3<T>) -> Vec3<T> {
        let m = &self.m;
        Vec3::new(
            m[0] * p.x + m[1] * p.y + m[2] * p.z,
            m[3] * p.x + m[4] * p.y + m[5] * p.z,
            m[6] * p.x + m[7] * p.y + m[8] * p.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec4_close(a: Vec4<f32>, b: glam::Vec4) {
        assert!(
            (a.x - b.x).abs() < 1e-5
                && (a.y - b.y).abs() < 1e-5
                && (a.z - b.z).abs() < 1e-5
                && (a.w - b.w).abs() < 1e-5,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn identity_leaves_points_alone() {
        let m = Mat4::<f32>::identity();
        assert!(m.is_identity());
        let p = Vec4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(m * p, p);
        assert!(Mat4::<f32>::default().is_identity());
    }

    #[test]
    fn translate_moves_points() {
        let m = Mat4::translate(1.0f32, 2.0, 3.0);
        let p = Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(m * p, Vec4::new(2.0, 3.0, 4.0, 1.0));

        // direction vectors (w = 0) are unaffected
        let d = Vec4::new(1.0, 1.0, 1.0, 0.0);
        assert_eq!(m * d, d);
    }

    #[test]
    fn scale_scales_points() {
        let m = Mat4::scale(2.0f32, 3.0, 4.0);
        let p = Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(m * p, Vec4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn multiplication_composes_right_to_left() {
        let t = Mat4::translate(1.0f32, 2.0, 3.0);
        let s = Mat4::scale(2.0f32, 2.0, 2.0);
        let p = Vec4::new(1.0, 1.0, 1.0, 1.0);

        // scale first, then translate
        assert_eq!((t * s) * p, Vec4::new(3.0, 4.0, 5.0, 1.0));
        // translate first, then scale
        assert_eq!((s * t) * p, Vec4::new(4.0, 6.0, 8.0, 1.0));
    }

    #[test]
    fn rotation_agrees_with_glam() {
        let axes = [
            Vec3::new(1.0f32, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 2.0, 3.0),
        ];
        let p = Vec4::new(0.5f32, -1.5, 2.0, 1.0);

        for axis in axes {
            for angle in [0.0f32, 0.3, 1.2, -2.4] {
                let ours = Mat4::rotation(angle, axis) * p;
                let theirs = glam::Mat4::from_axis_angle(
                    glam::Vec3::new(axis.x, axis.y, axis.z).normalize(),
                    angle,
                ) * glam::Vec4::new(p.x, p.y, p.z, p.w);
                assert_vec4_close(ours, theirs);
            }
        }
    }

    #[test]
    fn transform_agrees_with_glam() {
        let rotation = Vec3::new(0.4f32, -0.7, 1.1);
        let translation = Vec3::new(1.0f32, 2.0, -3.0);
        let scale = Vec3::new(2.0f32, 0.5, 1.5);
        let p = Vec4::new(0.3f32, 0.9, -0.2, 1.0);

        let ours = Mat4::transform(rotation, translation, scale) * p;
        let theirs = glam::Mat4::from_translation(glam::Vec3::new(
            translation.x,
            translation.y,
            translation.z,
        )) * glam::Mat4::from_rotation_x(rotation.x)
            * glam::Mat4::from_rotation_y(rotation.y)
            * glam::Mat4::from_rotation_z(rotation.z)
            * glam::Mat4::from_scale(glam::Vec3::new(scale.x, scale.y, scale.z))
            * glam::Vec4::new(p.x, p.y, p.z, p.w);
        assert_vec4_close(ours, theirs);
    }

    #[test]
    fn transform_is_translate_rotate_scale() {
        let rotation = Vec3::new(0.2f32, 0.5, -0.9);
        let translation = Vec3::new(-1.0f32, 4.0, 2.0);
        let scale = Vec3::new(1.5f32, 2.5, 0.5);
        let p = Vec4::new(1.0f32, -1.0, 0.5, 1.0);

        let composed = Mat4::translate(translation.x, translation.y, translation.z)
            * Mat4::rotation(rotation.x, Vec3::new(1.0, 0.0, 0.0))
            * Mat4::rotation(rotation.y, Vec3::new(0.0, 1.0, 0.0))
            * Mat4::rotation(rotation.z, Vec3::new(0.0, 0.0, 1.0))
            * Mat4::scale(scale.x, scale.y, scale.z);

        let a = Mat4::transform(rotation, translation, scale) * p;
        let b = composed * p;
        assert!((a.x - b.x).abs() < 1e-5);
        assert!((a.y - b.y).abs() < 1e-5);
        assert!((a.z - b.z).abs() < 1e-5);
        assert!((a.w - b.w).abs() < 1e-5);
    }

    #[test]
    fn block_transpose_inverts_a_rotation() {
        let mut m = Mat4::rotation(0.8f32, Vec3::new(0.0, 0.0, 1.0));
        m.transpose_block3();
        let p = Vec4::new(1.0f32, 2.0, 3.0, 1.0);
        let back = m * (Mat4::rotation(0.8f32, Vec3::new(0.0, 0.0, 1.0)) * p);
        assert!((back.x - p.x).abs() < 1e-5);
        assert!((back.y - p.y).abs() < 1e-5);
        assert!((back.z - p.z).abs() < 1e-5);
    }

    #[test]
    fn transpose_round_trips() {
        let m = Mat4::transform(
            Vec3::new(0.1f32, 0.2, 0.3),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::splat(1.0),
        );
        assert_eq!(m.transposed().transposed(), m);
        assert_eq!(m.transposed()[1], m[4]);
    }

    #[test]
    fn flat_indexing_is_row_major() {
        let m = Mat4::translate(5.0f32, 6.0, 7.0);
        assert_eq!(m[3], 5.0);
        assert_eq!(m[7], 6.0);
        assert_eq!(m[11], 7.0);
        assert_eq!(m[0], 1.0);
    }

    #[test]
    fn mat3_rotation_and_translation() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let r = Mat3::rotation(quarter);
        let p = r * Vec3::new(1.0f32, 0.0, 1.0);
        assert!((p.x - 0.0).abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);

        let t = Mat3::translate(3.0f32, -2.0);
        assert_eq!(t * Vec3::new(1.0, 1.0, 1.0), Vec3::new(4.0, -1.0, 1.0));
        assert!(Mat3::<f32>::identity().is_identity());

        let back = Mat3::rotation(quarter).transposed() * p;
        assert!((back.x - 1.0).abs() < 1e-6);
        assert!(back.y.abs() < 1e-6);
    }
}
