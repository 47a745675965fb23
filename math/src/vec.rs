//! Plain vector types generic over the scalar

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::scalar::Scalar;

/// A 2 component vector
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

/// A 3 component vector
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// A 4 component vector
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Vec2<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Vec2<T> {}
unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Vec3<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Vec3<T> {}
unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Vec4<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Vec4<T> {}

impl<T> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Copy> Vec2<T> {
    /// A vector with every component set to `v`
    pub const fn splat(v: T) -> Self {
        Self { x: v, y: v }
    }
}

impl<T: Scalar> Vec2<T> {
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// The vector scaled to unit length
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    /// Extend with a z component
    pub fn extend(self, z: T) -> Vec3<T> {
        Vec3::new(self.x, self.y, z)
    }
}

impl<T> Vec3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy> Vec3<T> {
    /// A vector with every component set to `v`
    pub const fn splat(v: T) -> Self {
        Self { x: v, y: v, z: v }
    }
}

impl<T: Scalar> Vec3<T> {
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// The vector scaled to unit length
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    /// Extend with a w component
    pub fn extend(self, w: T) -> Vec4<T> {
        Vec4::new(self.x, self.y, self.z, w)
    }

    /// Drop the z component
    pub fn xy(self) -> Vec2<T> {
        Vec2::new(self.x, self.y)
    }
}

impl<T> Vec4<T> {
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }
}

impl<T: Copy> Vec4<T> {
    /// A vector with every component set to `v`
    pub const fn splat(v: T) -> Self {
        Self {
            x: v,
            y: v,
            z: v,
            w: v,
        }
    }
}

impl<T: Scalar> Vec4<T> {
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// The vector scaled to unit length
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    /// Drop the w component
    pub fn xyz(self) -> Vec3<T> {
        Vec3::new(self.x, self.y, self.z)
    }
}

macro_rules! componentwise_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl<T: Scalar> Add for $ty<T> {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                Self { $($field: self.$field + other.$field),+ }
            }
        }

        impl<T: Scalar> Sub for $ty<T> {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                Self { $($field: self.$field - other.$field),+ }
            }
        }

        impl<T: Scalar> Neg for $ty<T> {
            type Output = Self;

            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        /// Component wise product
        impl<T: Scalar> Mul for $ty<T> {
            type Output = Self;

            fn mul(self, other: Self) -> Self {
                Self { $($field: self.$field * other.$field),+ }
            }
        }

        impl<T: Scalar> Mul<T> for $ty<T> {
            type Output = Self;

            fn mul(self, s: T) -> Self {
                Self { $($field: self.$field * s),+ }
            }
        }

        impl<T: Scalar> Div<T> for $ty<T> {
            type Output = Self;

            fn div(self, s: T) -> Self {
                Self { $($field: self.$field / s),+ }
            }
        }
    };
}

componentwise_ops!(Vec2 { x, y });
componentwise_ops!(Vec3 { x, y, z });
componentwise_ops!(Vec4 { x, y, z, w });

/// Linear interpolation between `a` and `b`
///
/// `alpha` of zero yields `a`, one yields `b`. Works for scalars and for
/// every vector type in this crate.
pub fn lerp<V, T>(a: V, b: V, alpha: T) -> V
where
    T: Scalar,
    V: Mul<T, Output = V> + Add<Output = V>,
{
    a * (T::ONE - alpha) + b * alpha
}
