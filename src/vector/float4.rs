use crate::policy::RegisterPolicy;
use crate::register::Register;
use crate::{Float2, Float3};

crate::packed_vector! {
    /// A four-component vector filling one aligned register.
    pub struct Float4 { rows: 4, columns: 1, column_align: 16, align: 16, storage: 4 }
}

impl Float4 {
    /// `(0, 1, 0, 0)`.
    pub const UP: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// `(0, -1, 0, 0)`.
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0, 0.0);
    /// `(1, 0, 0, 0)`.
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// `(-1, 0, 0, 0)`.
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0, 0.0);
    /// `(0, 0, 1, 0)`.
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// `(0, 0, -1, 0)`.
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0, 0.0);
    /// `(0, 0, 0, 1)`.
    pub const IN: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// `(0, 0, 0, -1)`.
    pub const OUT: Self = Self::new(0.0, 0.0, 0.0, -1.0);
    /// `(0, 0, 0, 1)`, the homogeneous origin.
    pub const ORIGIN: Self = Self::IN;

    /// Builds `(x, y, z, w)`.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Builds `(xyz, w)`.
    #[inline]
    pub const fn from_xyz_w(xyz: Float3, w: f32) -> Self {
        Self::new(xyz.x(), xyz.y(), xyz.z(), w)
    }

    /// Builds `(x, yzw)`.
    #[inline]
    pub const fn from_x_yzw(x: f32, yzw: Float3) -> Self {
        Self::new(x, yzw.x(), yzw.y(), yzw.z())
    }

    /// Builds `(xy, z, w)`.
    #[inline]
    pub const fn from_xy_z_w(xy: Float2, z: f32, w: f32) -> Self {
        Self::new(xy.x(), xy.y(), z, w)
    }

    /// Builds `(x, y, zw)`.
    #[inline]
    pub const fn from_x_y_zw(x: f32, y: f32, zw: Float2) -> Self {
        Self::new(x, y, zw.x(), zw.y())
    }

    /// Builds `(x, yz, w)`.
    #[inline]
    pub const fn from_x_yz_w(x: f32, yz: Float2, w: f32) -> Self {
        Self::new(x, yz.x(), yz.y(), w)
    }

    /// The x component.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    /// The y component.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// The z component.
    #[inline]
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    /// The w component.
    #[inline]
    pub const fn w(&self) -> f32 {
        self.data[3]
    }

    /// Sets the x component.
    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.data[0] = x;
    }

    /// Sets the y component.
    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.data[1] = y;
    }

    /// Sets the z component.
    #[inline]
    pub fn set_z(&mut self, z: f32) {
        self.data[2] = z;
    }

    /// Sets the w component.
    #[inline]
    pub fn set_w(&mut self, w: f32) {
        self.data[3] = w;
    }

    /// `(x, y, z)`.
    #[inline]
    pub const fn xyz(&self) -> Float3 {
        Float3::new(self.data[0], self.data[1], self.data[2])
    }

    /// Cross product of the `xyz` parts; `w` of the result is `0`.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        type P = RegisterPolicy<Float4>;
        let a = P::load::<0>(self);
        let b = P::load::<0>(other);
        let c = a.yzx().mul(b.zxy()).sub(a.zxy().mul(b.yzx()));
        let mut out = Self::ZERO;
        P::store::<0>(&mut out, c.and(Register::lane_mask(3)));
        out
    }
}
