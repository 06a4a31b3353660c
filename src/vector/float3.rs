use crate::policy::RegisterPolicy;
use crate::register::Register;
use crate::Float2;

crate::packed_vector! {
    /// A three-component vector held in one aligned register with a zero
    /// padding lane.
    pub struct Float3 { rows: 3, columns: 1, column_align: 16, align: 16, storage: 4 }
}

impl Float3 {
    /// `(0, 1, 0)`.
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// `(0, -1, 0)`.
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    /// `(1, 0, 0)`.
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    /// `(-1, 0, 0)`.
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    /// `(0, 0, 1)`.
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    /// `(0, 0, -1)`.
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    /// Builds `(x, y, z)`.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z, 0.0] }
    }

    /// Builds `(xy.x, xy.y, z)`.
    #[inline]
    pub const fn from_xy_z(xy: Float2, z: f32) -> Self {
        Self::new(xy.x(), xy.y(), z)
    }

    /// Builds `(x, yz.x, yz.y)`.
    #[inline]
    pub const fn from_x_yz(x: f32, yz: Float2) -> Self {
        Self::new(x, yz.x(), yz.y())
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

    /// `(x, y)`.
    #[inline]
    pub const fn xy(&self) -> Float2 {
        Float2::new(self.data[0], self.data[1])
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        type P = RegisterPolicy<Float3>;
        let a = P::load::<0>(self);
        let b = P::load::<0>(other);
        let c = a.yzx().mul(b.zxy()).sub(a.zxy().mul(b.yzx()));
        let mut out = Self::ZERO;
        P::store::<0>(&mut out, c);
        out
    }
}
