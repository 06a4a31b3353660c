use crate::ops::Recursion;

crate::packed_vector! {
    /// A two-component vector, loaded and stored as a half register.
    pub struct Float2 { rows: 2, columns: 1, column_align: 8, align: 8, storage: 2 }
}

impl Float2 {
    /// `(0, 1)`.
    pub const UP: Self = Self::new(0.0, 1.0);
    /// `(0, -1)`.
    pub const DOWN: Self = Self::new(0.0, -1.0);
    /// `(1, 0)`.
    pub const RIGHT: Self = Self::new(1.0, 0.0);
    /// `(-1, 0)`.
    pub const LEFT: Self = Self::new(-1.0, 0.0);

    /// Builds `(x, y)`.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { data: [x, y] }
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

    /// `(y, x)`.
    #[inline]
    pub const fn yx(&self) -> Self {
        Self::new(self.data[1], self.data[0])
    }

    /// The z component of the 3D cross product, `x0 * y1 - y0 * x1`.
    #[inline]
    pub fn cross(&self, other: &Self) -> f32 {
        Recursion::<Self>::diff_product(self, &other.yx())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let mut v = Float2::new(1.0, 2.0);
        assert_eq!((v.x(), v.y()), (1.0, 2.0));
        v.set_x(5.0);
        v.set_y(-1.0);
        assert_eq!(v.to_array(), [5.0, -1.0]);
        assert_eq!(v[1], -1.0);
        assert_eq!(v.yx(), Float2::new(-1.0, 5.0));
        assert_eq!(Float2::LEFT + Float2::RIGHT, Float2::ZERO);
        assert_eq!(Float2::UP, -Float2::DOWN);
    }

    #[test]
    fn cross_and_dot() {
        let a = Float2::new(1.0, 2.0);
        let b = Float2::new(3.0, 4.0);
        assert_eq!(a.cross(&b), -2.0);
        assert_eq!(b.cross(&a), 2.0);
        assert_eq!(Float2::RIGHT.cross(&Float2::UP), 1.0);
        assert_eq!(a.dot(&b), 11.0);
        assert_eq!(Float2::new(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn scalar_on_either_side() {
        let a = Float2::new(2.0, 4.0);
        assert_eq!(a / 2.0, Float2::new(1.0, 2.0));
        assert_eq!(8.0 / a, Float2::new(4.0, 2.0));
        assert_eq!(1.0 - a, Float2::new(-1.0, -3.0));
    }
}
