use super::{map, Unary};
use crate::policy::Packed;
use crate::register::Register;

impl<T: Packed, R: Register> Unary<T, R> {
    /// Reciprocal estimate, relative error within [`crate::APPROX_EPSILON`].
    #[inline(always)]
    pub fn reciprocal(value: &T) -> T {
        map::<T, R>(value, R::recip_approx)
    }

    /// `1`, `-1` or `0` per lane; `±0` and NaN map to `0`.
    #[inline(always)]
    pub fn sign(value: &T) -> T {
        map::<T, R>(value, R::sign)
    }

    /// Absolute value.
    #[inline(always)]
    pub fn absolute(value: &T) -> T {
        map::<T, R>(value, R::abs)
    }

    /// Square root. Negative lanes produce NaN.
    #[inline(always)]
    pub fn sqrt(value: &T) -> T {
        map::<T, R>(value, R::sqrt)
    }

    /// Reciprocal square root estimate, relative error within
    /// [`crate::APPROX_EPSILON`].
    #[inline(always)]
    pub fn rsqrt(value: &T) -> T {
        map::<T, R>(value, R::rsqrt_approx)
    }

    /// Flips the sign of every lane.
    #[inline(always)]
    pub fn negate(value: &T) -> T {
        map::<T, R>(value, R::neg)
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::Unary;
    use crate::policy::Packed;
    use crate::register::Scalar128;
    use crate::{Float3, Float4, Float4x4};

    type U3 = Unary<Float3>;

    fn close(estimate: f32, exact: f32) -> bool {
        ((estimate - exact) / exact).abs() <= crate::APPROX_EPSILON
    }

    #[test]
    fn sign_and_absolute() {
        let v = Float3::new(-3.0, 0.0, 7.0);
        assert_eq!(U3::sign(&v).to_array(), [-1.0, 0.0, 1.0]);
        assert_eq!(U3::absolute(&v).to_array(), [3.0, 0.0, 7.0]);
        assert_eq!(U3::negate(&v).to_array(), [3.0, -0.0, -7.0]);

        let n = U3::sign(&Float3::new(f32::NAN, -0.0, f32::NEG_INFINITY));
        assert_eq!(n.to_array(), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn roots() {
        let v = Float4::new(1.0, 4.0, 9.0, 0.0);
        assert_eq!(Unary::<Float4>::sqrt(&v).to_array(), [1.0, 2.0, 3.0, 0.0]);

        let r = Unary::<Float4>::rsqrt(&Float4::new(1.0, 4.0, 16.0, 0.25)).to_array();
        for (r, exact) in r.into_iter().zip([1.0, 0.5, 0.25, 2.0]) {
            assert!(close(r, exact), "{r} vs {exact}");
        }

        assert!(Unary::<Float4>::sqrt(&Float4::splat(-1.0)).to_array()[0].is_nan());
    }

    #[test]
    fn reciprocal_is_close() {
        let v = Float3::new(2.0, -8.0, 0.3);
        for (r, exact) in U3::reciprocal(&v).to_array().into_iter().zip([0.5, -0.125, 1.0 / 0.3]) {
            assert!(close(r, exact), "{r} vs {exact}");
        }
        // padding lanes hold 0, whose reciprocal never reaches storage
        assert_eq!(U3::reciprocal(&v).storage()[3], 0.0);
    }

    #[test]
    fn matrix_on_every_backend() {
        let m = Float4x4::from_array(core::array::from_fn(|i| i as f32 - 8.0));
        let expected: [f32; 16] = core::array::from_fn(|i| (i as f32 - 8.0).abs());
        assert_eq!(Unary::<Float4x4>::absolute(&m).to_array(), expected);
        assert_eq!(Unary::<Float4x4, Scalar128>::absolute(&m).to_array(), expected);
    }
}
