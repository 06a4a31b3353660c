use super::{map, zip, Binary};
use crate::policy::{Packed, RegisterPolicy};
use crate::register::Register;

macro_rules! binary_op {
    (
        $(#[$doc:meta])*
        $method:ident => $vector:ident, $vector_scalar:ident, $scalar_vector:ident
    ) => {
        $(#[$doc])*
        #[inline(always)]
        pub fn $vector(lhs: &T, rhs: &T) -> T {
            zip::<T, R>(lhs, rhs, R::$method)
        }

        /// Like the vector form, with `rhs` broadcast to every lane.
        #[inline(always)]
        pub fn $vector_scalar(lhs: &T, rhs: f32) -> T {
            let rhs = R::splat(rhs);
            map::<T, R>(lhs, |l| l.$method(rhs))
        }

        /// Like the vector form, with `lhs` broadcast to every lane.
        #[inline(always)]
        pub fn $scalar_vector(lhs: f32, rhs: &T) -> T {
            let lhs = R::splat(lhs);
            map::<T, R>(rhs, |r| lhs.$method(r))
        }
    };
}

impl<T: Packed, R: Register> Binary<T, R> {
    binary_op! {
        /// `lhs + rhs`.
        add => add, add_scalar, scalar_add
    }

    binary_op! {
        /// `lhs - rhs`.
        sub => subtract, subtract_scalar, scalar_subtract
    }

    binary_op! {
        /// `lhs * rhs`.
        mul => multiply, multiply_scalar, scalar_multiply
    }

    binary_op! {
        /// `lhs / rhs`, IEEE semantics for zero divisors.
        div => divide, divide_scalar, scalar_divide
    }

    binary_op! {
        /// Lanewise minimum. A NaN in either lane yields the `rhs` lane.
        min => minimum, minimum_scalar, scalar_minimum
    }

    binary_op! {
        /// Lanewise maximum. A NaN in either lane yields the `rhs` lane.
        max => maximum, maximum_scalar, scalar_maximum
    }

    /// `lhs * rhs.recip()` using the reciprocal estimate; relative error is
    /// within [`crate::APPROX_EPSILON`].
    #[inline(always)]
    pub fn fast_divide(lhs: &T, rhs: &T) -> T {
        zip::<T, R>(lhs, rhs, |l, r| l.mul(r.recip_approx()))
    }

    /// `lhs * a + b`, fused where the target has FMA.
    #[inline(always)]
    pub fn mul_add(lhs: &T, a: &T, b: &T) -> T {
        let mut out = T::zeroed();
        for chunk in 0..RegisterPolicy::<T, R>::REGISTER_COUNT {
            let l = RegisterPolicy::<T, R>::load_chunk(lhs, chunk);
            let a = RegisterPolicy::<T, R>::load_chunk(a, chunk);
            let b = RegisterPolicy::<T, R>::load_chunk(b, chunk);
            RegisterPolicy::<T, R>::store_chunk(&mut out, chunk, l.mul_add(a, b));
        }
        out
    }
}
