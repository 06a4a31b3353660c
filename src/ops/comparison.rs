use super::Comparison;
use crate::bitfield::{Bitfield, Lanes, PackedLanes};
use crate::policy::{Packed, RegisterPolicy};
use crate::register::Register;

macro_rules! comparison_op {
    (
        $(#[$doc:meta])*
        $method:ident => $vector:ident, $vector_scalar:ident, $scalar_vector:ident
    ) => {
        $(#[$doc])*
        #[inline(always)]
        pub fn $vector<const N: usize>(lhs: &T, rhs: &T) -> Bitfield<N>
        where
            Lanes<N>: PackedLanes,
        {
            Self::collect(|chunk| {
                let l = RegisterPolicy::<T, R>::load_chunk(lhs, chunk);
                let r = RegisterPolicy::<T, R>::load_chunk(rhs, chunk);
                l.$method(r)
            })
        }

        /// Like the vector form, with `rhs` broadcast to every lane.
        #[inline(always)]
        pub fn $vector_scalar<const N: usize>(lhs: &T, rhs: f32) -> Bitfield<N>
        where
            Lanes<N>: PackedLanes,
        {
            let rhs = R::splat(rhs);
            Self::collect(|chunk| RegisterPolicy::<T, R>::load_chunk(lhs, chunk).$method(rhs))
        }

        /// Like the vector form, with `lhs` broadcast to every lane.
        #[inline(always)]
        pub fn $scalar_vector<const N: usize>(lhs: f32, rhs: &T) -> Bitfield<N>
        where
            Lanes<N>: PackedLanes,
        {
            let lhs = R::splat(lhs);
            Self::collect(|chunk| lhs.$method(RegisterPolicy::<T, R>::load_chunk(rhs, chunk)))
        }
    };
}

/// Every comparison takes the bitfield width `N` as a parameter; it must equal
/// `T::LEN`, which is checked at compile time.
impl<T: Packed, R: Register> Comparison<T, R> {
    /// Packs the active lanes of each chunk's mask into consecutive bits.
    #[inline(always)]
    fn collect<const N: usize>(mask: impl Fn(usize) -> u32) -> Bitfield<N>
    where
        Lanes<N>: PackedLanes,
    {
        const { assert!(N == T::LEN, "bitfield width must equal the element count") };

        let lanes = RegisterPolicy::<T, R>::LANES;
        let mut out = Bitfield::none();
        for chunk in 0..RegisterPolicy::<T, R>::REGISTER_COUNT {
            out.insert(chunk * lanes, lanes, mask(chunk));
        }
        out
    }

    comparison_op! {
        /// `lhs < rhs`.
        cmp_lt => less, less_scalar, scalar_less
    }

    comparison_op! {
        /// `lhs > rhs`.
        cmp_gt => greater, greater_scalar, scalar_greater
    }

    comparison_op! {
        /// `lhs <= rhs`.
        cmp_le => less_equal, less_equal_scalar, scalar_less_equal
    }

    comparison_op! {
        /// `lhs >= rhs`.
        cmp_ge => greater_equal, greater_equal_scalar, scalar_greater_equal
    }

    comparison_op! {
        /// `lhs == rhs`. NaN lanes compare unequal.
        cmp_eq => equal, equal_scalar, scalar_equal
    }

    comparison_op! {
        /// `lhs != rhs`. NaN lanes compare unequal.
        cmp_ne => not_equal, not_equal_scalar, scalar_not_equal
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::Comparison;
    use crate::register::Scalar128;
    use crate::{Bitfield, Float2, Float3, Float4, Float4x4};

    #[test]
    fn three_lanes() {
        let a = Float3::new(1.0, 5.0, 3.0);
        let b = Float3::new(2.0, 5.0, 1.0);
        type C = Comparison<Float3>;

        assert_eq!(C::less::<3>(&a, &b).to_u32(), 0b001);
        assert_eq!(C::greater::<3>(&a, &b).to_u32(), 0b100);
        assert_eq!(C::less_equal::<3>(&a, &b).to_u32(), 0b011);
        assert_eq!(C::greater_equal::<3>(&a, &b).to_u32(), 0b110);
        assert_eq!(C::equal::<3>(&a, &b).to_u32(), 0b010);
        assert_eq!(C::not_equal::<3>(&a, &b).to_u32(), 0b101);

        assert_eq!(C::less_scalar::<3>(&a, 3.0).to_u32(), 0b001);
        assert_eq!(C::scalar_less::<3>(3.0, &a).to_u32(), 0b010);
        assert_eq!(C::greater_equal_scalar::<3>(&a, 3.0).to_u32(), 0b110);
        assert_eq!(C::scalar_equal::<3>(5.0, &a).to_u32(), 0b010);
    }

    #[test]
    fn padding_never_sets_bits() {
        // padding is 0 == 0; only active lanes may report
        let all: Bitfield<3> = Comparison::<Float3>::equal(&Float3::ZERO, &Float3::ZERO);
        assert!(all.all_true());
        assert_eq!(all.to_u32(), 0b111);

        let two: Bitfield<2> = Comparison::<Float2>::scalar_not_equal(1.0, &Float2::new(1.0, 2.0));
        assert_eq!(two.to_u32(), 0b10);
    }

    #[test]
    fn four_lanes_and_nan() {
        let a = Float4::new(f32::NAN, 1.0, 2.0, 3.0);
        let eq: Bitfield<4> = Comparison::<Float4>::equal(&a, &a);
        let ne: Bitfield<4> = Comparison::<Float4>::not_equal(&a, &a);
        assert_eq!(eq.to_u32(), 0b1110);
        assert_eq!(ne.to_u32(), 0b0001);
    }

    #[test]
    fn sixteen_lanes_span_registers() {
        let m = crate::Float4x4::from_array(core::array::from_fn(|i| i as f32));
        let high: Bitfield<16> = Comparison::<Float4x4>::greater_scalar(&m, 9.5);
        assert_eq!(high.to_u32(), 0xfc00);
        let low: Bitfield<16> = Comparison::<Float4x4, Scalar128>::scalar_greater(4.5, &m);
        assert_eq!(low.to_u32(), 0x001f);
        assert_eq!(high.count_true(), 6);
    }
}
