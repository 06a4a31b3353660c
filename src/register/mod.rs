//! The low-level register backends every operation family is written against.
//!
//! A [`Register`] is a transient 128-bit value: produced by one load or
//! broadcast, consumed by an operation and a store, never kept around. The
//! load and store entry points come in one flavour per chunk shape so that a
//! chunk narrower than the register is never read or written past its end.

use core::fmt::Debug;

mod scalar;
pub use scalar::Scalar128;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
mod sse;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub use sse::M128;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub use neon::Neon128;

/// The register used when no register is named explicitly.
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub type DefaultRegister = M128;
/// The register used when no register is named explicitly.
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub type DefaultRegister = Neon128;
/// The register used when no register is named explicitly.
#[cfg(not(any(
    all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"),
    all(target_arch = "aarch64", target_feature = "neon"),
)))]
pub type DefaultRegister = Scalar128;

/// A fixed-width register of four `f32` lanes.
///
/// Comparison methods return the per-lane outcome packed into the low four
/// bits of a `u32`, lane `i` at bit `i`.
pub trait Register: Copy + Debug {
    /// Lanes per register.
    const LANES: usize = 4;

    /// Register width in bytes.
    const WIDTH: usize = core::mem::size_of::<Self>();

    /// Alignment an address needs for [`Register::load_aligned`].
    const ALIGN: usize = core::mem::align_of::<Self>();

    /// Short backend name used in diagnostics.
    const NAME: &'static str;

    /// Replicates `value` into every lane.
    fn splat(value: f32) -> Self;

    /// All lanes `0.0`.
    fn zero() -> Self;

    /// Builds a register from four lanes.
    fn from_array(lanes: [f32; 4]) -> Self;

    /// Spills the register into four lanes.
    fn to_array(self) -> [f32; 4];

    /// Lane 0.
    fn first(self) -> f32;

    /// Reads four lanes.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading four `f32` and aligned to [`Register::ALIGN`].
    unsafe fn load_aligned(ptr: *const f32) -> Self;

    /// Reads four lanes from any `f32`-aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading four `f32`.
    unsafe fn load_unaligned(ptr: *const f32) -> Self;

    /// Reads three lanes; lane 3 is zero.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading three `f32`.
    unsafe fn load_triple(ptr: *const f32) -> Self;

    /// Reads two lanes; lanes 2 and 3 are zero.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading two `f32`.
    unsafe fn load_pair(ptr: *const f32) -> Self;

    /// Reads one lane; lanes 1 to 3 are zero.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading one `f32`.
    unsafe fn load_single(ptr: *const f32) -> Self;

    /// Writes four lanes.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing four `f32` and aligned to [`Register::ALIGN`].
    unsafe fn store_aligned(self, ptr: *mut f32);

    /// Writes four lanes to any `f32`-aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing four `f32`.
    unsafe fn store_unaligned(self, ptr: *mut f32);

    /// Writes lanes 0 to 2.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing three `f32`.
    unsafe fn store_triple(self, ptr: *mut f32);

    /// Writes lanes 0 and 1.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing two `f32`.
    unsafe fn store_pair(self, ptr: *mut f32);

    /// Writes lane 0.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing one `f32`.
    unsafe fn store_single(self, ptr: *mut f32);

    /// Lanewise `self + rhs`.
    fn add(self, rhs: Self) -> Self;

    /// Lanewise `self - rhs`.
    fn sub(self, rhs: Self) -> Self;

    /// Lanewise `self * rhs`.
    fn mul(self, rhs: Self) -> Self;

    /// Lanewise `self / rhs`.
    fn div(self, rhs: Self) -> Self;

    /// Lanewise minimum; `rhs` wins when either lane is NaN.
    fn min(self, rhs: Self) -> Self;

    /// Lanewise maximum; `rhs` wins when either lane is NaN.
    fn max(self, rhs: Self) -> Self;

    /// Lanewise `self * a + b`, fused where the target has FMA.
    fn mul_add(self, a: Self, b: Self) -> Self;

    /// Fast reciprocal estimate, relative error within [`crate::APPROX_EPSILON`].
    fn recip_approx(self) -> Self;

    /// Fast reciprocal square root estimate, relative error within
    /// [`crate::APPROX_EPSILON`].
    fn rsqrt_approx(self) -> Self;

    /// Lanewise square root.
    fn sqrt(self) -> Self;

    /// Clears the sign bit of every lane.
    fn abs(self) -> Self;

    /// `1.0` for positive lanes, `-1.0` for negative lanes, `0.0` otherwise
    /// (including `±0.0` and NaN).
    fn sign(self) -> Self;

    /// Bitwise AND.
    fn and(self, rhs: Self) -> Self;

    /// Bitwise XOR.
    fn xor(self, rhs: Self) -> Self;

    /// `self < rhs` per lane.
    fn cmp_lt(self, rhs: Self) -> u32;

    /// `self > rhs` per lane.
    fn cmp_gt(self, rhs: Self) -> u32;

    /// `self <= rhs` per lane.
    fn cmp_le(self, rhs: Self) -> u32;

    /// `self >= rhs` per lane.
    fn cmp_ge(self, rhs: Self) -> u32;

    /// `self == rhs` per lane.
    fn cmp_eq(self, rhs: Self) -> u32;

    /// `self != rhs` per lane (true for NaN).
    fn cmp_ne(self, rhs: Self) -> u32;

    /// Lanes `[1, 0, 3, 2]`.
    fn swap_pairs(self) -> Self;

    /// Lanes `[2, 3, 0, 1]`.
    fn swap_halves(self) -> Self;

    /// Lane 2 in every lane.
    fn dup_lane2(self) -> Self;

    /// Lanes `[1, 2, 0, 3]`.
    fn yzx(self) -> Self;

    /// Lanes `[2, 0, 1, 3]`.
    fn zxy(self) -> Self;

    /// Flips the sign bit of every lane.
    #[inline(always)]
    fn neg(self) -> Self {
        self.xor(Self::splat(-0.0))
    }

    /// All bits set in lanes `0..active`, zero above.
    #[inline(always)]
    fn lane_mask(active: usize) -> Self {
        let set = f32::from_bits(u32::MAX);
        Self::from_array(core::array::from_fn(|i| if i < active { set } else { 0.0 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f32 = f32::NAN;

    fn check_backend<R: Register>() {
        let a = R::from_array([1.0, -2.0, 0.0, 8.0]);
        let b = R::from_array([4.0, 2.0, -0.0, 2.0]);

        assert_eq!(a.to_array(), [1.0, -2.0, 0.0, 8.0]);
        assert_eq!(a.first(), 1.0);
        assert_eq!(R::splat(3.5).to_array(), [3.5; 4]);
        assert_eq!(R::zero().to_array(), [0.0; 4]);

        assert_eq!(a.add(b).to_array(), [5.0, 0.0, 0.0, 10.0]);
        assert_eq!(a.sub(b).to_array(), [-3.0, -4.0, 0.0, 6.0]);
        assert_eq!(a.mul(b).to_array(), [4.0, -4.0, -0.0, 16.0]);
        assert_eq!(a.div(R::splat(2.0)).to_array(), [0.5, -1.0, 0.0, 4.0]);
        assert_eq!(a.min(b).to_array(), [1.0, -2.0, -0.0, 2.0]);
        assert_eq!(a.max(b).to_array(), [4.0, 2.0, -0.0, 8.0]);
        assert_eq!(a.mul_add(b, R::splat(1.0)).to_array(), [5.0, -3.0, 1.0, 17.0]);

        assert_eq!(a.abs().to_array(), [1.0, 2.0, 0.0, 8.0]);
        assert_eq!(a.neg().to_array(), [-1.0, 2.0, -0.0, -8.0]);
        assert_eq!(
            R::from_array([-3.0, 0.0, 7.0, -0.0]).sign().to_array(),
            [-1.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(R::from_array([NAN, 1.0, -1.0, 0.0]).sign().to_array()[0], 0.0);
        assert_eq!(
            R::from_array([4.0, 9.0, 16.0, 0.0]).sqrt().to_array(),
            [2.0, 3.0, 4.0, 0.0]
        );

        for (estimate, exact) in a
            .abs()
            .add(R::splat(0.5))
            .recip_approx()
            .to_array()
            .into_iter()
            .zip([1.0 / 1.5, 1.0 / 2.5, 1.0 / 0.5, 1.0 / 8.5])
        {
            assert!(((estimate - exact) / exact).abs() <= crate::APPROX_EPSILON);
        }
        for (estimate, exact) in R::from_array([1.0, 4.0, 0.25, 100.0])
            .rsqrt_approx()
            .to_array()
            .into_iter()
            .zip([1.0, 0.5, 2.0, 0.1])
        {
            assert!(((estimate - exact) / exact).abs() <= crate::APPROX_EPSILON);
        }

        assert_eq!(a.cmp_lt(b), 0b0011);
        assert_eq!(a.cmp_gt(b), 0b1000);
        assert_eq!(a.cmp_le(b), 0b0111);
        assert_eq!(a.cmp_ge(b), 0b1100);
        assert_eq!(a.cmp_eq(b), 0b0100);
        assert_eq!(a.cmp_ne(b), 0b1011);
        let n = R::from_array([NAN, 1.0, 1.0, 1.0]);
        assert_eq!(n.cmp_eq(n), 0b1110);
        assert_eq!(n.cmp_ne(n), 0b0001);

        let v = R::from_array([0.0, 1.0, 2.0, 3.0]);
        assert_eq!(v.swap_pairs().to_array(), [1.0, 0.0, 3.0, 2.0]);
        assert_eq!(v.swap_halves().to_array(), [2.0, 3.0, 0.0, 1.0]);
        assert_eq!(v.dup_lane2().to_array(), [2.0; 4]);
        assert_eq!(v.yzx().to_array(), [1.0, 2.0, 0.0, 3.0]);
        assert_eq!(v.zxy().to_array(), [2.0, 0.0, 1.0, 3.0]);

        let masked = R::splat(9.0).and(R::lane_mask(3)).to_array();
        assert_eq!(masked, [9.0, 9.0, 9.0, 0.0]);
        assert_eq!(R::splat(9.0).and(R::lane_mask(0)).to_array(), [0.0; 4]);
        assert_eq!(a.xor(a).to_array(), [0.0; 4]);
    }

    fn check_partial_io<R: Register>() {
        #[repr(C, align(16))]
        struct Buf([f32; 8]);

        let src = Buf([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        unsafe {
            assert_eq!(R::load_aligned(src.0.as_ptr()).to_array(), [1.0, 2.0, 3.0, 4.0]);
            assert_eq!(R::load_unaligned(src.0.as_ptr().add(1)).to_array(), [2.0, 3.0, 4.0, 5.0]);
            assert_eq!(R::load_triple(src.0.as_ptr().add(5)).to_array(), [6.0, 7.0, 8.0, 0.0]);
            assert_eq!(R::load_pair(src.0.as_ptr().add(6)).to_array(), [7.0, 8.0, 0.0, 0.0]);
            assert_eq!(R::load_single(src.0.as_ptr().add(7)).to_array(), [8.0, 0.0, 0.0, 0.0]);
        }

        let reg = R::from_array([-1.0, -2.0, -3.0, -4.0]);
        let mut dst = Buf([0.0; 8]);
        unsafe {
            reg.store_aligned(dst.0.as_mut_ptr().add(4));
            reg.store_triple(dst.0.as_mut_ptr().add(1));
        }
        assert_eq!(dst.0, [0.0, -1.0, -2.0, -3.0, -1.0, -2.0, -3.0, -4.0]);

        let mut dst = Buf([0.0; 8]);
        unsafe {
            reg.store_unaligned(dst.0.as_mut_ptr().add(3));
            reg.store_pair(dst.0.as_mut_ptr());
            reg.store_single(dst.0.as_mut_ptr().add(7));
        }
        assert_eq!(dst.0, [-1.0, -2.0, 0.0, -1.0, -2.0, -3.0, -4.0, -1.0]);
    }

    #[test]
    fn scalar_backend() {
        check_backend::<Scalar128>();
        check_partial_io::<Scalar128>();
    }

    #[test]
    fn default_backend() {
        check_backend::<DefaultRegister>();
        check_partial_io::<DefaultRegister>();
    }

    #[test]
    fn register_shape() {
        assert_eq!(DefaultRegister::LANES, crate::REGISTER_LANES);
        assert_eq!(DefaultRegister::WIDTH, crate::MAX_SIMD_SIZE);
        assert_eq!(DefaultRegister::ALIGN, 16);
        assert_eq!(Scalar128::ALIGN, 16);
    }
}
