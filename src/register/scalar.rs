use super::Register;

use num_traits::Float;

/// Portable four-lane register backed by a plain array.
///
/// Used on targets without SSE2 or NEON, and usable everywhere as a reference
/// backend. The approximation entry points are exact here.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct Scalar128([f32; 4]);

impl Scalar128 {
    #[inline(always)]
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self(self.0.map(f))
    }

    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self(core::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    #[inline(always)]
    fn zip_bits(self, rhs: Self, f: impl Fn(u32, u32) -> u32) -> Self {
        self.zip(rhs, |a, b| f32::from_bits(f(a.to_bits(), b.to_bits())))
    }

    #[inline(always)]
    fn mask(self, rhs: Self, f: impl Fn(f32, f32) -> bool) -> u32 {
        (0..4).fold(0, |bits, i| bits | (u32::from(f(self.0[i], rhs.0[i])) << i))
    }

    #[inline(always)]
    fn shuffle(self, lanes: [usize; 4]) -> Self {
        Self(lanes.map(|i| self.0[i]))
    }
}

impl Register for Scalar128 {
    const NAME: &'static str = "scalar";

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self([value; 4])
    }

    #[inline(always)]
    fn zero() -> Self {
        Self([0.0; 4])
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        Self(lanes)
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        self.0
    }

    #[inline(always)]
    fn first(self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        Self(unsafe { ptr.cast::<[f32; 4]>().read() })
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self(unsafe { ptr.cast::<[f32; 4]>().read() })
    }

    #[inline(always)]
    unsafe fn load_triple(ptr: *const f32) -> Self {
        unsafe { Self([ptr.read(), ptr.add(1).read(), ptr.add(2).read(), 0.0]) }
    }

    #[inline(always)]
    unsafe fn load_pair(ptr: *const f32) -> Self {
        unsafe { Self([ptr.read(), ptr.add(1).read(), 0.0, 0.0]) }
    }

    #[inline(always)]
    unsafe fn load_single(ptr: *const f32) -> Self {
        unsafe { Self([ptr.read(), 0.0, 0.0, 0.0]) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        unsafe { ptr.cast::<[f32; 4]>().write(self.0) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut f32) {
        unsafe { ptr.cast::<[f32; 4]>().write(self.0) }
    }

    #[inline(always)]
    unsafe fn store_triple(self, ptr: *mut f32) {
        unsafe { core::ptr::copy_nonoverlapping(self.0.as_ptr(), ptr, 3) }
    }

    #[inline(always)]
    unsafe fn store_pair(self, ptr: *mut f32) {
        unsafe { core::ptr::copy_nonoverlapping(self.0.as_ptr(), ptr, 2) }
    }

    #[inline(always)]
    unsafe fn store_single(self, ptr: *mut f32) {
        unsafe { ptr.write(self.0[0]) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a * b)
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a / b)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| if a < b { a } else { b })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| if a > b { a } else { b })
    }

    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        Self(core::array::from_fn(|i| Float::mul_add(self.0[i], a.0[i], b.0[i])))
    }

    #[inline(always)]
    fn recip_approx(self) -> Self {
        self.map(Float::recip)
    }

    #[inline(always)]
    fn rsqrt_approx(self) -> Self {
        self.map(|x| Float::sqrt(x).recip())
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        self.map(Float::sqrt)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.map(|x| f32::from_bits(x.to_bits() & 0x7fff_ffff))
    }

    #[inline(always)]
    fn sign(self) -> Self {
        self.map(|x| {
            if x > 0.0 {
                1.0
            } else if x < 0.0 {
                -1.0
            } else {
                0.0
            }
        })
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        self.zip_bits(rhs, |a, b| a & b)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self.zip_bits(rhs, |a, b| a ^ b)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> u32 {
        self.mask(rhs, |a, b| a < b)
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> u32 {
        self.mask(rhs, |a, b| a > b)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> u32 {
        self.mask(rhs, |a, b| a <= b)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> u32 {
        self.mask(rhs, |a, b| a >= b)
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> u32 {
        self.mask(rhs, |a, b| a == b)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> u32 {
        self.mask(rhs, |a, b| a != b)
    }

    #[inline(always)]
    fn swap_pairs(self) -> Self {
        self.shuffle([1, 0, 3, 2])
    }

    #[inline(always)]
    fn swap_halves(self) -> Self {
        self.shuffle([2, 3, 0, 1])
    }

    #[inline(always)]
    fn dup_lane2(self) -> Self {
        self.shuffle([2; 4])
    }

    #[inline(always)]
    fn yzx(self) -> Self {
        self.shuffle([1, 2, 0, 3])
    }

    #[inline(always)]
    fn zxy(self) -> Self {
        self.shuffle([2, 0, 1, 3])
    }
}
