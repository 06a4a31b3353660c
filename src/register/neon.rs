use super::Register;

use core::arch::aarch64::*;

/// A NEON `float32x4_t` register.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct Neon128(float32x4_t);

impl Neon128 {
    /// Wraps a raw `float32x4_t`.
    #[inline(always)]
    pub const fn from_raw(raw: float32x4_t) -> Self {
        Self(raw)
    }

    /// The raw `float32x4_t`.
    #[inline(always)]
    pub const fn into_raw(self) -> float32x4_t {
        self.0
    }

    #[inline(always)]
    fn bits(self) -> uint32x4_t {
        unsafe { vreinterpretq_u32_f32(self.0) }
    }

    #[inline(always)]
    fn from_bits(bits: uint32x4_t) -> Self {
        Self(unsafe { vreinterpretq_f32_u32(bits) })
    }
}

/// Packs a lanewise all-ones/all-zeros comparison into four bits.
#[inline(always)]
fn movemask(mask: uint32x4_t) -> u32 {
    const WEIGHTS: [u32; 4] = [1, 2, 4, 8];
    unsafe { vaddvq_u32(vandq_u32(mask, vld1q_u32(WEIGHTS.as_ptr()))) }
}

impl Register for Neon128 {
    const NAME: &'static str = "neon";

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self(unsafe { vdupq_n_f32(value) })
    }

    #[inline(always)]
    fn zero() -> Self {
        Self::splat(0.0)
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        Self(unsafe { vld1q_f32(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut out = [0.0; 4];
        unsafe { vst1q_f32(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    fn first(self) -> f32 {
        unsafe { vgetq_lane_f32::<0>(self.0) }
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        Self(unsafe { vld1q_f32(ptr) })
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self(unsafe { vld1q_f32(ptr) })
    }

    #[inline(always)]
    unsafe fn load_triple(ptr: *const f32) -> Self {
        unsafe {
            let high = vld1_lane_f32::<0>(ptr.add(2), vdup_n_f32(0.0));
            Self(vcombine_f32(vld1_f32(ptr), high))
        }
    }

    #[inline(always)]
    unsafe fn load_pair(ptr: *const f32) -> Self {
        Self(unsafe { vcombine_f32(vld1_f32(ptr), vdup_n_f32(0.0)) })
    }

    #[inline(always)]
    unsafe fn load_single(ptr: *const f32) -> Self {
        Self(unsafe { vld1q_lane_f32::<0>(ptr, vdupq_n_f32(0.0)) })
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        unsafe { vst1q_f32(ptr, self.0) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut f32) {
        unsafe { vst1q_f32(ptr, self.0) }
    }

    #[inline(always)]
    unsafe fn store_triple(self, ptr: *mut f32) {
        unsafe {
            vst1_f32(ptr, vget_low_f32(self.0));
            vst1q_lane_f32::<2>(ptr.add(2), self.0);
        }
    }

    #[inline(always)]
    unsafe fn store_pair(self, ptr: *mut f32) {
        unsafe { vst1_f32(ptr, vget_low_f32(self.0)) }
    }

    #[inline(always)]
    unsafe fn store_single(self, ptr: *mut f32) {
        unsafe { vst1q_lane_f32::<0>(ptr, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { vaddq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { vsubq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { vmulq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { vdivq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        // fmin propagates NaN; select keeps `rhs` like the other backends
        let less = unsafe { vcltq_f32(self.0, rhs.0) };
        Self(unsafe { vbslq_f32(less, self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        let greater = unsafe { vcgtq_f32(self.0, rhs.0) };
        Self(unsafe { vbslq_f32(greater, self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        Self(unsafe { vfmaq_f32(b.0, self.0, a.0) })
    }

    #[inline(always)]
    fn recip_approx(self) -> Self {
        unsafe {
            let estimate = vrecpeq_f32(self.0);
            Self(vmulq_f32(vrecpsq_f32(self.0, estimate), estimate))
        }
    }

    #[inline(always)]
    fn rsqrt_approx(self) -> Self {
        unsafe {
            let estimate = vrsqrteq_f32(self.0);
            let step = vrsqrtsq_f32(vmulq_f32(self.0, estimate), estimate);
            Self(vmulq_f32(step, estimate))
        }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { vsqrtq_f32(self.0) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self(unsafe { vabsq_f32(self.0) })
    }

    #[inline(always)]
    fn sign(self) -> Self {
        unsafe {
            let zero = vdupq_n_f32(0.0);
            let positive = vandq_u32(vcgtq_f32(self.0, zero), Self::splat(1.0).bits());
            let negative = vandq_u32(vcltq_f32(self.0, zero), Self::splat(-1.0).bits());
            Self::from_bits(vorrq_u32(positive, negative))
        }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Self::from_bits(unsafe { vandq_u32(self.bits(), rhs.bits()) })
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self::from_bits(unsafe { veorq_u32(self.bits(), rhs.bits()) })
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> u32 {
        movemask(unsafe { vcltq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> u32 {
        movemask(unsafe { vcgtq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> u32 {
        movemask(unsafe { vcleq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> u32 {
        movemask(unsafe { vcgeq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> u32 {
        movemask(unsafe { vceqq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> u32 {
        movemask(unsafe { vmvnq_u32(vceqq_f32(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn swap_pairs(self) -> Self {
        Self(unsafe { vrev64q_f32(self.0) })
    }

    #[inline(always)]
    fn swap_halves(self) -> Self {
        Self(unsafe { vextq_f32::<2>(self.0, self.0) })
    }

    #[inline(always)]
    fn dup_lane2(self) -> Self {
        Self(unsafe { vdupq_laneq_f32::<2>(self.0) })
    }

    #[inline(always)]
    fn yzx(self) -> Self {
        // [y, z, w, x] then put w back in lane 3
        unsafe {
            let rotated = vextq_f32::<1>(self.0, self.0);
            let x = vgetq_lane_f32::<0>(self.0);
            let w = vgetq_lane_f32::<3>(self.0);
            Self(vsetq_lane_f32::<3>(w, vsetq_lane_f32::<2>(x, rotated)))
        }
    }

    #[inline(always)]
    fn zxy(self) -> Self {
        // [z, w, x, y] -> [z, x, y, w]
        unsafe {
            let rotated = vextq_f32::<2>(self.0, self.0);
            let x = vgetq_lane_f32::<0>(self.0);
            let y = vgetq_lane_f32::<1>(self.0);
            let w = vgetq_lane_f32::<3>(self.0);
            let out = vsetq_lane_f32::<1>(x, rotated);
            let out = vsetq_lane_f32::<2>(y, out);
            Self(vsetq_lane_f32::<3>(w, out))
        }
    }
}
