use super::Register;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// Immediate for `_mm_shuffle_ps`: output lane `3, 2, 1, 0` takes input lane
/// `w, z, y, x`.
const fn shuffle(w: i32, z: i32, y: i32, x: i32) -> i32 {
    (w << 6) | (z << 4) | (y << 2) | x
}

/// An SSE `__m128` register.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct M128(__m128);

impl M128 {
    /// Wraps a raw `__m128`.
    #[inline(always)]
    pub const fn from_raw(raw: __m128) -> Self {
        Self(raw)
    }

    /// The raw `__m128`.
    #[inline(always)]
    pub const fn into_raw(self) -> __m128 {
        self.0
    }
}

impl Register for M128 {
    const NAME: &'static str = "sse";

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self(unsafe { _mm_set1_ps(value) })
    }

    #[inline(always)]
    fn zero() -> Self {
        Self(unsafe { _mm_setzero_ps() })
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        Self(unsafe { _mm_loadu_ps(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut out = [0.0; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    fn first(self) -> f32 {
        unsafe { _mm_cvtss_f32(self.0) }
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        Self(unsafe { _mm_load_ps(ptr) })
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self(unsafe { _mm_loadu_ps(ptr) })
    }

    #[inline(always)]
    unsafe fn load_triple(ptr: *const f32) -> Self {
        unsafe {
            let low = Self::load_pair(ptr).0;
            let high = _mm_load_ss(ptr.add(2));
            Self(_mm_movelh_ps(low, high))
        }
    }

    #[inline(always)]
    unsafe fn load_pair(ptr: *const f32) -> Self {
        // movq: 64 bits, no alignment requirement, upper half zeroed
        Self(unsafe { _mm_castsi128_ps(_mm_loadl_epi64(ptr.cast::<__m128i>())) })
    }

    #[inline(always)]
    unsafe fn load_single(ptr: *const f32) -> Self {
        Self(unsafe { _mm_load_ss(ptr) })
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut f32) {
        unsafe { _mm_store_ps(ptr, self.0) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut f32) {
        unsafe { _mm_storeu_ps(ptr, self.0) }
    }

    #[inline(always)]
    unsafe fn store_triple(self, ptr: *mut f32) {
        unsafe {
            self.store_pair(ptr);
            _mm_store_ss(ptr.add(2), _mm_movehl_ps(self.0, self.0));
        }
    }

    #[inline(always)]
    unsafe fn store_pair(self, ptr: *mut f32) {
        unsafe { _mm_storel_epi64(ptr.cast::<__m128i>(), _mm_castps_si128(self.0)) }
    }

    #[inline(always)]
    unsafe fn store_single(self, ptr: *mut f32) {
        unsafe { _mm_store_ss(ptr, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm_add_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { _mm_sub_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { _mm_mul_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { _mm_div_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self(unsafe { _mm_min_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self(unsafe { _mm_max_ps(self.0, rhs.0) })
    }

    #[cfg(target_feature = "fma")]
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        Self(unsafe { _mm_fmadd_ps(self.0, a.0, b.0) })
    }

    #[cfg(not(target_feature = "fma"))]
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        self.mul(a).add(b)
    }

    #[inline(always)]
    fn recip_approx(self) -> Self {
        Self(unsafe { _mm_rcp_ps(self.0) })
    }

    #[inline(always)]
    fn rsqrt_approx(self) -> Self {
        Self(unsafe { _mm_rsqrt_ps(self.0) })
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { _mm_sqrt_ps(self.0) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe {
            let magnitude = _mm_castsi128_ps(_mm_set1_epi32(i32::MAX));
            Self(_mm_and_ps(self.0, magnitude))
        }
    }

    #[inline(always)]
    fn sign(self) -> Self {
        unsafe {
            let zero = _mm_setzero_ps();
            let positive = _mm_and_ps(_mm_cmpgt_ps(self.0, zero), _mm_set1_ps(1.0));
            let negative = _mm_and_ps(_mm_cmplt_ps(self.0, zero), _mm_set1_ps(-1.0));
            Self(_mm_or_ps(positive, negative))
        }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Self(unsafe { _mm_and_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self(unsafe { _mm_xor_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> u32 {
        unsafe { _mm_movemask_ps(_mm_cmplt_ps(self.0, rhs.0)) as u32 }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> u32 {
        unsafe { _mm_movemask_ps(_mm_cmpgt_ps(self.0, rhs.0)) as u32 }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> u32 {
        unsafe { _mm_movemask_ps(_mm_cmple_ps(self.0, rhs.0)) as u32 }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> u32 {
        unsafe { _mm_movemask_ps(_mm_cmpge_ps(self.0, rhs.0)) as u32 }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> u32 {
        unsafe { _mm_movemask_ps(_mm_cmpeq_ps(self.0, rhs.0)) as u32 }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> u32 {
        unsafe { _mm_movemask_ps(_mm_cmpneq_ps(self.0, rhs.0)) as u32 }
    }

    #[inline(always)]
    fn swap_pairs(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<{ shuffle(2, 3, 0, 1) }>(self.0, self.0) })
    }

    #[inline(always)]
    fn swap_halves(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<{ shuffle(1, 0, 3, 2) }>(self.0, self.0) })
    }

    #[inline(always)]
    fn dup_lane2(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<{ shuffle(2, 2, 2, 2) }>(self.0, self.0) })
    }

    #[inline(always)]
    fn yzx(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<{ shuffle(3, 0, 2, 1) }>(self.0, self.0) })
    }

    #[inline(always)]
    fn zxy(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<{ shuffle(3, 1, 0, 2) }>(self.0, self.0) })
    }
}
