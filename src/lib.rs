//! Fixed-size `f32` vectors and matrices whose arithmetic is driven through a
//! generic register policy.
//!
//! A vector type only declares its shape (rows, columns, column alignment and
//! physical storage). The [`policy::RegisterPolicy`] turns that shape into a
//! register count, a per-chunk load/store strategy and an active lane count,
//! and the operation families in [`ops`] expand every elementwise, comparison
//! or reduction operation into one hardware instruction per register.
//!
//! With nothing but `core` and `num_traits`, the crate stays `no_std`
//! portable: SSE on `x86`/`x86_64`, NEON on `aarch64`, and a plain array
//! backend everywhere else.

#![forbid(missing_docs)]
#![forbid(unsafe_op_in_unsafe_fn)]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("lazy_vecmath needs either the `std` or the `libm` feature for scalar float maths");

mod private {
    pub trait Internal {}
}

use crate::private::Internal;

pub mod bitfield;
pub mod by_ref;
pub mod error;
pub mod geometry;
pub mod ops;
pub mod policy;
pub mod register;
pub mod vector;

pub use bitfield::Bitfield;
pub use error::VectorError;
pub use policy::{ChunkKind, Packed, RegisterPolicy};
pub use register::{DefaultRegister, Register};
pub use vector::{Float2, Float3, Float4, Float4x4};

#[doc(hidden)]
pub use num_traits as __num_traits;

/// The width (in bytes) of the register every vector type is partitioned into.
///
/// All backends expose a 128-bit register: SSE `__m128`, NEON `float32x4_t`,
/// or the portable `[f32; 4]` fallback.
pub const MAX_SIMD_SIZE: usize = 16;

/// The number of single precision lanes in one register.
pub const REGISTER_LANES: usize = MAX_SIMD_SIZE / core::mem::size_of::<f32>();

/// Tolerance for exact arithmetic paths (`+`, `-`, `*`, `/`, `sqrt`).
pub const EPSILON: f32 = 1e-6;

/// Relative tolerance for the approximation paths (`reciprocal`, `rsqrt`,
/// `normalize`, `fast_div`).
///
/// SSE guarantees a relative error of at most `1.5 * 2^-12` for `rcpps` and
/// `rsqrtps`; NEON estimates are refined by one Newton-Raphson step to land
/// inside the same bound.
pub const APPROX_EPSILON: f32 = 1.0 / 1024.0;
