//! The four operation families.
//!
//! Each family is a zero-sized type parameterised over a [`Packed`] vector
//! type and a [`Register`]. Every operation walks the policy's register
//! chunks, so after inlining a `Float4x4` addition is four loads per operand,
//! four adds and four stores, with no loop left behind.

use core::marker::PhantomData;

use crate::policy::{Packed, RegisterPolicy};
use crate::register::{DefaultRegister, Register};

mod binary;
mod comparison;
mod recursion;
mod unary;

/// Upper bound on the register count of a single vector type.
///
/// Reductions keep one register per chunk on the stack.
pub const MAX_REGISTERS: usize = 16;

/// Elementwise operations with two operands.
pub struct Binary<T, R = DefaultRegister>(PhantomData<fn() -> (T, R)>);

/// Elementwise operations with one operand.
pub struct Unary<T, R = DefaultRegister>(PhantomData<fn() -> (T, R)>);

/// Lanewise comparisons producing a [`crate::Bitfield`].
pub struct Comparison<T, R = DefaultRegister>(PhantomData<fn() -> (T, R)>);

/// Horizontal reductions down to one `f32`.
pub struct Recursion<T, R = DefaultRegister>(PhantomData<fn() -> (T, R)>);

/// Applies `f` to every register chunk of `value`.
#[inline(always)]
pub(crate) fn map<T: Packed, R: Register>(value: &T, f: impl Fn(R) -> R) -> T {
    let mut out = T::zeroed();
    for chunk in 0..RegisterPolicy::<T, R>::REGISTER_COUNT {
        let v = RegisterPolicy::<T, R>::load_chunk(value, chunk);
        RegisterPolicy::<T, R>::store_chunk(&mut out, chunk, f(v));
    }
    out
}

/// Applies `f` to every pair of matching register chunks.
#[inline(always)]
pub(crate) fn zip<T: Packed, R: Register>(lhs: &T, rhs: &T, f: impl Fn(R, R) -> R) -> T {
    let mut out = T::zeroed();
    for chunk in 0..RegisterPolicy::<T, R>::REGISTER_COUNT {
        let l = RegisterPolicy::<T, R>::load_chunk(lhs, chunk);
        let r = RegisterPolicy::<T, R>::load_chunk(rhs, chunk);
        RegisterPolicy::<T, R>::store_chunk(&mut out, chunk, f(l, r));
    }
    out
}
