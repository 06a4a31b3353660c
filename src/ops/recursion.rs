use super::{Recursion, MAX_REGISTERS};
use crate::policy::{Packed, RegisterPolicy};
use crate::register::Register;

/// Folds the first `active` lanes of `v` with `op`.
///
/// Odd lane counts fold the tail in last, so every active lane is counted
/// exactly once and padding never is.
#[inline(always)]
fn reduce_lanes<R: Register>(v: R, active: usize, op: impl Fn(R, R) -> R) -> f32 {
    match active {
        1 => v.first(),
        2 => op(v, v.swap_pairs()).first(),
        3 => op(op(v, v.swap_pairs()), v.dup_lane2()).first(),
        _ => {
            let halves = op(v, v.swap_halves());
            op(halves, halves.swap_pairs()).first()
        }
    }
}

/// Pairwise tree fold over `regs[..len]`, carrying an odd tail up a level.
#[inline(always)]
fn reduce_registers<R: Register>(
    regs: &mut [R; MAX_REGISTERS],
    mut len: usize,
    op: impl Fn(R, R) -> R,
) -> R {
    while len > 1 {
        let half = len / 2;
        for i in 0..half {
            regs[i] = op(regs[2 * i], regs[2 * i + 1]);
        }
        if len % 2 == 1 {
            regs[half] = regs[len - 1];
        }
        len = half + len % 2;
    }
    regs[0]
}

/// Sign mask that negates everything but lane 0 of chunk 0.
#[inline(always)]
fn difference_mask<R: Register>(chunk: usize) -> R {
    if chunk == 0 {
        R::from_array([0.0, -0.0, -0.0, -0.0])
    } else {
        R::splat(-0.0)
    }
}

impl<T: Packed, R: Register> Recursion<T, R> {
    #[inline(always)]
    fn fold(value: &T, transform: impl Fn(usize, R) -> R, op: impl Fn(R, R) -> R) -> f32 {
        let count = RegisterPolicy::<T, R>::REGISTER_COUNT;
        let mut regs = [R::zero(); MAX_REGISTERS];
        for (chunk, reg) in regs.iter_mut().enumerate().take(count) {
            *reg = transform(chunk, RegisterPolicy::<T, R>::load_chunk(value, chunk));
        }
        let folded = reduce_registers(&mut regs, count, &op);
        reduce_lanes(folded, RegisterPolicy::<T, R>::LANES, op)
    }

    /// Sum of products with the multiply fused into the first tree level.
    #[inline(always)]
    fn fold_products(lhs: &T, rhs: &T, transform: impl Fn(usize, R) -> R) -> f32 {
        let count = RegisterPolicy::<T, R>::REGISTER_COUNT;
        let load = |chunk| {
            let l = transform(chunk, RegisterPolicy::<T, R>::load_chunk(lhs, chunk));
            (l, RegisterPolicy::<T, R>::load_chunk(rhs, chunk))
        };

        let mut regs = [R::zero(); MAX_REGISTERS];
        let pairs = count / 2;
        for (i, reg) in regs.iter_mut().enumerate().take(pairs) {
            let (l0, r0) = load(2 * i);
            let (l1, r1) = load(2 * i + 1);
            *reg = l0.mul_add(r0, l1.mul(r1));
        }
        if count % 2 == 1 {
            let (l, r) = load(count - 1);
            regs[pairs] = l.mul(r);
        }

        let folded = reduce_registers(&mut regs, pairs + count % 2, R::add);
        reduce_lanes(folded, RegisterPolicy::<T, R>::LANES, R::add)
    }

    /// Sum of every element.
    #[inline(always)]
    pub fn sum(value: &T) -> f32 {
        Self::fold(value, |_, r| r, R::add)
    }

    /// Element 0 minus every other element.
    ///
    /// Signs are flipped before a single summation, so the result matches
    /// `v[0] - v[1] - ... - v[n - 1]` up to rounding order.
    #[inline(always)]
    pub fn difference(value: &T) -> f32 {
        Self::fold(value, |chunk, r| r.xor(difference_mask(chunk)), R::add)
    }

    /// Smallest element. Propagation of NaN follows [`Register::min`].
    #[inline(always)]
    pub fn minimum(value: &T) -> f32 {
        Self::fold(value, |_, r| r, R::min)
    }

    /// Largest element. Propagation of NaN follows [`Register::max`].
    #[inline(always)]
    pub fn maximum(value: &T) -> f32 {
        Self::fold(value, |_, r| r, R::max)
    }

    /// `Σ lhs[i] * rhs[i]`, the dot product.
    #[inline(always)]
    pub fn sum_product(lhs: &T, rhs: &T) -> f32 {
        Self::fold_products(lhs, rhs, |_, l| l)
    }

    /// `lhs[0] * rhs[0] - Σ_{i ≥ 1} lhs[i] * rhs[i]`.
    ///
    /// With a swapped second operand this is the 2D cross product.
    #[inline(always)]
    pub fn diff_product(lhs: &T, rhs: &T) -> f32 {
        Self::fold_products(lhs, rhs, |chunk, l| l.xor(difference_mask(chunk)))
    }
}
