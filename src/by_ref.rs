//! Arithmetic without consuming the operands.
//!
//! Vector types are `Copy`, but a `Float4x4` is 64 bytes; these traits let
//! generic code work through references and write into an existing value.

/// Addition through references.
pub trait AddByRef<Rhs: ?Sized = Self> {
    /// The type of `Self + Rhs`.
    type Output;

    /// Adds `self` and `rhs` without consuming them.
    #[must_use]
    fn as_add(&self, rhs: &Rhs) -> Self::Output;

    /// Like [`AddByRef::as_add`], only it writes output to a pre-existing value.
    fn add_into(&self, rhs: &Rhs, out: &mut Self::Output);
}

/// Subtraction through references.
pub trait SubByRef<Rhs: ?Sized = Self> {
    /// The type of `Self - Rhs`.
    type Output;

    /// Subtracts `rhs` from `self` without consuming them.
    #[must_use]
    fn as_sub(&self, rhs: &Rhs) -> Self::Output;

    /// Like [`SubByRef::as_sub`], only it writes output to a pre-existing value.
    fn sub_into(&self, rhs: &Rhs, out: &mut Self::Output);
}

/// Multiplication through references.
pub trait MulByRef<Rhs: ?Sized = Self> {
    /// The type of `Self * Rhs`.
    type Output;

    /// Multiplies `self` and `rhs` without consuming them.
    #[must_use]
    fn as_mul(&self, rhs: &Rhs) -> Self::Output;

    /// Like [`MulByRef::as_mul`], only it writes output to a pre-existing value.
    fn mul_into(&self, rhs: &Rhs, out: &mut Self::Output);
}

/// Division through references.
pub trait DivByRef<Rhs: ?Sized = Self> {
    /// The type of `Self / Rhs`.
    type Output;

    /// Divides `self` by `rhs` without consuming them.
    #[must_use]
    fn as_div(&self, rhs: &Rhs) -> Self::Output;

    /// Like [`DivByRef::as_div`], only it writes output to a pre-existing value.
    fn div_into(&self, rhs: &Rhs, out: &mut Self::Output);
}
