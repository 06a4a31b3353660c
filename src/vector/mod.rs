//! The concrete vector and matrix types.
//!
//! Every type here is declared through [`packed_vector!`](crate::packed_vector),
//! which emits the storage struct, its [`Packed`](crate::Packed) layout and the
//! full operator surface on top of the operation families. Only the
//! type-specific constructors, accessors and constants live in the per-type
//! modules.

mod float2;
mod float3;
mod float4;
mod float4x4;

pub use float2::Float2;
pub use float3::Float3;
pub use float4::Float4;
pub use float4x4::Float4x4;

/// Declares a fixed-size `f32` vector type with a register-driven layout.
///
/// `rows` and `columns` give the logical shape (a column vector has one
/// column), `column_align` the byte alignment of each column, `align` the
/// `repr(align)` of the type and `storage` its physical `f32` count, padding
/// included. A layout that does not work out fails to compile on first use.
///
/// ```
/// lazy_vecmath::packed_vector! {
///     /// Three tightly packed lanes.
///     pub struct Packed3 { rows: 3, columns: 1, column_align: 16, align: 4, storage: 3 }
/// }
///
/// let v = Packed3::from_array([1.0, 2.0, 3.0]);
/// assert_eq!((v + v).to_array(), [2.0, 4.0, 6.0]);
/// assert_eq!(v.sum(), 6.0);
/// ```
#[macro_export]
macro_rules! packed_vector {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            rows: $rows:literal,
            columns: $columns:literal,
            column_align: $column_align:literal,
            align: $align:literal,
            storage: $storage:literal $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        #[repr(C, align($align))]
        $vis struct $name {
            data: [f32; $storage],
        }

        // SAFETY: a single `[f32; $storage]` field under `repr(C)`.
        unsafe impl $crate::Packed for $name {
            const ROWS: usize = $rows;
            const COLUMNS: usize = $columns;
            const COLUMN_ALIGNMENT: usize = $column_align;
            const STORAGE: usize = $storage;

            #[inline(always)]
            fn zeroed() -> Self {
                Self { data: [0.0; $storage] }
            }

            #[inline(always)]
            fn as_ptr(&self) -> *const f32 {
                self.data.as_ptr()
            }

            #[inline(always)]
            fn as_mut_ptr(&mut self) -> *mut f32 {
                self.data.as_mut_ptr()
            }
        }

        impl $name {
            /// Logical element count.
            pub const LEN: usize = $rows * $columns;

            /// Every element `0.0`.
            pub const ZERO: Self = Self::splat(0.0);

            /// Every element `1.0`.
            pub const ONE: Self = Self::splat(1.0);

            /// Builds a value from its elements in logical (column-major) order.
            pub const fn from_array(values: [f32; $rows * $columns]) -> Self {
                let mut data = [0.0; $storage];
                let mut i = 0;
                while i < $rows * $columns {
                    data[<Self as $crate::Packed>::LAYOUT.index(i)] = values[i];
                    i += 1;
                }
                Self { data }
            }

            /// The elements in logical (column-major) order.
            pub const fn to_array(&self) -> [f32; $rows * $columns] {
                let mut out = [0.0; $rows * $columns];
                let mut i = 0;
                while i < $rows * $columns {
                    out[i] = self.data[<Self as $crate::Packed>::LAYOUT.index(i)];
                    i += 1;
                }
                out
            }

            /// `value` in every element.
            pub const fn splat(value: f32) -> Self {
                Self::from_array([value; $rows * $columns])
            }

            /// Builds a value from a single register.
            ///
            /// Fails to compile for types spanning more than one register.
            #[inline(always)]
            pub fn from_register<R: $crate::Register>(register: R) -> Self {
                const {
                    assert!(
                        $crate::RegisterPolicy::<Self, R>::REGISTER_COUNT == 1,
                        "type spans more than one register"
                    )
                };
                let mut out = <Self as $crate::Packed>::zeroed();
                $crate::RegisterPolicy::<Self, R>::store::<0>(&mut out, register);
                out
            }

            /// Loads the value into a single register; padding lanes are zero.
            ///
            /// Fails to compile for types spanning more than one register.
            #[inline(always)]
            pub fn to_register<R: $crate::Register>(&self) -> R {
                const {
                    assert!(
                        $crate::RegisterPolicy::<Self, R>::REGISTER_COUNT == 1,
                        "type spans more than one register"
                    )
                };
                $crate::RegisterPolicy::<Self, R>::load::<0>(self)
            }

            /// The elements in logical order.
            pub fn iter(&self) -> impl ::core::iter::Iterator<Item = f32> {
                self.to_array().into_iter()
            }

            /// Lanewise minimum.
            #[inline]
            pub fn minimum(&self, other: &Self) -> Self {
                $crate::ops::Binary::<Self>::minimum(self, other)
            }

            /// Lanewise maximum.
            #[inline]
            pub fn maximum(&self, other: &Self) -> Self {
                $crate::ops::Binary::<Self>::maximum(self, other)
            }

            /// Absolute value of every element.
            #[inline]
            pub fn absolute(&self) -> Self {
                $crate::ops::Unary::<Self>::absolute(self)
            }

            /// `1`, `-1` or `0` per element.
            #[inline]
            pub fn sign(&self) -> Self {
                $crate::ops::Unary::<Self>::sign(self)
            }

            /// Approximate reciprocal, within `APPROX_EPSILON` relative error.
            #[inline]
            pub fn reciprocal(&self) -> Self {
                $crate::ops::Unary::<Self>::reciprocal(self)
            }

            /// Square root of every element.
            #[inline]
            pub fn sqrt(&self) -> Self {
                $crate::ops::Unary::<Self>::sqrt(self)
            }

            /// Approximate reciprocal square root, within `APPROX_EPSILON`
            /// relative error.
            #[inline]
            pub fn rsqrt(&self) -> Self {
                $crate::ops::Unary::<Self>::rsqrt(self)
            }

            /// Division through the reciprocal estimate.
            #[inline]
            pub fn fast_div(&self, rhs: &Self) -> Self {
                $crate::ops::Binary::<Self>::fast_divide(self, rhs)
            }

            /// Division by a scalar through the reciprocal estimate.
            #[inline]
            pub fn fast_div_scalar(&self, rhs: f32) -> Self {
                let scale = <$crate::DefaultRegister as $crate::Register>::splat(rhs);
                $crate::ops::Binary::<Self>::multiply_scalar(
                    self,
                    $crate::Register::first($crate::Register::recip_approx(scale)),
                )
            }

            /// Sum of the elements.
            #[inline]
            pub fn sum(&self) -> f32 {
                $crate::ops::Recursion::<Self>::sum(self)
            }

            /// The first element minus all others.
            #[inline]
            pub fn difference(&self) -> f32 {
                $crate::ops::Recursion::<Self>::difference(self)
            }

            /// Smallest element.
            #[inline]
            pub fn min_element(&self) -> f32 {
                $crate::ops::Recursion::<Self>::minimum(self)
            }

            /// Largest element.
            #[inline]
            pub fn max_element(&self) -> f32 {
                $crate::ops::Recursion::<Self>::maximum(self)
            }

            /// Dot product.
            #[inline]
            pub fn dot(&self, other: &Self) -> f32 {
                $crate::ops::Recursion::<Self>::sum_product(self, other)
            }

            /// Squared Euclidean length.
            #[inline]
            pub fn sqr_magnitude(&self) -> f32 {
                self.dot(self)
            }

            /// Euclidean length.
            #[inline]
            pub fn magnitude(&self) -> f32 {
                let squared =
                    <$crate::DefaultRegister as $crate::Register>::splat(self.sqr_magnitude());
                $crate::Register::first($crate::Register::sqrt(squared))
            }

            /// Unit vector in the same direction, scaled by the reciprocal
            /// square root estimate. A zero vector yields non-finite elements.
            #[inline]
            pub fn normalize(&self) -> Self {
                let squared =
                    <$crate::DefaultRegister as $crate::Register>::splat(self.sqr_magnitude());
                $crate::ops::Binary::<Self>::multiply_scalar(
                    self,
                    $crate::Register::first($crate::Register::rsqrt_approx(squared)),
                )
            }

            /// True if every element is within `tolerance` of `other`'s.
            #[inline]
            pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
                let delta = $crate::ops::Binary::<Self>::subtract(self, other);
                let delta = $crate::ops::Unary::<Self>::absolute(&delta);
                $crate::ops::Comparison::<Self>::less_equal_scalar::<{ $rows * $columns }>(
                    &delta, tolerance,
                )
                .all_true()
            }

            /// `self < other` per element.
            #[inline]
            pub fn simd_lt(&self, other: &Self) -> $crate::Bitfield<{ $rows * $columns }> {
                $crate::ops::Comparison::<Self>::less(self, other)
            }

            /// `self > other` per element.
            #[inline]
            pub fn simd_gt(&self, other: &Self) -> $crate::Bitfield<{ $rows * $columns }> {
                $crate::ops::Comparison::<Self>::greater(self, other)
            }

            /// `self <= other` per element.
            #[inline]
            pub fn simd_le(&self, other: &Self) -> $crate::Bitfield<{ $rows * $columns }> {
                $crate::ops::Comparison::<Self>::less_equal(self, other)
            }

            /// `self >= other` per element.
            #[inline]
            pub fn simd_ge(&self, other: &Self) -> $crate::Bitfield<{ $rows * $columns }> {
                $crate::ops::Comparison::<Self>::greater_equal(self, other)
            }

            /// `self == other` per element.
            #[inline]
            pub fn simd_eq(&self, other: &Self) -> $crate::Bitfield<{ $rows * $columns }> {
                $crate::ops::Comparison::<Self>::equal(self, other)
            }

            /// `self != other` per element.
            #[inline]
            pub fn simd_ne(&self, other: &Self) -> $crate::Bitfield<{ $rows * $columns }> {
                $crate::ops::Comparison::<Self>::not_equal(self, other)
            }
        }

        impl ::core::default::Default for $name {
            #[inline]
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl ::core::cmp::PartialEq for $name {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.simd_eq(other).all_true()
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                let mut tuple = f.debug_tuple(::core::stringify!($name));
                for value in self.to_array() {
                    tuple.field(&value);
                }
                tuple.finish()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str("(")?;
                for (i, value) in self.to_array().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    ::core::fmt::Display::fmt(value, f)?;
                }
                f.write_str(")")
            }
        }

        impl ::core::ops::Index<usize> for $name {
            type Output = f32;

            #[inline]
            fn index(&self, index: usize) -> &f32 {
                ::core::assert!(index < Self::LEN, "element index out of bounds");
                &self.data[<Self as $crate::Packed>::slot(index)]
            }
        }

        impl ::core::ops::IndexMut<usize> for $name {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut f32 {
                ::core::assert!(index < Self::LEN, "element index out of bounds");
                &mut self.data[<Self as $crate::Packed>::slot(index)]
            }
        }

        impl ::core::convert::From<[f32; $rows * $columns]> for $name {
            #[inline]
            fn from(values: [f32; $rows * $columns]) -> Self {
                Self::from_array(values)
            }
        }

        impl ::core::convert::From<$name> for [f32; $rows * $columns] {
            #[inline]
            fn from(value: $name) -> Self {
                value.to_array()
            }
        }

        impl ::core::convert::TryFrom<&[f32]> for $name {
            type Error = $crate::VectorError;

            fn try_from(values: &[f32]) -> ::core::result::Result<Self, Self::Error> {
                let array: [f32; $rows * $columns] = ::core::convert::TryFrom::try_from(values)
                    .map_err(|_| $crate::VectorError::LengthMismatch {
                        expected: Self::LEN,
                        found: values.len(),
                    })?;
                Ok(Self::from_array(array))
            }
        }

        impl ::core::ops::Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                $crate::ops::Unary::<Self>::negate(&self)
            }
        }

        $crate::__vector_operator!(
            $name, Add, add, AddAssign, add_assign => add, add_scalar, scalar_add
        );
        $crate::__vector_operator!(
            $name, Sub, sub, SubAssign, sub_assign => subtract, subtract_scalar, scalar_subtract
        );
        $crate::__vector_operator!(
            $name, Mul, mul, MulAssign, mul_assign => multiply, multiply_scalar, scalar_multiply
        );
        $crate::__vector_operator!(
            $name, Div, div, DivAssign, div_assign => divide, divide_scalar, scalar_divide
        );

        $crate::__vector_by_ref!($name, AddByRef, as_add, add_into, add, add_scalar);
        $crate::__vector_by_ref!($name, SubByRef, as_sub, sub_into, subtract, subtract_scalar);
        $crate::__vector_by_ref!($name, MulByRef, as_mul, mul_into, multiply, multiply_scalar);
        $crate::__vector_by_ref!($name, DivByRef, as_div, div_into, divide, divide_scalar);

        impl $crate::__num_traits::Zero for $name {
            #[inline]
            fn zero() -> Self {
                Self::ZERO
            }

            #[inline]
            fn is_zero(&self) -> bool {
                $crate::ops::Comparison::<Self>::equal_scalar::<{ $rows * $columns }>(self, 0.0)
                    .all_true()
            }
        }

        impl $crate::__num_traits::One for $name {
            #[inline]
            fn one() -> Self {
                Self::ONE
            }
        }

        impl $crate::__num_traits::Inv for $name {
            type Output = Self;

            /// Approximate, like [`Self::reciprocal`].
            #[inline]
            fn inv(self) -> Self {
                self.reciprocal()
            }
        }

        impl $crate::__num_traits::MulAdd for $name {
            type Output = Self;

            #[inline]
            fn mul_add(self, a: Self, b: Self) -> Self {
                $crate::ops::Binary::<Self>::mul_add(&self, &a, &b)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __vector_operator {
    (
        $name:ident, $tr:ident, $method:ident, $assign_tr:ident, $assign_method:ident =>
        $vector:ident, $vector_scalar:ident, $scalar_vector:ident
    ) => {
        impl ::core::ops::$tr for $name {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                $crate::ops::Binary::<Self>::$vector(&self, &rhs)
            }
        }

        impl ::core::ops::$tr<f32> for $name {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: f32) -> Self {
                $crate::ops::Binary::<Self>::$vector_scalar(&self, rhs)
            }
        }

        impl ::core::ops::$tr<$name> for f32 {
            type Output = $name;

            #[inline]
            fn $method(self, rhs: $name) -> $name {
                $crate::ops::Binary::<$name>::$scalar_vector(self, &rhs)
            }
        }

        impl ::core::ops::$assign_tr for $name {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $crate::ops::Binary::<Self>::$vector(self, &rhs);
            }
        }

        impl ::core::ops::$assign_tr<f32> for $name {
            #[inline]
            fn $assign_method(&mut self, rhs: f32) {
                *self = $crate::ops::Binary::<Self>::$vector_scalar(self, rhs);
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __vector_by_ref {
    ($name:ident, $tr:ident, $method:ident, $into:ident, $vector:ident, $vector_scalar:ident) => {
        impl $crate::by_ref::$tr for $name {
            type Output = Self;

            #[inline]
            fn $method(&self, rhs: &Self) -> Self {
                $crate::ops::Binary::<Self>::$vector(self, rhs)
            }

            #[inline]
            fn $into(&self, rhs: &Self, out: &mut Self) {
                *out = $crate::ops::Binary::<Self>::$vector(self, rhs);
            }
        }

        impl $crate::by_ref::$tr<f32> for $name {
            type Output = Self;

            #[inline]
            fn $method(&self, rhs: &f32) -> Self {
                $crate::ops::Binary::<Self>::$vector_scalar(self, *rhs)
            }

            #[inline]
            fn $into(&self, rhs: &f32, out: &mut Self) {
                *out = $crate::ops::Binary::<Self>::$vector_scalar(self, *rhs);
            }
        }
    };
}
