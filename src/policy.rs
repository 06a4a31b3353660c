//! Derives, from a vector type's shape, how it maps onto registers.
//!
//! Every quantity here is an associated constant evaluated at compile time.
//! Invalid shapes (a storage size that disagrees with the type, chunks wider
//! than a register, a physical layout that does not match the register
//! chunks) fail the build the first time a policy is used.

use core::marker::PhantomData;
use core::mem::{align_of, size_of};

use crate::geometry::{Geometry, Layout};
use crate::register::{DefaultRegister, Register};

const F32: usize = size_of::<f32>();

/// A fixed-size `f32` vector or column-major matrix with a known physical layout.
///
/// # Safety
///
/// The implementor must be exactly `STORAGE` contiguous `f32` values, starting
/// at the address returned by [`Packed::as_ptr`], with no other fields. The
/// [`packed_vector!`](crate::packed_vector) macro is the supported way to
/// implement this trait.
pub unsafe trait Packed: Copy {
    /// Logical rows (the lanes of one column).
    const ROWS: usize;
    /// Logical columns.
    const COLUMNS: usize;
    /// Byte alignment of one column.
    const COLUMN_ALIGNMENT: usize;
    /// Physical `f32` slots, padding included.
    const STORAGE: usize;

    /// Logical element count.
    const LEN: usize = Self::ROWS * Self::COLUMNS;
    /// Alignment of the whole type.
    const ALIGNMENT: usize = align_of::<Self>();
    /// Bytes actually carrying data.
    const ACTIVE_BYTES: usize = Self::LEN * F32;

    /// Column-major placement of every logical element.
    const LAYOUT: Layout = Layout::new(
        F32,
        Self::ROWS,
        Self::COLUMNS,
        Self::COLUMN_ALIGNMENT,
        Self::ALIGNMENT,
    );
    /// Partition of one column into column-aligned blocks.
    const COLUMN_GEOMETRY: Geometry = Self::LAYOUT.column;
    /// Partition of the padded columns into type-aligned blocks.
    const BLOCK_GEOMETRY: Geometry = Self::LAYOUT.block;
    /// Active bytes that one alignment block covers.
    const ACTIVE_ALIGNED_BYTES: usize =
        F32 * Self::COLUMN_GEOMETRY.length * Self::BLOCK_GEOMETRY.length;

    /// All slots zero, padding included.
    fn zeroed() -> Self;

    /// Address of slot 0.
    fn as_ptr(&self) -> *const f32;

    /// Mutable address of slot 0.
    fn as_mut_ptr(&mut self) -> *mut f32;

    /// Every physical slot, padding included.
    #[inline(always)]
    fn storage(&self) -> &[f32] {
        // SAFETY: implementors are exactly `STORAGE` contiguous `f32`.
        unsafe { core::slice::from_raw_parts(self.as_ptr(), Self::STORAGE) }
    }

    /// Physical slot of the logical element `index`.
    #[inline(always)]
    fn slot(index: usize) -> usize {
        Self::LAYOUT.index(index)
    }
}

/// How one register chunk is read from and written to memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    /// A full register from an address aligned to the register.
    Aligned,
    /// A full register from an address aligned only to `f32`.
    Unaligned,
    /// Three lanes.
    Triple,
    /// Two lanes.
    Pair,
    /// One lane.
    Single,
}

/// Maps `T` onto a sequence of `R` registers.
///
/// `T` is split into [`RegisterPolicy::REGISTER_COUNT`] chunks of
/// [`RegisterPolicy::PHYSICAL_LANES`] consecutive slots each; the first
/// [`RegisterPolicy::LANES`] lanes of every chunk carry data and the rest are
/// padding.
///
/// ```
/// use lazy_vecmath::{ChunkKind, Float3, Float4x4, RegisterPolicy};
///
/// assert_eq!(RegisterPolicy::<Float3>::REGISTER_COUNT, 1);
/// assert_eq!(RegisterPolicy::<Float3>::LANES, 3);
/// assert_eq!(RegisterPolicy::<Float3>::CHUNK, ChunkKind::Aligned);
/// assert_eq!(RegisterPolicy::<Float4x4>::REGISTER_COUNT, 4);
/// ```
pub struct RegisterPolicy<T, R = DefaultRegister>(PhantomData<fn() -> (T, R)>);

impl<T: Packed, R: Register> RegisterPolicy<T, R> {
    /// `T`'s alignment.
    pub const ALIGNMENT: usize = T::ALIGNMENT;
    /// Bytes carrying data.
    pub const ACTIVE_SIZE: usize = T::ACTIVE_BYTES;
    /// Width of `R` in bytes.
    pub const REGISTER_SIZE: usize = R::WIDTH;
    /// Active bytes handled by one register.
    pub const ACTIVE_ALIGNED: usize =
        T::ACTIVE_ALIGNED_BYTES / T::ALIGNMENT.div_ceil(R::ALIGN);
    /// Registers needed to cover `T`.
    pub const REGISTER_COUNT: usize = Self::ACTIVE_SIZE / Self::ACTIVE_ALIGNED;
    /// Active lanes per register.
    pub const LANES: usize = Self::ACTIVE_ALIGNED / F32;
    /// Physical slots per register chunk, padding included.
    pub const PHYSICAL_LANES: usize = T::STORAGE / Self::REGISTER_COUNT;
    /// Whether every chunk may use the aligned full-register path.
    pub const IS_ALIGNED: bool = T::ALIGNMENT >= R::ALIGN;
    /// The load/store strategy shared by every chunk.
    pub const CHUNK: ChunkKind = match Self::PHYSICAL_LANES {
        1 => ChunkKind::Single,
        2 => ChunkKind::Pair,
        3 => ChunkKind::Triple,
        _ if Self::IS_ALIGNED => ChunkKind::Aligned,
        _ => ChunkKind::Unaligned,
    };

    const _ASSERT_LAYOUT: () = {
        assert!(T::STORAGE * F32 == size_of::<T>(), "storage does not match the type size");
        assert!(T::LEN >= 1, "vector types need at least one element");
        assert!(T::COLUMN_ALIGNMENT.is_power_of_two(), "column alignment must be a power of two");
        assert!(Self::ACTIVE_ALIGNED >= F32, "alignment leaves no active lane per register");
        assert!(
            Self::ACTIVE_SIZE % Self::ACTIVE_ALIGNED == 0,
            "active bytes do not split evenly into registers"
        );
        assert!(Self::REGISTER_COUNT <= crate::ops::MAX_REGISTERS, "too many registers");
        assert!(
            T::STORAGE % Self::REGISTER_COUNT == 0,
            "storage does not split evenly into registers"
        );
        assert!(Self::LANES <= Self::PHYSICAL_LANES, "more active lanes than physical lanes");
        assert!(Self::PHYSICAL_LANES <= R::LANES, "chunk is wider than a register");
        assert!(Self::REGISTER_COUNT * Self::LANES == T::LEN, "active lanes do not cover the type");
        let mut i = 0;
        while i < T::LEN {
            let chunked = (i / Self::LANES) * Self::PHYSICAL_LANES + i % Self::LANES;
            assert!(
                T::LAYOUT.index(i) == chunked,
                "physical layout does not match the register chunks"
            );
            i += 1;
        }
    };

    /// Loads chunk `N`.
    #[inline(always)]
    pub fn load<const N: usize>(value: &T) -> R {
        const { assert!(N < Self::REGISTER_COUNT, "chunk index out of range") };
        Self::load_chunk(value, N)
    }

    /// Stores `register` into chunk `N` of `dst`.
    #[inline(always)]
    pub fn store<const N: usize>(dst: &mut T, register: R) {
        const { assert!(N < Self::REGISTER_COUNT, "chunk index out of range") };
        Self::store_chunk(dst, N, register)
    }

    /// Loads chunk `chunk`; padding lanes read as whatever the padding holds
    /// and lanes past the chunk read as zero.
    ///
    /// # Panics
    ///
    /// If `chunk >= REGISTER_COUNT`.
    #[inline(always)]
    pub fn load_chunk(value: &T, chunk: usize) -> R {
        let _ = Self::_ASSERT_LAYOUT;
        assert!(chunk < Self::REGISTER_COUNT, "chunk index out of range");

        // SAFETY: `_ASSERT_LAYOUT` guarantees `REGISTER_COUNT * PHYSICAL_LANES == STORAGE`
        // contiguous slots, so this chunk is in bounds. The aligned path is only
        // taken when `T` is register aligned and every chunk starts a multiple of
        // four slots in.
        unsafe {
            let ptr = value.as_ptr().add(chunk * Self::PHYSICAL_LANES);
            match Self::CHUNK {
                ChunkKind::Aligned => R::load_aligned(ptr),
                ChunkKind::Unaligned => R::load_unaligned(ptr),
                ChunkKind::Triple => R::load_triple(ptr),
                ChunkKind::Pair => R::load_pair(ptr),
                ChunkKind::Single => R::load_single(ptr),
            }
        }
    }

    /// Stores `register` into chunk `chunk` of `dst`, zeroing the padding lanes.
    ///
    /// # Panics
    ///
    /// If `chunk >= REGISTER_COUNT`.
    #[inline(always)]
    pub fn store_chunk(dst: &mut T, chunk: usize, register: R) {
        let _ = Self::_ASSERT_LAYOUT;
        assert!(chunk < Self::REGISTER_COUNT, "chunk index out of range");

        let register = if Self::LANES < Self::PHYSICAL_LANES {
            register.and(R::lane_mask(Self::LANES))
        } else {
            register
        };

        // SAFETY: see `load_chunk`.
        unsafe {
            let ptr = dst.as_mut_ptr().add(chunk * Self::PHYSICAL_LANES);
            match Self::CHUNK {
                ChunkKind::Aligned => register.store_aligned(ptr),
                ChunkKind::Unaligned => register.store_unaligned(ptr),
                ChunkKind::Triple => register.store_triple(ptr),
                ChunkKind::Pair => register.store_pair(ptr),
                ChunkKind::Single => register.store_single(ptr),
            }
        }
    }

    /// `value` in every lane.
    #[inline(always)]
    pub fn broadcast(value: f32) -> R {
        R::splat(value)
    }

    /// All bits set in the active lanes, zero in the padding lanes.
    #[inline(always)]
    pub fn active_mask() -> R {
        R::lane_mask(Self::LANES)
    }

    /// Emits the derived layout as a `debug` log record.
    #[cfg(feature = "log")]
    pub fn log_layout() {
        log::debug!(
            "{} on {}: {} register(s) of {}/{} lanes, {:?} chunks, alignment {}, active {} bytes",
            core::any::type_name::<T>(),
            R::NAME,
            Self::REGISTER_COUNT,
            Self::LANES,
            Self::PHYSICAL_LANES,
            Self::CHUNK,
            Self::ALIGNMENT,
            Self::ACTIVE_SIZE,
        );
    }
}
