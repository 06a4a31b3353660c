//! Packed per-lane booleans produced by the comparison family.

use core::{
    fmt,
    hash::Hash,
    ops::{BitAnd, BitOr, BitXor, Not},
};

use num_traits::{PrimInt, Unsigned};

/// The unsigned integer a [`Bitfield`] packs its lanes into.
pub trait BitStore: PrimInt + Unsigned + Default + Hash + fmt::Debug + crate::Internal {
    /// Truncates `bits` into `Self`.
    fn truncate(bits: u32) -> Self;

    /// Widens `self` to a `u32`.
    fn widen(self) -> u32;
}

macro_rules! bit_store {
    ($($ty:ty),*) => {
        $(
            impl crate::Internal for $ty {}

            impl BitStore for $ty {
                #[inline(always)]
                fn truncate(bits: u32) -> Self {
                    bits as $ty
                }

                #[inline(always)]
                fn widen(self) -> u32 {
                    self as u32
                }
            }
        )*
    };
}

bit_store!(u8, u16, u32);

/// Sealed marker selecting the smallest [`BitStore`] that holds `N` lanes.
pub trait PackedLanes: crate::Internal {
    /// The backing integer.
    type Bits: BitStore;
}

/// A type that implements [`PackedLanes`] based off the value of `N`.
pub struct Lanes<const N: usize>;

impl<const N: usize> crate::Internal for Lanes<N> {}

macro_rules! packed_lanes {
    ($bits:ty => $($n:literal),*) => {
        $(
            impl PackedLanes for Lanes<$n> {
                type Bits = $bits;
            }
        )*
    };
}

packed_lanes!(u8 => 1, 2, 3, 4, 5, 6, 7, 8);
packed_lanes!(u16 => 9, 10, 11, 12, 13, 14, 15, 16);
packed_lanes!(u32 => 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32);

/// One bit per logical lane, lane `i` at bit `i`.
///
/// Bits at or above `N` are cleared by every constructor and operator, so the
/// raw value can be compared and hashed directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitfield<const N: usize>
where
    Lanes<N>: PackedLanes,
{
    bits: <Lanes<N> as PackedLanes>::Bits,
}

impl<const N: usize> Bitfield<N>
where
    Lanes<N>: PackedLanes,
{
    /// The number of lanes.
    pub const SIZE: usize = N;

    /// Bits per packed storage unit.
    pub const BIT_ALIGNMENT: usize = 8 * core::mem::size_of::<<Lanes<N> as PackedLanes>::Bits>();

    /// Bytes holding lane data.
    pub const BYTES: usize = N.div_ceil(8);

    const ALL: u32 = if N == 32 { u32::MAX } else { (1u32 << N) - 1 };

    /// A bitfield with every lane false.
    #[inline(always)]
    pub fn none() -> Self {
        Self::default()
    }

    /// A bitfield with every lane true.
    #[inline(always)]
    pub fn all() -> Self {
        Self::new(Self::ALL)
    }

    /// Builds a bitfield from raw bits, dropping anything above lane `N - 1`.
    #[inline(always)]
    pub fn new(bits: u32) -> Self {
        Self {
            bits: BitStore::truncate(bits & Self::ALL),
        }
    }

    /// Builds a bitfield from one `bool` per lane.
    pub fn from_bools(lanes: [bool; N]) -> Self {
        let mut bits = 0u32;
        for (i, lane) in lanes.into_iter().enumerate() {
            bits |= (lane as u32) << i;
        }
        Self::new(bits)
    }

    /// The raw packed value.
    #[inline(always)]
    pub fn bits(self) -> <Lanes<N> as PackedLanes>::Bits {
        self.bits
    }

    /// The raw packed value widened to `u32`.
    #[inline(always)]
    pub fn to_u32(self) -> u32 {
        self.bits.widen()
    }

    /// Returns lane `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= N`.
    #[inline(always)]
    pub fn get(&self, idx: usize) -> bool {
        assert!(idx < N, "lane index out of bounds");
        (self.to_u32() >> idx) & 1 == 1
    }

    /// Sets lane `idx` to true.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= N`.
    #[inline(always)]
    pub fn set(&mut self, idx: usize) {
        assert!(idx < N, "lane index out of bounds");
        *self = Self::new(self.to_u32() | (1 << idx));
    }

    /// Sets lane `idx` to false.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= N`.
    #[inline(always)]
    pub fn clear(&mut self, idx: usize) {
        assert!(idx < N, "lane index out of bounds");
        *self = Self::new(self.to_u32() & !(1 << idx));
    }

    /// Writes lane `idx`.
    #[inline(always)]
    pub fn assign(&mut self, idx: usize, value: bool) {
        if value {
            self.set(idx);
        } else {
            self.clear(idx);
        }
    }

    /// Replaces lanes `offset..offset + width` with the low `width` bits of
    /// `value`, leaving every other lane untouched.
    ///
    /// This is how a register's comparison mask lands in the bitfield: a
    /// chunk's lanes need not start on a byte boundary, so the destination
    /// range is cleared first and bits above `width` in `value` are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the range reaches past lane `N - 1`.
    #[inline(always)]
    pub fn insert(&mut self, offset: usize, width: usize, value: u32) {
        assert!(offset + width <= N, "bit range out of bounds");
        if width == 0 {
            return;
        }
        let field = if width == 32 { u32::MAX } else { (1u32 << width) - 1 };
        let cleared = self.to_u32() & !(field << offset);
        *self = Self::new(cleared | ((value & field) << offset));
    }

    /// Reads lanes `offset..offset + width` as the low bits of a `u32`.
    ///
    /// # Panics
    ///
    /// Panics if the range reaches past lane `N - 1`.
    #[inline(always)]
    pub fn extract(&self, offset: usize, width: usize) -> u32 {
        assert!(offset + width <= N, "bit range out of bounds");
        if width == 0 {
            return 0;
        }
        let field = if width == 32 { u32::MAX } else { (1u32 << width) - 1 };
        (self.to_u32() >> offset) & field
    }

    /// True if every lane is true.
    #[inline(always)]
    pub fn all_true(&self) -> bool {
        self.to_u32() == Self::ALL
    }

    /// True if at least one lane is true.
    #[inline(always)]
    pub fn any_true(&self) -> bool {
        self.to_u32() != 0
    }

    /// True if no lane is true.
    #[inline(always)]
    pub fn none_true(&self) -> bool {
        self.to_u32() == 0
    }

    /// The number of true lanes.
    #[inline(always)]
    pub fn count_true(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Iterates the lanes in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..N).map(move |i| self.get(i))
    }

    /// Byte `idx` of the little-endian packed representation.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= Self::BYTES`.
    #[inline(always)]
    pub fn byte(&self, idx: usize) -> u8 {
        assert!(idx < Self::BYTES, "byte index out of bounds");
        (self.to_u32() >> (idx * 8)) as u8
    }

    /// The little-endian packed bytes, [`Self::BYTES`] of them.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        (0..Self::BYTES).map(move |i| self.byte(i))
    }

    /// Overwrites byte `idx` of the packed representation. Bits landing at or
    /// above lane `N` are dropped.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= Self::BYTES`.
    #[inline(always)]
    pub fn set_byte(&mut self, idx: usize, value: u8) {
        assert!(idx < Self::BYTES, "byte index out of bounds");
        let shift = idx * 8;
        let cleared = self.to_u32() & !(0xff << shift);
        *self = Self::new(cleared | (u32::from(value) << shift));
    }

    /// Builds a bitfield from its little-endian packed bytes.
    ///
    /// Missing bytes read as zero; bytes past [`Self::BYTES`] and bits at or
    /// above lane `N` are dropped.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut out = Self::none();
        for (idx, byte) in bytes.iter().take(Self::BYTES).enumerate() {
            out.set_byte(idx, *byte);
        }
        out
    }
}

impl<const N: usize> Not for Bitfield<N>
where
    Lanes<N>: PackedLanes,
{
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Self::new(!self.to_u32())
    }
}

impl<const N: usize> BitAnd for Bitfield<N>
where
    Lanes<N>: PackedLanes,
{
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self::new(self.to_u32() & rhs.to_u32())
    }
}

impl<const N: usize> BitOr for Bitfield<N>
where
    Lanes<N>: PackedLanes,
{
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self::new(self.to_u32() | rhs.to_u32())
    }
}

impl<const N: usize> BitXor for Bitfield<N>
where
    Lanes<N>: PackedLanes,
{
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Self::new(self.to_u32() ^ rhs.to_u32())
    }
}

impl<const N: usize> From<Bitfield<N>> for u32
where
    Lanes<N>: PackedLanes,
{
    #[inline(always)]
    fn from(value: Bitfield<N>) -> Self {
        value.to_u32()
    }
}

impl<const N: usize> fmt::Debug for Bitfield<N>
where
    Lanes<N>: PackedLanes,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitfield<{}>(", N)?;
        for lane in self.iter() {
            f.write_str(if lane { "1" } else { "0" })?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_is_smallest_integer() {
        assert_eq!(Bitfield::<3>::BIT_ALIGNMENT, 8);
        assert_eq!(Bitfield::<8>::BIT_ALIGNMENT, 8);
        assert_eq!(Bitfield::<9>::BIT_ALIGNMENT, 16);
        assert_eq!(Bitfield::<16>::BIT_ALIGNMENT, 16);
        assert_eq!(Bitfield::<17>::BIT_ALIGNMENT, 32);
        assert_eq!(core::mem::size_of::<Bitfield<4>>(), 1);
        assert_eq!(core::mem::size_of::<Bitfield<16>>(), 2);
    }

    #[test]
    fn high_bits_are_masked() {
        let b = Bitfield::<3>::new(0xff);
        assert_eq!(b.to_u32(), 0b111);
        assert!(b.all_true());

        let b = !Bitfield::<3>::new(0b010);
        assert_eq!(b.to_u32(), 0b101);

        let b = Bitfield::<16>::new(u32::MAX);
        assert_eq!(b.bits(), u16::MAX);
        assert_eq!(Bitfield::<32>::all().to_u32(), u32::MAX);
    }

    #[test]
    fn any_all_none() {
        let none = Bitfield::<4>::none();
        assert!(none.none_true() && !none.any_true() && !none.all_true());

        let some = Bitfield::<4>::from_bools([false, true, false, false]);
        assert!(some.any_true() && !some.none_true() && !some.all_true());
        assert_eq!(some.count_true(), 1);

        assert!(Bitfield::<4>::all().all_true());
    }

    #[test]
    fn get_set_clear() {
        let mut b = Bitfield::<5>::none();
        b.set(0);
        b.set(4);
        assert!(b.get(0) && b.get(4) && !b.get(2));
        b.clear(0);
        assert!(!b.get(0));
        b.assign(2, true);
        assert_eq!(b.to_u32(), 0b10100);

        let lanes: [bool; 5] = core::array::from_fn(|i| b.get(i));
        assert_eq!(Bitfield::from_bools(lanes), b);
    }

    #[test]
    #[should_panic(expected = "lane index out of bounds")]
    fn get_past_end_panics() {
        let _ = Bitfield::<3>::all().get(3);
    }

    #[test]
    fn insert_does_not_clobber_neighbours() {
        // three-lane chunks straddle the byte boundary at bit 8
        let mut b = Bitfield::<12>::none();
        b.insert(0, 3, 0b101);
        b.insert(3, 3, 0b111);
        b.insert(6, 3, 0b010);
        b.insert(9, 3, 0b100);
        assert_eq!(b.to_u32(), 0b100_010_111_101);

        // re-inserting one chunk replaces only its own bits
        b.insert(6, 3, 0b101);
        assert_eq!(b.to_u32(), 0b100_101_111_101);
        assert_eq!(b.extract(6, 3), 0b101);

        // bits above the width are ignored
        b.insert(0, 3, 0b1111_1000);
        assert_eq!(b.extract(0, 3), 0);
        assert_eq!(b.extract(3, 9), 0b100_101_111);
    }

    #[test]
    fn bytes_are_little_endian() {
        let b = Bitfield::<12>::new(0xabc);
        assert_eq!(Bitfield::<12>::BYTES, 2);
        let mut it = b.bytes();
        assert_eq!(it.next(), Some(0xbc));
        assert_eq!(it.next(), Some(0x0a));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn byte_writes_mask_high_lanes() {
        let mut b = Bitfield::<12>::new(0xabc);
        b.set_byte(1, 0xff);
        assert_eq!(b.to_u32(), 0xfbc);
        b.set_byte(0, 0x01);
        assert_eq!(b.to_u32(), 0xf01);
        assert!(b.get(0) && !b.get(1) && b.get(11));

        let b = Bitfield::<3>::from_bytes(&[0xff, 0xff]);
        assert_eq!(b.to_u32(), 0b111);
        assert!(b.all_true());

        let b = Bitfield::<16>::from_bytes(&[0x34]);
        assert_eq!(b.to_u32(), 0x34);
        assert!(Bitfield::<12>::from_bytes(&[0xbc, 0x0a]).bytes().eq([0xbc, 0x0a]));
    }

    #[test]
    #[should_panic(expected = "byte index out of bounds")]
    fn set_byte_past_end_panics() {
        Bitfield::<8>::none().set_byte(1, 1);
    }

    #[test]
    fn logic_ops() {
        let a = Bitfield::<4>::new(0b1100);
        let b = Bitfield::<4>::new(0b1010);
        assert_eq!((a & b).to_u32(), 0b1000);
        assert_eq!((a | b).to_u32(), 0b1110);
        assert_eq!((a ^ b).to_u32(), 0b0110);
        assert_eq!(u32::from(!a), 0b0011);
    }
}
