//! Interned text handle.

use std::fmt;

/// Handle to a string owned by a [`StringInterner`](crate::StringInterner).
///
/// The top [`SHARD_BITS`](Self::SHARD_BITS) bits pick the interner shard,
/// the rest index into that shard's table. `Name(0)` is always the empty
/// string.
///
/// Equality is only meaningful between names from the same interner.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    pub const EMPTY: Name = Name(0);

    pub(crate) const SHARD_BITS: u32 = 3;
    pub(crate) const SHARDS: usize = 1 << Self::SHARD_BITS;
    pub(crate) const LOCAL_MASK: u32 = u32::MAX >> Self::SHARD_BITS;

    pub(crate) const fn pack(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::SHARDS);
        debug_assert!(local <= Self::LOCAL_MASK);
        Name((shard << (u32::BITS - Self::SHARD_BITS)) | local)
    }

    pub(crate) const fn shard_index(self) -> usize {
        (self.0 >> (u32::BITS - Self::SHARD_BITS)) as usize
    }

    pub(crate) const fn local_index(self) -> usize {
        (self.0 & Self::LOCAL_MASK) as usize
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Name::EMPTY {
            f.write_str("Name(<empty>)")
        } else {
            write!(f, "Name({}.{})", self.shard_index(), self.local_index())
        }
    }
}
