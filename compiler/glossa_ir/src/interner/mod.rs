//! Sharded string interner.
//!
//! Token text is stored once and referenced by [`Name`]. Interned strings
//! are leaked and live for the rest of the process, so a `Name` never
//! dangles and `lookup` can hand out `&'static str`.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use crate::Name;

#[derive(Default)]
struct Shard {
    index: FxHashMap<&'static str, u32>,
    texts: Vec<&'static str>,
}

impl Shard {
    fn find(&self, text: &str) -> Option<u32> {
        self.index.get(text).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    #[error("interner shard {shard} is full ({len} strings)")]
    ShardFull { shard: u32, len: usize },
}

/// Concurrent string interner.
///
/// Interning the same text twice yields the same `Name` for the lifetime of
/// the interner. Text is spread over a few independently locked shards so
/// scanner threads sharing one interner rarely contend.
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::SHARDS],
    count: AtomicUsize,
}

impl StringInterner {
    pub fn new() -> Self {
        let shards = std::array::from_fn(|_| RwLock::new(Shard::default()));
        // Local 0 of shard 0 is `Name::EMPTY`.
        shards[0].write().texts.push("");
        StringInterner {
            shards,
            count: AtomicUsize::new(1),
        }
    }

    fn shard_of(text: &str) -> u32 {
        let mut hasher = FxHasher::default();
        text.hash(&mut hasher);
        u32::try_from(hasher.finish() >> (u64::BITS - Name::SHARD_BITS)).unwrap_or(0)
    }

    pub fn try_intern(&self, text: &str) -> Result<Name, InternError> {
        if text.is_empty() {
            return Ok(Name::EMPTY);
        }
        let shard_no = Self::shard_of(text);
        let lock = &self.shards[shard_no as usize];

        if let Some(local) = lock.read().find(text) {
            return Ok(Name::pack(shard_no, local));
        }

        let mut shard = lock.write();
        // Lost a race between dropping the read lock and taking the write lock.
        if let Some(local) = shard.find(text) {
            return Ok(Name::pack(shard_no, local));
        }
        let len = shard.texts.len();
        let local = u32::try_from(len)
            .ok()
            .filter(|&local| local <= Name::LOCAL_MASK)
            .ok_or(InternError::ShardFull {
                shard: shard_no,
                len,
            })?;

        let text: &'static str = Box::leak(Box::from(text));
        shard.texts.push(text);
        shard.index.insert(text, local);
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(Name::pack(shard_no, local))
    }

    /// # Panics
    /// Panics if the shard `text` hashes to is full.
    #[inline]
    pub fn intern(&self, text: &str) -> Name {
        self.try_intern(text).unwrap_or_else(|err| panic!("{err}"))
    }

    /// The name of already-interned `text`, without interning it.
    pub fn get(&self, text: &str) -> Option<Name> {
        if text.is_empty() {
            return Some(Name::EMPTY);
        }
        let shard_no = Self::shard_of(text);
        let local = self.shards[shard_no as usize].read().find(text)?;
        Some(Name::pack(shard_no, local))
    }

    /// # Panics
    /// Panics if `name` was not produced by this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.shards[name.shard_index()]
            .read()
            .texts
            .get(name.local_index())
            .copied()
            .unwrap_or_else(|| panic!("{name:?} was not produced by this interner"))
    }

    /// Number of distinct strings, the empty string included.
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// True while nothing but the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read access to interned text.
///
/// Token observers and literal elaboration accept any `StringLookup`, so an
/// embedder with its own symbol table only has to implement this.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

impl<T: StringLookup + ?Sized> StringLookup for &T {
    fn lookup(&self, name: Name) -> &str {
        (**self).lookup(name)
    }
}
