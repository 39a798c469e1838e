//! Fixed-capacity fingerprint bucket.

use crate::filter::hash::Fingerprint;

/// Number of fingerprint slots in every bucket.
pub const BUCKET_SIZE: usize = 256;

/// An unordered multiset of up to [`BUCKET_SIZE`] fingerprints.
///
/// Slots holding `F::EMPTY` are free. All operations are linear scans.
///
/// # Example
/// ```
/// use cuckoo_filter::filter::Bucket;
///
/// let mut bucket = Bucket::<u16>::new();
/// assert!(bucket.add(42));
/// assert!(bucket.contains(42));
/// assert!(bucket.remove(42));
/// assert!(!bucket.contains(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<F: Fingerprint> {
    slots: [F; BUCKET_SIZE],
}

impl<F: Fingerprint> Bucket<F> {
    /// Creates a bucket with every slot empty.
    pub fn new() -> Self {
        Self {
            slots: [F::EMPTY; BUCKET_SIZE],
        }
    }

    /// Writes `fp` into the first empty slot.
    ///
    /// Returns `false` without mutating the bucket if every slot is taken.
    pub fn add(&mut self, fp: F) -> bool {
        for slot in self.slots.iter_mut() {
            if slot.is_empty() {
                *slot = fp;
                return true;
            }
        }
        false
    }

    /// Clears the first slot equal to `fp`.
    ///
    /// Removes at most one copy per call.
    pub fn remove(&mut self, fp: F) -> bool {
        for slot in self.slots.iter_mut() {
            if *slot == fp {
                *slot = F::EMPTY;
                return true;
            }
        }
        false
    }

    /// Returns true if any slot equals `fp`.
    pub fn contains(&self, fp: F) -> bool {
        self.slots.iter().any(|&slot| slot == fp)
    }

    /// Puts `fp` at slot `pos` and returns the value it displaced.
    ///
    /// The displaced value may be the empty sentinel.
    ///
    /// # Panics
    /// Panics if `pos >= BUCKET_SIZE`.
    pub(crate) fn swap(&mut self, pos: usize, fp: F) -> F {
        std::mem::replace(&mut self.slots[pos], fp)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_empty())
    }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|slot| !slot.is_empty())
    }
}

impl<F: Fingerprint> Default for Bucket<F> {
    fn default() -> Self {
        Self::new()
    }
}
