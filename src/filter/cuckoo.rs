//! Cuckoo filter engine.
//!
//! A partial-key cuckoo filter: every key has two candidate buckets, its
//! primary index and the alternate index `(primary XOR fingerprint) mod N`.
//! Because the alternate bucket is derivable from the fingerprint alone, a
//! stored fingerprint can be relocated without knowing the key it came from.
//!
//! The engine is generic over the fingerprint width (`u8`, `u16`, `u32`) and
//! over the random source used to pick eviction slots.

use crate::error::{Error, Result};
use crate::filter::bucket::{Bucket, BUCKET_SIZE};
use crate::filter::hash::{self, alternate_index, Fingerprint};
use crate::filter::Filter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Default number of relocation attempts before an insert gives up.
pub const MAX_KICKS: usize = 1000;

/// Cuckoo filter with fingerprints of type `F`.
///
/// The bucket count is rounded up to the next power of two so that the
/// alternate-index mapping is an involution. A fingerprint relocated from
/// either candidate bucket therefore always lands in the other candidate
/// bucket of its key, which is what makes lookups free of false negatives.
///
/// The filter performs no internal synchronization. Mutating operations take
/// `&mut self`; to share a filter between threads, wrap the whole filter in a
/// single lock or shard keys across independent filters.
///
/// # Example
/// ```
/// use cuckoo_filter::filter::CuckooFilter;
///
/// let mut filter = CuckooFilter::<u16>::with_seed(64, 7).unwrap();
/// filter.insert(b"alice").unwrap();
///
/// assert!(filter.lookup(b"alice"));
/// assert_eq!(filter.size(), 1);
/// assert!(filter.delete(b"alice"));
/// assert!(!filter.lookup(b"alice"));
/// ```
pub struct CuckooFilter<F: Fingerprint, R: Rng = StdRng> {
    /// The bucket table; its length is a power of two
    buckets: Vec<Bucket<F>>,
    /// Successful inserts minus successful deletes
    size: usize,
    /// Relocation ceiling per insert
    max_kicks: usize,
    /// Replace a zero fingerprint with 1 so it stays distinguishable from empty.
    /// When disabled, a key whose fingerprint is zero matches any free slot.
    remap_zero_fingerprint: bool,
    /// Source of eviction slot positions
    rng: R,
}

impl<F: Fingerprint> CuckooFilter<F, StdRng> {
    /// Creates a filter with an OS-seeded eviction RNG.
    pub fn new(num_buckets: usize) -> Result<Self> {
        Self::with_rng(num_buckets, StdRng::from_os_rng())
    }

    /// Creates a filter whose eviction choices are reproducible from `seed`.
    pub fn with_seed(num_buckets: usize, seed: u64) -> Result<Self> {
        Self::with_rng(num_buckets, StdRng::seed_from_u64(seed))
    }
}

impl<F: Fingerprint, R: Rng> CuckooFilter<F, R> {
    /// Creates a filter that draws eviction slots from `rng`.
    ///
    /// Zero fingerprints are remapped to 1; use [`with_params`](Self::with_params)
    /// to keep them as the raw sentinel.
    pub fn with_rng(num_buckets: usize, rng: R) -> Result<Self> {
        Self::with_params(num_buckets, MAX_KICKS, true, rng)
    }

    /// Creates a filter with every tunable spelled out.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `num_buckets` or `max_kicks` is
    /// zero, or if `num_buckets` cannot be rounded up to a power of two.
    pub fn with_params(
        num_buckets: usize,
        max_kicks: usize,
        remap_zero_fingerprint: bool,
        rng: R,
    ) -> Result<Self> {
        if num_buckets == 0 {
            return Err(Error::invalid_argument("num_buckets must be > 0"));
        }
        if max_kicks == 0 {
            return Err(Error::invalid_argument("max_kicks must be > 0"));
        }
        let table_len = num_buckets
            .checked_next_power_of_two()
            .ok_or_else(|| Error::invalid_argument("num_buckets is too large"))?;

        let filter = Self {
            buckets: vec![Bucket::new(); table_len],
            size: 0,
            max_kicks,
            remap_zero_fingerprint,
            rng,
        };

        log::debug!(
            "Created cuckoo filter: {}-bit fingerprints, {} buckets (requested {}), {} bytes",
            F::BITS,
            table_len,
            num_buckets,
            filter.memory_usage()
        );

        Ok(filter)
    }

    /// Computes the two candidate buckets and the fingerprint of a key.
    fn candidates(&self, key: &[u8]) -> (usize, usize, F) {
        let (hash, fp) = hash::hash_key::<F>(key);
        let fp = if self.remap_zero_fingerprint {
            fp.non_empty()
        } else {
            fp
        };

        let num_buckets = self.buckets.len() as u64;
        let index1 = hash % num_buckets;
        let index2 = alternate_index(index1, fp, num_buckets);

        (index1 as usize, index2 as usize, fp)
    }

    /// Adds a key to the filter.
    ///
    /// The same key may be inserted more than once; each insert stores another
    /// copy of its fingerprint and counts toward [`size`](Self::size).
    ///
    /// # Errors
    /// Returns [`Error::InsertionFailed`] if both candidate buckets are full
    /// and no room could be made within `max_kicks` relocations. The filter is
    /// left exactly as it was before the call.
    pub fn insert(&mut self, key: &[u8]) -> Result<()> {
        let (index1, index2, fp) = self.candidates(key);

        if self.buckets[index1].add(fp) || self.buckets[index2].add(fp) {
            self.size += 1;
            return Ok(());
        }

        self.relocate(index1, fp)
    }

    /// Kicks fingerprints out of full buckets until `fp` finds a home.
    ///
    /// Any slot position may be picked, empty or not. Picking an empty slot
    /// places the carried fingerprint there and ends the chain on the next add.
    fn relocate(&mut self, start: usize, incoming: F) -> Result<()> {
        let mut fp = incoming;
        let num_buckets = self.buckets.len() as u64;
        let mut current = start;
        let mut kicks: Vec<(usize, usize)> = Vec::new();

        for kick in 0..self.max_kicks {
            let pos = self.rng.random_range(0..BUCKET_SIZE);
            fp = self.buckets[current].swap(pos, fp);
            kicks.push((current, pos));

            current = alternate_index(current as u64, fp, num_buckets) as usize;
            if self.buckets[current].add(fp) {
                log::trace!("Insert settled after {} kicks", kick + 1);
                self.size += 1;
                return Ok(());
            }
        }

        log::warn!(
            "Cuckoo filter insert failed after {} kicks ({} items in {} buckets), rolling back",
            self.max_kicks,
            self.size,
            self.buckets.len()
        );

        // Undo the swap chain so no previously stored fingerprint is dropped.
        for (bucket, pos) in kicks.into_iter().rev() {
            fp = self.buckets[bucket].swap(pos, fp);
        }
        debug_assert!(fp == incoming);

        Err(Error::InsertionFailed {
            max_kicks: self.max_kicks,
        })
    }

    /// Returns true if the key may be in the filter.
    ///
    /// A key that was inserted and not deleted is always found.
    pub fn lookup(&self, key: &[u8]) -> bool {
        let (index1, index2, fp) = self.candidates(key);
        self.buckets[index1].contains(fp) || self.buckets[index2].contains(fp)
    }

    /// Removes one copy of the key's fingerprint.
    ///
    /// Returns false if neither candidate bucket holds it. If two keys share a
    /// fingerprint and a bucket, deleting one may remove the other's copy.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        let (index1, index2, fp) = self.candidates(key);

        if self.buckets[index1].remove(fp) || self.buckets[index2].remove(fp) {
            // A raw zero fingerprint "removes" a free slot even on an empty filter.
            self.size = self.size.saturating_sub(1);
            return true;
        }
        false
    }

    /// Number of successful inserts minus successful deletes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of buckets in the table.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of fingerprint slots.
    pub fn capacity(&self) -> usize {
        self.buckets.len() * BUCKET_SIZE
    }

    /// Relocation ceiling per insert.
    pub fn max_kicks(&self) -> usize {
        self.max_kicks
    }

    /// Fraction of slots accounted for by stored items.
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Bytes held by the bucket table.
    pub fn memory_usage(&self) -> usize {
        self.buckets.len() * std::mem::size_of::<Bucket<F>>()
    }

    /// Theoretical false positive rate at the current load.
    ///
    /// A lookup compares its fingerprint against the occupied slots of two
    /// buckets, on average `k = 2 * size / num_buckets` slots, each matching
    /// with probability `2^-W`:
    /// p = 1 - (1 - 2^-W)^k
    pub fn estimated_false_positive_rate(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }

        let probes = 2.0 * self.size as f64 / self.buckets.len() as f64;
        let match_probability = 0.5_f64.powi(F::BITS as i32);
        1.0 - (1.0 - match_probability).powf(probes)
    }

    /// The bucket at `index`, for diagnostics.
    pub fn bucket(&self, index: usize) -> Option<&Bucket<F>> {
        self.buckets.get(index)
    }
}

impl<F: Fingerprint, R: Rng> fmt::Debug for CuckooFilter<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CuckooFilter")
            .field("fingerprint_bits", &F::BITS)
            .field("num_buckets", &self.buckets.len())
            .field("size", &self.size)
            .field("max_kicks", &self.max_kicks)
            .field("remap_zero_fingerprint", &self.remap_zero_fingerprint)
            .finish()
    }
}

impl<F: Fingerprint, R: Rng> Filter for CuckooFilter<F, R> {
    fn insert(&mut self, key: &[u8]) -> Result<()> {
        CuckooFilter::insert(self, key)
    }

    fn lookup(&self, key: &[u8]) -> bool {
        CuckooFilter::lookup(self, key)
    }

    fn delete(&mut self, key: &[u8]) -> bool {
        CuckooFilter::delete(self, key)
    }

    fn size(&self) -> usize {
        self.size
    }

    fn fingerprint_bits(&self) -> u32 {
        F::BITS
    }

    fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    fn memory_usage(&self) -> usize {
        CuckooFilter::memory_usage(self)
    }

    fn estimated_false_positive_rate(&self) -> f64 {
        CuckooFilter::estimated_false_positive_rate(self)
    }
}
