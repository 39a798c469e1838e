//! Cuckoo filter implementation.
//!
//! This module provides the width-generic filter engine, its bucket storage,
//! key hashing, and a factory that picks the engine for a requested
//! fingerprint width.

pub mod bucket;
pub mod cuckoo;
pub mod hash;

pub use bucket::{Bucket, BUCKET_SIZE};
pub use cuckoo::{CuckooFilter, MAX_KICKS};
pub use hash::Fingerprint;

use crate::error::{Error, Result};

/// Filter trait for approximate set membership with deletion.
///
/// Object safe, so filters of different fingerprint widths can sit behind a
/// `Box<dyn Filter>`.
pub trait Filter {
    /// Add a key to the filter
    fn insert(&mut self, key: &[u8]) -> Result<()>;

    /// Check if a key may exist (can have false positives, never false negatives)
    fn lookup(&self, key: &[u8]) -> bool;

    /// Remove one copy of a key; returns false if it was not found
    fn delete(&mut self, key: &[u8]) -> bool;

    /// Number of successful inserts minus successful deletes
    fn size(&self) -> usize;

    /// Returns true if nothing is stored
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Fingerprint width in bits
    fn fingerprint_bits(&self) -> u32;

    /// Number of buckets in the table
    fn num_buckets(&self) -> usize;

    /// Total number of fingerprint slots
    fn capacity(&self) -> usize {
        self.num_buckets() * BUCKET_SIZE
    }

    /// Fraction of slots accounted for by stored items
    fn load_factor(&self) -> f64 {
        self.size() as f64 / self.capacity() as f64
    }

    /// Bytes held by the bucket table
    fn memory_usage(&self) -> usize;

    /// Theoretical false positive rate at the current load
    fn estimated_false_positive_rate(&self) -> f64;
}

/// Supported fingerprint widths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FingerprintType {
    /// 8-bit fingerprints.
    Byte,
    /// 16-bit fingerprints.
    #[default]
    Uint16,
    /// 32-bit fingerprints.
    Uint32,
}

impl FingerprintType {
    /// Convert from a width in bits.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedWidth`] for anything other than 8, 16 or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(FingerprintType::Byte),
            16 => Ok(FingerprintType::Uint16),
            32 => Ok(FingerprintType::Uint32),
            other => Err(Error::UnsupportedWidth(other)),
        }
    }

    /// Width in bits.
    pub fn bits(self) -> u32 {
        match self {
            FingerprintType::Byte => u8::BITS,
            FingerprintType::Uint16 => u16::BITS,
            FingerprintType::Uint32 => u32::BITS,
        }
    }

    /// Width in bytes.
    pub fn size_bytes(self) -> usize {
        self.bits() as usize / 8
    }
}

/// Creates a filter for the given fingerprint width in bits.
///
/// # Example
/// ```
/// let mut filter = cuckoo_filter::create(8, 10).unwrap();
/// filter.insert(b"alice").unwrap();
/// assert!(filter.lookup(b"alice"));
///
/// assert!(cuckoo_filter::create(12, 10).is_err());
/// ```
///
/// # Errors
/// Returns [`Error::UnsupportedWidth`] for a width other than 8, 16 or 32 and
/// [`Error::InvalidArgument`] for a zero bucket count.
pub fn create(fingerprint_bits: u32, num_buckets: usize) -> Result<Box<dyn Filter>> {
    new_filter(FingerprintType::from_bits(fingerprint_bits)?, num_buckets)
}

/// Creates a filter for the given fingerprint type.
pub fn new_filter(
    fingerprint_type: FingerprintType,
    num_buckets: usize,
) -> Result<Box<dyn Filter>> {
    crate::Options::new()
        .fingerprint_type(fingerprint_type)
        .num_buckets(num_buckets)
        .build()
}
