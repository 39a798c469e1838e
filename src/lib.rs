//! # Cuckoo Filter - Approximate Set Membership with Deletion
//!
//! A cuckoo filter answers "have I seen this key before?" for very large key
//! sets using a few bytes per key. Like a Bloom filter it may report false
//! positives but never false negatives; unlike a Bloom filter it supports
//! deleting keys.
//!
//! ## Architecture
//!
//! - **Hasher**: SHA-256 of the key gives the primary bucket index and a
//!   fingerprint of 8, 16 or 32 bits
//! - **Bucket**: a fixed array of 256 fingerprint slots, 0 meaning empty
//! - **Filter Engine**: two candidate buckets per key, with cuckoo eviction
//!   when both are full
//! - **Factory**: picks the width-specialized engine for a requested width
//!
//! ## Example Usage
//!
//! ```rust
//! use cuckoo_filter::{Options, Result};
//!
//! # fn main() -> Result<()> {
//! let mut filter = Options::new()
//!     .fingerprint_bits(16)
//!     .num_buckets(1024)
//!     .build()?;
//!
//! filter.insert(b"alice")?;
//! assert!(filter.lookup(b"alice"));
//!
//! assert!(filter.delete(b"alice"));
//! assert_eq!(filter.size(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! Filters perform no internal locking. Share one across threads by wrapping
//! the whole filter in a single mutex, or shard keys into independent filters.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod config;
pub mod error;
pub mod filter;

// Re-exports
pub use config::Options;
pub use error::{Error, Result};
pub use filter::{
    create, new_filter, Bucket, CuckooFilter, Filter, Fingerprint, FingerprintType, BUCKET_SIZE,
    MAX_KICKS,
};
