//! Key hashing for the cuckoo filter.
//!
//! Every key is digested with SHA-256. The first 8 bytes of the digest, read
//! big-endian, form the primary index hash shared by all fingerprint widths.
//! The fingerprint is an independently read big-endian prefix of the same
//! digest, truncated to the filter's width. Hashing is unseeded, so a key maps
//! to the same (index, fingerprint) pair in every process.

use sha2::{Digest, Sha256};
use std::fmt;
use std::hash::Hash;

/// Length in bytes of the key digest.
pub const DIGEST_LEN: usize = 32;

/// SHA-256 digest of a key.
pub type KeyDigest = [u8; DIGEST_LEN];

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// An unsigned integer that can be stored in a bucket slot.
///
/// Implemented for `u8`, `u16` and `u32`. The value `EMPTY` (zero) marks an
/// unused slot.
pub trait Fingerprint:
    Copy + Eq + Hash + Default + fmt::Debug + Send + Sync + sealed::Sealed + 'static
{
    /// Width of the fingerprint in bits.
    const BITS: u32;

    /// The empty-slot sentinel.
    const EMPTY: Self;

    /// Reads the fingerprint as the big-endian prefix of a key digest.
    fn from_digest(digest: &KeyDigest) -> Self;

    /// Widens the fingerprint for alternate-index arithmetic.
    fn to_u64(self) -> u64;

    /// Maps the sentinel value to 1, leaving every other fingerprint unchanged.
    fn non_empty(self) -> Self;

    /// Returns true if this value is the empty-slot sentinel.
    fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

macro_rules! impl_fingerprint {
    ($t:ty) => {
        impl Fingerprint for $t {
            const BITS: u32 = <$t>::BITS;
            const EMPTY: Self = 0;

            fn from_digest(digest: &KeyDigest) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(&digest[..std::mem::size_of::<$t>()]);
                <$t>::from_be_bytes(buf)
            }

            fn to_u64(self) -> u64 {
                u64::from(self)
            }

            fn non_empty(self) -> Self {
                if self == 0 {
                    1
                } else {
                    self
                }
            }
        }
    };
}

impl_fingerprint!(u8);
impl_fingerprint!(u16);
impl_fingerprint!(u32);

fn digest(key: &[u8]) -> KeyDigest {
    Sha256::digest(key).into()
}

/// Computes the primary index hash of a key.
pub fn primary_hash(key: &[u8]) -> u64 {
    index_from_digest(&digest(key))
}

/// Computes the fingerprint of a key at width `F`.
pub fn fingerprint<F: Fingerprint>(key: &[u8]) -> F {
    F::from_digest(&digest(key))
}

/// Computes the primary index hash and fingerprint from a single digest.
///
/// Equivalent to calling [`primary_hash`] and [`fingerprint`] separately.
pub fn hash_key<F: Fingerprint>(key: &[u8]) -> (u64, F) {
    let digest = digest(key);
    (index_from_digest(&digest), F::from_digest(&digest))
}

fn index_from_digest(digest: &KeyDigest) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(buf)
}

/// Computes the alternate bucket index `(index XOR fp) mod num_buckets`.
///
/// With a power-of-two `num_buckets` and `index < num_buckets` the mapping is
/// an involution: applying it twice returns to `index`.
pub fn alternate_index<F: Fingerprint>(index: u64, fp: F, num_buckets: u64) -> u64 {
    (index ^ fp.to_u64()) % num_buckets
}
