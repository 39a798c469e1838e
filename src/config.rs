//! Configuration options for building a cuckoo filter.

use crate::filter::{CuckooFilter, Filter, Fingerprint, FingerprintType, MAX_KICKS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration options for constructing a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Fingerprint width in bits: 8, 16 or 32.
    /// Default: 16
    pub fingerprint_bits: u32,

    /// Number of buckets, each holding 256 fingerprints.
    /// Rounded up to the next power of two at construction.
    /// Default: 1024
    pub num_buckets: usize,

    /// Maximum relocation attempts per insert before giving up.
    /// Default: 1000
    pub max_kicks: usize,

    /// Remap a zero fingerprint to 1 so it cannot collide with an empty slot.
    /// Default: true
    pub remap_zero_fingerprint: bool,

    /// Seed for the eviction RNG. `None` seeds from the operating system.
    /// Default: None
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fingerprint_bits: 16,
            num_buckets: 1024,
            max_kicks: MAX_KICKS,
            remap_zero_fingerprint: true,
            seed: None,
        }
    }
}

impl Options {
    /// Creates a new Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fingerprint width in bits.
    pub fn fingerprint_bits(mut self, bits: u32) -> Self {
        self.fingerprint_bits = bits;
        self
    }

    /// Sets the fingerprint width from a [`FingerprintType`].
    pub fn fingerprint_type(mut self, fingerprint_type: FingerprintType) -> Self {
        self.fingerprint_bits = fingerprint_type.bits();
        self
    }

    /// Sets the number of buckets.
    pub fn num_buckets(mut self, num_buckets: usize) -> Self {
        self.num_buckets = num_buckets;
        self
    }

    /// Sets the relocation ceiling.
    pub fn max_kicks(mut self, max_kicks: usize) -> Self {
        self.max_kicks = max_kicks;
        self
    }

    /// Enables or disables remapping of zero fingerprints.
    pub fn remap_zero_fingerprint(mut self, value: bool) -> Self {
        self.remap_zero_fingerprint = value;
        self
    }

    /// Sets a fixed seed for the eviction RNG.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the options and returns an error if any are invalid.
    pub fn validate(&self) -> crate::Result<FingerprintType> {
        let fingerprint_type = FingerprintType::from_bits(self.fingerprint_bits)?;
        if self.num_buckets == 0 {
            return Err(crate::Error::invalid_argument("num_buckets must be > 0"));
        }
        if self.max_kicks == 0 {
            return Err(crate::Error::invalid_argument("max_kicks must be > 0"));
        }
        Ok(fingerprint_type)
    }

    /// Builds a filter of the configured width behind a trait object.
    pub fn build(&self) -> crate::Result<Box<dyn Filter>> {
        let filter: Box<dyn Filter> = match self.validate()? {
            FingerprintType::Byte => Box::new(self.build_typed::<u8>()?),
            FingerprintType::Uint16 => Box::new(self.build_typed::<u16>()?),
            FingerprintType::Uint32 => Box::new(self.build_typed::<u32>()?),
        };
        Ok(filter)
    }

    /// Builds a concrete filter with fingerprint type `F`.
    ///
    /// `fingerprint_bits` must match `F`.
    pub fn build_typed<F: Fingerprint>(&self) -> crate::Result<CuckooFilter<F>> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.build_with_rng(rng)
    }

    /// Builds a concrete filter that draws eviction slots from `rng`.
    ///
    /// `seed` is ignored; `fingerprint_bits` must match `F`.
    pub fn build_with_rng<F: Fingerprint, R: Rng>(
        &self,
        rng: R,
    ) -> crate::Result<CuckooFilter<F, R>> {
        if self.validate()?.bits() != F::BITS {
            return Err(crate::Error::invalid_argument(format!(
                "fingerprint_bits is {} but the filter type is {}-bit",
                self.fingerprint_bits,
                F::BITS
            )));
        }
        CuckooFilter::with_params(
            self.num_buckets,
            self.max_kicks,
            self.remap_zero_fingerprint,
            rng,
        )
    }
}
