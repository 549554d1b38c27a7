//! Integration with `rand` (v0.9) crate.

#![cfg(feature = "rand09")]

use super::{IdGenerator, RandSource, StdSystemTime};
use crate::IdConfig;
use rand_core09::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
}

impl<T: RngCore> IdGenerator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.9) crate. The specified random number generator should be
    /// cryptographically strong and securely seeded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "default_rng")]
    /// # {
    /// # use rand09 as rand;
    /// use stampid::{IdConfig, IdGenerator};
    ///
    /// let mut g = IdGenerator::with_rand09(IdConfig::default(), rand::rng());
    /// println!("{}", g.generate()?);
    /// # }
    /// # Ok::<(), stampid::Error>(())
    /// ```
    pub const fn with_rand09(config: IdConfig, rng: T) -> Self {
        Self::with_rand_and_time_sources(config, Adapter(rng), StdSystemTime)
    }
}
