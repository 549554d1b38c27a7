//! Integration with `rand` (v0.8) crate.

#![cfg(feature = "rand08")]

use super::{IdGenerator, RandSource, StdSystemTime};
use crate::IdConfig;
use rand_core06::RngCore;

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
    /// [`RngCore`] from `rand` (v0.8) crate. The specified random number generator should be
    /// cryptographically strong and securely seeded.
    pub const fn with_rand08(config: IdConfig, rng: T) -> Self {
        Self::with_rand_and_time_sources(config, Adapter(rng), StdSystemTime)
    }
}

#[cfg(test)]
mod tests {
    use super::Adapter;
    use crate::generator::tests::ScriptedRng;
    use crate::{IdConfig, IdGenerator, RandSource as _};
    use rand_core06::{impls, Error, RngCore};

    /// Replays `ScriptedRng` through the `rand_core` (v0.6) interface.
    struct ScriptedRngCore(ScriptedRng);

    impl RngCore for ScriptedRngCore {
        fn next_u32(&mut self) -> u32 {
            self.0.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            impls::next_u64_via_u32(self)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            impls::fill_bytes_via_next(self, dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// Draws random segments from a `rand` (v0.8) generator
    #[test]
    fn draws_random_segments_from_a_rand08_generator() {
        let rng = ScriptedRngCore(ScriptedRng::new(&[59; 22]));
        let mut g = IdGenerator::with_rand08(IdConfig::default(), rng);
        assert_eq!(g.generate_with_ts(0).unwrap(), "2".repeat(22));

        let mut adapter = Adapter(ScriptedRngCore(ScriptedRng::repeating(60)));
        assert_eq!(adapter.next_u32(), 60);
    }
}
