use crate::{Alphabet, Error, IdConfig, RandSource};
use alloc::string::String;

/// The maximum number of random segments drawn for one identifier while looking for one that
/// covers every required character class.
pub const MAX_CLASS_ATTEMPTS: u32 = 100_000;

/// Returns a uniformly distributed integer in `0..n`.
///
/// Draws that fall into the incomplete last cycle of `n` within the 32-bit range are rejected, so
/// the result carries no modulo bias.
pub(crate) fn uniform_below<R: RandSource + ?Sized>(rng: &mut R, n: u32) -> u32 {
    debug_assert!(n > 0);
    let threshold = n.wrapping_neg() % n; // 2^32 mod n
    loop {
        let x = rng.next_u32();
        if x >= threshold {
            return x % n;
        }
    }
}

impl Alphabet {
    /// Draws `length` characters independently and uniformly from the alphabet.
    pub(crate) fn sample<R: RandSource + ?Sized>(&self, rng: &mut R, length: usize) -> String {
        (0..length)
            .map(|_| self.digit_at(uniform_below(rng, self.base())))
            .collect()
    }
}

impl IdConfig {
    /// Generates a random segment from the random alphabet using `rng`.
    ///
    /// With [`requires_all_classes`](Self::requires_all_classes), segments missing a character
    /// class of the random alphabet are discarded and drawn again, up to [`MAX_CLASS_ATTEMPTS`]
    /// times in total. Every attempt consumes randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error of kind
    /// [`ClassRequirementUnsatisfiable`](crate::ErrorKind::ClassRequirementUnsatisfiable) if no
    /// attempt covered every class.
    pub fn random_segment_with<R: RandSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<String, Error> {
        if !self.require_all_classes {
            return Ok(self.random_alphabet.sample(rng, self.random_length));
        }

        let required = self.random_classes();
        for _ in 0..MAX_CLASS_ATTEMPTS {
            let segment = self.random_alphabet.sample(rng, self.random_length);
            if crate::CharClasses::of(&segment).contains(required) {
                return Ok(segment);
            }
            #[cfg(feature = "log")]
            log::trace!("stampid: regenerating random segment lacking required classes");
        }

        #[cfg(feature = "log")]
        log::warn!(
            "stampid: no random segment covered classes {} in {} attempts",
            required,
            MAX_CLASS_ATTEMPTS
        );
        Err(Error::class_retries_exhausted(MAX_CLASS_ATTEMPTS))
    }
}
