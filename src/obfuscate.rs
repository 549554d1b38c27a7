use crate::{Error, IdConfig};
use alloc::string::String;

impl IdConfig {
    /// Computes the obfuscation offset of a random segment.
    ///
    /// The offset is the sum of the digit values of the characters in `random_segment`, looked up
    /// in the primary [`alphabet`](Self::alphabet) rather than the timestamp alphabet, reduced
    /// modulo [`timestamp_base`](Self::timestamp_base). A character absent from the primary
    /// alphabet counts as `-1`, and the sum is reduced to the least non-negative residue.
    ///
    /// # Errors
    ///
    /// Returns a usage error if the configuration does not include a timestamp.
    pub fn offset(&self, random_segment: &str) -> Result<u32, Error> {
        self.ensure_timestamp()?;
        let base = self.timestamp_base() as i64;
        let offset = random_segment.chars().fold(0i64, |acc, c| {
            let n = self.alphabet.index_of(c).map_or(-1, i64::from);
            (acc + n).rem_euclid(base)
        });
        Ok(offset as u32)
    }

    /// Shifts every digit of `digits` forward by `offset` within the timestamp alphabet.
    ///
    /// # Errors
    ///
    /// Returns a usage error if the configuration does not include a timestamp, and a decoding
    /// error if `digits` contains a character outside the timestamp alphabet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stampid::IdOptions;
    ///
    /// let config = IdOptions {
    ///     include_timestamp: true,
    ///     timestamp_alphabet: Some("0123456789".into()),
    ///     ..Default::default()
    /// }
    /// .build()?;
    ///
    /// assert_eq!(config.obfuscate("1726077106274", 3)?, "4059300439507");
    /// assert_eq!(config.deobfuscate("4059300439507", 3)?, "1726077106274");
    /// # Ok::<(), stampid::Error>(())
    /// ```
    pub fn obfuscate(&self, digits: &str, offset: u32) -> Result<String, Error> {
        self.ensure_timestamp()?;
        let shift = offset % self.timestamp_base();
        self.shift_digits(digits, shift)
    }

    /// Reverses [`obfuscate`](Self::obfuscate) with the same `offset`.
    ///
    /// # Errors
    ///
    /// Returns a usage error if the configuration does not include a timestamp, and a decoding
    /// error if `digits` contains a character outside the timestamp alphabet.
    pub fn deobfuscate(&self, digits: &str, offset: u32) -> Result<String, Error> {
        self.ensure_timestamp()?;
        let base = self.timestamp_base();
        self.shift_digits(digits, base - offset % base)
    }

    fn shift_digits(&self, digits: &str, shift: u32) -> Result<String, Error> {
        let alphabet = &self.timestamp_alphabet;
        let base = alphabet.base() as u64;
        digits
            .chars()
            .enumerate()
            .map(|(i, c)| -> Result<char, Error> {
                let n = alphabet.index_of(c).ok_or(Error::invalid_digit(c, i))?;
                Ok(alphabet.digit_at(((n as u64 + shift as u64) % base) as u32))
            })
            .collect()
    }
}
