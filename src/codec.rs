use crate::{Alphabet, Error, IdConfig};
use alloc::{string::String, vec::Vec};

/// Encodes `value` in the positional notation of `alphabet`, left-padded with the zero digit to at
/// least `min_length` digits.
///
/// Values that need more than `min_length` digits produce a longer string instead of being
/// truncated.
pub(crate) fn encode_digits(alphabet: &Alphabet, value: u64, min_length: usize) -> String {
    let base = alphabet.base() as u64;
    let mut digits = Vec::with_capacity(min_length);
    let mut quotient = value;
    while quotient > 0 || digits.len() < min_length {
        digits.push(alphabet.digit_at((quotient % base) as u32));
        quotient /= base;
    }
    digits.iter().rev().collect()
}

/// Decodes a string in the positional notation of `alphabet`.
pub(crate) fn decode_digits(alphabet: &Alphabet, digits: &str) -> Result<u64, Error> {
    let base = alphabet.base() as u64;
    let mut value = 0u64;
    for (i, c) in digits.chars().enumerate() {
        let n = alphabet.index_of(c).ok_or(Error::invalid_digit(c, i))?;
        value = value
            .checked_mul(base)
            .and_then(|v| v.checked_add(n as u64))
            .ok_or(Error::out_of_u64_range())?;
    }
    Ok(value)
}

impl IdConfig {
    /// Encodes Unix time in milliseconds into a timestamp segment.
    ///
    /// The segment has at least [`timestamp_length`](Self::timestamp_length) digits of the
    /// timestamp alphabet; instants later than [`timestamp_max`](Self::timestamp_max) take more
    /// digits. When obfuscation is enabled, the digits are shifted by the offset derived from
    /// `random_segment`, which is ignored otherwise.
    ///
    /// # Errors
    ///
    /// Returns a usage error if the configuration does not include a timestamp.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stampid::IdOptions;
    ///
    /// let config = IdOptions {
    ///     include_timestamp: true,
    ///     ..Default::default()
    /// }
    /// .build()?;
    ///
    /// let segment = config.encode_timestamp(1726077106274, "")?;
    /// assert_eq!(segment, "1nLnXM5B");
    /// assert_eq!(config.decode_timestamp(&segment, "")?, 1726077106274);
    /// # Ok::<(), stampid::Error>(())
    /// ```
    pub fn encode_timestamp(&self, unix_ts_ms: u64, random_segment: &str) -> Result<String, Error> {
        self.ensure_timestamp()?;
        let digits = encode_digits(&self.timestamp_alphabet, unix_ts_ms, self.timestamp_length);
        if self.obfuscates_timestamp() {
            let offset = self.offset(random_segment)?;
            self.obfuscate(&digits, offset)
        } else {
            Ok(digits)
        }
    }

    /// Decodes a timestamp segment into Unix time in milliseconds.
    ///
    /// `random_segment` must be the random segment of the same identifier when obfuscation is
    /// enabled.
    ///
    /// # Errors
    ///
    /// Returns a usage error if the configuration does not include a timestamp, and a decoding
    /// error if `digits` contains a character outside the timestamp alphabet or represents a
    /// value beyond the 64-bit range.
    pub fn decode_timestamp(&self, digits: &str, random_segment: &str) -> Result<u64, Error> {
        self.ensure_timestamp()?;
        if self.obfuscates_timestamp() {
            let plain = self.deobfuscate(digits, self.offset(random_segment)?)?;
            decode_digits(&self.timestamp_alphabet, &plain)
        } else {
            decode_digits(&self.timestamp_alphabet, digits)
        }
    }
}
