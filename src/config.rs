use crate::{Alphabet, CharClasses, Error, DEFAULT_ALPHABET, DEFAULT_RANDOM_LENGTH};
use alloc::{string::String, vec, vec::Vec};
use core::{fmt, str};

/// Unix time in milliseconds of the last instant of the year 2200 (2200-12-31T23:59:59.999Z).
///
/// Default timestamp lengths are chosen so that every instant up to this one fits.
pub const TIMESTAMP_HORIZON_MS: u64 = 7_289_654_399_999;

/// Returns the minimum number of digits needed in base `base` to represent every instant up to
/// [`TIMESTAMP_HORIZON_MS`].
///
/// This is the default-length table keyed by alphabet size: base 2 needs 43 digits, base 10
/// needs 13, base 16 needs 11, bases 32 through 36 need 9, and bases 49 through 64 need 8.
///
/// # Panics
///
/// Panics if `base` is less than 2.
pub const fn min_timestamp_length(base: u32) -> usize {
    assert!(base >= 2, "base must be at least 2");
    let base = base as u64;
    let mut length = 1;
    let mut capacity = base; // base ^ length
    while capacity - 1 < TIMESTAMP_HORIZON_MS {
        capacity = capacity.saturating_mul(base);
        length += 1;
    }
    length
}

/// Returns `floor(log2(base ^ length))` computed exactly with multi-precision integers.
fn entropy_bits(base: u32, length: usize) -> u32 {
    let mut limbs: Vec<u32> = vec![1];
    for _ in 0..length {
        let mut carry = 0u64;
        for limb in limbs.iter_mut() {
            let product = *limb as u64 * base as u64 + carry;
            *limb = product as u32;
            carry = product >> 32;
        }
        if carry > 0 {
            limbs.push(carry as u32);
        }
    }

    let top = limbs.last().copied().unwrap_or(1);
    (limbs.len() as u32 - 1) * 32 + top.ilog2()
}

/// Returns `min(base ^ length - 1, u64::MAX)`.
fn max_value(base: u32, length: usize) -> u64 {
    let mut capacity = 1u128;
    for _ in 0..length {
        capacity = capacity.saturating_mul(base as u128);
        if capacity > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    (capacity - 1) as u64
}

/// Where the timestamp segment is placed relative to the random segment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TimestampPosition {
    /// `timestamp + separator + random`
    #[default]
    Start,

    /// `random + separator + timestamp`
    End,
}

impl TimestampPosition {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl str::FromStr for TimestampPosition {
    type Err = Error;

    /// Parses `"start"` or `"end"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            _ => Err(Error::invalid_position(s)),
        }
    }
}

impl fmt::Display for TimestampPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-supplied options from which an [`IdConfig`] is built.
///
/// Every field is optional; unset fields fall back to the documented defaults.
///
/// # Examples
///
/// ```rust
/// use stampid::IdOptions;
///
/// let config = IdOptions {
///     include_timestamp: true,
///     separator: "-".into(),
///     ..Default::default()
/// }
/// .build()?;
///
/// assert_eq!(config.timestamp_length(), 8);
/// assert_eq!(config.random_length(), 22);
/// # Ok::<(), stampid::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase", deny_unknown_fields)
)]
pub struct IdOptions {
    /// Primary alphabet; also the index space of the obfuscation offset. Defaults to
    /// [`DEFAULT_ALPHABET`].
    pub alphabet: Option<String>,

    /// Alphabet of the random segment. Defaults to `alphabet`.
    pub random_alphabet: Option<String>,

    /// Alphabet of the timestamp segment. Defaults to `alphabet`.
    pub timestamp_alphabet: Option<String>,

    /// Number of characters in the random segment. Defaults to [`DEFAULT_RANDOM_LENGTH`].
    pub random_length: Option<usize>,

    /// Requires every random segment to contain each character class found in
    /// `random_alphabet`.
    pub require_all_classes: bool,

    pub include_timestamp: bool,

    /// Hides the ordering of timestamp segments. Has no effect without `include_timestamp`.
    pub obfuscate_timestamp: bool,

    pub timestamp_position: TimestampPosition,

    /// Minimum number of timestamp digits. Defaults to [`min_timestamp_length`] of the
    /// timestamp base and may not be smaller.
    pub timestamp_length: Option<usize>,

    pub prefix: String,
    pub separator: String,
    pub suffix: String,
}

impl IdOptions {
    /// Validates the options and builds an immutable configuration.
    pub fn build(self) -> Result<IdConfig, Error> {
        IdConfig::new(self)
    }
}

/// A validated, immutable identifier configuration with derived parameters.
///
/// All operations on a configuration are pure functions of the configuration and their
/// arguments, so one configuration can be shared freely across threads. Generation takes the
/// random source as an argument; see [`IdGenerator`](crate::IdGenerator) for a type that owns
/// one.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct IdConfig {
    pub(crate) alphabet: Alphabet,
    pub(crate) random_alphabet: Alphabet,
    pub(crate) timestamp_alphabet: Alphabet,
    pub(crate) random_length: usize,
    pub(crate) require_all_classes: bool,
    pub(crate) include_timestamp: bool,
    pub(crate) obfuscate_timestamp: bool,
    pub(crate) timestamp_position: TimestampPosition,
    pub(crate) timestamp_length: usize,
    pub(crate) prefix: String,
    pub(crate) separator: String,
    pub(crate) suffix: String,

    random_classes: CharClasses,
    random_entropy: u32,
    timestamp_min_length: usize,
    timestamp_max: u64,
}

impl IdConfig {
    /// Validates `options` and computes the derived parameters.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending option if:
    ///
    /// - any alphabet has fewer than two characters or repeats a character;
    /// - `random_length` or `timestamp_length` is zero;
    /// - `timestamp_length` is below the minimum for the timestamp base;
    /// - `require_all_classes` is set and `random_length` is smaller than the number of classes
    ///   in the random alphabet.
    pub fn new(options: IdOptions) -> Result<Self, Error> {
        let alphabet = Alphabet::for_field(
            "alphabet",
            options.alphabet.as_deref().unwrap_or(DEFAULT_ALPHABET),
        )?;
        let random_alphabet = match options.random_alphabet.as_deref() {
            Some(text) => Alphabet::for_field("randomAlphabet", text)?,
            None => alphabet.clone(),
        };
        let timestamp_alphabet = match options.timestamp_alphabet.as_deref() {
            Some(text) => Alphabet::for_field("timestampAlphabet", text)?,
            None => alphabet.clone(),
        };

        let random_length = options.random_length.unwrap_or(DEFAULT_RANDOM_LENGTH);
        if random_length == 0 {
            return Err(Error::non_positive("randomLength"));
        }

        let timestamp_min_length = min_timestamp_length(timestamp_alphabet.base());
        let timestamp_length = match options.timestamp_length {
            Some(0) => return Err(Error::non_positive("timestampLength")),
            Some(n) if n < timestamp_min_length => {
                return Err(Error::timestamp_length_below_minimum(
                    n,
                    timestamp_min_length,
                    timestamp_alphabet.base(),
                ))
            }
            Some(n) => n,
            None => timestamp_min_length,
        };

        let random_classes = random_alphabet.classes();
        if options.require_all_classes && random_classes.count() > random_length {
            return Err(Error::too_many_required_classes(
                random_classes.count(),
                random_length,
            ));
        }

        Ok(Self {
            random_entropy: entropy_bits(random_alphabet.base(), random_length),
            timestamp_max: max_value(timestamp_alphabet.base(), timestamp_length),
            random_classes,
            timestamp_min_length,
            alphabet,
            random_alphabet,
            timestamp_alphabet,
            random_length,
            require_all_classes: options.require_all_classes,
            include_timestamp: options.include_timestamp,
            obfuscate_timestamp: options.obfuscate_timestamp,
            timestamp_position: options.timestamp_position,
            timestamp_length,
            prefix: options.prefix,
            separator: options.separator,
            suffix: options.suffix,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn random_alphabet(&self) -> &Alphabet {
        &self.random_alphabet
    }

    pub fn timestamp_alphabet(&self) -> &Alphabet {
        &self.timestamp_alphabet
    }

    /// Returns the size of the random alphabet.
    pub fn random_base(&self) -> u32 {
        self.random_alphabet.base()
    }

    /// Returns the size of the timestamp alphabet.
    pub fn timestamp_base(&self) -> u32 {
        self.timestamp_alphabet.base()
    }

    pub fn random_length(&self) -> usize {
        self.random_length
    }

    /// Returns the bits of entropy in a random segment: `floor(log2(random_base ^ random_length))`.
    pub fn random_entropy(&self) -> u32 {
        self.random_entropy
    }

    /// Returns the character classes of the random alphabet.
    pub fn random_classes(&self) -> CharClasses {
        self.random_classes
    }

    pub fn requires_all_classes(&self) -> bool {
        self.require_all_classes
    }

    pub fn includes_timestamp(&self) -> bool {
        self.include_timestamp
    }

    /// Returns `true` if timestamp segments are obfuscated.
    pub fn obfuscates_timestamp(&self) -> bool {
        self.include_timestamp && self.obfuscate_timestamp
    }

    pub fn timestamp_position(&self) -> TimestampPosition {
        self.timestamp_position
    }

    pub fn timestamp_length(&self) -> usize {
        self.timestamp_length
    }

    /// Returns the smallest `timestamp_length` accepted for the timestamp base.
    pub fn timestamp_min_length(&self) -> usize {
        self.timestamp_min_length
    }

    /// Returns the largest Unix time in milliseconds that fits in `timestamp_length` digits.
    pub fn timestamp_max(&self) -> u64 {
        self.timestamp_max
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the number of characters in identifiers whose timestamp fits in
    /// `timestamp_length` digits.
    pub fn id_length(&self) -> usize {
        let timestamp = if self.include_timestamp {
            self.timestamp_length + self.separator.chars().count()
        } else {
            0
        };
        self.prefix.chars().count() + timestamp + self.random_length + self.suffix.chars().count()
    }

    pub(crate) fn ensure_timestamp(&self) -> Result<(), Error> {
        if self.include_timestamp {
            Ok(())
        } else {
            Err(Error::timestamp_disabled())
        }
    }
}

impl Default for IdConfig {
    /// Returns the configuration built from the default options: 22 random characters from
    /// [`DEFAULT_ALPHABET`] and no timestamp.
    fn default() -> Self {
        Self::new(IdOptions::default()).expect("default options must be valid")
    }
}

impl TryFrom<IdOptions> for IdConfig {
    type Error = Error;

    fn try_from(options: IdOptions) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}
