use alloc::string::String;
use core::{error, fmt};

/// Broad classification of an [`Error`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An option failed validation while building an [`IdConfig`](crate::IdConfig).
    Configuration,

    /// A timestamp-dependent operation was called on a configuration without timestamps.
    Usage,

    /// A string could not be decoded under the configuration.
    Decoding,

    /// Random segments kept missing a required character class.
    ClassRequirementUnsatisfiable,
}

/// An error returned by configuration, generation, and decoding operations.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Error {
    detail: Detail,
}

#[derive(Clone, Eq, PartialEq, Debug)]
enum Detail {
    TooShortAlphabet {
        field: &'static str,
        n_chars: usize,
    },
    DuplicateCharacter {
        field: &'static str,
        chr: char,
    },
    NonPositive {
        field: &'static str,
    },
    TimestampLengthBelowMinimum {
        length: usize,
        minimum: usize,
        base: u32,
    },
    TooManyRequiredClasses {
        n_classes: usize,
        random_length: usize,
    },
    InvalidPosition {
        value: String,
    },
    TimestampDisabled,
    #[cfg(feature = "std")]
    BeforeEpoch,
    InvalidDigit {
        chr: char,
        position: usize,
    },
    TooShortId {
        n_chars: usize,
        minimum: usize,
    },
    InvalidLength {
        n_chars: usize,
        expected: usize,
    },
    AffixMismatch,
    OutOfU64Range,
    ClassRetriesExhausted {
        attempts: u32,
    },
}

impl Error {
    pub(crate) const fn too_short_alphabet(field: &'static str, n_chars: usize) -> Self {
        Self {
            detail: Detail::TooShortAlphabet { field, n_chars },
        }
    }

    pub(crate) const fn duplicate_character(field: &'static str, chr: char) -> Self {
        Self {
            detail: Detail::DuplicateCharacter { field, chr },
        }
    }

    pub(crate) const fn non_positive(field: &'static str) -> Self {
        Self {
            detail: Detail::NonPositive { field },
        }
    }

    pub(crate) const fn timestamp_length_below_minimum(
        length: usize,
        minimum: usize,
        base: u32,
    ) -> Self {
        Self {
            detail: Detail::TimestampLengthBelowMinimum {
                length,
                minimum,
                base,
            },
        }
    }

    pub(crate) const fn too_many_required_classes(n_classes: usize, random_length: usize) -> Self {
        Self {
            detail: Detail::TooManyRequiredClasses {
                n_classes,
                random_length,
            },
        }
    }

    pub(crate) fn invalid_position(value: &str) -> Self {
        Self {
            detail: Detail::InvalidPosition {
                value: value.into(),
            },
        }
    }

    pub(crate) const fn timestamp_disabled() -> Self {
        Self {
            detail: Detail::TimestampDisabled,
        }
    }

    #[cfg(feature = "std")]
    pub(crate) const fn before_epoch() -> Self {
        Self {
            detail: Detail::BeforeEpoch,
        }
    }

    pub(crate) const fn invalid_digit(chr: char, position: usize) -> Self {
        Self {
            detail: Detail::InvalidDigit { chr, position },
        }
    }

    pub(crate) const fn too_short_id(n_chars: usize, minimum: usize) -> Self {
        Self {
            detail: Detail::TooShortId { n_chars, minimum },
        }
    }

    pub(crate) const fn invalid_length(n_chars: usize, expected: usize) -> Self {
        Self {
            detail: Detail::InvalidLength { n_chars, expected },
        }
    }

    pub(crate) const fn affix_mismatch() -> Self {
        Self {
            detail: Detail::AffixMismatch,
        }
    }

    pub(crate) const fn out_of_u64_range() -> Self {
        Self {
            detail: Detail::OutOfU64Range,
        }
    }

    pub(crate) const fn class_retries_exhausted(attempts: u32) -> Self {
        Self {
            detail: Detail::ClassRetriesExhausted { attempts },
        }
    }

    /// Moves the reported position of an invalid digit forward by `n` characters.
    pub(crate) fn shifted(mut self, n: usize) -> Self {
        if let Detail::InvalidDigit { position, .. } = &mut self.detail {
            *position += n;
        }
        self
    }

    /// Returns the classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self.detail {
            Detail::TooShortAlphabet { .. }
            | Detail::DuplicateCharacter { .. }
            | Detail::NonPositive { .. }
            | Detail::TimestampLengthBelowMinimum { .. }
            | Detail::TooManyRequiredClasses { .. }
            | Detail::InvalidPosition { .. } => ErrorKind::Configuration,
            Detail::TimestampDisabled => ErrorKind::Usage,
            #[cfg(feature = "std")]
            Detail::BeforeEpoch => ErrorKind::Usage,
            Detail::InvalidDigit { .. }
            | Detail::TooShortId { .. }
            | Detail::InvalidLength { .. }
            | Detail::AffixMismatch
            | Detail::OutOfU64Range => ErrorKind::Decoding,
            Detail::ClassRetriesExhausted { .. } => ErrorKind::ClassRequirementUnsatisfiable,
        }
    }

    /// Returns the name of the offending option if this is a configuration error.
    ///
    /// Option names follow the camelCase keys of the option table, e.g. `"timestampLength"`.
    pub const fn field(&self) -> Option<&'static str> {
        match self.detail {
            Detail::TooShortAlphabet { field, .. }
            | Detail::DuplicateCharacter { field, .. }
            | Detail::NonPositive { field } => Some(field),
            Detail::TimestampLengthBelowMinimum { .. } => Some("timestampLength"),
            Detail::TooManyRequiredClasses { .. } => Some("randomLength"),
            Detail::InvalidPosition { .. } => Some("timestampPosition"),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Detail::TooShortAlphabet { field, n_chars } => write!(
                f,
                "invalid `{}`: {} characters (expected at least 2)",
                field, n_chars
            ),
            Detail::DuplicateCharacter { field, chr } => write!(
                f,
                "invalid `{}`: duplicate character '{}'",
                field,
                chr.escape_debug()
            ),
            Detail::NonPositive { field } => write!(f, "invalid `{}`: must be positive", field),
            Detail::TimestampLengthBelowMinimum {
                length,
                minimum,
                base,
            } => write!(
                f,
                "invalid `timestampLength`: {} (expected at least {} for base {})",
                length, minimum, base
            ),
            Detail::TooManyRequiredClasses {
                n_classes,
                random_length,
            } => write!(
                f,
                "invalid `randomLength`: {} characters cannot cover {} required character classes",
                random_length, n_classes
            ),
            Detail::InvalidPosition { value } => write!(
                f,
                "invalid `timestampPosition`: {:?} (expected \"start\" or \"end\")",
                value
            ),
            Detail::TimestampDisabled => {
                write!(f, "operation requires a configuration that includes a timestamp")
            }
            #[cfg(feature = "std")]
            Detail::BeforeEpoch => write!(f, "instant precedes the Unix epoch"),
            Detail::InvalidDigit { chr, position } => write!(
                f,
                "could not decode: invalid digit '{}' at {}",
                chr.escape_debug(),
                position
            ),
            Detail::TooShortId { n_chars, minimum } => write!(
                f,
                "could not decode: {} characters (expected at least {})",
                n_chars, minimum
            ),
            Detail::InvalidLength { n_chars, expected } => write!(
                f,
                "could not decode: random segment of {} characters (expected {})",
                n_chars, expected
            ),
            Detail::AffixMismatch => {
                write!(f, "could not decode: prefix, separator, or suffix does not match")
            }
            Detail::OutOfU64Range => {
                write!(f, "could not decode: out of 64-bit millisecond range")
            }
            Detail::ClassRetriesExhausted { attempts } => write!(
                f,
                "no random segment covered every required character class in {} attempts",
                attempts
            ),
        }
    }
}

impl error::Error for Error {}
