use crate::{CharClasses, IdConfig, TimestampPosition};
use alloc::string::String;
use core::fmt;

/// A snapshot of a resolved configuration and its derived parameters.
///
/// # Examples
///
/// ```rust
/// use stampid::IdConfig;
///
/// let info = IdConfig::default().info();
/// assert_eq!(info.random_base, 58);
/// assert_eq!(info.random_entropy, 128);
/// assert_eq!(info.id_length, 22);
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
#[non_exhaustive]
pub struct IdInfo {
    pub alphabet: String,
    pub random_alphabet: String,
    pub timestamp_alphabet: String,
    pub random_base: u32,
    pub timestamp_base: u32,
    pub random_length: usize,
    /// Bits of entropy in the random segment.
    pub random_entropy: u32,
    /// Character classes of the random alphabet.
    pub random_classes: CharClasses,
    pub require_all_classes: bool,
    pub include_timestamp: bool,
    pub obfuscate_timestamp: bool,
    pub timestamp_position: TimestampPosition,
    pub timestamp_length: usize,
    pub timestamp_min_length: usize,
    /// Largest Unix time in milliseconds that fits in `timestamp_length` digits.
    pub timestamp_max: u64,
    pub prefix: String,
    pub separator: String,
    pub suffix: String,
    /// Number of characters in identifiers whose timestamp fits in `timestamp_length` digits.
    pub id_length: usize,
}

impl IdConfig {
    /// Returns a snapshot of the configuration and derived parameters for diagnostics.
    pub fn info(&self) -> IdInfo {
        IdInfo {
            alphabet: self.alphabet.as_str().into(),
            random_alphabet: self.random_alphabet.as_str().into(),
            timestamp_alphabet: self.timestamp_alphabet.as_str().into(),
            random_base: self.random_base(),
            timestamp_base: self.timestamp_base(),
            random_length: self.random_length,
            random_entropy: self.random_entropy(),
            random_classes: self.random_classes(),
            require_all_classes: self.require_all_classes,
            include_timestamp: self.include_timestamp,
            obfuscate_timestamp: self.obfuscates_timestamp(),
            timestamp_position: self.timestamp_position,
            timestamp_length: self.timestamp_length,
            timestamp_min_length: self.timestamp_min_length(),
            timestamp_max: self.timestamp_max(),
            prefix: self.prefix.clone(),
            separator: self.separator.clone(),
            suffix: self.suffix.clone(),
            id_length: self.id_length(),
        }
    }
}

impl fmt::Display for IdInfo {
    /// Writes a human-readable summary with one `key: value` pair per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "alphabet: {:?}", self.alphabet)?;
        writeln!(
            f,
            "random: {} characters from {:?} (base {}, {} bits, {})",
            self.random_length,
            self.random_alphabet,
            self.random_base,
            self.random_entropy,
            self.random_classes
        )?;
        if self.require_all_classes {
            writeln!(f, "requires all classes: yes")?;
        }
        if self.include_timestamp {
            writeln!(
                f,
                "timestamp: {} characters from {:?} (base {}, minimum {}, up to {} ms) at {}{}",
                self.timestamp_length,
                self.timestamp_alphabet,
                self.timestamp_base,
                self.timestamp_min_length,
                self.timestamp_max,
                self.timestamp_position,
                if self.obfuscate_timestamp {
                    ", obfuscated"
                } else {
                    ""
                }
            )?;
        } else {
            writeln!(f, "timestamp: none")?;
        }
        writeln!(
            f,
            "affixes: prefix {:?}, separator {:?}, suffix {:?}",
            self.prefix, self.separator, self.suffix
        )?;
        write!(f, "length: {}", self.id_length)
    }
}

#[cfg(test)]
mod tests {
    use crate::{CharClasses, IdConfig, IdOptions, TimestampPosition, DEFAULT_ALPHABET};

    /// Reports the resolved configuration and derived values
    #[test]
    fn reports_the_resolved_configuration_and_derived_values() {
        let config = IdOptions {
            timestamp_alphabet: Some("0123456789".into()),
            include_timestamp: true,
            obfuscate_timestamp: true,
            timestamp_position: TimestampPosition::End,
            prefix: "ord_".into(),
            separator: ".".into(),
            ..Default::default()
        }
        .build()
        .unwrap();
        let info = config.info();

        assert_eq!(info.alphabet, DEFAULT_ALPHABET);
        assert_eq!(info.random_alphabet, DEFAULT_ALPHABET);
        assert_eq!(info.timestamp_alphabet, "0123456789");
        assert_eq!(info.random_base, 58);
        assert_eq!(info.timestamp_base, 10);
        assert_eq!(info.random_length, 22);
        assert_eq!(info.random_entropy, 128);
        assert_eq!(
            info.random_classes,
            CharClasses::LOWERCASE | CharClasses::UPPERCASE | CharClasses::NUMERIC
        );
        assert!(!info.require_all_classes);
        assert!(info.include_timestamp);
        assert!(info.obfuscate_timestamp);
        assert_eq!(info.timestamp_position, TimestampPosition::End);
        assert_eq!(info.timestamp_length, 13);
        assert_eq!(info.timestamp_min_length, 13);
        assert_eq!(info.timestamp_max, 9_999_999_999_999);
        assert_eq!(info.prefix, "ord_");
        assert_eq!(info.separator, ".");
        assert_eq!(info.suffix, "");
        assert_eq!(info.id_length, 4 + 22 + 1 + 13);
        assert_eq!(info, config.clone().info());
    }

    /// Summarizes the configuration in human-readable form
    #[test]
    fn summarizes_the_configuration_in_human_readable_form() {
        let text = IdConfig::default().info().to_string();
        assert_eq!(
            text,
            format!(
                "alphabet: {:?}\n\
                 random: 22 characters from {:?} (base 58, 128 bits, lowercase|uppercase|numeric)\n\
                 timestamp: none\n\
                 affixes: prefix \"\", separator \"\", suffix \"\"\n\
                 length: 22",
                DEFAULT_ALPHABET, DEFAULT_ALPHABET
            )
        );

        let text = IdOptions {
            include_timestamp: true,
            obfuscate_timestamp: true,
            require_all_classes: true,
            ..Default::default()
        }
        .build()
        .unwrap()
        .info()
        .to_string();
        assert!(text.contains("requires all classes: yes\n"));
        assert!(text.contains(
            "(base 58, minimum 8, up to 128063081718015 ms) at start, obfuscated\n"
        ));
    }

    /// Serializes the snapshot with camelCase keys
    #[cfg(feature = "serde")]
    #[test]
    fn serializes_the_snapshot_with_camel_case_keys() {
        use serde_test::{assert_ser_tokens, Token};

        let info = IdOptions {
            alphabet: Some("0123456789abcdef".into()),
            random_length: Some(8),
            include_timestamp: true,
            separator: "-".into(),
            ..Default::default()
        }
        .build()
        .unwrap()
        .info();

        assert_ser_tokens(
            &info,
            &[
                Token::Struct {
                    name: "IdInfo",
                    len: 19,
                },
                Token::Str("alphabet"),
                Token::Str("0123456789abcdef"),
                Token::Str("randomAlphabet"),
                Token::Str("0123456789abcdef"),
                Token::Str("timestampAlphabet"),
                Token::Str("0123456789abcdef"),
                Token::Str("randomBase"),
                Token::U32(16),
                Token::Str("timestampBase"),
                Token::U32(16),
                Token::Str("randomLength"),
                Token::U64(8),
                Token::Str("randomEntropy"),
                Token::U32(32),
                Token::Str("randomClasses"),
                Token::Str("lowercase|numeric"),
                Token::Str("requireAllClasses"),
                Token::Bool(false),
                Token::Str("includeTimestamp"),
                Token::Bool(true),
                Token::Str("obfuscateTimestamp"),
                Token::Bool(false),
                Token::Str("timestampPosition"),
                Token::UnitVariant {
                    name: "TimestampPosition",
                    variant: "start",
                },
                Token::Str("timestampLength"),
                Token::U64(11),
                Token::Str("timestampMinLength"),
                Token::U64(11),
                Token::Str("timestampMax"),
                Token::U64(17_592_186_044_415),
                Token::Str("prefix"),
                Token::Str(""),
                Token::Str("separator"),
                Token::Str("-"),
                Token::Str("suffix"),
                Token::Str(""),
                Token::Str("idLength"),
                Token::U64(20),
                Token::StructEnd,
            ],
        );
    }
}
