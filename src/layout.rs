use crate::{Error, IdConfig, RandSource, TimestampPosition};
use alloc::string::String;

/// Returns the byte offset of the `n`-th character of `s`, or `s.len()` if `s` has `n` characters.
fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// Segments of an identifier located purely by character counts.
struct Parts<'a> {
    prefix: &'a str,
    timestamp: &'a str,
    separator: &'a str,
    random: &'a str,
    suffix: &'a str,
    /// Character position of the timestamp segment within the identifier.
    timestamp_at: usize,
    /// Character position of the random segment within the identifier.
    random_at: usize,
}

impl IdConfig {
    /// Generates a new identifier stamped with `unix_ts_ms` using `rng` as the random source.
    ///
    /// `unix_ts_ms` is ignored if the configuration does not include a timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error only if the configuration requires all character classes and
    /// [`MAX_CLASS_ATTEMPTS`](crate::MAX_CLASS_ATTEMPTS) random segments all missed one.
    pub fn generate_with<R: RandSource + ?Sized>(
        &self,
        rng: &mut R,
        unix_ts_ms: u64,
    ) -> Result<String, Error> {
        let random = self.random_segment_with(rng)?;
        if self.include_timestamp {
            let timestamp = self.encode_timestamp(unix_ts_ms, &random)?;
            Ok(self.assemble(Some(&timestamp), &random))
        } else {
            Ok(self.assemble(None, &random))
        }
    }

    /// Joins affixes and segments in the configured order.
    ///
    /// The separator is placed only between a timestamp segment and the random segment.
    pub fn assemble(&self, timestamp: Option<&str>, random: &str) -> String {
        let mut dst = String::with_capacity(self.id_length() * 2);
        dst.push_str(&self.prefix);
        match (timestamp, self.timestamp_position) {
            (None, _) => dst.push_str(random),
            (Some(timestamp), TimestampPosition::Start) => {
                dst.push_str(timestamp);
                dst.push_str(&self.separator);
                dst.push_str(random);
            }
            (Some(timestamp), TimestampPosition::End) => {
                dst.push_str(random);
                dst.push_str(&self.separator);
                dst.push_str(timestamp);
            }
        }
        dst.push_str(&self.suffix);
        dst
    }

    /// Returns the random segment of `id`.
    ///
    /// Segments are located by the character counts of the affixes, the separator, and
    /// [`timestamp_length`](Self::timestamp_length); their content is never searched for. An
    /// identifier whose timestamp outgrew `timestamp_length` digits (an instant later than
    /// [`timestamp_max`](Self::timestamp_max)) is split at the wrong places.
    ///
    /// # Errors
    ///
    /// Returns a usage error if the configuration does not include a timestamp, and a decoding
    /// error if `id` is too short to hold the affixes, separator, and timestamp.
    pub fn random_segment<'a>(&self, id: &'a str) -> Result<&'a str, Error> {
        self.locate(id).map(|parts| parts.random)
    }

    /// Returns the timestamp segment of `id`.
    ///
    /// The segment is assumed to be exactly [`timestamp_length`](Self::timestamp_length)
    /// characters long, as for every instant up to [`timestamp_max`](Self::timestamp_max).
    ///
    /// # Errors
    ///
    /// Returns a usage error if the configuration does not include a timestamp, and a decoding
    /// error if `id` is too short to hold the affixes, separator, and timestamp.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stampid::{IdOptions, TimestampPosition};
    ///
    /// let config = IdOptions {
    ///     include_timestamp: true,
    ///     timestamp_position: TimestampPosition::End,
    ///     separator: "-".into(),
    ///     prefix: "-".into(),
    ///     ..Default::default()
    /// }
    /// .build()?;
    ///
    /// let id = "--abc-1nLnXM5B";
    /// assert_eq!(config.random_segment(id)?, "-abc");
    /// assert_eq!(config.timestamp_segment(id)?, "1nLnXM5B");
    /// # Ok::<(), stampid::Error>(())
    /// ```
    pub fn timestamp_segment<'a>(&self, id: &'a str) -> Result<&'a str, Error> {
        self.locate(id).map(|parts| parts.timestamp)
    }

    /// Returns Unix time in milliseconds encoded in `id`.
    ///
    /// Obfuscated timestamps are restored with the offset of the random segment of `id`.
    ///
    /// Extraction assumes at most [`timestamp_length`](Self::timestamp_length) timestamp digits.
    /// An identifier stamped later than [`timestamp_max`](Self::timestamp_max) is longer than
    /// that and decodes to a different instant without an error.
    ///
    /// # Errors
    ///
    /// Returns a usage error if the configuration does not include a timestamp, and a decoding
    /// error if the timestamp segment cannot be located or decoded.
    pub fn date(&self, id: &str) -> Result<u64, Error> {
        let parts = self.locate(id)?;
        self.decode_timestamp(parts.timestamp, parts.random)
            .map_err(|err| err.shifted(parts.timestamp_at))
    }

    /// Returns the instant encoded in `id`.
    ///
    /// # Errors
    ///
    /// Same as [`date`](Self::date).
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn date_time(&self, id: &str) -> Result<std::time::SystemTime, Error> {
        let unix_ts_ms = self.date(id)?;
        Ok(std::time::UNIX_EPOCH + std::time::Duration::from_millis(unix_ts_ms))
    }

    /// Checks that `id` could have been generated under this configuration.
    ///
    /// Unlike the extraction methods, this compares affixes and the separator by content, requires
    /// a random segment of exactly [`random_length`](Self::random_length) characters from the
    /// random alphabet, and requires the timestamp segment, if any, to decode.
    ///
    /// # Errors
    ///
    /// Returns a decoding error describing the first violation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stampid::IdOptions;
    ///
    /// let config = IdOptions {
    ///     prefix: "usr_".into(),
    ///     random_length: Some(8),
    ///     ..Default::default()
    /// }
    /// .build()?;
    ///
    /// assert!(config.validate("usr_6pTgQkoy").is_ok());
    /// assert!(config.validate("usr_6pTgQko0").is_err());
    /// assert!(config.validate("org_6pTgQkoy").is_err());
    /// # Ok::<(), stampid::Error>(())
    /// ```
    pub fn validate(&self, id: &str) -> Result<(), Error> {
        let parts = if self.include_timestamp {
            self.locate(id)?
        } else {
            self.locate_untimed(id)?
        };

        if parts.prefix != self.prefix
            || parts.suffix != self.suffix
            || (self.include_timestamp && parts.separator != self.separator)
        {
            return Err(Error::affix_mismatch());
        }

        let n_random = parts.random.chars().count();
        if n_random != self.random_length {
            return Err(Error::invalid_length(n_random, self.random_length));
        }
        if let Some((i, c)) = parts
            .random
            .chars()
            .enumerate()
            .find(|(_, c)| !self.random_alphabet.contains(*c))
        {
            return Err(Error::invalid_digit(c, parts.random_at + i));
        }

        if self.include_timestamp {
            self.decode_timestamp(parts.timestamp, parts.random)
                .map_err(|err| err.shifted(parts.timestamp_at))?;
        }
        Ok(())
    }

    /// Splits `id` into affixes and the remaining body by character counts.
    fn strip_affixes<'a>(
        &self,
        id: &'a str,
        n_inner: usize,
    ) -> Result<(&'a str, &'a str, &'a str, usize), Error> {
        let n_chars = id.chars().count();
        let n_prefix = self.prefix.chars().count();
        let n_suffix = self.suffix.chars().count();
        let minimum = n_prefix + n_inner + n_suffix;
        if n_chars < minimum {
            return Err(Error::too_short_id(n_chars, minimum));
        }

        let body_start = byte_offset(id, n_prefix);
        let body_end = byte_offset(id, n_chars - n_suffix);
        Ok((
            &id[..body_start],
            &id[body_start..body_end],
            &id[body_end..],
            n_prefix,
        ))
    }

    fn locate<'a>(&self, id: &'a str) -> Result<Parts<'a>, Error> {
        self.ensure_timestamp()?;
        let n_separator = self.separator.chars().count();
        let n_timestamp = self.timestamp_length;
        let (prefix, body, suffix, body_at) = self.strip_affixes(id, n_timestamp + n_separator)?;
        let n_body = body.chars().count();

        let (timestamp, separator, random, timestamp_at, random_at) = match self.timestamp_position
        {
            TimestampPosition::Start => {
                let sep_start = byte_offset(body, n_timestamp);
                let sep_end = byte_offset(body, n_timestamp + n_separator);
                (
                    &body[..sep_start],
                    &body[sep_start..sep_end],
                    &body[sep_end..],
                    body_at,
                    body_at + n_timestamp + n_separator,
                )
            }
            TimestampPosition::End => {
                let n_random = n_body - n_timestamp - n_separator;
                let sep_start = byte_offset(body, n_random);
                let sep_end = byte_offset(body, n_random + n_separator);
                (
                    &body[sep_end..],
                    &body[sep_start..sep_end],
                    &body[..sep_start],
                    body_at + n_random + n_separator,
                    body_at,
                )
            }
        };

        Ok(Parts {
            prefix,
            timestamp,
            separator,
            random,
            suffix,
            timestamp_at,
            random_at,
        })
    }

    fn locate_untimed<'a>(&self, id: &'a str) -> Result<Parts<'a>, Error> {
        let (prefix, body, suffix, body_at) = self.strip_affixes(id, 0)?;
        Ok(Parts {
            prefix,
            timestamp: "",
            separator: "",
            random: body,
            suffix,
            timestamp_at: body_at,
            random_at: body_at,
        })
    }
}
