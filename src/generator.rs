//! Identifier generator owning a configuration, a random source, and a time source.

use crate::{Error, IdConfig, IdInfo};
use alloc::string::String;

pub mod with_rand08;
pub mod with_rand09;

#[cfg(feature = "default_rng")]
mod default_rng;


/// Represents an identifier generator.
///
/// The generator combines an immutable [`IdConfig`] with a random number generator and a clock.
/// Methods that do not need randomness or time delegate to the configuration.
///
/// # Examples
///
/// ```rust
/// use stampid::{IdGenerator, IdOptions};
///
/// let config = IdOptions {
///     include_timestamp: true,
///     separator: "-".into(),
///     ..Default::default()
/// }
/// .build()?;
/// let mut g = IdGenerator::new(config);
///
/// let id = g.generate_with_ts(1726077106274)?;
/// assert!(id.starts_with("1nLnXM5B-"));
/// assert_eq!(g.date(&id)?, 1726077106274);
/// # Ok::<(), stampid::Error>(())
/// ```
///
/// Each call to [`generate`](Self::generate) reads the current time from the time source:
///
/// ```rust
/// use stampid::IdGenerator;
///
/// let mut g = IdGenerator::default();
/// let x = g.generate()?; // e.g., "6pTgQkoyWXzK4M3c7dHJAN"
/// assert_eq!(x.chars().count(), 22);
/// # Ok::<(), stampid::Error>(())
/// ```
#[derive(Debug)]
pub struct IdGenerator<R = DefaultRng, T = StdSystemTime> {
    config: IdConfig,
    rng: R,
    time_source: T,
}

#[cfg(feature = "default_rng")]
impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdConfig::default())
    }
}

impl IdGenerator {
    /// Creates a generator object with the default random number generator.
    ///
    /// The crate may panic if the default random number generator could not be initialized
    /// securely. Use [`IdGenerator::with_rand_and_time_sources`] to supply another source.
    #[cfg(feature = "default_rng")]
    #[cfg_attr(docsrs, doc(cfg(feature = "default_rng")))]
    pub fn new(config: IdConfig) -> Self {
        Self::with_rand_and_time_sources(config, Default::default(), StdSystemTime)
    }
}

impl<R, T> IdGenerator<R, T> {
    /// Creates a generator object with specified random number generator and system clock.
    ///
    /// The random number generator should be cryptographically strong and securely seeded. Use
    /// this constructor to inject deterministic sources in tests.
    pub const fn with_rand_and_time_sources(config: IdConfig, rng: R, time_source: T) -> Self {
        Self {
            config,
            rng,
            time_source,
        }
    }

    /// Returns the configuration of this generator.
    pub const fn config(&self) -> &IdConfig {
        &self.config
    }

    /// Returns Unix time in milliseconds encoded in the timestamp segment of `id`.
    ///
    /// See [`IdConfig::date`].
    pub fn date(&self, id: &str) -> Result<u64, Error> {
        self.config.date(id)
    }

    /// Returns the instant encoded in the timestamp segment of `id`.
    ///
    /// See [`IdConfig::date_time`].
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn date_time(&self, id: &str) -> Result<std::time::SystemTime, Error> {
        self.config.date_time(id)
    }

    /// See [`IdConfig::random_segment`].
    pub fn random_segment<'a>(&self, id: &'a str) -> Result<&'a str, Error> {
        self.config.random_segment(id)
    }

    /// See [`IdConfig::timestamp_segment`].
    pub fn timestamp_segment<'a>(&self, id: &'a str) -> Result<&'a str, Error> {
        self.config.timestamp_segment(id)
    }

    /// Returns a snapshot of the configuration and derived parameters.
    pub fn info(&self) -> IdInfo {
        self.config.info()
    }
}

impl<R: RandSource, T: TimeSource> IdGenerator<R, T> {
    /// Generates a new identifier stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error only if the configuration requires all character classes and
    /// [`MAX_CLASS_ATTEMPTS`](crate::MAX_CLASS_ATTEMPTS) random segments all missed one.
    pub fn generate(&mut self) -> Result<String, Error> {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_with_ts(unix_ts_ms)
    }
}

impl<R: RandSource, T> IdGenerator<R, T> {
    /// Generates a new identifier stamped with `unix_ts_ms`, Unix time in milliseconds.
    ///
    /// `unix_ts_ms` is ignored if the configuration does not include a timestamp.
    pub fn generate_with_ts(&mut self, unix_ts_ms: u64) -> Result<String, Error> {
        self.config.generate_with(&mut self.rng, unix_ts_ms)
    }

    /// Generates a new identifier stamped with `time`.
    ///
    /// # Errors
    ///
    /// Returns a usage error if `time` precedes the Unix epoch while the configuration includes a
    /// timestamp.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate_at(&mut self, time: std::time::SystemTime) -> Result<String, Error> {
        let unix_ts_ms = match time.duration_since(std::time::UNIX_EPOCH) {
            Ok(elapsed) => u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            Err(_) if self.config.includes_timestamp() => return Err(Error::before_epoch()),
            Err(_) => 0,
        };
        self.generate_with_ts(unix_ts_ms)
    }
}

impl<R: RandSource, T: TimeSource> Iterator for IdGenerator<R, T> {
    type Item = String;

    /// Returns a new identifier, or `None` if class requirements could not be met.
    fn next(&mut self) -> Option<Self::Item> {
        self.generate().ok()
    }
}

/// A trait that defines the minimum random number generator interface for [`IdGenerator`].
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;
}

impl<R: RandSource + ?Sized> RandSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// A trait that defines the minimum system clock interface for [`IdGenerator`].
pub trait TimeSource {
    /// Returns the current Unix time in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default random number generator used by [`IdGenerator`].
///
/// Currently, `DefaultRng` uses [`ChaCha12Core`] that is initially seeded and subsequently
/// reseeded by [`OsRng`] every 64 kiB of random data using the [`ReseedingRng`] wrapper. It is
/// the same strategy used by [`ThreadRng`] of `rand` (v0.9) crate.
///
/// [`ChaCha12Core`]: https://docs.rs/rand_chacha/0.9/rand_chacha/struct.ChaCha12Core.html
/// [`OsRng`]: https://docs.rs/rand/0.9/rand/rngs/struct.OsRng.html
/// [`ReseedingRng`]: https://docs.rs/rand/0.9/rand/rngs/struct.ReseedingRng.html
/// [`ThreadRng`]: https://docs.rs/rand/0.9/rand/rngs/struct.ThreadRng.html
#[derive(Debug)]
pub struct DefaultRng {
    _private: (),
    #[cfg(feature = "default_rng")]
    inner: rand09::rngs::ReseedingRng<rand_chacha::ChaCha12Core, rand09::rngs::OsRng>,
}

/// The default time source that reads the current time from [`std::time::SystemTime`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }
}
