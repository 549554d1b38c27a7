//! # stampid: configurable random identifiers with optional timestamps
//!
//! An identifier is a random segment drawn uniformly from a chosen alphabet, optionally joined
//! with a millisecond timestamp encoded positionally in a second alphabet and wrapped in a fixed
//! prefix and suffix:
//!
//! ```text
//! prefix [timestamp separator] random suffix     (timestamp at the start)
//! prefix random [separator timestamp] suffix     (timestamp at the end)
//! ```
//!
//! The timestamp can be obfuscated by rotating its digits by an offset derived from the random
//! segment, so identifiers created at the same instant do not share a visible prefix. Timestamps
//! and segments are recovered from identifiers by position alone.
//!
//! ```rust
//! let x = stampid::new_string(); // e.g., "6pTgQkoyWXzK4M3c7dHJAN"
//! assert_eq!(x.chars().count(), 22);
//! ```
//!
//! Build an [`IdConfig`] from [`IdOptions`] to customize the format:
//!
//! ```rust
//! use stampid::{IdGenerator, IdOptions, TimestampPosition};
//!
//! let config = IdOptions {
//!     include_timestamp: true,
//!     obfuscate_timestamp: true,
//!     timestamp_position: TimestampPosition::End,
//!     prefix: "ord_".into(),
//!     separator: ".".into(),
//!     ..Default::default()
//! }
//! .build()?;
//! let mut g = IdGenerator::new(config);
//!
//! let id = g.generate_with_ts(1726077106274)?;
//! assert!(id.starts_with("ord_"));
//! assert_eq!(g.date(&id)?, 1726077106274);
//! # Ok::<(), stampid::Error>(())
//! ```
//!
//! ## Crate features
//!
//! Default features:
//!
//! - `global_gen` enables [`new_string`] backed by a process-wide generator. Implies
//!   `default_rng`.
//!
//! Optional features:
//!
//! - `std` enables [`SystemTime`](std::time::SystemTime) integration. Without it the crate
//!   only depends on `alloc`.
//! - `default_rng` enables [`DefaultRng`] and [`IdGenerator::new`]. Implies `std`.
//! - `rand09` and `rand08` enable adapters for `rand_core` 0.9 and 0.6 random number
//!   generators.
//! - `serde` enables deserialization of [`IdOptions`] and serialization of [`IdInfo`].
//! - `log` emits diagnostics through the `log` facade.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod alphabet;
mod codec;
mod config;
mod error;
pub mod generator;
mod info;
mod layout;
mod obfuscate;
mod random;

pub use alphabet::{Alphabet, CharClasses};
pub use config::{
    min_timestamp_length, IdConfig, IdOptions, TimestampPosition, TIMESTAMP_HORIZON_MS,
};
pub use error::{Error, ErrorKind};
pub use generator::{DefaultRng, IdGenerator, RandSource, StdSystemTime, TimeSource};
pub use info::IdInfo;
pub use random::MAX_CLASS_ATTEMPTS;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::new_string;

/// The default alphabet: 58 characters excluding the easily confused `0`, `O`, `I` and `l`.
pub const DEFAULT_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// The default number of characters in the random segment, carrying 128 bits of entropy over
/// [`DEFAULT_ALPHABET`].
pub const DEFAULT_RANDOM_LENGTH: usize = 22;

#[cfg(test)]
mod tests {
    use crate::generator::tests::{MockTimeSource, ScriptedRng, SeededRng};
    use crate::{ErrorKind, IdConfig, IdGenerator, IdOptions, DEFAULT_ALPHABET};

    const INSTANT: u64 = 1726077106274; // 2024-09-11T17:51:46.274Z

    fn timestamped(obfuscate_timestamp: bool) -> IdConfig {
        IdOptions {
            include_timestamp: true,
            obfuscate_timestamp,
            separator: "-".into(),
            ..Default::default()
        }
        .build()
        .unwrap()
    }

    /// Generates default identifiers from the default alphabet without repetition
    #[test]
    fn generates_default_identifiers_from_the_default_alphabet_without_repetition() {
        use std::collections::HashSet;

        let mut g = IdGenerator::with_rand_and_time_sources(
            IdConfig::default(),
            SeededRng::new(42),
            MockTimeSource(0),
        );
        let mut s = HashSet::new();
        for _ in 0..100_000 {
            let e = g.generate().unwrap();
            assert_eq!(e.chars().count(), 22);
            assert!(e.chars().all(|c| DEFAULT_ALPHABET.contains(c)));
            s.insert(e);
        }
        assert_eq!(s.len(), 100_000);
    }

    /// Recovers the exact instant from a timestamped identifier
    #[test]
    fn recovers_the_exact_instant_from_a_timestamped_identifier() {
        let config = timestamped(false);
        let id = config.generate_with(&mut SeededRng::new(1), INSTANT).unwrap();

        assert_eq!(id.chars().count(), 8 + 1 + 22);
        assert_eq!(config.timestamp_segment(&id).unwrap(), "1nLnXM5B");
        assert_eq!(&id[8..9], "-");
        assert_eq!(config.date(&id).unwrap(), INSTANT);
    }

    /// Hides the plain encoding when obfuscating yet recovers the instant
    #[test]
    fn hides_the_plain_encoding_when_obfuscating_yet_recovers_the_instant() {
        let config = timestamped(true);

        // every random draw maps to '2', so the offset is 22
        let id = config
            .generate_with(&mut ScriptedRng::repeating(59), INSTANT)
            .unwrap();
        assert_eq!(config.random_segment(&id).unwrap(), "2".repeat(22));
        assert_ne!(config.timestamp_segment(&id).unwrap(), "1nLnXM5B");
        assert_eq!(config.date(&id).unwrap(), INSTANT);

        let mut rng = SeededRng::new(2);
        for i in 0..1000 {
            let id = config.generate_with(&mut rng, INSTANT + i).unwrap();
            assert_eq!(config.date(&id).unwrap(), INSTANT + i);
        }
    }

    /// Rejects duplicate characters and short timestamp lengths
    #[test]
    fn rejects_duplicate_characters_and_short_timestamp_lengths() {
        let err = IdOptions {
            alphabet: Some("abcda".into()),
            ..Default::default()
        }
        .build()
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.field(), Some("alphabet"));

        let err = IdOptions {
            include_timestamp: true,
            timestamp_length: Some(7),
            ..Default::default()
        }
        .build()
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.field(), Some("timestampLength"));
    }

    /// Shares one configuration across threads
    #[test]
    fn shares_one_configuration_across_threads() {
        use std::{collections::HashSet, sync::mpsc, sync::Arc, thread};

        let config = Arc::new(timestamped(true));
        let (tx, rx) = mpsc::channel();
        for seed in 0..4 {
            let tx = tx.clone();
            let config = Arc::clone(&config);
            thread::spawn(move || {
                let mut rng = SeededRng::new(100 + seed);
                for i in 0..10000 {
                    tx.send((i, config.generate_with(&mut rng, INSTANT + i).unwrap()))
                        .unwrap();
                }
            });
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok((i, e)) = rx.recv() {
            assert_eq!(config.date(&e).unwrap(), INSTANT + i);
            s.insert(e);
        }

        assert_eq!(s.len(), 4 * 10000);
    }
}
