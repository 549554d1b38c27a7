#![cfg(feature = "global_gen")]

use crate::IdGenerator;
use std::sync::{Mutex, OnceLock};

#[cfg(unix)]
type GlobalGenInner = unix_fork_safety::ProcessLocalGenerator;

#[cfg(not(unix))]
type GlobalGenInner = IdGenerator;

/// Generates a new identifier with the default configuration using the global generator.
///
/// The default configuration produces 22 characters drawn from [`DEFAULT_ALPHABET`] with no
/// timestamp and no affixes.
///
/// This function is thread-safe; multiple threads in a process can call it concurrently. On Unix,
/// this function reseeds the generator when the process ID changes (i.e., upon forks) so that
/// parent and child processes never share random state.
///
/// # Examples
///
/// ```rust
/// let x = stampid::new_string(); // e.g., "6pTgQkoyWXzK4M3c7dHJAN"
///
/// assert!(regex::Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{22}$").unwrap().is_match(&x));
/// ```
///
/// [`DEFAULT_ALPHABET`]: crate::DEFAULT_ALPHABET
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn new_string() -> String {
    static G: OnceLock<Mutex<GlobalGenInner>> = OnceLock::new();

    G.get_or_init(|| {
        #[cfg(feature = "log")]
        log::debug!("stampid: initializing global generator");
        Default::default()
    })
    .lock()
    .expect("stampid: could not lock global generator")
    .generate()
    .expect("stampid: default configuration does not require character classes")
}

#[cfg(unix)]
mod unix_fork_safety {
    use crate::{Error, IdGenerator};
    use std::process;

    /// A thin wrapper to reseed the generator when the process ID changes.
    #[derive(Debug)]
    pub struct ProcessLocalGenerator {
        gen: IdGenerator,
        pid: u32,
    }

    impl Default for ProcessLocalGenerator {
        fn default() -> Self {
            Self {
                gen: Default::default(),
                pid: process::id(),
            }
        }
    }

    impl ProcessLocalGenerator {
        pub fn generate(&mut self) -> Result<String, Error> {
            let pid = process::id();
            if pid != self.pid {
                #[cfg(feature = "log")]
                log::debug!(
                    "stampid: process id changed from {} to {}; reseeding global generator",
                    self.pid,
                    pid
                );
                self.gen = Default::default();
                self.pid = pid;
            }
            self.gen.generate()
        }
    }
}
