use crate::Error;
use alloc::{string::String, vec::Vec};
use core::fmt;

/// Marks ASCII code points that do not belong to an alphabet in [`Alphabet`]'s decode map.
const NO_DIGIT: u32 = u32::MAX;

/// An ordered set of unique characters used as positional digits.
///
/// The position of a character in the set is its digit value, so the number of characters is the
/// base (radix) of the notation.
///
/// # Examples
///
/// ```rust
/// use stampid::Alphabet;
///
/// let hex = Alphabet::new("0123456789abcdef")?;
/// assert_eq!(hex.base(), 16);
/// assert_eq!(hex.index_of('c'), Some(12));
/// assert_eq!(hex.digit(15), Some('f'));
/// # Ok::<(), stampid::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Alphabet {
    text: String,
    chars: Vec<char>,
    /// An O(1) map from ASCII code points to digit values.
    ascii_map: [u32; 128],
}

impl Alphabet {
    /// Creates an alphabet from a string of at least two unique characters.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the string is too short or repeats a character.
    pub fn new(text: &str) -> Result<Self, Error> {
        Self::for_field("alphabet", text)
    }

    /// Creates an alphabet, reporting violations against the named option.
    pub(crate) fn for_field(field: &'static str, text: &str) -> Result<Self, Error> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() < 2 {
            return Err(Error::too_short_alphabet(field, chars.len()));
        }

        let mut ascii_map = [NO_DIGIT; 128];
        for (i, &c) in chars.iter().enumerate() {
            if chars[..i].contains(&c) {
                return Err(Error::duplicate_character(field, c));
            }
            if c.is_ascii() {
                ascii_map[c as usize] = i as u32;
            }
        }

        Ok(Self {
            text: text.into(),
            chars,
            ascii_map,
        })
    }

    /// Returns the number of characters, i.e., the radix of the notation.
    pub fn base(&self) -> u32 {
        self.chars.len() as u32
    }

    /// Returns the character representing the digit value `index`.
    pub fn digit(&self, index: u32) -> Option<char> {
        self.chars.get(index as usize).copied()
    }

    /// Returns the digit value of `c`, or `None` if `c` is not part of the alphabet.
    pub fn index_of(&self, c: char) -> Option<u32> {
        if c.is_ascii() {
            match self.ascii_map[c as usize] {
                NO_DIGIT => None,
                n => Some(n),
            }
        } else {
            self.chars.iter().position(|&e| e == c).map(|i| i as u32)
        }
    }

    /// Returns `true` if `c` is part of the alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.index_of(c).is_some()
    }

    /// Returns the character classes present in the alphabet.
    pub fn classes(&self) -> CharClasses {
        CharClasses::of(&self.text)
    }

    /// Returns the alphabet as a string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the digit character for an index already reduced below [`base`](Self::base).
    pub(crate) fn digit_at(&self, index: u32) -> char {
        self.chars[index as usize]
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.text).finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Alphabet {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl core::str::FromStr for Alphabet {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::new(text)
    }
}

/// A 4-bit descriptor of the character classes found in a string.
///
/// ASCII lowercase letters, ASCII uppercase letters, and ASCII digits form their own classes;
/// every other character is `SPECIAL`.
///
/// # Examples
///
/// ```rust
/// use stampid::CharClasses;
///
/// let classes = CharClasses::of("abc123");
/// assert!(classes.contains(CharClasses::LOWERCASE | CharClasses::NUMERIC));
/// assert!(!classes.contains(CharClasses::UPPERCASE));
/// assert_eq!(classes.count(), 2);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct CharClasses(u8);

impl CharClasses {
    pub const EMPTY: Self = Self(0);
    pub const LOWERCASE: Self = Self(0b0001);
    pub const UPPERCASE: Self = Self(0b0010);
    pub const NUMERIC: Self = Self(0b0100);
    pub const SPECIAL: Self = Self(0b1000);

    const NAMES: [(Self, &'static str); 4] = [
        (Self::LOWERCASE, "lowercase"),
        (Self::UPPERCASE, "uppercase"),
        (Self::NUMERIC, "numeric"),
        (Self::SPECIAL, "special"),
    ];

    /// Returns the class of a single character.
    pub const fn of_char(c: char) -> Self {
        match c {
            'a'..='z' => Self::LOWERCASE,
            'A'..='Z' => Self::UPPERCASE,
            '0'..='9' => Self::NUMERIC,
            _ => Self::SPECIAL,
        }
    }

    /// Returns the union of the classes of all characters in `s`.
    pub fn of(s: &str) -> Self {
        s.chars().fold(Self::EMPTY, |acc, c| acc | Self::of_char(c))
    }

    /// Returns the 4-bit representation: lowercase, uppercase, numeric, and special from the
    /// least significant bit.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every class in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the number of classes present.
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for CharClasses {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for CharClasses {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for CharClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharClasses({})", self)
    }
}

impl fmt::Display for CharClasses {
    /// Lists the present classes joined by `|`, e.g. `lowercase|numeric`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for (class, name) in Self::NAMES {
            if self.contains(class) {
                write!(f, "{}{}", sep, name)?;
                sep = "|";
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod with_serde {
    use super::CharClasses;
    use serde::Serializer;

    impl serde::Serialize for CharClasses {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Alphabet, CharClasses};
    use crate::ErrorKind;

    /// Maps characters to digit values and back
    #[test]
    fn maps_characters_to_digit_values_and_back() {
        let cases = ["01", "0123456789", crate::DEFAULT_ALPHABET, "αβγδ-_", "z\u{1f923}a"];
        for text in cases {
            let a = Alphabet::new(text).unwrap();
            assert_eq!(a.base() as usize, text.chars().count());
            for (i, c) in text.chars().enumerate() {
                assert_eq!(a.index_of(c), Some(i as u32));
                assert_eq!(a.digit(i as u32), Some(c));
            }
            assert_eq!(a.digit(a.base()), None);
            assert_eq!(a.as_str(), text);
        }
    }

    /// Returns None for characters outside the alphabet
    #[test]
    fn returns_none_for_characters_outside_the_alphabet() {
        let a = Alphabet::new(crate::DEFAULT_ALPHABET).unwrap();
        for c in ['0', 'O', 'I', 'l', '-', ' ', '\u{7f}', 'é', '\u{1f923}'] {
            assert_eq!(a.index_of(c), None);
            assert!(!a.contains(c));
        }
    }

    /// Rejects short alphabets and duplicate characters
    #[test]
    fn rejects_short_alphabets_and_duplicate_characters() {
        for text in ["", "a", "\u{1f923}"] {
            let err = Alphabet::new(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
            assert_eq!(err.field(), Some("alphabet"));
        }
        for text in ["aa", "abcda", "ββ", "0123456789abcdef0"] {
            let err = Alphabet::new(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
        assert_eq!(
            Alphabet::for_field("timestampAlphabet", "abca").unwrap_err().field(),
            Some("timestampAlphabet")
        );
    }

    /// Classifies characters into four classes
    #[test]
    fn classifies_characters_into_four_classes() {
        assert_eq!(CharClasses::of(""), CharClasses::EMPTY);
        assert_eq!(CharClasses::of("abc"), CharClasses::LOWERCASE);
        assert_eq!(CharClasses::of("XYZ"), CharClasses::UPPERCASE);
        assert_eq!(CharClasses::of("0189"), CharClasses::NUMERIC);
        assert_eq!(CharClasses::of("-_ éΩ"), CharClasses::SPECIAL);
        assert_eq!(CharClasses::of(crate::DEFAULT_ALPHABET).count(), 3);
        assert_eq!(CharClasses::of("aZ9!").bits(), 0b1111);
        assert_eq!(CharClasses::of("aZ9!").to_string(), "lowercase|uppercase|numeric|special");
        assert_eq!(CharClasses::of("a9").to_string(), "lowercase|numeric");
    }

    /// Tests class containment as a subset relation
    #[test]
    fn tests_class_containment_as_a_subset_relation() {
        let all = CharClasses::of("aA0_");
        let some = CharClasses::LOWERCASE | CharClasses::SPECIAL;
        assert!(all.contains(some));
        assert!(!some.contains(all));
        assert!(some.contains(CharClasses::EMPTY));
        assert!(CharClasses::EMPTY.is_empty());
    }
}
