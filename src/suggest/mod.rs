//! Spelling suggestions on top of any [`Set`].
//!
//! [`WordChecker`] depends on nothing but [`Set::contains`]: it never looks at
//! ordering, traversal or bucket layout, so it works the same over an
//! `AvlSet`, a `ChainedHashSet` or any other implementation.
//!
//! # Examples
//!
//! Any dictionary type only has to implement [`Set<String>`](Set):
//!
//! ```rust
//! use std::collections::HashSet;
//!
//! use setkit::set::Set;
//! use setkit::suggest::WordChecker;
//!
//! struct Dictionary(HashSet<String>);
//!
//! impl Set<String> for Dictionary {
//!     fn add(&mut self, element: String) {
//!         self.0.insert(element);
//!     }
//!
//!     fn contains(&self, element: &String) -> bool {
//!         self.0.contains(element)
//!     }
//!
//!     fn size(&self) -> usize {
//!         self.0.len()
//!     }
//! }
//!
//! let mut words = Dictionary(HashSet::new());
//! words.add_all(["THE", "CAT", "CART"].map(String::from));
//!
//! let checker = WordChecker::new(&words);
//! assert!(checker.word_exists("CAT"));
//! assert_eq!(checker.find_suggestions("TEH"), vec!["THE".to_string()]);
//! ```

use tracing::debug;

use crate::set::Set;

/// Letters tried by insertion and substitution.
const ALPHABET: std::ops::RangeInclusive<char> = 'A'..='Z';

/// Checks words against a dictionary [`Set`] and proposes near misses.
///
/// Suggestions are produced by five edit kinds, in this order:
///
/// 1. swapping each adjacent pair of distinct characters
/// 2. inserting each letter `A`..=`Z` at every position
/// 3. deleting each character
/// 4. replacing each character with each other letter `A`..=`Z`
/// 5. splitting into two words at every inner position, when both halves
///    exist; reported as `"FIRST SECOND"`
///
/// A candidate is reported once, the first time it is generated. No edit
/// reproduces the input word, so a word is never its own suggestion.
pub struct WordChecker<'a, S: ?Sized> {
    words: &'a S,
}

impl<'a, S> WordChecker<'a, S>
where
    S: Set<String> + ?Sized,
{
    /// Creates a checker over `words`.
    pub const fn new(words: &'a S) -> Self {
        Self { words }
    }

    /// Returns `true` if `word` is in the dictionary.
    pub fn word_exists(&self, word: &str) -> bool {
        self.words.contains(&word.to_owned())
    }

    /// Returns the dictionary words that are one edit away from `word`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::Set;
    /// use setkit::suggest::WordChecker;
    /// # use std::collections::BTreeSet;
    /// # struct Dictionary(BTreeSet<String>);
    /// # impl Set<String> for Dictionary {
    /// #     fn add(&mut self, element: String) { self.0.insert(element); }
    /// #     fn contains(&self, element: &String) -> bool { self.0.contains(element) }
    /// #     fn size(&self) -> usize { self.0.len() }
    /// # }
    ///
    /// let mut words = Dictionary(BTreeSet::new());
    /// words.add_all(["BOAT", "BOOT", "COAT", "TO", "BE"].map(String::from));
    ///
    /// let checker = WordChecker::new(&words);
    /// assert_eq!(
    ///     checker.find_suggestions("BOAAT"),
    ///     vec!["BOAT".to_string()]
    /// );
    /// assert_eq!(
    ///     checker.find_suggestions("BOET"),
    ///     vec!["BOAT".to_string(), "BOOT".to_string()]
    /// );
    /// assert_eq!(checker.find_suggestions("TOBE"), vec!["TO BE".to_string()]);
    /// ```
    pub fn find_suggestions(&self, word: &str) -> Vec<String> {
        let characters: Vec<char> = word.chars().collect();
        let mut suggestions = Suggestions::default();

        for index in 1..characters.len() {
            if characters[index - 1] == characters[index] {
                continue;
            }
            let mut candidate = characters.clone();
            candidate.swap(index - 1, index);
            self.offer(&mut suggestions, &candidate);
        }

        for position in 0..=characters.len() {
            for letter in ALPHABET {
                let mut candidate = characters.clone();
                candidate.insert(position, letter);
                self.offer(&mut suggestions, &candidate);
            }
        }

        for position in 0..characters.len() {
            let mut candidate = characters.clone();
            candidate.remove(position);
            self.offer(&mut suggestions, &candidate);
        }

        for (position, &original) in characters.iter().enumerate() {
            for letter in ALPHABET.filter(|&letter| letter != original) {
                let mut candidate = characters.clone();
                candidate[position] = letter;
                self.offer(&mut suggestions, &candidate);
            }
        }

        for position in 1..characters.len() {
            let first: String = characters[..position].iter().collect();
            let second: String = characters[position..].iter().collect();
            if self.words.contains(&first) && self.words.contains(&second) {
                suggestions.push(format!("{first} {second}"));
            }
        }

        debug!(word, count = suggestions.found.len(), "generated suggestions");
        suggestions.found
    }

    fn offer(&self, suggestions: &mut Suggestions, candidate: &[char]) {
        let candidate: String = candidate.iter().collect();
        if self.words.contains(&candidate) {
            suggestions.push(candidate);
        }
    }
}

/// Suggestions in generation order, without duplicates.
#[derive(Default)]
struct Suggestions {
    found: Vec<String>,
}

impl Suggestions {
    fn push(&mut self, suggestion: String) {
        if !self.found.contains(&suggestion) {
            self.found.push(suggestion);
        }
    }
}
