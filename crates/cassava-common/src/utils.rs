//! Utility functions for Cassava
//!
//! Normalization helpers shared by the store facades and the initializer.

/// Normalize an operator number by trimming surrounding whitespace.
///
/// Seed lists sourced from external configuration routinely carry stray
/// whitespace around the identifiers; uniqueness is on the trimmed form.
///
/// # Examples
///
/// ```
/// use cassava_common::trim_number;
///
/// assert_eq!(trim_number(" 2347012345678 "), "2347012345678");
/// assert_eq!(trim_number("2347012345678"), "2347012345678");
/// ```
pub fn trim_number(number: &str) -> &str {
    number.trim()
}

/// Case-fold a blocklist word to its stored form.
///
/// Words are stored and matched lower-cased, so `"Spam"` and `"spam"`
/// denote the same entry.
///
/// # Examples
///
/// ```
/// use cassava_common::fold_word;
///
/// assert_eq!(fold_word("Spam"), "spam");
/// assert_eq!(fold_word("SPAM "), "spam");
/// ```
pub fn fold_word(word: &str) -> String {
    word.trim().to_lowercase()
}
