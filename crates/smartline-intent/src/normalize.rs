// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input normalization for identifiers captured from speech.
//!
//! Speech recognizers return caller ids as digit words ("one zero zero
//! one"); the lookup key is the digit string ("1001").

/// Digit words in replacement order.
const DIGIT_WORDS: &[(&str, &str)] = &[
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
];

/// Normalizes a spoken or typed caller id to a digit string.
///
/// Lowercases, strips whitespace, then maps digit words to digits, so
/// "one zero zero one", "1 0 0 1", and "1001" all normalize to "1001".
pub fn normalize_caller_id(raw: &str) -> String {
    let mut id: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    for (word, digit) in DIGIT_WORDS {
        id = id.replace(word, digit);
    }
    id
}

/// Strips whitespace from a spoken phone number.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Title-cases a spoken name: first letter of each word uppercased, the
/// rest lowercased.
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
