//! Normalization of raw field values.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Punctuation kept by [`clean_text`] besides letters, digits and spaces.
const KEPT_PUNCTUATION: &[char] = &['@', '.', ',', '-', '/', '(', ')', ':'];

/// Clean a raw field value.
///
/// 1. Collapse whitespace runs to one space and trim.
/// 2. Drop characters other than alphanumerics, whitespace and `@ . , - / ( ) :`.
/// 3. At the start of a word, read a `0` followed by a digit as `O` and a `1`
///    followed by a digit as `I`. This targets a scanning artifact of the PCFC
///    forms and is lossy for numbers that legitimately start with 0 or 1.
pub fn clean_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");

    let kept: String = collapsed
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || KEPT_PUNCTUATION.contains(c))
        .collect();

    let corrected = replace_leading_digit(&kept, '0', 'O');
    let corrected = replace_leading_digit(&corrected, '1', 'I');

    corrected.trim().to_string()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replace `digit` with `letter` where it starts a word and another digit follows.
fn replace_leading_digit(text: &str, digit: char, letter: char) -> String {
    let chars: Vec<char> = text.chars().collect();

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let starts_word = i == 0 || !is_word_char(chars[i - 1]);
            let digit_follows = chars.get(i + 1).is_some_and(|next| next.is_ascii_digit());
            if c == digit && starts_word && digit_follows {
                letter
            } else {
                c
            }
        })
        .collect()
}
