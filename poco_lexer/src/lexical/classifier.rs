//! Character classification for the Poco alphabet
//!
//! Classification runs an ordered predicate table and the first match wins.
//! The same table classifies single characters and two-character lookahead
//! pairs; for a pair the only way to come out as [`CharacterClass::Symbol`]
//! is to be one of [`COMPOUND_OPERATORS`].

use serde::Serialize;
use std::fmt;

/// Every symbol of the language, compound operators first
pub const SYMBOLS: [&str; 22] = [
    ">=", "<=", "!=", "==", "->", "+", "-", "/", "*", "%", "=", ">", "<", "!", "(", ")", "{",
    "}", "|", ",", "'", ".",
];

/// Two-character operators merged by lookahead
pub const COMPOUND_OPERATORS: [&str; 5] = [">=", "<=", "!=", "==", "->"];

/// Identifiers that become statement tokens (case-sensitive)
pub const RESERVED_WORDS: [&str; 7] = ["for", "while", "return", "if", "then", "else", "let"];

/// String literal delimiter
pub const QUOTE: char = '\'';

/// Class assigned to a character or lookahead pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharacterClass {
    Symbol,
    Number,
    Identifier,
    Whitespace,
    Unrecognized,
}

impl CharacterClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterClass::Symbol => "symbol",
            CharacterClass::Number => "number",
            CharacterClass::Identifier => "identifier",
            CharacterClass::Whitespace => "whitespace",
            CharacterClass::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Predicate = fn(&str) -> bool;

fn is_symbol(input: &str) -> bool {
    SYMBOLS.contains(&input)
}

fn is_number(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
}

fn is_identifier(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_alphabetic())
}

/// Separator characters skipped between tokens.
///
/// This is the ECMAScript `\s` set: ASCII whitespace plus the Unicode space
/// separators, the line and paragraph separators and the byte order mark.
/// NEL (U+0085) is not part of it, unlike `char::is_whitespace`.
pub fn is_whitespace_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{000B}' | '\u{000C}' | '\r' | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

// Vacuously true for the empty string
fn is_whitespace(input: &str) -> bool {
    input.chars().all(is_whitespace_char)
}

fn always(_: &str) -> bool {
    true
}

/// Priority order; Unrecognized must stay last
const CLASSIFICATION_ORDER: [(CharacterClass, Predicate); 5] = [
    (CharacterClass::Symbol, is_symbol),
    (CharacterClass::Number, is_number),
    (CharacterClass::Identifier, is_identifier),
    (CharacterClass::Whitespace, is_whitespace),
    (CharacterClass::Unrecognized, always),
];

/// Classify a character or lookahead string
pub fn classify(input: &str) -> CharacterClass {
    CLASSIFICATION_ORDER
        .iter()
        .find(|(_, matches)| matches(input))
        .map(|(class, _)| *class)
        .unwrap_or(CharacterClass::Unrecognized)
}

pub fn classify_char(ch: char) -> CharacterClass {
    let mut buf = [0u8; 4];
    classify(ch.encode_utf8(&mut buf))
}

/// Classify the pair `first` + `second`; `Symbol` means they merge
pub fn classify_pair(first: char, second: char) -> CharacterClass {
    let mut pair = String::with_capacity(first.len_utf8() + second.len_utf8());
    pair.push(first);
    pair.push(second);
    classify(&pair)
}

pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

pub fn is_compound_operator(text: &str) -> bool {
    COMPOUND_OPERATORS.contains(&text)
}
