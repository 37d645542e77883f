//! Character classes used by the lexer.
//!
//! Every predicate is a pure function of one code point.

/// Accented vowels accepted as letters in addition to ASCII `a-z`/`A-Z`.
const EXTENDED_LETTERS: &[char] = &[
    'á', 'é', 'í', 'ó', 'ú', 'à', 'è', 'ì', 'ò', 'ù', 'ä', 'ë', 'ï', 'ö', 'ü',
    'Á', 'É', 'Í', 'Ó', 'Ú', 'À', 'È', 'Ì', 'Ò', 'Ù', 'Ä', 'Ë', 'Ï', 'Ö', 'Ü',
];

/// CR, LF and the Unicode line/paragraph separators.
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace that never ends a line.
pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\u{000B}' // vertical tab
            | '\u{000C}' // form feed
            | '\u{00A0}' // no-break space
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}' // byte order mark
    )
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || EXTENDED_LETTERS.contains(&c)
}

pub fn is_identifier_start(c: char) -> bool {
    is_letter(c)
}

pub fn is_identifier_part(c: char) -> bool {
    is_letter(c) || is_digit(c) || c == '_'
}

/// True when the lexer would read all of `word` as one identifier run.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_part)
}
