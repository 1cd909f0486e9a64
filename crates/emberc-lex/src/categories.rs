//! Category matchers (§4.1).
//!
//! Every matcher is anchored at the start of `rest` and returns the byte
//! length of its match, *not* including any trailing whitespace — that is
//! attached once, uniformly, by the caller in `lib.rs`.

use crate::unicode::{blocks_decimal_continuation, is_identifier_char};

const KEYWORDS: &[&str] = &[
    "let", "if", "else", "map", "over", "unreachable", "return", "type",
];
const MODIFIERS: &[&str] = &["public", "internal"];

/// Match one literal word from `words`, provided it is not itself the
/// prefix of a longer identifier run (the negative lookahead common to
/// Boolean, Poison, Keyword, and Modifier in the §4.1 table).
fn match_word(rest: &str, words: &[&str]) -> Option<usize> {
    for word in words {
        if let Some(tail) = rest.strip_prefix(word) {
            let blocked = tail.chars().next().is_some_and(is_identifier_char);
            if !blocked {
                return Some(word.len());
            }
        }
    }
    None
}

pub fn match_integer(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices().peekable();
    let mut len = 0;
    if let Some(&(_, '-')) = chars.peek() {
        len += 1;
        chars.next();
    }
    let digits_start = len;
    for (i, ch) in chars {
        if ch.is_ascii_digit() {
            len = i + ch.len_utf8();
        } else {
            break;
        }
    }
    if len == digits_start {
        return None;
    }
    let blocked = rest[len..].chars().next().is_some_and(is_identifier_char);
    if blocked {
        None
    } else {
        Some(len)
    }
}

pub fn match_decimal(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    let start_digits = i;

    let int_part_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let has_int_part = i > int_part_start;

    if i >= bytes.len() || bytes[i] != b'.' {
        return None;
    }
    let dot_pos = i;
    i += 1;

    let frac_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let has_frac_part = i > frac_start;

    // Must be `\d+\.\d*` or `\.\d+` — at least one side must have digits,
    // and a bare `-` followed only by `.` with no digits anywhere is not a
    // match.
    if !has_int_part && !has_frac_part {
        return None;
    }
    if !has_int_part && dot_pos != start_digits {
        return None;
    }
    let _ = start_digits;

    let blocked = rest[i..]
        .chars()
        .next()
        .is_some_and(blocks_decimal_continuation);
    if blocked {
        None
    } else {
        Some(i)
    }
}

pub fn match_identifier(rest: &str) -> Option<usize> {
    if let Some(after_tick) = rest.strip_prefix('`') {
        let end = after_tick.find('`')?;
        if end == 0 {
            return None;
        }
        return Some(1 + end + 1);
    }

    let mut len = 0;
    for ch in rest.chars() {
        if is_identifier_char(ch) {
            len += ch.len_utf8();
        } else {
            break;
        }
    }
    if len == 0 {
        None
    } else {
        Some(len)
    }
}

pub fn match_character(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices();
    let (_, first) = chars.next()?;
    if first != '\'' {
        return None;
    }
    let (i, ch) = chars.next()?;
    let after_body = if ch == '\\' {
        let (j, escaped) = chars.next()?;
        j + escaped.len_utf8()
    } else if ch == '\'' {
        return None;
    } else {
        i + ch.len_utf8()
    };
    if rest[after_body..].chars().next() == Some('\'') {
        Some(after_body + 1)
    } else {
        None
    }
}

pub fn match_string(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices();
    let (_, first) = chars.next()?;
    if first != '"' {
        return None;
    }
    let mut iter = rest.char_indices().skip(1);
    while let Some((i, ch)) = iter.next() {
        match ch {
            '"' => return Some(i + 1),
            '\\' => {
                iter.next()?;
            }
            _ => {}
        }
    }
    None
}

pub fn match_boolean(rest: &str) -> Option<usize> {
    match_word(rest, &["true", "false"])
}

pub fn match_poison(rest: &str) -> Option<usize> {
    match_word(rest, &["poison"])
}

pub fn match_keyword(rest: &str) -> Option<usize> {
    match_word(rest, KEYWORDS)
}

pub fn match_modifier(rest: &str) -> Option<usize> {
    match_word(rest, MODIFIERS)
}

pub fn match_single(rest: &str, options: &[char]) -> Option<usize> {
    let ch = rest.chars().next()?;
    if options.contains(&ch) {
        Some(ch.len_utf8())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_matches_negative_and_positive() {
        assert_eq!(match_integer("42;"), Some(2));
        assert_eq!(match_integer("-7 "), Some(2));
        assert_eq!(match_integer("abc"), None);
    }

    #[test]
    fn integer_rejects_identifier_continuation() {
        assert_eq!(match_integer("42x"), None);
    }

    #[test]
    fn decimal_matches_both_forms() {
        assert_eq!(match_decimal("3.14,"), Some(4));
        assert_eq!(match_decimal(".5)"), Some(2));
        assert_eq!(match_decimal("5."), Some(2));
    }

    #[test]
    fn decimal_allows_trailing_dot_continuation() {
        // "3.14." — decimal match stops before the second dot, which does
        // not block the match per the carve-out in §4.1.
        assert_eq!(match_decimal("3.14."), Some(4));
    }

    #[test]
    fn identifier_matches_backtick_quoted() {
        assert_eq!(match_identifier("`let`"), Some(5));
    }

    #[test]
    fn identifier_matches_bare_run() {
        assert_eq!(match_identifier("varname(x)"), Some(7));
    }

    #[test]
    fn character_literal_handles_escape() {
        assert_eq!(match_character(r"'\n' "), Some(4));
        assert_eq!(match_character("'a' "), Some(3));
    }

    #[test]
    fn string_literal_handles_escape() {
        assert_eq!(match_string(r#""a\"b" "#), Some(6));
    }

    #[test]
    fn boolean_and_poison_words() {
        assert_eq!(match_boolean("true)"), Some(4));
        assert_eq!(match_boolean("truex"), None);
        assert_eq!(match_poison("poison;"), Some(6));
    }

    #[test]
    fn keyword_and_modifier_words() {
        assert_eq!(match_keyword("let x"), Some(3));
        assert_eq!(match_keyword("letter"), None);
        assert_eq!(match_modifier("public "), Some(6));
    }
}
