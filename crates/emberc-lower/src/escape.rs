//! Escape-sequence decoding for `Character`/`String` literals (§6).
//!
//! The lexer only identifies a literal's extents; it never inspects the
//! body. Decoding happens here, lazily, only when a `Character` or `String`
//! leaf is actually lowered into a `Literal`.

use emberc_util::{Handler, Span};

/// Decode the escape pairs listed in §6 within `body` (the literal's text
/// with its surrounding quotes already stripped). An unrecognised `\x`
/// keeps `x` verbatim and emits a warning through `handler`, per §6 ("should
/// emit a diagnostic") rather than failing the lower outright.
pub fn decode_escapes(body: &str, span: Span, handler: &Handler) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('\u{0022}'),
            Some('\'') => out.push('\u{0027}'),
            Some('b') => out.push('\u{0008}'),
            Some('n') => out.push('\u{000A}'),
            Some('r') => out.push('\u{000D}'),
            Some('t') => out.push('\u{0009}'),
            Some('\\') => out.push('\u{005C}'),
            Some(other) => {
                handler.warning(format!("unknown escape sequence `\\{other}`"), span);
                out.push(other);
            }
            None => {
                handler.warning("dangling escape at end of literal", span);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberc_util::Span;

    #[test]
    fn recognised_pairs_decode_to_their_control_characters() {
        let handler = Handler::new();
        assert_eq!(decode_escapes(r"a\nb", Span::DUMMY, &handler), "a\nb");
        assert_eq!(decode_escapes(r#"\"quoted\""#, Span::DUMMY, &handler), "\"quoted\"");
        assert!(!handler.has_errors());
    }

    #[test]
    fn unknown_escape_keeps_the_character_and_warns() {
        let handler = Handler::new();
        let decoded = decode_escapes(r"\qfoo", Span::DUMMY, &handler);
        assert_eq!(decoded, "qfoo");
        assert_eq!(handler.take().len(), 1);
    }

    #[test]
    fn plain_text_passes_through_unchanged() {
        let handler = Handler::new();
        assert_eq!(decode_escapes("plain", Span::DUMMY, &handler), "plain");
    }
}
