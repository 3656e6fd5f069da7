//! Inline span tokenizer.
//!
//! Splits one line of text into styled [`Span`]s. Recognized markers, checked in
//! this order at every position:
//!
//! 1. `**bold**`
//! 2. `*italic*` (a single `*` not starting `**`)
//! 3. `` `code` ``
//! 4. `[text](url)`
//!
//! Every match takes the nearest closing marker. Marker contents are literal text;
//! nesting is not supported. An opening marker with no closing counterpart is
//! kept verbatim in the surrounding plain run.

use super::Span;
use memchr::{memchr, memmem};

/// Parse a line of inline Markdown into spans.
///
/// Always returns at least one span; the empty string yields a single empty
/// plain span.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    // Start of the pending plain run. Markers are ASCII, so every index the
    // scanner stops at is a char boundary.
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let matched = match bytes[i] {
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                match memmem::find(&bytes[i + 2..], b"**") {
                    Some(len) => Some((Span::bold(&text[i + 2..i + 2 + len]), len + 4)),
                    None => {
                        // Unterminated: the whole `**` stays literal.
                        i += 2;
                        continue;
                    },
                }
            },
            b'*' => memchr(b'*', &bytes[i + 1..])
                .map(|len| (Span::italic(&text[i + 1..i + 1 + len]), len + 2)),
            b'`' => memchr(b'`', &bytes[i + 1..])
                .map(|len| (Span::code(&text[i + 1..i + 1 + len]), len + 2)),
            b'[' => match_link(&text[i..]).map(|(label, url, len)| (Span::link(label, url), len)),
            _ => None,
        };

        match matched {
            Some((span, consumed)) => {
                flush_plain(&mut spans, &text[plain_start..i]);
                if !span.text.is_empty() {
                    spans.push(span);
                }
                i += consumed;
                plain_start = i;
            },
            None => i += 1,
        }
    }

    flush_plain(&mut spans, &text[plain_start..]);

    if spans.is_empty() {
        spans.push(Span::plain(text));
    }
    spans
}

fn flush_plain(spans: &mut Vec<Span>, run: &str) {
    if !run.is_empty() {
        spans.push(Span::plain(run));
    }
}

/// Match `[label](url)` at the start of `s`.
///
/// Both parts must be non-empty; the label ends at the first `]` and the URL at
/// the first `)`. Returns the label, the URL and the number of bytes consumed.
fn match_link(s: &str) -> Option<(&str, &str, usize)> {
    let bytes = s.as_bytes();
    let close_bracket = 1 + memchr(b']', &bytes[1..])?;
    if close_bracket == 1 || bytes.get(close_bracket + 1) != Some(&b'(') {
        return None;
    }
    let url_start = close_bracket + 2;
    let close_paren = url_start + memchr(b')', &bytes[url_start..])?;
    if close_paren == url_start {
        return None;
    }
    Some((
        &s[1..close_bracket],
        &s[url_start..close_paren],
        close_paren + 1,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn joined(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inline("just text"), vec![Span::plain("just text")]);
    }

    #[test]
    fn test_empty_input_yields_one_empty_span() {
        assert_eq!(parse_inline(""), vec![Span::plain("")]);
    }

    #[test]
    fn test_bold_between_plain_runs() {
        assert_eq!(
            parse_inline("Hello **world**."),
            vec![Span::plain("Hello "), Span::bold("world"), Span::plain(".")]
        );
    }

    #[test]
    fn test_all_markers() {
        let spans = parse_inline("a *i* `c` [t](https://x.io) **b**");
        assert_eq!(
            spans,
            vec![
                Span::plain("a "),
                Span::italic("i"),
                Span::plain(" "),
                Span::code("c"),
                Span::plain(" "),
                Span::link("t", "https://x.io"),
                Span::plain(" "),
                Span::bold("b"),
            ]
        );
    }

    #[test]
    fn test_unterminated_bold_is_literal() {
        assert_eq!(
            parse_inline("**unterminated"),
            vec![Span::plain("**unterminated")]
        );
    }

    #[test]
    fn test_unterminated_italic_and_code_are_literal() {
        assert_eq!(parse_inline("5 * 3"), vec![Span::plain("5 * 3")]);
        assert_eq!(parse_inline("a `b"), vec![Span::plain("a `b")]);
    }

    #[test]
    fn test_bold_takes_nearest_closing_marker() {
        assert_eq!(
            parse_inline("**a** and **b**"),
            vec![Span::bold("a"), Span::plain(" and "), Span::bold("b")]
        );
    }

    #[test]
    fn test_bold_content_is_not_nested() {
        assert_eq!(parse_inline("**a *b* c**"), vec![Span::bold("a *b* c")]);
    }

    #[test]
    fn test_malformed_links_are_literal() {
        assert_eq!(parse_inline("[]()"), vec![Span::plain("[]()")]);
        assert_eq!(parse_inline("[text] (url)"), vec![Span::plain("[text] (url)")]);
        assert_eq!(parse_inline("[text](url"), vec![Span::plain("[text](url")]);
    }

    #[test]
    fn test_multibyte_text_around_markers() {
        assert_eq!(
            parse_inline("中文**粗体**结尾"),
            vec![Span::plain("中文"), Span::bold("粗体"), Span::plain("结尾")]
        );
    }

    #[test]
    fn test_empty_markers_produce_no_span() {
        assert_eq!(parse_inline("a****b"), vec![Span::plain("a"), Span::plain("b")]);
    }

    proptest! {
        #[test]
        fn test_never_panics(s in "\\PC*") {
            let spans = parse_inline(&s);
            prop_assert!(!spans.is_empty());
        }

        #[test]
        fn test_markers_are_stripped(
            parts in proptest::collection::vec(("[a-z ]{1,8}", 0u8..5), 0..8)
        ) {
            let mut input = String::new();
            let mut expected = String::new();
            for (word, kind) in &parts {
                match kind {
                    0 => input.push_str(word),
                    1 => input.push_str(&format!("**{word}**")),
                    2 => input.push_str(&format!("*{word}*")),
                    3 => input.push_str(&format!("`{word}`")),
                    _ => input.push_str(&format!("[{word}](https://e.x/{})", word.len())),
                }
                expected.push_str(word);
            }
            prop_assert_eq!(joined(&parse_inline(&input)), expected);
        }
    }
}
