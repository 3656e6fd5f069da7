//! Line-oriented block parser.
//!
//! The parser walks the input with a [`LineCursor`]. Single-line constructs are
//! recognized in place; multi-line runs (code fences, quotes, lists) are consumed
//! by `consume_*` helpers that return the parsed block together with the index of
//! the first line they did not consume. Every line is visited at most once, so
//! parsing is linear in the number of lines.

use super::inline::parse_inline;
use super::{Block, Span};

/// Parse a Markdown string into blocks.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    BlockParser::new(markdown).collect()
}

/// Streaming block parser yielding [`Block`]s in document order.
#[derive(Debug, Clone)]
pub struct BlockParser<'a> {
    cursor: LineCursor<'a>,
}

impl<'a> BlockParser<'a> {
    pub fn new(markdown: &'a str) -> Self {
        Self {
            cursor: LineCursor::new(markdown),
        }
    }
}

impl Iterator for BlockParser<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        self.cursor.skip_blank();
        let start = self.cursor.pos;
        let lines = self.cursor.lines.as_slice();
        let trimmed = lines.get(start)?.trim();

        let (block, next) = if let Some(language) = fence_open(trimmed) {
            consume_code_block(lines, start, language)
        } else if let Some(block) = heading(trimmed)
            .or_else(|| image(trimmed))
            .or_else(|| horizontal_rule(trimmed))
        {
            (block, start + 1)
        } else if quote_line(trimmed).is_some() {
            consume_quote(lines, start)
        } else if ordered_item(trimmed).is_some() {
            consume_list(lines, start, ordered_item, |items| Block::OrderedList { items })
        } else if bullet_item(trimmed).is_some() {
            consume_list(lines, start, bullet_item, |items| Block::List { items })
        } else {
            (
                Block::Paragraph {
                    spans: parse_inline(trimmed),
                },
                start + 1,
            )
        };

        self.cursor.seek(next);
        Some(block)
    }
}

/// Forward-only cursor over the input lines.
#[derive(Debug, Clone)]
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    fn skip_blank(&mut self) {
        while self
            .lines
            .get(self.pos)
            .is_some_and(|line| line.trim().is_empty())
        {
            self.pos += 1;
        }
    }

    /// Move to `pos`; never moves backwards.
    fn seek(&mut self, pos: usize) {
        debug_assert!(pos > self.pos, "block parser must make progress");
        self.pos = pos.max(self.pos + 1);
    }
}

/// Consume a fenced code block opened at `start`.
///
/// Lines are kept verbatim up to a closing fence; an unterminated fence runs to
/// the end of the input.
fn consume_code_block(lines: &[&str], start: usize, language: Option<&str>) -> (Block, usize) {
    let mut code = Vec::new();
    let mut i = start + 1;
    while let Some(line) = lines.get(i) {
        i += 1;
        if line.trim() == "```" {
            break;
        }
        code.push((*line).to_string());
    }
    (
        Block::CodeBlock {
            language: language.map(str::to_string),
            lines: code,
        },
        i,
    )
}

/// Consume consecutive `> text` lines into one quote, joined with single spaces.
fn consume_quote(lines: &[&str], start: usize) -> (Block, usize) {
    let (parts, next) = take_run(lines, start, quote_line);
    (
        Block::BlockQuote {
            spans: parse_inline(&parts.join(" ")),
        },
        next,
    )
}

fn consume_list(
    lines: &[&str],
    start: usize,
    item: fn(&str) -> Option<&str>,
    build: fn(Vec<Vec<Span>>) -> Block,
) -> (Block, usize) {
    let (texts, next) = take_run(lines, start, item);
    (build(texts.into_iter().map(parse_inline).collect()), next)
}

/// Collect the payloads of consecutive lines accepted by `matcher`.
fn take_run<'a>(
    lines: &[&'a str],
    start: usize,
    matcher: fn(&'a str) -> Option<&'a str>,
) -> (Vec<&'a str>, usize) {
    let payloads: Vec<&'a str> = lines[start..]
        .iter()
        .map_while(|line| matcher(line.trim()))
        .collect();
    let next = start + payloads.len();
    (payloads, next)
}

/// `` ``` `` or `` ```lang `` where `lang` is `[A-Za-z0-9_-]+`.
fn fence_open(line: &str) -> Option<Option<&str>> {
    let info = line.strip_prefix("```")?;
    if info.is_empty() {
        return Some(None);
    }
    info.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        .then_some(Some(info))
}

fn heading(line: &str) -> Option<Block> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim_start();
    (!text.is_empty()).then(|| Block::Heading {
        level: level as u8,
        text: text.to_string(),
    })
}

/// A line consisting solely of `![alt](url)`.
fn image(line: &str) -> Option<Block> {
    let inner = line.strip_prefix("![")?.strip_suffix(')')?;
    let (alt, url) = inner.split_once("](")?;
    if alt.contains(']') || url.contains(')') || url.trim().is_empty() {
        return None;
    }
    Some(Block::Image {
        alt_text: alt.to_string(),
        url: url.trim().to_string(),
    })
}

fn horizontal_rule(line: &str) -> Option<Block> {
    (line.len() >= 3 && line.bytes().all(|b| b == b'-' || b == b'*'))
        .then_some(Block::HorizontalRule)
}

/// Payload of a marker line: `marker`, at least one whitespace, then text.
fn after_marker(rest: &str) -> Option<&str> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim_start();
    (!text.is_empty()).then_some(text)
}

fn quote_line(line: &str) -> Option<&str> {
    after_marker(line.strip_prefix('>')?)
}

fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    after_marker(line[digits..].strip_prefix('.')?)
}

fn bullet_item(line: &str) -> Option<&str> {
    after_marker(line.strip_prefix(['-', '*'])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[Vec<Span>]) -> Vec<String> {
        items
            .iter()
            .map(|spans| spans.iter().map(|s| s.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let blocks = parse_blocks("# Title\n\nHello **world**.\n\n- a\n- b\n");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".into()
                },
                Block::Paragraph {
                    spans: vec![Span::plain("Hello "), Span::bold("world"), Span::plain(".")]
                },
                Block::List {
                    items: vec![vec![Span::plain("a")], vec![Span::plain("b")]]
                },
            ]
        );
    }

    #[test]
    fn test_list_run_becomes_one_block() {
        let md = (1..=5).map(|n| format!("- item {n}\n")).collect::<String>();
        let blocks = parse_blocks(&md);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::List { items } => {
                let expected: Vec<String> = (1..=5).map(|n| format!("item {n}")).collect();
                assert_eq!(texts(items), expected);
            },
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_ordered_and_unordered_runs_split() {
        let blocks = parse_blocks("1. one\n2. two\n* star\n- dash\n");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::OrderedList { items } if items.len() == 2));
        assert!(matches!(&blocks[1], Block::List { items } if items.len() == 2));
    }

    #[test]
    fn test_blank_line_ends_list_run() {
        let blocks = parse_blocks("- a\n\n- b\n");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_fenced_code_with_language() {
        let blocks = parse_blocks("```rust\nfn main() {\n\n    let x = 1;\n```\nafter\n");
        assert_eq!(
            blocks[0],
            Block::CodeBlock {
                language: Some("rust".into()),
                lines: vec!["fn main() {".into(), "".into(), "    let x = 1;".into()],
            }
        );
        assert_eq!(
            blocks[1],
            Block::Paragraph {
                spans: vec![Span::plain("after")]
            }
        );
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let blocks = parse_blocks("```\n# not a heading\n- nor a list");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: None,
                lines: vec!["# not a heading".into(), "- nor a list".into()],
            }]
        );
    }

    #[test]
    fn test_fence_with_invalid_info_is_paragraph() {
        let blocks = parse_blocks("```rust code\n");
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_headings() {
        let blocks = parse_blocks("###### six\n####### seven\n#nospace\n");
        assert_eq!(
            blocks[0],
            Block::Heading {
                level: 6,
                text: "six".into()
            }
        );
        assert!(matches!(blocks[1], Block::Paragraph { .. }));
        assert!(matches!(blocks[2], Block::Paragraph { .. }));
    }

    #[test]
    fn test_heading_text_is_not_inline_parsed() {
        let blocks = parse_blocks("## A **bold** title");
        assert_eq!(
            blocks[0],
            Block::Heading {
                level: 2,
                text: "A **bold** title".into()
            }
        );
    }

    #[test]
    fn test_full_line_image() {
        let blocks = parse_blocks("  ![A cat](https://example.com/cat.png)  \n");
        assert_eq!(
            blocks[0],
            Block::Image {
                alt_text: "A cat".into(),
                url: "https://example.com/cat.png".into(),
            }
        );
    }

    #[test]
    fn test_image_inside_text_is_paragraph() {
        let blocks = parse_blocks("see ![x](https://example.com/x.png) here");
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_horizontal_rules() {
        let blocks = parse_blocks("---\n***\n-*-\n--\n");
        assert!(blocks[..3].iter().all(|b| *b == Block::HorizontalRule));
        assert!(matches!(blocks[3], Block::Paragraph { .. }));
    }

    #[test]
    fn test_quote_lines_are_joined_with_space() {
        let blocks = parse_blocks("> first line\n> second *line*\nplain\n");
        assert_eq!(
            blocks[0],
            Block::BlockQuote {
                spans: vec![Span::plain("first line second "), Span::italic("line")]
            }
        );
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_crlf_input() {
        let blocks = parse_blocks("# T\r\n\r\n- a\r\n- b\r\n");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[1], Block::List { items } if texts(items) == ["a", "b"]));
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse_blocks("").is_empty());
        assert!(parse_blocks("\n  \n\t\n").is_empty());
    }
}
