use crate::inline::tokenize;
use crate::ir::{BlockNode, Spanned};
use crate::normalize;
use regex::Regex;
use std::sync::LazyLock;

static RE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```(.*)$").unwrap());
static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#+)\s+(.*)$").unwrap());
static RE_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.*)$").unwrap());

pub const MAX_HEADING_LEVEL: u8 = 4;

fn is_fence(line: &str) -> bool {
    RE_FENCE.is_match(line)
}

fn bullet_text(line: &str) -> Option<&str> {
    RE_BULLET
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Consumes a fenced code block starting at `start`. Returns the block and
/// the index of the first line after it.
fn code_block(lines: &[&str], start: usize, language: &str) -> (BlockNode, usize) {
    let mut i = start + 1;
    let mut body = Vec::new();
    while i < lines.len() && !is_fence(lines[i]) {
        body.push(lines[i].to_string());
        i += 1;
    }
    if i < lines.len() {
        // closing fence
        i += 1;
    } else {
        log::debug!("unterminated code fence opened on line {}", start + 1);
    }
    let block = BlockNode::CodeBlock {
        language: language.trim().to_string(),
        lines: body,
    };
    (block, i)
}

fn list_block(lines: &[&str], start: usize) -> (BlockNode, usize) {
    let mut i = start;
    let mut items = Vec::new();
    while let Some(text) = lines.get(i).and_then(|l| bullet_text(l)) {
        items.push(tokenize(text));
        i += 1;
    }
    (BlockNode::List { items }, i)
}

/// Classifies lines into blocks, keeping the source line range of each one.
pub fn segment_lines(lines: &[&str]) -> Vec<Spanned<BlockNode>> {
    let mut blocks: Vec<Spanned<BlockNode>> = Vec::new();
    let mut i = 0;
    let n = lines.len();

    while i < n {
        let line = lines[i];
        let start = i;

        let block = if let Some(caps) = RE_FENCE.captures(line) {
            let (block, next) = code_block(lines, i, &caps[1]);
            i = next;
            block
        } else if let Some(caps) = RE_HEADING.captures(line) {
            let marker = caps[1].len();
            let level = marker.min(MAX_HEADING_LEVEL as usize) as u8;
            i += 1;
            BlockNode::Heading {
                level,
                inline: tokenize(&caps[2]),
            }
        } else if bullet_text(line).is_some() {
            let (block, next) = list_block(lines, i);
            i = next;
            block
        } else if line.trim().is_empty() {
            i += 1;
            BlockNode::Spacer
        } else {
            i += 1;
            BlockNode::Paragraph {
                inline: tokenize(line),
            }
        };

        log::trace!("lines {}..{}: {:?}", start, i, block);
        blocks.push(Spanned {
            lines: start..i,
            node: block,
        });
    }

    blocks
}

/// Like [`segment`], but every block carries the line range it came from.
pub fn segment_spanned(text: &str) -> Vec<Spanned<BlockNode>> {
    let text = normalize::line_endings(text);
    let lines = normalize::split_lines(&text);
    segment_lines(&lines)
}

/// Splits Markdown text into an ordered sequence of blocks.
pub fn segment(text: &str) -> Vec<BlockNode> {
    segment_spanned(text)
        .into_iter()
        .map(Spanned::into_node)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::InlineNode;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn t(s: &str) -> InlineNode {
        InlineNode::text(s)
    }

    fn para(s: &str) -> BlockNode {
        BlockNode::Paragraph {
            inline: vec![t(s)],
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_end_to_end_example() {
        let blocks = segment("# Title\n\nSome *italic* and `code`.\n");
        assert_eq!(
            blocks,
            vec![
                BlockNode::Heading {
                    level: 1,
                    inline: vec![t("Title")],
                },
                BlockNode::Spacer,
                BlockNode::Paragraph {
                    inline: vec![
                        t("Some "),
                        InlineNode::italic("italic"),
                        t(" and "),
                        InlineNode::code("code"),
                        t("."),
                    ],
                },
            ]
        );
    }

    #[rstest]
    #[case("# H", 1)]
    #[case("## H", 2)]
    #[case("### H", 3)]
    #[case("#### H", 4)]
    #[case("##### H", 4)]
    #[case("######## H", 4)]
    #[case("##\tH", 2)]
    fn test_heading_levels(#[case] line: &str, #[case] level: u8) {
        assert_eq!(
            segment(line),
            vec![BlockNode::Heading {
                level,
                inline: vec![t("H")],
            }]
        );
    }

    #[rstest]
    #[case("#Title")]
    #[case("#")]
    #[case(" # indented")]
    fn test_not_a_heading(#[case] line: &str) {
        assert_eq!(segment(line), vec![para(line)]);
    }

    #[test]
    fn test_heading_with_empty_content() {
        assert_eq!(
            segment("#  "),
            vec![BlockNode::Heading {
                level: 1,
                inline: vec![],
            }]
        );
    }

    #[test]
    fn test_code_block() {
        let blocks = segment("before\n```bash\n# not a heading\n- not a list\n\n```\nafter");
        assert_eq!(
            blocks,
            vec![
                para("before"),
                BlockNode::CodeBlock {
                    language: "bash".to_string(),
                    lines: vec![
                        "# not a heading".to_string(),
                        "- not a list".to_string(),
                        String::new(),
                    ],
                },
                para("after"),
            ]
        );
    }

    #[test]
    fn test_code_block_language_trimmed() {
        let blocks = segment("```  powershell  \nwsl --install\n```");
        assert_eq!(
            blocks,
            vec![BlockNode::CodeBlock {
                language: "powershell".to_string(),
                lines: vec!["wsl --install".to_string()],
            }]
        );
    }

    #[test]
    fn test_code_block_keeps_raw_text() {
        let blocks = segment("```\n<b>&amp;</b>   \n```");
        assert_eq!(
            blocks,
            vec![BlockNode::CodeBlock {
                language: String::new(),
                lines: vec!["<b>&amp;</b>   ".to_string()],
            }]
        );
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let blocks = segment("intro\n```js\nlet a = 1;\n\n# still code");
        assert_eq!(
            blocks,
            vec![
                para("intro"),
                BlockNode::CodeBlock {
                    language: "js".to_string(),
                    lines: vec![
                        "let a = 1;".to_string(),
                        String::new(),
                        "# still code".to_string(),
                    ],
                },
            ]
        );
    }

    #[test]
    fn test_any_fence_line_closes() {
        let blocks = segment("```\na\n```python\nb");
        assert_eq!(
            blocks,
            vec![
                BlockNode::CodeBlock {
                    language: String::new(),
                    lines: vec!["a".to_string()],
                },
                para("b"),
            ]
        );
    }

    #[test]
    fn test_list_run() {
        let blocks = segment("- one\n* **two**\n  - three\nafter");
        assert_eq!(
            blocks,
            vec![
                BlockNode::List {
                    items: vec![
                        vec![t("one")],
                        vec![InlineNode::bold("two")],
                        vec![t("three")],
                    ],
                },
                para("after"),
            ]
        );
    }

    #[test]
    fn test_blank_line_splits_lists() {
        let blocks = segment("- a\n\n- b");
        assert_eq!(
            blocks,
            vec![
                BlockNode::List {
                    items: vec![vec![t("a")]],
                },
                BlockNode::Spacer,
                BlockNode::List {
                    items: vec![vec![t("b")]],
                },
            ]
        );
    }

    #[rstest]
    #[case("-no space")]
    #[case("*emphasis*")]
    #[case("---")]
    #[case("1. ordered")]
    fn test_not_a_list(#[case] line: &str) {
        assert!(matches!(
            segment(line).as_slice(),
            [BlockNode::Paragraph { .. }]
        ));
    }

    #[test]
    fn test_paragraphs_are_not_merged() {
        assert_eq!(
            segment("line one\nline two"),
            vec![para("line one"), para("line two")]
        );
    }

    #[test]
    fn test_whitespace_only_line_is_spacer() {
        assert_eq!(
            segment("a\n \t \nb"),
            vec![para("a"), BlockNode::Spacer, para("b")]
        );
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(
            segment("# A\r\n\r\n- b\r\n"),
            vec![
                BlockNode::Heading {
                    level: 1,
                    inline: vec![t("A")],
                },
                BlockNode::Spacer,
                BlockNode::List {
                    items: vec![vec![t("b")]],
                },
            ]
        );
    }

    #[test]
    fn test_line_spans() {
        let spans: Vec<_> = segment_spanned("# A\n```\nx\n```\n- a\n- b\n\ntext")
            .into_iter()
            .map(|s| s.lines)
            .collect();
        assert_eq!(spans, vec![0..1, 1..4, 4..6, 6..7, 7..8]);
    }

    #[test]
    fn test_unterminated_fence_span() {
        let spans: Vec<_> = segment_spanned("```\na\nb")
            .into_iter()
            .map(|s| s.lines)
            .collect();
        assert_eq!(spans, vec![0..3]);
    }
}
