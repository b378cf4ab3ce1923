use crate::ir::InlineNode;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static RE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static RE_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static RE_ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

/// The span syntaxes, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanPattern {
    Link,
    Code,
    Bold,
    Italic,
}

const PRECEDENCE: [SpanPattern; 4] = [
    SpanPattern::Link,
    SpanPattern::Code,
    SpanPattern::Bold,
    SpanPattern::Italic,
];

impl SpanPattern {
    fn regex(self) -> &'static Regex {
        match self {
            SpanPattern::Link => &RE_LINK,
            SpanPattern::Code => &RE_CODE,
            SpanPattern::Bold => &RE_BOLD,
            SpanPattern::Italic => &RE_ITALIC,
        }
    }

    fn build(self, caps: &Captures<'_>) -> InlineNode {
        match self {
            SpanPattern::Link => InlineNode::link(&caps[1], &caps[2]),
            SpanPattern::Code => InlineNode::code(&caps[1]),
            SpanPattern::Bold => InlineNode::bold(&caps[1]),
            SpanPattern::Italic => InlineNode::italic(&caps[1]),
        }
    }
}

/// Escapes `&`, `<` and `>` for plain text runs.
pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Finds the leftmost span match in `rest`. Every pattern is searched on its
/// own; a later pattern only wins with a strictly smaller start offset.
fn earliest_match(rest: &str) -> Option<(SpanPattern, Captures<'_>)> {
    let mut best: Option<(SpanPattern, Captures<'_>)> = None;
    for pattern in PRECEDENCE {
        let Some(caps) = pattern.regex().captures(rest) else {
            continue;
        };
        let start = caps.get(0).map_or(usize::MAX, |m| m.start());
        let best_start = best
            .as_ref()
            .and_then(|(_, b)| b.get(0))
            .map_or(usize::MAX, |m| m.start());
        if start < best_start {
            best = Some((pattern, caps));
        }
    }
    best
}

/// Splits one line of inline content into typed nodes.
pub fn tokenize(line: &str) -> Vec<InlineNode> {
    let mut nodes = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        let Some((pattern, caps)) = earliest_match(rest) else {
            nodes.push(InlineNode::text(escape_text(rest)));
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        if whole.start() > 0 {
            nodes.push(InlineNode::text(escape_text(&rest[..whole.start()])));
        }
        nodes.push(pattern.build(&caps));
        rest = &rest[whole.end()..];
    }

    nodes
}
