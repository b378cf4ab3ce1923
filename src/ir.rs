use serde::Serialize;
use std::ops::Range;

/// A structural unit of a document, occupying one or more whole lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockNode {
    /// Lines between a fence and its closing fence (or end of input), verbatim.
    CodeBlock { language: String, lines: Vec<String> },
    /// `level` is always in `1..=4`.
    Heading { level: u8, inline: Vec<InlineNode> },
    /// One entry per contiguous bullet line.
    List { items: Vec<Vec<InlineNode>> },
    Paragraph { inline: Vec<InlineNode> },
    /// A blank or whitespace-only line.
    Spacer,
}

/// A span-level unit of text within a block.
///
/// Only `Text` is escaped; the other variants carry the raw captured text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineNode {
    Text { value: String },
    Link { label: String, href: String },
    CodeSpan { value: String },
    Bold { value: String },
    Italic { value: String },
}

impl InlineNode {
    pub fn text(value: impl Into<String>) -> Self {
        InlineNode::Text {
            value: value.into(),
        }
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        InlineNode::Link {
            label: label.into(),
            href: href.into(),
        }
    }

    pub fn code(value: impl Into<String>) -> Self {
        InlineNode::CodeSpan {
            value: value.into(),
        }
    }

    pub fn bold(value: impl Into<String>) -> Self {
        InlineNode::Bold {
            value: value.into(),
        }
    }

    pub fn italic(value: impl Into<String>) -> Self {
        InlineNode::Italic {
            value: value.into(),
        }
    }
}

/// A node together with the normalized source lines it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spanned<T> {
    pub lines: Range<usize>,
    pub node: T,
}

impl<T> Spanned<T> {
    pub fn into_node(self) -> T {
        self.node
    }
}
