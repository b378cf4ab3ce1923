use crate::ir::{BlockNode, InlineNode};
use html_escape::{encode_double_quoted_attribute, encode_text};

fn emit_inline(nodes: &[InlineNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            // Already escaped by the tokenizer.
            InlineNode::Text { value } => out.push_str(value),
            InlineNode::Link { label, href } => {
                out.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{}</a>",
                    encode_double_quoted_attribute(href),
                    encode_text(label)
                ));
            }
            InlineNode::CodeSpan { value } => {
                out.push_str(&format!("<code>{}</code>", encode_text(value)));
            }
            InlineNode::Bold { value } => {
                out.push_str(&format!("<strong>{}</strong>", encode_text(value)));
            }
            InlineNode::Italic { value } => {
                out.push_str(&format!("<em>{}</em>", encode_text(value)));
            }
        }
    }
    out
}

fn emit_block(block: &BlockNode) -> String {
    match block {
        BlockNode::CodeBlock { language, lines } => {
            let class = if language.is_empty() {
                String::new()
            } else {
                format!(
                    " class=\"language-{}\"",
                    encode_double_quoted_attribute(language)
                )
            };
            format!(
                "<pre><code{}>{}</code></pre>",
                class,
                encode_text(&lines.join("\n"))
            )
        }
        BlockNode::Heading { level, inline } => {
            format!("<h{0}>{1}</h{0}>", level, emit_inline(inline))
        }
        BlockNode::List { items } => {
            let mut out = String::from("<ul>");
            for item in items {
                out.push_str("<li>");
                out.push_str(&emit_inline(item));
                out.push_str("</li>");
            }
            out.push_str("</ul>");
            out
        }
        BlockNode::Paragraph { inline } => format!("<p>{}</p>", emit_inline(inline)),
        BlockNode::Spacer => "<div class=\"spacer\"></div>".to_string(),
    }
}

/// Renders a block tree as an HTML `<article>`, one block per line.
pub fn emit_html(blocks: &[BlockNode]) -> String {
    let mut lines = vec!["<article class=\"doc\">".to_string()];
    lines.extend(blocks.iter().map(emit_block));
    lines.push("</article>".to_string());
    let mut result = lines.join("\n");
    result.push('\n');
    result
}
