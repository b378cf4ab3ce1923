pub mod blocks;
pub mod config;
pub mod emit;
pub mod inline;
pub mod ir;
pub mod normalize;

use ir::{BlockNode, Spanned};
use std::io;
use std::path::PathBuf;
use std::sync::LazyLock;

pub use blocks::{segment, segment_spanned};
pub use inline::tokenize;

static RE_MARKDOWN_EXT: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)\.(md|markdown)$").unwrap());

/// Compiles one documentation page into its block tree.
pub fn compile(text: &str) -> Vec<BlockNode> {
    let blocks = segment(text);
    log::debug!("compiled {} bytes into {} blocks", text.len(), blocks.len());
    blocks
}

pub fn compile_spanned(text: &str) -> Vec<Spanned<BlockNode>> {
    let blocks = segment_spanned(text);
    log::debug!("compiled {} bytes into {} blocks", text.len(), blocks.len());
    blocks
}

pub fn render_html(text: &str) -> String {
    emit::emit_html(&compile(text))
}

pub fn list_files(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = Vec::new();

    for p in inputs {
        if p.is_dir() {
            for entry in std::fs::read_dir(p)? {
                let sub_path = entry?.path();
                if sub_path.is_dir() {
                    out.extend(list_files(&[sub_path])?);
                } else if sub_path.is_file() && is_markdown(&sub_path) {
                    out.push(sub_path);
                }
            }
        } else if p.is_file() && is_markdown(p) {
            out.push(p.clone());
        }
    }

    out.sort();
    Ok(out)
}

fn is_markdown(path: &std::path::Path) -> bool {
    path.to_str().is_some_and(|s| RE_MARKDOWN_EXT.is_match(s))
}
