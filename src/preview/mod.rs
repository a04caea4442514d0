//! The preview surface: a rendered, disposable representation of the
//! buffer's HTML.
//!
//! A [`PreviewDocument`] has no persistent identity across updates. Each
//! sync cycle opens a fresh document, writes the full buffer content into
//! it, and closes it; closing parses the source into a node arena and lays
//! it out as text lines. The previous document is discarded wholesale,
//! nodes and hit regions included, so interaction regions can only ever
//! point into the document that produced them.

mod parser;
mod types;

pub use types::{HitRegion, Node, NodeId, NodeKind, RenderedLine};

use types::is_block;
use unicode_width::UnicodeWidthStr;

/// A sandboxed, rebuilt-from-scratch rendering of an HTML string.
#[derive(Debug, Default)]
pub struct PreviewDocument {
    source: String,
    nodes: Vec<Node>,
    lines: Vec<RenderedLine>,
}

impl PreviewDocument {
    /// Start a new, empty document.
    pub fn open() -> Self {
        Self::default()
    }

    /// Append source content. Only takes effect at [`close`](Self::close).
    pub fn write(&mut self, chunk: &str) {
        self.source.push_str(chunk);
    }

    /// Parse the written source and lay it out. Rendering and region
    /// construction both happen here; until close, the document has no
    /// body and all interactions are no-ops.
    pub fn close(&mut self) {
        self.nodes = parser::parse(&self.source);
        self.lines = layout(&self.nodes);
    }

    /// Convenience: open/write/close in one step.
    pub fn from_html(html: &str) -> Self {
        let mut doc = Self::open();
        doc.write(html);
        doc.close();
        doc
    }

    /// Whether the document has any rendered content.
    pub fn has_body(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    pub fn line_text(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|l| l.text.as_str())
    }

    /// Resolve a rendered-line position to the text node shown there.
    ///
    /// A click between regions on a populated line falls back to the first
    /// region (the nearest text on that line). Empty lines and rows outside
    /// the document resolve to nothing.
    pub fn node_at(&self, row: usize, col: usize) -> Option<NodeId> {
        let line = self.lines.get(row)?;
        line.regions
            .iter()
            .find(|r| r.cols.contains(&col))
            .or_else(|| line.regions.first())
            .map(|r| r.node)
    }

    /// Concatenated descendant text of a node, document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut pending = vec![id];
        while let Some(cur) = pending.pop() {
            let Some(node) = self.nodes.get(cur) else {
                continue;
            };
            match &node.kind {
                NodeKind::Text(t) => out.push_str(t),
                NodeKind::Element { .. } => {
                    pending.extend(node.children.iter().rev().copied());
                }
            }
        }
        out
    }

    /// Walk from `from` up the parent chain to the node whose text should
    /// anchor a reverse mapping:
    /// - a text node with non-whitespace content wins outright;
    /// - an element with non-whitespace text content yields its first
    ///   child if it has one, else itself;
    /// - otherwise continue with the parent.
    ///
    /// Returns `None` when the walk exhausts the chain without finding
    /// qualifying text.
    pub fn qualifying_text_target(&self, from: NodeId) -> Option<NodeId> {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            match &node.kind {
                NodeKind::Text(t) if !t.trim().is_empty() => return Some(id),
                NodeKind::Element { .. } if !self.text_content(id).trim().is_empty() => {
                    return Some(node.children.first().copied().unwrap_or(id));
                }
                _ => {}
            }
            current = node.parent;
        }
        None
    }
}

/// Flow the node tree into rendered lines. Block elements flush the
/// current line; text nodes append with collapsed whitespace and record
/// their hit region.
fn layout(nodes: &[Node]) -> Vec<RenderedLine> {
    let mut lines = Vec::new();
    let mut current = RenderedLine::default();
    flow(nodes, 0, &mut lines, &mut current);
    flush(&mut lines, &mut current);
    lines
}

fn flow(nodes: &[Node], id: NodeId, lines: &mut Vec<RenderedLine>, current: &mut RenderedLine) {
    match &nodes[id].kind {
        NodeKind::Text(raw) => {
            let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return;
            }
            if !current.text.is_empty() && !current.text.ends_with(' ') {
                current.text.push(' ');
            }
            let start = current.text.width();
            let end = start + text.width();
            current.text.push_str(&text);
            current.regions.push(HitRegion {
                cols: start..end,
                node: id,
            });
        }
        NodeKind::Element { tag } => {
            let block = is_block(tag);
            if block {
                flush(lines, current);
            }
            for &child in &nodes[id].children {
                flow(nodes, child, lines, current);
            }
            if block {
                flush(lines, current);
            }
        }
    }
}

fn flush(lines: &mut Vec<RenderedLine>, current: &mut RenderedLine) {
    if !current.text.is_empty() {
        lines.push(std::mem::take(current));
    }
}
