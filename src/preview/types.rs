//! Node and layout types for the preview surface.

use std::ops::Range;

/// Index of a node in the preview document's arena.
pub type NodeId = usize;

/// What a preview node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with a lowercased tag name.
    Element { tag: String },
    /// A text run with entities decoded.
    Text(String),
}

/// One node in the preview tree. Parent/child links are arena indices and
/// are only meaningful within the document instance that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    pub fn element(tag: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            kind: NodeKind::Element { tag: tag.into() },
        }
    }

    pub const fn text(content: String, parent: NodeId) -> Self {
        Self {
            parent: Some(parent),
            children: Vec::new(),
            kind: NodeKind::Text(content),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }
}

/// A clickable span on a rendered line: display-column range plus the text
/// node that produced it. Regions are the interaction listeners of the
/// preview; they are rebuilt whenever the document is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub cols: Range<usize>,
    pub node: NodeId,
}

/// One laid-out line of preview text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedLine {
    pub text: String,
    pub regions: Vec<HitRegion>,
}

/// Elements that interrupt the text flow (start a fresh rendered line).
pub(crate) const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "header",
    "hr",
    "html",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "title",
    "tr",
    "ul",
];

/// Elements that never have children and are not pushed on the open stack.
pub(crate) const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text until the matching close tag.
pub(crate) const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

pub(crate) fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

pub(crate) fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_TAGS.contains(&tag)
}
