//! Forgiving tag scanner for the preview surface.
//!
//! This is a rendering aid, not a conformant HTML5 parser: malformed input
//! never fails, it just degrades. Comments and doctypes are skipped, stray
//! close tags are ignored, raw-text elements (`script`/`style`) swallow
//! their content, and an unmatched `<` is treated as literal text.

use super::types::{is_raw_text, is_void, Node, NodeId};

/// Parse HTML source into a node arena. Index 0 is always the synthetic
/// `body` root; everything else hangs off it.
pub(crate) fn parse(source: &str) -> Vec<Node> {
    let mut nodes = vec![Node::element("body", None)];
    let mut stack: Vec<NodeId> = vec![0];
    let mut rest = source;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            push_text(&mut nodes, &stack, rest);
            break;
        };
        if lt > 0 {
            push_text(&mut nodes, &stack, &rest[..lt]);
        }
        rest = &rest[lt..];

        if rest.starts_with("<!--") {
            rest = rest.find("-->").map_or("", |j| &rest[j + 3..]);
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = rest.find('>').map_or("", |j| &rest[j + 1..]);
        } else if let Some(after) = rest.strip_prefix("</") {
            let (name, after_name) = read_tag_name(after);
            rest = after_name.find('>').map_or("", |j| &after_name[j + 1..]);
            close_tag(&nodes, &mut stack, &name.to_ascii_lowercase());
        } else if rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            let (name, after_name) = read_tag_name(&rest[1..]);
            let tag = name.to_ascii_lowercase();
            let (after_tag, self_closing) = skip_attributes(after_name);
            rest = after_tag;

            let parent = *stack.last().unwrap_or(&0);
            let id = append_node(&mut nodes, Node::element(tag.clone(), Some(parent)));

            if is_raw_text(&tag) {
                let (content, after_close) = take_raw_text(rest, &tag);
                if !content.is_empty() {
                    let text = Node::text(content.to_string(), id);
                    let text_id = nodes.len();
                    nodes.push(text);
                    nodes[id].children.push(text_id);
                }
                rest = after_close;
            } else if !self_closing && !is_void(&tag) {
                stack.push(id);
            }
        } else {
            // '<' that doesn't start a tag: literal text.
            push_text(&mut nodes, &stack, "<");
            rest = &rest[1..];
        }
    }

    nodes
}

fn append_node(nodes: &mut Vec<Node>, node: Node) -> NodeId {
    let id = nodes.len();
    let parent = node.parent;
    nodes.push(node);
    if let Some(p) = parent {
        nodes[p].children.push(id);
    }
    id
}

fn push_text(nodes: &mut Vec<Node>, stack: &[NodeId], raw: &str) {
    if raw.is_empty() {
        return;
    }
    let decoded = html_escape::decode_html_entities(raw).to_string();
    let parent = *stack.last().unwrap_or(&0);
    append_node(nodes, Node::text(decoded, parent));
}

/// Pop the open stack down through the nearest matching element. A close
/// tag with no matching open element is ignored; the root never pops.
fn close_tag(nodes: &[Node], stack: &mut Vec<NodeId>, tag: &str) {
    let found = stack
        .iter()
        .rposition(|&id| id != 0 && nodes[id].tag() == Some(tag));
    if let Some(depth) = found {
        stack.truncate(depth);
    }
}

/// Read a tag name: ASCII alphanumerics plus `-` and `:`.
fn read_tag_name(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// Skip to the closing `>` of a tag, honoring quoted attribute values.
/// Returns the remainder after `>` and whether the tag was self-closing.
fn skip_attributes(s: &str) -> (&str, bool) {
    let mut quote: Option<char> = None;
    let mut last_meaningful = ' ';
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => return (&s[i + 1..], last_meaningful == '/'),
                _ => {
                    if !c.is_whitespace() {
                        last_meaningful = c;
                    }
                }
            },
        }
    }
    ("", false)
}

/// Consume raw text up to (and past) the matching close tag.
fn take_raw_text<'a>(s: &'a str, tag: &str) -> (&'a str, &'a str) {
    let needle = format!("</{tag}");
    let lower = s.to_ascii_lowercase();
    match lower.find(&needle) {
        Some(i) => {
            let after = &s[i..];
            let skip = after.find('>').map_or(after.len(), |j| j + 1);
            (&s[..i], &after[skip..])
        }
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::NodeKind;
    use super::*;

    fn texts(nodes: &[Node]) -> Vec<&str> {
        nodes
            .iter()
            .filter_map(|n| match &n.kind {
                NodeKind::Text(t) => Some(t.as_str()),
                NodeKind::Element { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_source_is_just_the_root() {
        let nodes = parse("");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag(), Some("body"));
    }

    #[test]
    fn test_simple_element_with_text() {
        let nodes = parse("<p>hello</p>");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].tag(), Some("p"));
        assert_eq!(nodes[1].parent, Some(0));
        assert_eq!(nodes[2].kind, NodeKind::Text("hello".to_string()));
        assert_eq!(nodes[2].parent, Some(1));
    }

    #[test]
    fn test_nested_elements_track_parents() {
        let nodes = parse("<div><span>x</span></div>");
        let span = nodes.iter().position(|n| n.tag() == Some("span")).unwrap();
        let div = nodes.iter().position(|n| n.tag() == Some("div")).unwrap();
        assert_eq!(nodes[span].parent, Some(div));
    }

    #[test]
    fn test_tag_names_are_lowercased() {
        let nodes = parse("<DIV>x</DIV>");
        assert_eq!(nodes[1].tag(), Some("div"));
        // and the close tag matched despite the case difference
        assert_eq!(nodes[1].children.len(), 1);
    }

    #[test]
    fn test_entities_are_decoded() {
        let nodes = parse("<p>a &amp; b</p>");
        assert_eq!(texts(&nodes), vec!["a & b"]);
    }

    #[test]
    fn test_comments_and_doctype_are_skipped() {
        let nodes = parse("<!DOCTYPE html><!-- hi --><p>x</p>");
        assert_eq!(texts(&nodes), vec!["x"]);
        assert_eq!(nodes.iter().filter(|n| n.tag().is_some()).count(), 2); // body + p
    }

    #[test]
    fn test_void_element_does_not_swallow_siblings() {
        let nodes = parse("<img src=\"x.png\"><p>after</p>");
        let img = nodes.iter().position(|n| n.tag() == Some("img")).unwrap();
        let p = nodes.iter().position(|n| n.tag() == Some("p")).unwrap();
        assert!(nodes[img].children.is_empty());
        assert_eq!(nodes[p].parent, Some(0));
    }

    #[test]
    fn test_self_closing_tag() {
        let nodes = parse("<x-widget/><p>y</p>");
        let p = nodes.iter().position(|n| n.tag() == Some("p")).unwrap();
        assert_eq!(nodes[p].parent, Some(0));
    }

    #[test]
    fn test_quoted_gt_in_attribute_value() {
        let nodes = parse("<p title=\"a > b\">text</p>");
        assert_eq!(texts(&nodes), vec!["text"]);
    }

    #[test]
    fn test_stray_close_tag_is_ignored() {
        let nodes = parse("</div><p>x</p>");
        assert_eq!(texts(&nodes), vec!["x"]);
    }

    #[test]
    fn test_unclosed_tag_children_attach_to_it() {
        let nodes = parse("<div><p>dangling");
        let p = nodes.iter().position(|n| n.tag() == Some("p")).unwrap();
        let text = nodes.iter().position(|n| n.tag().is_none() && n.parent.is_some() && n.parent != Some(0)).unwrap();
        assert_eq!(nodes[text].parent, Some(p));
    }

    #[test]
    fn test_script_content_is_raw_text() {
        let nodes = parse("<script>if (a < b) { go(); }</script><p>x</p>");
        let script = nodes.iter().position(|n| n.tag() == Some("script")).unwrap();
        assert_eq!(nodes[script].children.len(), 1);
        assert!(texts(&nodes).contains(&"if (a < b) { go(); }"));
        assert!(texts(&nodes).contains(&"x"));
    }

    #[test]
    fn test_lone_lt_is_literal_text() {
        let nodes = parse("a < b");
        assert_eq!(texts(&nodes), vec!["a ", "<", " b"]);
    }

    #[test]
    fn test_unterminated_tag_consumes_rest() {
        let nodes = parse("<p>x<div");
        assert_eq!(texts(&nodes), vec!["x"]);
    }
}
