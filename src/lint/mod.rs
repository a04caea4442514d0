//! Static HTML checks that feed the editor's validation markers.
//!
//! The linter is a self-contained rule pass over the raw source text. It
//! never consults the preview document; rendering stays best-effort even
//! when the source fails every rule here. Findings carry a 1-based line
//! number because that is what the marker heuristic keys on.

use std::sync::LazyLock;

use regex::Regex;

/// One finding from a lint pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintMessage {
    /// 1-based line of the offending tag or attribute.
    pub line: usize,
    pub message: String,
    /// Stable rule identifier.
    pub rule: &'static str,
}

pub const RULE_TAGNAME_LOWERCASE: &str = "tagname-lowercase";
pub const RULE_ATTR_VALUE_DOUBLE_QUOTES: &str = "attr-value-double-quotes";
pub const RULE_TAG_PAIR: &str = "tag-pair";
pub const RULE_ID_UNIQUE: &str = "id-unique";

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    // Open or close tag; attribute section tolerates quoted '>'.
    Regex::new(r#"(?s)<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:"[^"]*"|'[^']*'|[^>"'])*)>"#)
        .unwrap()
});

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z][A-Za-z0-9_:-]*)\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
});

static COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?(?:-->|\z)").unwrap()
});

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Runs every rule over an HTML string.
#[derive(Debug, Default)]
pub struct Linter;

impl Linter {
    pub fn new() -> Self {
        Self
    }

    /// Lint `html` and return findings ordered by line.
    pub fn verify(&self, html: &str) -> Vec<LintMessage> {
        let line_starts = line_starts(html);
        let line_of = |offset: usize| match line_starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        };

        // Blank out comments so their content cannot look like tags, while
        // keeping every offset stable.
        let masked = mask_comments(html);

        let mut findings: Vec<(usize, LintMessage)> = Vec::new();
        let mut open_stack: Vec<(String, usize)> = Vec::new();
        let mut seen_ids: Vec<String> = Vec::new();

        for caps in TAG.captures_iter(&masked) {
            let whole = caps.get(0).map_or(0, |m| m.start());
            let closing = caps.get(1).is_some_and(|m| !m.is_empty());
            let name = &caps[2];
            let attrs = caps.get(3).map_or("", |m| m.as_str());
            let lower = name.to_ascii_lowercase();

            if name != lower {
                findings.push((
                    whole,
                    LintMessage {
                        line: line_of(whole),
                        message: format!(
                            "The html element name of [ {name} ] must be in lowercase."
                        ),
                        rule: RULE_TAGNAME_LOWERCASE,
                    },
                ));
            }

            if closing {
                self.check_close(&lower, whole, &mut open_stack, &line_of, &mut findings);
                continue;
            }

            self.check_attrs(attrs, whole, &line_of, &mut seen_ids, &mut findings);

            let self_closing = attrs.trim_end().ends_with('/');
            if !self_closing && !VOID_TAGS.contains(&lower.as_str()) {
                open_stack.push((lower, whole));
            }
        }

        // Anything still open never got its close tag.
        for (tag, offset) in open_stack {
            findings.push((
                offset,
                LintMessage {
                    line: line_of(offset),
                    message: format!("Tag must be paired, missing: [ </{tag}> ]"),
                    rule: RULE_TAG_PAIR,
                },
            ));
        }

        findings.sort_by_key(|(offset, _)| *offset);
        findings.into_iter().map(|(_, m)| m).collect()
    }

    fn check_close(
        &self,
        tag: &str,
        offset: usize,
        open_stack: &mut Vec<(String, usize)>,
        line_of: &impl Fn(usize) -> usize,
        findings: &mut Vec<(usize, LintMessage)>,
    ) {
        let Some(depth) = open_stack.iter().rposition(|(open, _)| open == tag) else {
            findings.push((
                offset,
                LintMessage {
                    line: line_of(offset),
                    message: format!("Tag must be paired, no start tag: [ </{tag}> ]"),
                    rule: RULE_TAG_PAIR,
                },
            ));
            return;
        };
        // Elements opened after the matching one were never closed.
        for (unclosed, open_offset) in open_stack.drain(depth..).skip(1) {
            findings.push((
                open_offset,
                LintMessage {
                    line: line_of(open_offset),
                    message: format!("Tag must be paired, missing: [ </{unclosed}> ]"),
                    rule: RULE_TAG_PAIR,
                },
            ));
        }
    }

    fn check_attrs(
        &self,
        attrs: &str,
        tag_offset: usize,
        line_of: &impl Fn(usize) -> usize,
        seen_ids: &mut Vec<String>,
        findings: &mut Vec<(usize, LintMessage)>,
    ) {
        for caps in ATTR.captures_iter(attrs) {
            let name = &caps[1];
            let value = &caps[2];

            if !value.starts_with('"') {
                findings.push((
                    tag_offset,
                    LintMessage {
                        line: line_of(tag_offset),
                        message: format!(
                            "The value of attribute [ {name} ] must be in double quotes."
                        ),
                        rule: RULE_ATTR_VALUE_DOUBLE_QUOTES,
                    },
                ));
            }

            if name.eq_ignore_ascii_case("id") {
                let id = value.trim_matches(['"', '\'']).to_string();
                if seen_ids.contains(&id) {
                    findings.push((
                        tag_offset,
                        LintMessage {
                            line: line_of(tag_offset),
                            message: format!("The id value [ {id} ] must be unique."),
                            rule: RULE_ID_UNIQUE,
                        },
                    ));
                } else {
                    seen_ids.push(id);
                }
            }
        }
    }
}

/// Byte offsets at which each line starts. `line_starts[0]` is always 0.
fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
    starts
}

/// Replace comment bytes with spaces, preserving newlines and byte
/// offsets.
fn mask_comments(html: &str) -> String {
    let mut out = html.to_string();
    for m in COMMENT.find_iter(html) {
        // Byte-wise so multi-byte characters keep every offset stable.
        let masked: String = html[m.range()]
            .bytes()
            .map(|b| if b == b'\n' { '\n' } else { ' ' })
            .collect();
        out.replace_range(m.range(), &masked);
    }
    out
}
