// ABOUTME: Document normalizer turning an exported page into the base (answer key) document.
// ABOUTME: Unwraps links, collapses toggles to their summary, swaps the stylesheet, fixes newlines and code seams.

//! Document normalization.
//!
//! The source page is parsed with scraper and re-serialized node by node.
//! Rewrites are decided up front as sets of node ids (anchors to unwrap,
//! toggles to collapse, the style element to replace) and applied while
//! serializing:
//!
//! - `<a>` elements are replaced by their children;
//! - every toggle loses its `open` attribute and all children except `<summary>`;
//! - the first `<style>` in `<head>` becomes a stylesheet `<link>` (appended
//!   to `<head>` when there is none);
//! - `\r\n` and `\r` become `\n`;
//! - `</code><code>` seams are removed and `</code><strong><code>` /
//!   `</code><em><code>` collapse to the emphasis tag.

use std::collections::HashSet;

use aho_corasick::AhoCorasick;
use ego_tree::NodeId;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node, Selector};

use crate::document::BaseDocument;
use crate::error::{ClozeError, Result};
use crate::markup::{escape_attr, escape_text};
use crate::options::Options;

static ANCHOR_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static HEAD_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("head").unwrap());
static BODY_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());
static HEAD_STYLE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("head style").unwrap());

static NEWLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").unwrap());

static SUMMARY_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<summary[\s/>]").unwrap());
static SUMMARY_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</summary\s*>").unwrap());
static DETAILS_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<details[\s/>]").unwrap());
static DETAILS_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</details\s*>").unwrap());

const CODE_SEAMS: &[&str] = &["</code><code>", "</code><strong><code>", "</code><em><code>"];
const CODE_SEAM_REPLACEMENTS: &[&str] = &["", "<strong>", "<em>"];

static CODE_SEAM_AC: Lazy<AhoCorasick> = Lazy::new(|| AhoCorasick::new(CODE_SEAMS).unwrap());

// Children of these elements are raw text and serialized verbatim.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Node-level rewrites decided before serialization.
struct Plan {
    unwrap: HashSet<NodeId>,
    toggles: HashSet<NodeId>,
    stylesheet: Option<NodeId>,
    link: String,
}

/// Normalizes a source page into the base document.
///
/// Fails with a Parse error when the source has unbalanced `<details>` or
/// `<summary>` tags, or when the configured toggle selector is invalid.
pub fn normalize(html: &str, opts: &Options) -> Result<BaseDocument> {
    check_balanced(html, "summary", &SUMMARY_OPEN_RE, &SUMMARY_CLOSE_RE)?;
    check_balanced(html, "details", &DETAILS_OPEN_RE, &DETAILS_CLOSE_RE)?;

    let toggle_sel = Selector::parse(&opts.toggle_selector).map_err(|e| {
        ClozeError::parse(
            "",
            "parse toggle selector",
            Some(anyhow::anyhow!("{:?}: {:?}", opts.toggle_selector, e)),
        )
    })?;

    let doc = Html::parse_document(html);
    let plan = Plan {
        unwrap: doc.select(&ANCHOR_SEL).map(|el| el.id()).collect(),
        toggles: doc.select(&toggle_sel).map(|el| el.id()).collect(),
        stylesheet: doc.select(&HEAD_STYLE_SEL).next().map(|el| el.id()),
        link: format!(
            "<link rel=\"stylesheet\" href=\"{}\" />",
            escape_attr(&opts.stylesheet_href)
        ),
    };

    let mut head = String::new();
    if let Some(el) = doc.select(&HEAD_SEL).next() {
        serialize_node(*el, &plan, false, &mut head);
    }
    let mut body = String::new();
    if let Some(el) = doc.select(&BODY_SEL).next() {
        serialize_node(*el, &plan, false, &mut body);
    }

    let head = NEWLINE_RE.replace_all(&head, "\n").into_owned();
    let body = NEWLINE_RE.replace_all(&body, "\n");
    let body = CODE_SEAM_AC.replace_all(&body, CODE_SEAM_REPLACEMENTS);

    Ok(BaseDocument::new(head, body))
}

fn check_balanced(html: &str, tag: &str, open: &Regex, close: &Regex) -> Result<()> {
    let opened = open.find_iter(html).count();
    let closed = close.find_iter(html).count();
    if opened != closed {
        return Err(ClozeError::parse(
            "",
            "normalize",
            Some(anyhow::anyhow!(
                "unbalanced <{}> tags: {} opened, {} closed",
                tag,
                opened,
                closed
            )),
        ));
    }
    Ok(())
}

fn serialize_node(node: ego_tree::NodeRef<Node>, plan: &Plan, raw: bool, out: &mut String) {
    match node.value() {
        Node::Text(text) => {
            if raw {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        Node::Element(el) => {
            if plan.unwrap.contains(&node.id()) {
                for child in node.children() {
                    serialize_node(child, plan, raw, out);
                }
                return;
            }
            if plan.stylesheet == Some(node.id()) {
                out.push_str(&plan.link);
                return;
            }

            let name = el.name();
            let is_toggle = plan.toggles.contains(&node.id());

            out.push('<');
            out.push_str(name);
            for (k, v) in el.attrs() {
                if is_toggle && k == "open" {
                    continue;
                }
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&escape_attr(v));
                out.push('"');
            }

            if is_void_element(name) {
                out.push_str(" />");
                return;
            }
            out.push('>');

            let child_raw = RAW_TEXT_TAGS.contains(&name);
            for child in node.children() {
                if is_toggle && !is_summary(child) {
                    continue;
                }
                serialize_node(child, plan, child_raw, out);
            }
            if name == "head" && plan.stylesheet.is_none() {
                out.push_str(&plan.link);
            }

            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        _ => {}
    }
}

fn is_summary(node: ego_tree::NodeRef<Node>) -> bool {
    matches!(node.value(), Node::Element(el) if el.name() == "summary")
}

/// Check if tag is void element
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
