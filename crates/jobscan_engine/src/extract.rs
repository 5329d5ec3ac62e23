use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};
use sha2::{Digest, Sha256};

use crate::ExtractionReply;

/// Job description container on LinkedIn job pages.
pub const DEFAULT_CONTENT_SELECTOR: &str = ".jobs-description-content__text--stretch";

const NOT_FOUND_MESSAGE: &str = "Job description not found. Make sure you're on a LinkedIn job page.";

/// Elements that break the rendered text flow.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractorError {
    #[error("invalid content selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Mutation observed between two fingerprints of the content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    ChildList,
    CharacterData,
}

/// Digest of the content node's child structure and text; attributes are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFingerprint {
    structure: [u8; 32],
    text: [u8; 32],
}

impl NodeFingerprint {
    /// Classifies what changed from `self` to `next`, if anything.
    pub fn mutation_since(&self, next: &NodeFingerprint) -> Option<MutationKind> {
        if self.structure != next.structure {
            Some(MutationKind::ChildList)
        } else if self.text != next.text {
            Some(MutationKind::CharacterData)
        } else {
            None
        }
    }
}

/// Locates the content node of a page by a fixed selector.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    selector: Selector,
    source: String,
}

impl ContentExtractor {
    pub fn new(selector: &str) -> Result<Self, ExtractorError> {
        let parsed = Selector::parse(selector).map_err(|err| ExtractorError::InvalidSelector {
            selector: selector.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            selector: parsed,
            source: selector.to_string(),
        })
    }

    pub fn selector(&self) -> &str {
        &self.source
    }

    /// Rendered text of the content node, or the "not found" reply.
    pub fn extract(&self, html: &str) -> ExtractionReply {
        let doc = Html::parse_document(html);
        match doc.select(&self.selector).next() {
            Some(node) => ExtractionReply::Found {
                job_text: rendered_text(node),
            },
            None => ExtractionReply::Missing {
                error: NOT_FOUND_MESSAGE.to_string(),
            },
        }
    }

    /// Fingerprint of the content node, or `None` when the page lacks it.
    pub fn fingerprint(&self, html: &str) -> Option<NodeFingerprint> {
        let doc = Html::parse_document(html);
        let node = doc.select(&self.selector).next()?;

        let mut structure = Sha256::new();
        let mut text = Sha256::new();
        for child in node.descendants() {
            match child.value() {
                Node::Element(element) => {
                    structure.update(b"<");
                    structure.update(element.name().as_bytes());
                    structure.update((child.children().count() as u64).to_le_bytes());
                }
                Node::Text(content) => {
                    structure.update(b"#");
                    text.update(content.as_bytes());
                    text.update([0u8]);
                }
                _ => {}
            }
        }

        Some(NodeFingerprint {
            structure: structure.finalize().into(),
            text: text.finalize().into(),
        })
    }
}

/// Approximates `innerText`: block boundaries become spaces, whitespace runs collapse.
fn rendered_text(node: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(*node, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                if matches!(element.name(), "script" | "style" | "template") {
                    continue;
                }
                let block = BLOCK_ELEMENTS.contains(&element.name());
                if block {
                    out.push(' ');
                }
                collect_text(child, out);
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}
