//! Page parsing, title lookup and main-content text extraction.
//!
//! The main content is the first `<article>`, else the first `<main>`, else
//! `<body>`. Landmark boilerplate (navigation, header, footer, aside) is
//! removed from that subtree *before* its text is read, so removed text can
//! never leak into tagging.

use tracing::debug;

use crate::dom::{self, Document, Selection};
use crate::error::{Error, Result};
use crate::patterns::{
    ARTICLE_SELECTOR, BODY_SELECTOR, BOILERPLATE_SELECTOR, INVISIBLE_SELECTOR, MAIN_SELECTOR,
    TITLE_SELECTOR,
};
use crate::result::{Content, NO_TITLE};

/// A fetched and parsed documentation page.
pub struct Page {
    document: Document,
}

impl Page {
    /// Parse decoded HTML.
    ///
    /// A blank body cannot be analysed and is reported as a parse error; any
    /// other input parses, since the HTML5 tree builder repairs bad markup.
    pub fn parse(html: &str) -> Result<Self> {
        if html.trim().is_empty() {
            return Err(Error::ParseError("empty document".to_string()));
        }
        Ok(Self {
            document: dom::parse(html),
        })
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Trimmed text of the first `<title>`, or `"No Title Found"`.
    #[must_use]
    pub fn title(&self) -> String {
        page_title(&self.document)
    }

    /// Strip boilerplate from the main content and return its text.
    ///
    /// Consumes the page: the tree is modified in place.
    #[must_use]
    pub fn into_main_text(self) -> Content {
        extract_main_text(&self.document)
    }
}

/// Trimmed text of the first `<title>` element.
#[must_use]
pub fn page_title(doc: &Document) -> String {
    dom::first_in(doc, TITLE_SELECTOR)
        .map(|t| dom::text_content(&t).trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// The subtree chosen as the page's main content.
#[must_use]
pub fn main_content_node(doc: &Document) -> Option<Selection<'_>> {
    [ARTICLE_SELECTOR, MAIN_SELECTOR, BODY_SELECTOR]
        .into_iter()
        .find_map(|selector| dom::first_in(doc, selector))
}

/// Remove landmark boilerplate and invisible elements below `root`.
///
/// Returns the number of removed elements.
pub fn strip_boilerplate(root: &Selection) -> usize {
    dom::remove_all(root, BOILERPLATE_SELECTOR) + dom::remove_all(root, INVISIBLE_SELECTOR)
}

/// Main-content text with boilerplate removed, whitespace-normalized.
///
/// Modifies `doc` in place.
#[must_use]
pub fn extract_main_text(doc: &Document) -> Content {
    let Some(root) = main_content_node(doc) else {
        return Content::NotAvailable;
    };

    let removed = strip_boilerplate(&root);
    let text = dom::joined_text(&root);
    debug!(
        container = dom::tag_name(&root).as_deref().unwrap_or("?"),
        removed,
        chars = text.len(),
        "main content extracted"
    );

    if text.is_empty() {
        Content::Empty
    } else {
        Content::Text(text)
    }
}
