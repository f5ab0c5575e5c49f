//! DOM Operations Adapter
//!
//! Thin layer over the `dom_query` crate exposing the handful of tree
//! operations the analysis stages need: parsing, first-match lookup,
//! presence tests, in-place subtree removal and whitespace-normalized text.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

// === Parsing ===

/// Parse an HTML string into a document.
///
/// Parsing never fails: malformed markup is repaired by the HTML5 tree
/// builder, and an empty string yields an empty `html/head/body` skeleton.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Querying ===

/// First element matching `selector` anywhere in the document.
#[must_use]
pub fn first_in<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    let found = doc.select_single(selector);
    if found.length() == 0 {
        None
    } else {
        Some(found)
    }
}

/// Whether any element in the document matches `selector`.
#[inline]
#[must_use]
pub fn exists(doc: &Document, selector: &str) -> bool {
    doc.select(selector).length() > 0
}

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Tree Manipulation ===

/// Remove every descendant of `sel` matching `selector` from the tree.
///
/// Returns the number of matched elements. Nested matches are counted
/// individually even though removing the outer one already detaches them.
pub fn remove_all(sel: &Selection, selector: &str) -> usize {
    let matched = sel.select(selector);
    let count = matched.length();
    if count > 0 {
        matched.remove();
    }
    count
}

// === Text Content ===

/// Raw concatenated text of node and descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text of all descendant text nodes, each trimmed, joined by single spaces.
///
/// Empty text nodes are skipped, so inter-element whitespace never produces
/// double separators.
#[must_use]
pub fn joined_text(sel: &Selection) -> String {
    let Some(root) = sel.nodes().first() else {
        return String::new();
    };

    let mut out = String::new();
    for node in root.descendants() {
        if !node.is_text() {
            continue;
        }
        let text = node.text();
        for piece in text.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(piece);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_returns_none_when_absent() {
        let doc = parse("<html><body><p>x</p></body></html>");
        assert!(first_in(&doc, "article").is_none());
        assert!(first_in(&doc, "p").is_some());
    }

    #[test]
    fn first_picks_document_order_match() {
        let doc = parse("<body><main><p>one</p></main><main><p>two</p></main></body>");
        let main = first_in(&doc, "main").map(|m| joined_text(&m));
        assert_eq!(main.as_deref(), Some("one"));
    }

    #[test]
    fn remove_all_detaches_subtrees() {
        let doc = parse("<body><div><nav>menu</nav><p>body</p><nav>more</nav></div></body>");
        let div = doc.select("div");
        assert_eq!(remove_all(&div, "nav"), 2);
        assert_eq!(joined_text(&div), "body");
        assert!(!exists(&doc, "nav"));
    }

    #[test]
    fn joined_text_normalizes_whitespace() {
        let doc = parse("<body><div>\n  <h1>Title</h1>\n<p>First   line\n second</p><span>end</span></div></body>");
        let div = doc.select("div");
        assert_eq!(joined_text(&div), "Title First line second end");
    }

    #[test]
    fn tag_name_is_lowercase() {
        let doc = parse("<body><ARTICLE>x</ARTICLE></body>");
        assert_eq!(tag_name(&doc.select("article")).as_deref(), Some("article"));
    }
}
