//! DOM operations adapter.
//!
//! Thin helpers over `dom_query` so the scanners read the same way
//! regardless of which selection they hold.

pub use dom_query::{Document, Selection};

// Re-export StrTendril for callers of text_content
pub use tendril::StrTendril;

/// Element `class` attribute.
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// All text of the node and its descendants.
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Parse an HTML string into a document.
///
/// Malformed markup never fails; the parser recovers and the scanners
/// simply find less.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
