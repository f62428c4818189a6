//! Text-flattening primitives shared by the listing and plan extractors.

use scraper::{ElementRef, Html};

/// Elements whose text is never visible and is left out of [`page_text`].
const SKIPPED_TEXT_PARENTS: [&str; 3] = ["script", "style", "noscript"];

/// All text under `el`, each piece trimmed, empty pieces dropped, joined by a
/// single space.
pub(crate) fn node_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the direct text children of `el` only, trimmed.
pub(crate) fn own_text(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(|child| child.value().as_text().map(|t| &**t))
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Trims `s` and collapses every internal whitespace run to one space.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Every text node of the document outside `script`/`style`/`noscript`,
/// joined by newlines so that single-line patterns never straddle two nodes.
pub(crate) fn page_text(document: &Html) -> String {
    let mut pieces: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element().map(|e| e.name()))
            .is_some_and(|name| SKIPPED_TEXT_PARENTS.contains(&name));
        if !hidden {
            pieces.push(text);
        }
    }
    pieces.join("\n")
}
