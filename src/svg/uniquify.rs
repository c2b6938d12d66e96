//! Identifier uniquification for frame subtrees merged into one document.
//!
//! Renaming ids inside a subtree is a graph problem: an attribute anywhere
//! in the subtree may reference an id defined later in document order, so
//! the rename table must be complete before any reference is rewritten. The
//! two passes below therefore never interleave.

use crate::dom::tree::Element;

/// Prefix every descendant id below `root` and rewrite every `#id`
/// cross reference to match. The root element's own id is left alone.
pub fn uniquify_ids(root: &mut Element, prefix: &str) {
    let mut ids = Vec::new();
    collect_and_prefix(root, prefix, &mut ids);
    rewrite_references(root, prefix, &ids);
}

/// Pass 1: pre-order over descendants, recording each original id and
/// rewriting the attribute to `prefix + id`.
fn collect_and_prefix(parent: &mut Element, prefix: &str, ids: &mut Vec<String>) {
    for child in parent.child_elements_mut() {
        if let Some(old) = child.attr("id") {
            let old = old.to_string();
            child.set_attr("id", format!("{prefix}{old}"));
            ids.push(old);
        }
        collect_and_prefix(child, prefix, ids);
    }
}

/// Pass 2: pre-order over descendants, replacing every `#id` occurrence in
/// every attribute value. A reference may sit inside a larger string (a
/// `url(...)` list, a SMIL begin chain), so the match is substring-wise, and
/// ids are applied in collection order.
fn rewrite_references(parent: &mut Element, prefix: &str, ids: &[String]) {
    for child in parent.child_elements_mut() {
        for value in child.attr_values_mut() {
            for id in ids {
                let from = format!("#{id}");
                if value.contains(&from) {
                    *value = value.replace(&from, &format!("#{prefix}{id}"));
                }
            }
        }
        rewrite_references(child, prefix, ids);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/uniquify.rs"]
mod tests;
