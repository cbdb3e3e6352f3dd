//! Shared tree-sitter helpers for specifier extraction.

// Tree-sitter returns usize rows; no source file has 4 billion lines.
#![allow(clippy::cast_possible_truncation)]

/// Get text content of a tree-sitter node.
///
/// Returns `None` if the node's byte range contains invalid UTF-8.
pub fn node_text<'a>(node: &tree_sitter::Node, content: &'a [u8]) -> Option<&'a str> {
    match std::str::from_utf8(&content[node.byte_range()]) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::trace!(
                byte_range = ?node.byte_range(),
                error = %e,
                node_kind = %node.kind(),
                "Failed to decode node text as UTF-8"
            );
            None
        }
    }
}

/// Value of a string literal node with its quotes removed.
///
/// Returns `None` for anything that is not a plain `string` node (template
/// strings included) and for the empty string.
pub fn string_value(node: &tree_sitter::Node, content: &[u8]) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let value = node_text(node, content)?.trim_matches(|c| c == '"' || c == '\'');
    (!value.is_empty()).then(|| value.to_string())
}

/// 1-indexed line of the node's start.
pub fn node_line(node: &tree_sitter::Node) -> u32 {
    node.start_position().row as u32 + 1
}
