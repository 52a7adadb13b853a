//! Plain-text outline of a framework tree for terminal output.

use crate::domain::model::FrameworkNode;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const GAP: &str = "    ";

/// Controls which part of the tree is drawn.
#[derive(Debug, Clone, Default)]
pub struct OutlineOptions {
    /// Deepest level drawn; collapsed nodes show how many children are hidden.
    pub max_depth: Option<usize>,
    /// Case-insensitive substring on id or name. Ancestors of matches are kept.
    pub filter: Option<String>,
}

/// Render `root` as a box-drawing outline, one `name [id]` per line.
pub fn render_outline(root: &FrameworkNode, options: &OutlineOptions) -> String {
    let filter = options
        .filter
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase);

    let mut lines = vec![label(root)];
    render_children(root, "", 1, options.max_depth, filter.as_deref(), &mut lines);
    lines.join("\n")
}

fn render_children(
    node: &FrameworkNode,
    prefix: &str,
    depth: usize,
    max_depth: Option<usize>,
    filter: Option<&str>,
    lines: &mut Vec<String>,
) {
    let visible: Vec<&FrameworkNode> = node
        .children()
        .iter()
        .filter(|child| filter.is_none_or(|needle| subtree_matches(child, needle)))
        .collect();

    if max_depth.is_some_and(|max| depth > max) {
        if let Some(last) = lines.last_mut()
            && !visible.is_empty()
        {
            last.push_str(&format!(" (+{})", visible.len()));
        }
        return;
    }

    let count = visible.len();
    for (index, child) in visible.into_iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{prefix}{connector}{}", label(child)));

        let child_prefix = format!("{prefix}{}", if is_last { GAP } else { PIPE });
        render_children(child, &child_prefix, depth + 1, max_depth, filter, lines);
    }
}

fn label(node: &FrameworkNode) -> String {
    if node.name.is_empty() {
        format!("[{}]", node.id)
    } else {
        format!("{} [{}]", node.name, node.id)
    }
}

fn subtree_matches(node: &FrameworkNode, needle: &str) -> bool {
    node.id.to_lowercase().contains(needle)
        || node.name.to_lowercase().contains(needle)
        || node
            .children()
            .iter()
            .any(|child| subtree_matches(child, needle))
}
