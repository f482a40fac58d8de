//! Human-readable rendering of a parse, for tests and command-line output.

use crate::parser::Parse;
use crate::tree::Node;

/// Renders the tree one node per line, children indented under their parent,
/// followed by the errors if there are any.
///
/// Terminals show their text: `Name@1..2 "a"`.
#[must_use]
pub fn dump(parse: &Parse) -> String {
    let mut output = String::new();
    format_node(parse.root(), &mut output, 0);

    if !parse.ok() {
        output.push_str("---\nErrors:\n");
        for err in parse.errors() {
            output.push_str(&format!("  - {err}\n"));
        }
    }

    output
}

fn format_node(node: Node<'_>, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    if node.is_terminal() {
        out.push_str(&format!(
            "{indent}{}@{:?} {:?}\n",
            node.kind(),
            node.range(),
            node.text()
        ));
        return;
    }

    out.push_str(&format!("{indent}{}@{:?}\n", node.kind(), node.range()));
    for child in node.children() {
        format_node(child, out, depth + 1);
    }
}
