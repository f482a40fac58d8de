//! Label symbols and name completion candidates.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;
use text_size::TextRange;

use mpl_syntax::{Node, Parse, SyntaxTree};

/// A label declared somewhere in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSymbol {
    /// The declared name.
    pub name: SmolStr,
    /// Span of the name terminal.
    pub name_range: TextRange,
    /// Span of the whole label, up to and including `;` when present.
    pub range: TextRange,
    /// Zero-based line of the name.
    pub line: u32,
    /// Zero-based byte column of the name.
    pub column: u32,
    /// True for `name:! ... ;` labels.
    pub is_reset: bool,
}

impl LabelSymbol {
    fn from_label(label: Node<'_>) -> Option<Self> {
        let name = label.label_name()?;
        Some(Self {
            name: SmolStr::new(name.text()),
            name_range: name.range(),
            range: label.range(),
            line: name.line(),
            column: name.column(),
            is_reset: label.is_label_reset(),
        })
    }
}

/// All label nodes of a tree in document order, nested labels included.
pub fn labels(tree: &SyntaxTree) -> impl Iterator<Item = Node<'_>> {
    tree.symbols().filter(|node| node.is_label())
}

/// Symbols for every label of a document in document order.
pub fn label_symbols(parse: &Parse) -> Vec<LabelSymbol> {
    labels(parse.tree())
        .filter_map(LabelSymbol::from_label)
        .collect()
}

/// Distinct label names in first-declaration order.
pub fn completion_names(parse: &Parse) -> Vec<SmolStr> {
    let names: IndexSet<&str, FxBuildHasher> = labels(parse.tree())
        .filter_map(Node::label_name)
        .map(Node::text)
        .collect();
    names.into_iter().map(SmolStr::new).collect()
}

/// The bare name of a name terminal, with any `@`, `!`, `.`, `.@` or `.!`
/// access prefix stripped. Other nodes yield their full text.
#[must_use]
pub fn extract_name(node: Node<'_>) -> &str {
    let text = node.text();
    text.get(node.kind().name_prefix_len()..).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpl_syntax::parse;

    #[test]
    fn collects_nested_labels() {
        let parse = parse("a: { b:! 1; } ; c: ;");
        let names: Vec<_> = label_symbols(&parse)
            .into_iter()
            .map(|s| (s.name, s.is_reset))
            .collect();
        assert_eq!(
            names,
            [
                (SmolStr::new("a"), false),
                (SmolStr::new("b"), true),
                (SmolStr::new("c"), false),
            ]
        );
    }

    #[test]
    fn completion_names_are_unique() {
        let parse = parse("x: 1; y: 2; x:! 3;");
        assert_eq!(completion_names(&parse), ["x", "y"]);
    }

    #[test]
    fn extract_strips_prefix() {
        let parse = parse("@a !b .c .@d .!e f @");
        let names: Vec<_> = parse
            .tree()
            .tokens()
            .filter(|t| t.looks_like_name())
            .map(extract_name)
            .collect();
        assert_eq!(names, ["a", "b", "c", "d", "e", "f", "@"]);
    }
}
