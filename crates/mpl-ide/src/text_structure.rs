//! Word extents and expanding selections.

use text_size::{TextRange, TextSize};

use mpl_syntax::{Node, Parse, SyntaxKind};

/// The span an editor should treat as "the word" at `offset`.
///
/// Names, numbers, reals and delimiters are words. For prefixed names the
/// access prefix and the bare name are separate words, so double-clicking
/// `@foo` on `foo` selects only `foo`.
#[must_use]
pub fn word_extent(parse: &Parse, offset: TextSize) -> Option<TextRange> {
    let node = parse.root().youngest_ancestor(offset)?;
    if !node.is_terminal() {
        return None;
    }
    let kind = node.kind();
    match kind {
        SyntaxKind::Name | SyntaxKind::Number | SyntaxKind::Real => Some(node.range()),
        _ if kind.is_scope_start() || kind.is_scope_end() => Some(node.range()),
        _ if kind.name_prefix_len() > 0 => Some(split_prefixed(node, offset)),
        _ => None,
    }
}

fn split_prefixed(node: Node<'_>, offset: TextSize) -> TextRange {
    let prefix = TextSize::try_from(node.kind().name_prefix_len()).unwrap_or_default();
    let prefix_end = node.begin() + prefix.min(node.range().len());
    if offset < prefix_end {
        // prefix characters are single-byte ASCII
        TextRange::at(offset, TextSize::from(1))
    } else {
        TextRange::new(prefix_end, node.end())
    }
}

/// The smallest span strictly larger than `range` that forms a unit.
///
/// Walks outward from the innermost node containing `range`. A line break
/// that ends a comment line expands to that comment. Other line breaks and
/// `EOF` are skipped over. At the top this returns the whole document.
#[must_use]
pub fn enclosing_span(parse: &Parse, range: TextRange) -> TextRange {
    let root = parse.root();
    let mut chain: Vec<Node<'_>> = root.ancestors_covering(range).collect();
    while let Some(node) = chain.pop() {
        if node.range() == range || !node.range().contains_range(range) {
            continue;
        }
        if node.is_eol() {
            let comment = node
                .prev_token()
                .filter(|prev| prev.is_comment() && prev.range() != range);
            if let Some(comment) = comment {
                return comment.range();
            }
            continue;
        }
        if node.is_eof() {
            continue;
        }
        return node.range();
    }
    root.range()
}
