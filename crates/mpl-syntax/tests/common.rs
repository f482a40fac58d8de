//! Shared helpers for parser tests.
#![allow(dead_code, unused_imports)]

pub use mpl_syntax::{parse, parse_with, Parse, ParseOptions, SyntaxKind};
use text_size::{TextRange, TextSize};

/// Helper to format a parse result for snapshot testing.
pub fn snapshot_parse(source: &str) -> String {
    mpl_syntax::dump(&parse(source))
}

/// Kinds of all terminals, `EOF` included.
pub fn token_kinds(source: &str) -> Vec<SyntaxKind> {
    parse(source).tree().tokens().map(|t| t.kind()).collect()
}

/// Kinds of all terminals except line breaks and `EOF`.
pub fn significant_kinds(source: &str) -> Vec<SyntaxKind> {
    parse(source)
        .tree()
        .tokens()
        .map(|t| t.kind())
        .filter(|k| !k.is_eol() && !k.is_eof())
        .collect()
}

/// Messages of all errors, in order.
pub fn error_messages(parse: &Parse) -> Vec<String> {
    parse.errors().iter().map(ToString::to_string).collect()
}

/// Checks that every scope opens and closes with its own delimiter pair.
pub fn assert_balanced(parse: &Parse) {
    let text = parse.text();
    for node in parse.root().descendants().filter(|n| n.is_scope()) {
        let (opener, closer) = match node.kind() {
            SyntaxKind::Object => (SyntaxKind::LCurly, SyntaxKind::RCurly),
            SyntaxKind::List => (SyntaxKind::LParen, SyntaxKind::RParen),
            SyntaxKind::Code => (SyntaxKind::LBrack, SyntaxKind::RBrack),
            _ => {
                let name = node.first_child().map(|c| c.kind());
                assert_eq!(name, Some(SyntaxKind::Name), "{text:?}: {node:?}");
                let colon = node.child(1).map(|c| c.kind());
                assert!(
                    matches!(colon, Some(SyntaxKind::Colon | SyntaxKind::ColonBang)),
                    "{text:?}: {node:?} has {colon:?}"
                );
                let last = node.last_child().map(|c| c.kind());
                assert_eq!(last, Some(SyntaxKind::Semicolon), "{text:?}: {node:?}");
                continue;
            }
        };
        assert_eq!(node.first_child().map(|c| c.kind()), Some(opener), "{text:?}: {node:?}");
        assert_eq!(node.last_child().map(|c| c.kind()), Some(closer), "{text:?}: {node:?}");
    }
}

/// Checks that a parse has no errors and no error terminals.
pub fn assert_clean(parse: &Parse) {
    let text = parse.text();
    assert!(parse.ok(), "{text:?}: {:?}", parse.errors());
    let bad: Vec<_> = parse
        .tree()
        .tokens()
        .filter(|t| t.kind() == SyntaxKind::SomeError)
        .collect();
    assert!(bad.is_empty(), "{text:?}: {bad:?}");
    assert_balanced(parse);
}

/// Checks the structural invariants every parse must satisfy.
pub fn assert_well_formed(parse: &Parse) {
    let text = parse.text();
    let len = TextSize::of(text);
    let root = parse.root();

    assert_eq!(root.kind(), SyntaxKind::Program);
    assert_eq!(root.range(), TextRange::up_to(len));
    assert_eq!((root.line(), root.column()), (0, 0));
    let eof = root.last_child().expect("root has no children");
    assert_eq!(eof.kind(), SyntaxKind::EOF, "{text:?}");
    assert_eq!(eof.range(), TextRange::empty(len), "{text:?}");

    for node in root.descendants() {
        if node.is_terminal() {
            continue;
        }
        assert!(node.is_root() || node.kind().is_structural(), "{node:?}");
        let mut prev_end = node.begin();
        for child in node.children() {
            assert_eq!(child.parent(), Some(node), "{text:?}: parent of {child:?}");
            assert!(child.begin() >= prev_end, "{text:?}: {child:?} overlaps");
            assert!(child.end() <= node.end(), "{text:?}: {child:?} escapes {node:?}");
            prev_end = child.end();
        }
    }

    // the sequence is the tree in pre-order, root excluded
    let from_tree: Vec<_> = root.descendants().skip(1).collect();
    let sequence: Vec<_> = parse.tree().symbols().collect();
    assert_eq!(from_tree, sequence, "{text:?}");
    for pair in sequence.windows(2) {
        assert_eq!(pair[0].next_symbol(), Some(pair[1]));
        assert_eq!(pair[1].prev_symbol(), Some(pair[0]));
    }

    // the token list is exactly the terminals in document order
    let from_tree: Vec<_> = root.descendants().filter(|n| n.is_terminal()).collect();
    let from_list: Vec<_> = parse.tree().tokens().collect();
    assert_eq!(from_tree, from_list, "{text:?}");
    for pair in from_list.windows(2) {
        assert_eq!(pair[0].next_token(), Some(pair[1]));
        assert_eq!(pair[1].prev_token(), Some(pair[0]));
        assert!(pair[0].end() <= pair[1].begin(), "{text:?}: {pair:?}");
    }

    // text outside terminals is blank
    let mut covered = vec![false; text.len()];
    for token in &from_list {
        for flag in &mut covered[usize::from(token.begin())..usize::from(token.end())] {
            *flag = true;
        }
    }
    for (idx, byte) in text.bytes().enumerate() {
        if !covered[idx] {
            assert!(byte == b' ' || byte == b'\t', "{text:?}: byte {idx} not covered");
        }
    }

    let index = mpl_syntax::LineIndex::new(text);
    for node in root.descendants() {
        assert_eq!(
            index.line_col(node.begin()),
            (node.line(), node.column()),
            "{text:?}: position of {node:?}"
        );
    }

    for err in parse.errors() {
        assert!(err.range.end() <= len, "{text:?}: {err}");
    }
}
