#![no_main]

use libfuzzer_sys::fuzz_target;
use mpl_ide::{enclosing_span, goto_definition, word_extent, Document};
use mpl_syntax::{parse_with, ParseOptions, Strategy};
use text_size::{TextRange, TextSize};

const MAX_SOURCE_BYTES: usize = 4096;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fn char_boundary_at(seed: u8, source: &str) -> usize {
    if source.is_empty() {
        return 0;
    }
    let mut offset = usize::from(seed) % (source.len() + 1);
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fuzz_target!(|data: &[u8]| {
    let Some((&seed, rest)) = data.split_first() else {
        return;
    };
    let source = decode_source(rest);
    let options = ParseOptions {
        max_nesting_depth: u32::from(seed % 16) + 1,
    };
    let parse = parse_with(&source, &options);
    let len = TextSize::of(source.as_str());

    let root = parse.root();
    assert_eq!(root.range(), TextRange::up_to(len));
    let eof = root.last_child().expect("root always ends with EOF");
    assert!(eof.is_eof());
    for err in parse.errors() {
        assert!(err.range.end() <= len);
    }

    let mut prev_end = TextSize::from(0);
    for token in parse.tree().tokens() {
        assert!(token.begin() >= prev_end);
        prev_end = token.end();
    }

    let mut prev_begin = TextSize::from(0);
    for node in parse.tree().symbols() {
        assert!(node.begin() >= prev_begin);
        prev_begin = node.begin();
    }

    let offset = char_boundary_at(seed, &source);
    let offset = TextSize::try_from(offset).unwrap_or(len);
    for node in root.all_ancestors(offset) {
        assert!(node.begin() <= offset && offset <= node.end());
    }
    let _ = root.surroundings(offset, Strategy::FarLeftNearRight);
    let _ = goto_definition(&parse, offset);
    let _ = word_extent(&parse, offset);
    let _ = enclosing_span(&parse, TextRange::empty(offset));

    let mut doc = Document::with_options(source.clone(), options);
    let before = doc.errors().len();
    let at = usize::from(offset);
    doc.edit(TextRange::empty(offset), "(").expect("offset is a char boundary");
    doc.edit(TextRange::new(offset, offset + TextSize::from(1)), "")
        .expect("removes the inserted bracket");
    assert_eq!(doc.text().len(), source.len());
    assert_eq!(&doc.text()[..at], &source[..at]);
    assert_eq!(doc.errors().len(), before);
});
