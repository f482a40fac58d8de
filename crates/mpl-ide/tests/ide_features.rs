//! Integration tests for IDE features.

use expect_test::expect;
use text_size::{TextRange, TextSize};

use mpl_ide::{
    completion_names, enclosing_span, find_definitions, goto_definition,
    goto_definition_in_files, label_symbols, word_extent, Document, FileId,
};
use mpl_syntax::Parse;

fn setup(source: &str) -> Parse {
    mpl_syntax::parse(source)
}

fn offset_of(source: &str, needle: &str) -> TextSize {
    TextSize::from(source.find(needle).unwrap() as u32)
}

// =============================================================================
// Go to Definition Tests
// =============================================================================

#[test]
fn test_goto_definition_finds_earlier_label() {
    let source = "count: 0;\nstep: (count 1 +);\n";
    let parse = setup(source);
    let pos = offset_of(source, "count 1") + TextSize::from(2);

    let def = goto_definition(&parse, pos).expect("should resolve count");
    assert_eq!(def.name, "count");
    assert_eq!(def.range, TextRange::new(0.into(), 5.into()));
    assert_eq!((def.line, def.column), (0, 0));
}

#[test]
fn test_goto_definition_prefers_closest_redefinition() {
    let source = "x: 1; x:! 2; @x";
    let parse = setup(source);
    let def = goto_definition(&parse, offset_of(source, "@x") + TextSize::from(1)).unwrap();
    assert_eq!(def.range.start(), offset_of(source, "x:!"));
}

#[test]
fn test_goto_definition_ignores_later_labels() {
    let source = "(a) a: 1;";
    let parse = setup(source);
    assert!(goto_definition(&parse, TextSize::from(1)).is_none());
}

#[test]
fn test_goto_definition_not_on_name() {
    let source = "a: 1; \"a\"";
    let parse = setup(source);
    assert!(goto_definition(&parse, offset_of(source, "\"a\"") + TextSize::from(1)).is_none());
}

#[test]
fn test_goto_definition_inside_unclosed_block() {
    let source = "f: 1; { f";
    let parse = setup(source);
    let def = goto_definition(&parse, TextSize::of(source)).unwrap();
    assert_eq!(def.range, TextRange::new(0.into(), 1.into()));
}

#[test]
fn test_goto_definition_across_files() {
    let lib = setup("helper: (1 2);\nother: 3;");
    let main = setup("(helper)");
    let files = [(FileId(0), &lib), (FileId(1), &main)];

    let results = goto_definition_in_files(files.iter().copied(), FileId(1), TextSize::from(3));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].file_id, FileId(0));
    assert_eq!(results[0].definition.line, 0);

    let local = goto_definition_in_files(files.iter().copied(), FileId(0), TextSize::from(1));
    assert_eq!(local.len(), 1);
    assert_eq!(local[0].file_id, FileId(0));

    assert!(goto_definition_in_files(files.iter().copied(), FileId(7), TextSize::from(0)).is_empty());
}

#[test]
fn test_find_definitions_lists_every_file() {
    let a = setup("x: 1;");
    let b = setup("y: 2; x:! 3;");
    let results = find_definitions([(FileId(0), &a), (FileId(1), &b)], "x");
    let locations: Vec<_> = results
        .iter()
        .map(|r| (r.file_id, u32::from(r.definition.range.start())))
        .collect();
    assert_eq!(locations, [(FileId(0), 0), (FileId(1), 6)]);
}

// =============================================================================
// Symbol Tests
// =============================================================================

#[test]
fn test_label_symbols_listing() {
    let parse = setup("main: {\n  inner:! 1;\n};\n# note\nlast: ;");
    let listing: String = label_symbols(&parse)
        .iter()
        .map(|s| {
            format!(
                "{} {}:{} {:?} reset={}\n",
                s.name, s.line, s.column, s.range, s.is_reset
            )
        })
        .collect();
    expect![[r#"
        main 0:0 0..23 reset=false
        inner 1:2 10..20 reset=true
        last 4:0 31..38 reset=false
    "#]]
    .assert_eq(&listing);
}

#[test]
fn test_completion_names_in_declaration_order() {
    let parse = setup("b: ; a: ; b:! ; (c)");
    assert_eq!(completion_names(&parse), ["b", "a"]);
}

// =============================================================================
// Text Structure Tests
// =============================================================================

#[test]
fn test_word_extent_on_delimiters_and_numbers() {
    let source = "(12 3.5)";
    let parse = setup(source);
    assert_eq!(word_extent(&parse, 0.into()), Some(TextRange::new(0.into(), 1.into())));
    assert_eq!(word_extent(&parse, 2.into()), Some(TextRange::new(1.into(), 3.into())));
    assert_eq!(word_extent(&parse, 5.into()), Some(TextRange::new(4.into(), 7.into())));
    assert_eq!(word_extent(&parse, 7.into()), Some(TextRange::new(7.into(), 8.into())));
}

#[test]
fn test_enclosing_span_from_line_break_selects_comment() {
    let source = "a # note\nb";
    let parse = setup(source);
    let line_break = TextRange::empty(offset_of(source, "\n"));
    assert_eq!(enclosing_span(&parse, line_break), TextRange::new(2.into(), 8.into()));
}

#[test]
fn test_enclosing_span_label() {
    let source = "x: (1 2);";
    let parse = setup(source);
    let one = TextRange::new(4.into(), 5.into());
    let list = enclosing_span(&parse, one);
    assert_eq!(list, TextRange::new(3.into(), 8.into()));
    assert_eq!(enclosing_span(&parse, list), TextRange::new(0.into(), 9.into()));
}

// =============================================================================
// Document Tests
// =============================================================================

#[test]
fn test_document_edit_cycle() {
    let mut doc = Document::new("v: 1;\n(w)");
    assert!(goto_definition(doc.parse(), TextSize::from(8)).is_none());

    doc.edit(TextRange::new(7.into(), 8.into()), "v").unwrap();
    assert_eq!(doc.text(), "v: 1;\n(v)");
    let def = goto_definition(doc.parse(), TextSize::from(8)).unwrap();
    assert_eq!(def.name, "v");
}
