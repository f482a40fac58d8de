mod common;
use common::*;
use expect_test::expect;

// Error Recovery
#[test]
fn test_unterminated_object() {
    expect![[r#"
        Program@0..4
          Object@0..4
            '{'@0..1 "{"
            Number@1..2 "1"
            Number@3..4 "2"
          EOF@4..4 ""
        ---
        Errors:
          - expected '}' to close Object in Object at 0..0
    "#]]
    .assert_eq(&snapshot_parse("{1 2"));
}

#[test]
fn test_unterminated_nested_blocks_report_each_level() {
    let parse = parse("[(a");
    assert_eq!(
        error_messages(&parse),
        [
            "expected ')' to close List in List at 1..1",
            "expected ']' to close Code in Code at 0..0",
        ]
    );
    assert_well_formed(&parse);
}

#[test]
fn test_unterminated_label_and_reset() {
    let parse = parse("x: 1");
    assert_eq!(
        error_messages(&parse),
        ["expected ';' to close Label in Label at 0..0"]
    );
    let parse = parse_with("x:! 1", &ParseOptions::default());
    assert_eq!(
        error_messages(&parse),
        ["expected ';' to close LabelReset in LabelReset at 0..0"]
    );
}

#[test]
fn test_unexpected_word_is_skipped_to_whitespace() {
    expect![[r#"
        Program@0..8
          Name@0..1 "a"
          SomeError@2..6 "}}x)"
          Name@7..8 "b"
          EOF@8..8 ""
        ---
        Errors:
          - expected a name, number, string or label in WSSeparableExpression at 2..6
    "#]]
    .assert_eq(&snapshot_parse("a }}x) b"));
}

#[test]
fn test_unexpected_character_after_expression() {
    let parse = parse("a}b");
    assert_eq!(
        significant_kinds("a}b"),
        [SyntaxKind::Name, SyntaxKind::SomeError, SyntaxKind::SomeError]
    );
    assert_eq!(parse.errors().len(), 2);
    assert_eq!(parse.errors()[0].token, SyntaxKind::NonWSSeparableExpression);
    assert_well_formed(&parse);
}

#[test]
fn test_stray_closer_inside_other_block() {
    let parse = parse("(a})");
    assert_eq!(
        error_messages(&parse),
        ["expected whitespace or a bracket, '.', '#' or ',' in NonWSSeparableExpression at 2..3"]
    );
    let list = parse.root().first_child().unwrap();
    assert!(list.is_closed_scope());
}

// =============================================================================
// Numbers
// =============================================================================

#[test]
fn test_malformed_numbers() {
    let cases = [
        ("0x", "expected hexadecimal digits after '0x' in Number at 0..2"),
        ("0.Message", "expected a digit after '.' in Real at 0..9"),
        ("0.a@b", "expected a digit after '.' in Real at 0..5"),
        ("0.x!y.z", "expected a digit after '.' in Real at 0..7"),
        ("1.", "expected a digit after '.' in Real at 0..2"),
        ("2e+", "expected a digit in the exponent in Real at 0..3"),
        ("1.5r", "expected 32 or 64 after 'r' in Real at 0..4"),
        ("-5n8", "unsigned numbers cannot have a sign in Number at 0..4"),
        ("5i", "expected 8, x, 16, 32 or 64 after the integer suffix in Number at 0..2"),
    ];
    for (source, message) in cases {
        let parse = parse(source);
        assert_eq!(error_messages(&parse), [message], "{source:?}");
        let first = parse.root().first_child().unwrap();
        assert_eq!(first.kind(), SyntaxKind::SomeError, "{source:?}");
    }
}

#[test]
fn test_bad_width_suffix_leaves_rest_to_next_expression() {
    let parse = parse("5i7");
    assert_eq!(parse.errors().len(), 2);
    assert_eq!(
        parse.errors()[0].message,
        "expected 8, x, 16, 32 or 64 after the integer suffix"
    );
    assert_eq!(parse.root().first_child().unwrap().text(), "5i");
}

// =============================================================================
// Strings
// =============================================================================

#[test]
fn test_unknown_escape() {
    let parse = parse(r#""ab\qc""#);
    assert_eq!(
        error_messages(&parse),
        ["unknown escape sequence in String at 3..5"]
    );
    assert_eq!(parse.root().first_child().unwrap().kind(), SyntaxKind::String);
}

#[test]
fn test_escape_before_line_break() {
    let parse = parse("\"a\\\nb\"");
    assert_eq!(
        error_messages(&parse),
        ["line break after escape character in String at 2..3"]
    );
    let string = parse.root().first_child().unwrap();
    assert_eq!(string.range(), text_size::TextRange::new(0.into(), 6.into()));
}

#[test]
fn test_unterminated_strings() {
    let quoted = parse("\"abc");
    assert_eq!(
        error_messages(&quoted),
        ["unterminated string in String at 0..0"]
    );
    assert_eq!(quoted.root().first_child().unwrap().text(), "\"abc");

    let raw = parse("x «a «b»");
    assert_eq!(
        error_messages(&raw),
        ["unterminated raw string in String at 2..2"]
    );
    assert_well_formed(&raw);
}

// =============================================================================
// Names and line breaks
// =============================================================================

#[test]
fn test_empty_member_name() {
    let parse = parse(". x");
    assert_eq!(
        error_messages(&parse),
        ["expected a member name in Name at 1..1"]
    );
    let member = parse.root().first_child().unwrap();
    assert_eq!(member.kind(), SyntaxKind::NameMember);
    assert_eq!(member.text(), ".");
}

#[test]
fn test_orphan_carriage_return() {
    let parse = parse("a\rb");
    assert_eq!(
        error_messages(&parse),
        ["carriage return is not followed by a line feed in CR at 1..2"]
    );
    let tokens: Vec<_> = parse
        .tree()
        .tokens()
        .map(|t| (t.kind(), t.line(), t.column()))
        .collect();
    assert_eq!(
        tokens,
        [
            (SyntaxKind::Name, 0, 0),
            (SyntaxKind::CR, 0, 1),
            (SyntaxKind::Name, 1, 0),
            (SyntaxKind::EOF, 1, 1),
        ]
    );
}

// =============================================================================
// Nesting bound
// =============================================================================

#[test]
fn test_nesting_limit_skips_region() {
    let options = ParseOptions {
        max_nesting_depth: 2,
    };
    let parse = parse_with("((( a )))", &options);
    assert_eq!(
        parse.errors().iter().map(ToString::to_string).collect::<Vec<_>>(),
        ["nesting depth limit of 2 exceeded in List at 2..7"]
    );
    let outer = parse.root().first_child().unwrap();
    assert!(outer.is_closed_scope());
    let inner = outer.child(1).unwrap();
    assert!(inner.is_closed_scope());
    let skipped = inner.child(1).unwrap();
    assert_eq!(skipped.kind(), SyntaxKind::SomeError);
    assert_eq!(skipped.text(), "( a )");
    assert_well_formed(&parse);
}

#[test]
fn test_nesting_limit_ignores_delimiters_in_strings() {
    let options = ParseOptions {
        max_nesting_depth: 2,
    };
    let source = "((( \")\" ))) x";
    let parse = parse_with(source, &options);
    assert_eq!(
        error_messages(&parse),
        ["nesting depth limit of 2 exceeded in List at 2..9"]
    );
    let outer = parse.root().first_child().unwrap();
    assert_eq!(outer.child(1).unwrap().child(1).unwrap().text(), "( \")\" )");
    assert_eq!(parse.root().child(1).unwrap().text(), "x");
    assert_balanced(&parse);
    assert_well_formed(&parse);

    let parse = parse_with("[[«]»]]", &ParseOptions { max_nesting_depth: 1 });
    assert_eq!(
        error_messages(&parse),
        ["nesting depth limit of 1 exceeded in Code at 1..8"]
    );
    assert_balanced(&parse);
}

#[test]
fn test_nesting_limit_ignores_delimiters_in_comments() {
    let options = ParseOptions {
        max_nesting_depth: 1,
    };
    let parse = parse_with("((a # (\n))", &options);
    assert_eq!(
        error_messages(&parse),
        ["nesting depth limit of 1 exceeded in List at 1..9"]
    );
    let outer = parse.root().first_child().unwrap();
    assert_eq!(outer.child_count(), 3);
    assert_balanced(&parse);
    assert_well_formed(&parse);
}

#[test]
fn test_nesting_limit_keeps_quotes_inside_names() {
    // `«` is a name character, not a raw string, right after a letter
    let options = ParseOptions {
        max_nesting_depth: 1,
    };
    let parse = parse_with("((a« b)) c", &options);
    assert_eq!(
        error_messages(&parse),
        ["nesting depth limit of 1 exceeded in List at 1..8"]
    );
    assert_eq!(parse.root().child(1).unwrap().text(), "c");
    assert_balanced(&parse);
}

#[test]
fn test_nesting_limit_for_labels() {
    let options = ParseOptions {
        max_nesting_depth: 1,
    };
    let parse = parse_with("a: b: c: 1; ; ; d", &options);
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].token, SyntaxKind::Label);
    let label = parse.root().first_child().unwrap();
    assert!(label.is_closed_scope());
    assert_eq!(label.child(2).unwrap().text(), "b: c: 1; ;");
    assert_eq!(parse.root().child(1).unwrap().text(), "d");
}

#[test]
fn test_nesting_limit_is_capped() {
    let max = ParseOptions::MAX_SUPPORTED_NESTING_DEPTH as usize;
    let options = ParseOptions {
        max_nesting_depth: u32::MAX,
    };
    assert_eq!(options.nesting_limit(), ParseOptions::MAX_SUPPORTED_NESTING_DEPTH);

    let nested = |depth: usize| format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let parse = parse_with(&nested(max), &options);
    assert!(parse.ok(), "{:?}", parse.errors().first());
    assert_balanced(&parse);

    let parse = parse_with(&nested(max + 1), &options);
    assert_eq!(
        error_messages(&parse),
        [format!(
            "nesting depth limit of {max} exceeded in Code at {max}..{}",
            max + 2
        )]
    );

    let parse = parse_with(&nested(4096), &ParseOptions { max_nesting_depth: 4096 });
    assert_eq!(parse.errors().len(), 1);
    assert_balanced(&parse);
    assert_well_formed(&parse);
}

#[test]
fn test_deep_nesting_with_default_limit() {
    let depth = ParseOptions::DEFAULT_MAX_NESTING_DEPTH as usize + 44;
    let source = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let parse = parse(&source);
    assert_eq!(parse.errors().len(), 1, "{:?}", parse.errors());
    assert_well_formed(&parse);
}
