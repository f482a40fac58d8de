//! `mpl symbols`: list the labels of a file.

use std::path::Path;

use mpl_ide::{label_symbols, LabelSymbol};
use mpl_syntax::parse_with;
use serde::Serialize;

use crate::config::ProjectConfig;
use crate::sources::load_source;

#[derive(Debug, Serialize)]
struct SymbolRow<'a> {
    name: &'a str,
    line: u32,
    column: u32,
    start: u32,
    end: u32,
    reset: bool,
}

impl<'a> From<&'a LabelSymbol> for SymbolRow<'a> {
    fn from(symbol: &'a LabelSymbol) -> Self {
        Self {
            name: &symbol.name,
            line: symbol.line + 1,
            column: symbol.column + 1,
            start: symbol.range.start().into(),
            end: symbol.range.end().into(),
            reset: symbol.is_reset,
        }
    }
}

pub fn run(file: &Path, json: bool, config: &ProjectConfig) -> anyhow::Result<()> {
    let source = load_source(file)?;
    let parse = parse_with(&source.text, &config.parse_options);
    let symbols = label_symbols(&parse);
    if json {
        let rows: Vec<SymbolRow<'_>> = symbols.iter().map(SymbolRow::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render(&symbols));
    }
    Ok(())
}

fn render(symbols: &[LabelSymbol]) -> String {
    let mut out = String::new();
    for symbol in symbols {
        let row = SymbolRow::from(symbol);
        let marker = if row.reset { ":!" } else { ":" };
        out.push_str(&format!(
            "{}{marker} {}:{} ({}..{})\n",
            row.name, row.line, row.column, row.start, row.end
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn renders_one_line_per_label() {
        let parse = mpl_syntax::parse("total: 0;\nreset:! [total];");
        expect![[r#"
            total: 1:1 (0..9)
            reset:! 2:1 (10..26)
        "#]]
        .assert_eq(&render(&label_symbols(&parse)));
    }
}
