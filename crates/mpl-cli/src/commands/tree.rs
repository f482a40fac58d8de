//! `mpl tree`: print the concrete syntax tree of a file.

use std::path::Path;

use mpl_syntax::{parse_with, Node, Parse};
use serde_json::{json, Value};

use crate::config::ProjectConfig;
use crate::sources::load_source;

pub fn run(file: &Path, json: bool, config: &ProjectConfig) -> anyhow::Result<()> {
    let source = load_source(file)?;
    let parse = parse_with(&source.text, &config.parse_options);
    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(&parse))?);
    } else {
        print!("{}", mpl_syntax::dump(&parse));
    }
    Ok(())
}

pub(crate) fn to_json(parse: &Parse) -> Value {
    let errors: Vec<Value> = parse
        .errors()
        .iter()
        .map(|err| {
            json!({
                "token": err.token.name(),
                "message": err.message,
                "start": u32::from(err.range.start()),
                "end": u32::from(err.range.end()),
            })
        })
        .collect();
    json!({
        "tree": node_to_json(parse.root()),
        "errors": errors,
    })
}

fn node_to_json(node: Node<'_>) -> Value {
    let mut value = json!({
        "kind": node.kind().name(),
        "start": u32::from(node.begin()),
        "end": u32::from(node.end()),
        "line": node.line(),
        "column": node.column(),
    });
    if node.is_terminal() {
        value["text"] = json!(node.text());
    } else {
        value["children"] = node.children().map(node_to_json).collect();
    }
    value
}
