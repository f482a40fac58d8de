//! Go to definition.
//!
//! MPL has no scoping rules beyond "a label is visible after it is
//! declared", so resolution is textual: from the name under the caret, walk
//! the token list backwards and stop at the first label with the same bare
//! name. When the current document has no such label, every label of that
//! name in the project is a candidate.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use tracing::debug;

use mpl_syntax::{Node, Parse, Strategy};

use crate::symbols::{extract_name, labels};

/// Identifies one document among several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// Where a label is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// The label's name.
    pub name: SmolStr,
    /// Span of the label's name terminal.
    pub range: TextRange,
    /// Zero-based line of the name.
    pub line: u32,
    /// Zero-based byte column of the name.
    pub column: u32,
}

impl Definition {
    fn from_label_name(name: Node<'_>) -> Self {
        Self {
            name: SmolStr::new(name.text()),
            range: name.range(),
            line: name.line(),
            column: name.column(),
        }
    }
}

/// A definition in a specific document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionResult {
    /// The document containing the definition.
    pub file_id: FileId,
    /// The definition itself.
    pub definition: Definition,
}

/// The name terminal touching `offset`, if any.
///
/// A caret right after the last character of a name still counts as being on
/// that name.
#[must_use]
pub fn name_at(parse: &Parse, offset: TextSize) -> Option<Node<'_>> {
    let around = parse.root().surroundings(offset, Strategy::NearLeftFarRight);
    [around.left, around.right]
        .into_iter()
        .flatten()
        .find(|node| node.looks_like_name() && node.begin() <= offset && offset <= node.end())
}

/// The closest label declared at or before the name under the caret.
#[must_use]
pub fn goto_definition(parse: &Parse, offset: TextSize) -> Option<Definition> {
    let name = name_at(parse, offset)?;
    find_label_before(name, extract_name(name))
}

fn find_label_before(from: Node<'_>, name: &str) -> Option<Definition> {
    from.tokens_back()
        .find(|token| token.is_label_name() && token.text() == name)
        .map(Definition::from_label_name)
}

/// Every label called `name` across `files`, in file order then document
/// order.
pub fn find_definitions<'a, I>(files: I, name: &str) -> Vec<DefinitionResult>
where
    I: IntoIterator<Item = (FileId, &'a Parse)>,
{
    let mut results = Vec::new();
    for (file_id, parse) in files {
        results.extend(
            labels(parse.tree())
                .filter_map(Node::label_name)
                .filter(|label| label.text() == name)
                .map(|label| DefinitionResult {
                    file_id,
                    definition: Definition::from_label_name(label),
                }),
        );
    }
    results
}

/// Resolves the name at `offset` in `file_id`, falling back to a search of
/// all `files` when the document itself has no earlier declaration.
pub fn goto_definition_in_files<'a, I>(
    files: I,
    file_id: FileId,
    offset: TextSize,
) -> Vec<DefinitionResult>
where
    I: IntoIterator<Item = (FileId, &'a Parse)> + Clone,
{
    let Some(current) = files
        .clone()
        .into_iter()
        .find_map(|(id, parse)| (id == file_id).then_some(parse))
    else {
        return Vec::new();
    };
    let Some(name) = name_at(current, offset) else {
        return Vec::new();
    };
    let bare = extract_name(name);
    if let Some(definition) = find_label_before(name, bare) {
        return vec![DefinitionResult {
            file_id,
            definition,
        }];
    }
    debug!(name = bare, "no local definition, searching all files");
    find_definitions(files, bare)
}
