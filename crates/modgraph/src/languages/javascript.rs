//! JavaScript and TypeScript specifier extraction using tree-sitter.
//!
//! Recognized forms, reported in source order:
//!
//! | Source | Kind |
//! |--------|------|
//! | `import x from "m"`, `import "m"`, `import type { T } from "m"` | `Static` |
//! | `export { x } from "m"`, `export * from "m"` | `ReExport` |
//! | `import x = require("m")` | `ImportEquals` |
//! | `import("m")`, `await import("m")` | `Dynamic` |
//! | `require("m")`, `require("m").prop` | `Require` |
//!
//! Only string literal arguments count; `require(name)` and template
//! strings are skipped.

use std::path::Path;

use tracing::trace;

use super::SourceLanguage;
use super::SpecifierExtractor;
use super::tree_sitter_utils::{node_line, node_text, string_value};
use crate::error::{Error, Result};
use crate::types::{ImportKind, ImportSpecifier};

/// Tree-sitter node kinds and field names used during extraction.
mod node_kinds {
    pub const IMPORT_STATEMENT: &str = "import_statement";
    pub const IMPORT_REQUIRE_CLAUSE: &str = "import_require_clause";
    pub const EXPORT_STATEMENT: &str = "export_statement";
    pub const CALL_EXPRESSION: &str = "call_expression";
    pub const IMPORT: &str = "import";
    pub const IDENTIFIER: &str = "identifier";
    pub const STRING: &str = "string";

    pub const FIELD_SOURCE: &str = "source";
    pub const FIELD_FUNCTION: &str = "function";
    pub const FIELD_ARGUMENTS: &str = "arguments";
}

/// Name of the CommonJS loader function.
const REQUIRE: &str = "require";

/// Tree-sitter backed extractor for `.ts`, `.tsx`, `.js` and friends.
///
/// Files with an unknown extension are parsed as TypeScript, which accepts
/// plain JavaScript as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsExtractor;

impl SpecifierExtractor for JsExtractor {
    fn extract(&self, path: &Path, source: &str) -> Result<Vec<ImportSpecifier>> {
        let language = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(SourceLanguage::from_extension)
            .unwrap_or(SourceLanguage::TypeScript);

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&language.tree_sitter_language())
            .map_err(|e| Error::Parser(e.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parser(format!("failed to parse {}", path.display())))?;

        let specifiers = extract_specifiers(&tree, source.as_bytes());
        trace!(
            path = %path.display(),
            ?language,
            count = specifiers.len(),
            "Extracted import specifiers"
        );
        Ok(specifiers)
    }
}

/// Extract import specifiers from a parsed tree, in source order.
#[must_use]
pub fn extract_specifiers(tree: &tree_sitter::Tree, content: &[u8]) -> Vec<ImportSpecifier> {
    let mut specifiers = Vec::new();
    extract_recursive(&tree.root_node(), content, &mut specifiers);
    specifiers
}

fn extract_recursive(
    node: &tree_sitter::Node,
    content: &[u8],
    specifiers: &mut Vec<ImportSpecifier>,
) {
    use node_kinds::{CALL_EXPRESSION, EXPORT_STATEMENT, FIELD_SOURCE, IMPORT_STATEMENT};

    match node.kind() {
        IMPORT_STATEMENT => {
            // Nothing importable nests inside an import statement
            if let Some(spec) = parse_import_statement(node, content) {
                specifiers.push(spec);
            }
            return;
        }
        EXPORT_STATEMENT => {
            if let Some(source) = node.child_by_field_name(FIELD_SOURCE) {
                if let Some(text) = string_value(&source, content) {
                    specifiers.push(ImportSpecifier::new(
                        text,
                        ImportKind::ReExport,
                        node_line(node),
                    ));
                }
                return;
            }
            // `export const x = require("m")` carries its import deeper down
        }
        CALL_EXPRESSION => {
            if let Some(spec) = parse_call_expression(node, content) {
                specifiers.push(spec);
                return;
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        extract_recursive(&child, content, specifiers);
    }
}

/// `import … from "m"`, `import "m"`, or `import x = require("m")`.
fn parse_import_statement(node: &tree_sitter::Node, content: &[u8]) -> Option<ImportSpecifier> {
    use node_kinds::{FIELD_SOURCE, IMPORT_REQUIRE_CLAUSE};

    let line = node_line(node);
    if let Some(source) = node.child_by_field_name(FIELD_SOURCE) {
        return string_value(&source, content)
            .map(|text| ImportSpecifier::new(text, ImportKind::Static, line));
    }

    let mut cursor = node.walk();
    let clause = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == IMPORT_REQUIRE_CLAUSE)?;
    let source = clause
        .child_by_field_name(FIELD_SOURCE)
        .or_else(|| first_string_child(&clause))?;
    string_value(&source, content).map(|text| ImportSpecifier::new(text, ImportKind::ImportEquals, line))
}

/// `import("m")` or `require("m")`.
fn parse_call_expression(node: &tree_sitter::Node, content: &[u8]) -> Option<ImportSpecifier> {
    use node_kinds::{FIELD_ARGUMENTS, FIELD_FUNCTION, IDENTIFIER, IMPORT};

    let function = node.child_by_field_name(FIELD_FUNCTION)?;
    let kind = match function.kind() {
        IMPORT => ImportKind::Dynamic,
        IDENTIFIER if node_text(&function, content) == Some(REQUIRE) => ImportKind::Require,
        _ => return None,
    };

    let arguments = node.child_by_field_name(FIELD_ARGUMENTS)?;
    let first = arguments.named_child(0)?;
    string_value(&first, content).map(|text| ImportSpecifier::new(text, kind, node_line(node)))
}

fn first_string_child<'tree>(node: &tree_sitter::Node<'tree>) -> Option<tree_sitter::Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() == node_kinds::STRING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn extract(file_name: &str, code: &str) -> Vec<ImportSpecifier> {
        JsExtractor
            .extract(Path::new(file_name), code)
            .expect("extraction should succeed")
    }

    fn texts(specifiers: &[ImportSpecifier]) -> Vec<&str> {
        specifiers.iter().map(|s| s.text.as_str()).collect()
    }

    #[rstest]
    #[case::require_call(r#"var foo = require("bar");"#, &["bar"])]
    #[case::require_property_access(r#"var foo = require("bar").baz;"#, &["bar"])]
    #[case::two_requires(r#"var foo = require("bar"); var baz = require("qux");"#, &["bar", "qux"])]
    #[case::not_a_require("var foo = baz;", &[])]
    #[case::non_literal_require("var foo = require(baz);", &[])]
    #[case::template_require("var foo = require(`./x`);", &[])]
    #[case::require_in_function(r#"function foo(){ var bar = require("bar") }"#, &["bar"])]
    #[case::require_in_branch(r#"if (foo) { var bar = require("barFour") }"#, &["barFour"])]
    fn extracts_commonjs_requires(#[case] code: &str, #[case] expected: &[&str]) {
        for file_name in ["common.js", "common.ts"] {
            let specifiers = extract(file_name, code);
            assert_eq!(texts(&specifiers), expected, "parsing {file_name}");
            assert!(specifiers.iter().all(|s| s.kind == ImportKind::Require));
        }
    }

    #[rstest]
    #[case::default_import(r#"import foo from "foo";"#, "foo", ImportKind::Static)]
    #[case::named_import(r#"import { foo, bar } from "foo";"#, "foo", ImportKind::Static)]
    #[case::namespace_import(r#"import * as ns from "./ns";"#, "./ns", ImportKind::Static)]
    #[case::side_effect_import(r#"import "./polyfill";"#, "./polyfill", ImportKind::Static)]
    #[case::type_import(r#"import type { T } from "./types";"#, "./types", ImportKind::Static)]
    #[case::import_equals(r#"import foo = require("foo");"#, "foo", ImportKind::ImportEquals)]
    #[case::await_import(r#"await import("foo")"#, "foo", ImportKind::Dynamic)]
    #[case::bound_await_import(r#"const bar = await import("foo")"#, "foo", ImportKind::Dynamic)]
    #[case::nested_await_import(
        r#"async function qux(){ const bar = await import("foo") }"#,
        "foo",
        ImportKind::Dynamic
    )]
    #[case::unawaited_import(r#"const lazy = () => import("./lazy");"#, "./lazy", ImportKind::Dynamic)]
    #[case::export_star(r#"export * from "./all";"#, "./all", ImportKind::ReExport)]
    #[case::export_named(r#"export { a, b as c } from "./named";"#, "./named", ImportKind::ReExport)]
    fn extracts_single_typescript_specifier(
        #[case] code: &str,
        #[case] expected: &str,
        #[case] kind: ImportKind,
    ) {
        let specifiers = extract("esm.ts", code);

        assert_eq!(specifiers.len(), 1, "expected exactly one specifier in {code}");
        assert_eq!(specifiers[0].text, expected);
        assert_eq!(specifiers[0].kind, kind);
    }

    #[test]
    fn local_exports_are_not_imports() {
        let specifiers = extract("mod.ts", "export const x = 1;\nexport default function f() {}");

        assert!(specifiers.is_empty());
    }

    #[test]
    fn export_declaration_with_nested_require_is_found() {
        let specifiers = extract("mod.js", r#"export const cfg = require("./cfg.json");"#);

        assert_eq!(texts(&specifiers), vec!["./cfg.json"]);
    }

    #[test]
    fn mixed_forms_keep_source_order() {
        let code = r#"
import foo from "barOne";
const x = require("barTwo").baz;
export * from "barThree";
async function load() { return await import("barFour"); }
if (x) { require("barFive"); }
"#;
        let specifiers = extract("mixed.ts", code);

        assert_eq!(
            texts(&specifiers),
            vec!["barOne", "barTwo", "barThree", "barFour", "barFive"]
        );
        assert_eq!(specifiers[0].line, 2);
        assert_eq!(specifiers[4].line, 6);
    }

    #[test]
    fn parses_jsx_in_javascript_files() {
        let code = r#"import React from "react";
import Button from "./Button";
export const App = () => <Button label="hi" />;
"#;
        let specifiers = extract("App.jsx", code);

        assert_eq!(texts(&specifiers), vec!["react", "./Button"]);
    }

    #[test]
    fn parses_tsx_files() {
        let code = r#"import { Props } from "./props";
export function View(p: Props) { return <div>{p.title}</div>; }
"#;
        let specifiers = extract("View.tsx", code);

        assert_eq!(texts(&specifiers), vec!["./props"]);
    }

    #[test]
    fn single_quoted_specifiers_are_unquoted() {
        let specifiers = extract("q.js", "const a = require('./single');");

        assert_eq!(texts(&specifiers), vec!["./single"]);
    }

    #[test]
    fn empty_source_has_no_specifiers() {
        assert!(extract("empty.ts", "").is_empty());
    }
}
