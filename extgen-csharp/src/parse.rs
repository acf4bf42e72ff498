//! C# parsing with tree-sitter into a plain declaration outline.
//!
//! The outline keeps only what the generator needs: namespaces, class-like
//! containers, method-like declarations with their raw signatures, and the
//! file's `using` directives. It owns its data so parsing can run on worker
//! threads and be joined later.

use anyhow::{Context, Result, anyhow};
use extgen_core::{NodeKind, Span};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use tree_sitter::{Language, Node, Parser};

/// Returns the C# language for tree-sitter.
#[inline]
fn csharp_language() -> Language {
    tree_sitter_c_sharp::LANGUAGE.into()
}

/// Tokens kept as declaration modifiers when the grammar exposes them as
/// bare keywords instead of `modifier` nodes.
const MODIFIER_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "internal", "static", "partial", "sealed", "abstract",
    "virtual", "override", "new", "extern", "unsafe", "async", "readonly", "file", "required",
];

/// Parameter passing tokens. `this` is recognised but never stored.
const PARAMETER_KEYWORDS: &[&str] = &["this", "scoped", "ref", "out", "in", "params", "readonly"];

const CONTAINER_KINDS: &[&str] = &[
    "class_declaration",
    "struct_declaration",
    "record_declaration",
    "record_struct_declaration",
    "interface_declaration",
];

/// `using` directives of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usings {
    /// `using Alias = Target;`
    pub aliases: BTreeMap<String, String>,
    /// `using Some.Namespace;`
    pub namespaces: Vec<String>,
}

impl Usings {
    pub fn imports(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|n| n == namespace)
    }
}

/// Parameter exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameter {
    pub name: String,
    pub ty: String,
    pub modifiers: Vec<String>,
}

/// Method signature exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSignature {
    pub return_type: String,
    pub parameters: Vec<RawParameter>,
}

#[derive(Debug, Clone)]
pub struct OutlineItem {
    pub kind: NodeKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub span: Span,
    /// Present for methods whose return type and parameter list parsed.
    pub signature: Option<RawSignature>,
    pub children: Vec<OutlineItem>,
}

#[derive(Debug, Clone)]
pub struct SourceOutline {
    /// Repository-relative path.
    pub path: String,
    pub usings: Usings,
    pub items: Vec<OutlineItem>,
    /// The tree contained error-recovery nodes.
    pub has_errors: bool,
}

/// Parse one C# file.
pub fn parse_source(path: &str, code: &str) -> Result<SourceOutline> {
    let mut parser = Parser::new();
    parser
        .set_language(&csharp_language())
        .context("load tree-sitter C# grammar")?;
    let tree = parser
        .parse(code, None)
        .ok_or_else(|| anyhow!("tree-sitter produced no tree for {path}"))?;
    let root = tree.root_node();

    let mut outline = SourceOutline {
        path: path.to_string(),
        usings: Usings::default(),
        items: Vec::new(),
        has_errors: root.has_error(),
    };
    if outline.has_errors {
        warn!(path, "parse: syntax errors, outline may be partial");
    }

    let children = named_children(root);
    collect_items(&children, code, &mut outline.items, &mut outline.usings);
    debug!(path, items = outline.items.len(), "parse: outline built");
    Ok(outline)
}

/// Collect declarations from sibling nodes. A file-scoped namespace adopts
/// every sibling that follows it.
fn collect_items(nodes: &[Node], code: &str, out: &mut Vec<OutlineItem>, usings: &mut Usings) {
    for (i, node) in nodes.iter().enumerate() {
        match node.kind() {
            "using_directive" => read_using(*node, code, usings),
            "namespace_declaration" => {
                let mut item = outline_item(*node, code, NodeKind::BlockNamespace, namespace_name(*node, code));
                if let Some(body) = node.child_by_field_name("body") {
                    collect_items(&named_children(body), code, &mut item.children, usings);
                }
                out.push(item);
            }
            "file_scoped_namespace_declaration" => {
                let mut item = outline_item(*node, code, NodeKind::FileNamespace, namespace_name(*node, code));
                // Some grammar versions nest the members, others leave them as siblings.
                collect_items(&named_children(*node), code, &mut item.children, usings);
                collect_items(&nodes[i + 1..], code, &mut item.children, usings);
                out.push(item);
                return;
            }
            kind if CONTAINER_KINDS.contains(&kind) => {
                let name = field_text(*node, "name", code).unwrap_or_default();
                let mut item = outline_item(*node, code, NodeKind::Container, name);
                if let Some(body) = node.child_by_field_name("body") {
                    collect_items(&named_children(body), code, &mut item.children, usings);
                }
                out.push(item);
            }
            "method_declaration" | "local_function_statement" => out.push(method_item(*node, code)),
            "global_statement" => collect_local_functions(*node, code, out),
            _ => {}
        }
    }
}

fn method_item(node: Node, code: &str) -> OutlineItem {
    let name = field_text(node, "name", code).unwrap_or_default();
    let mut item = outline_item(node, code, NodeKind::Method, name);
    item.signature = read_signature(node, code);
    if let Some(body) = node.child_by_field_name("body") {
        collect_local_functions(body, code, &mut item.children);
    }
    item
}

/// Local functions anywhere below `node`, each with its own nested locals.
fn collect_local_functions(node: Node, code: &str, out: &mut Vec<OutlineItem>) {
    for child in named_children(node) {
        if child.kind() == "local_function_statement" {
            out.push(method_item(child, code));
        } else {
            collect_local_functions(child, code, out);
        }
    }
}

fn outline_item(node: Node, code: &str, kind: NodeKind, name: String) -> OutlineItem {
    OutlineItem {
        kind,
        name,
        modifiers: read_modifiers(node, code),
        span: span_of(node),
        signature: None,
        children: Vec::new(),
    }
}

fn read_signature(node: Node, code: &str) -> Option<RawSignature> {
    let returns = node
        .child_by_field_name("returns")
        .or_else(|| node.child_by_field_name("type"))?;
    let list = node.child_by_field_name("parameters")?;
    let parameters = read_parameter_list(list, code)?;

    Some(RawSignature {
        return_type: squash(text(returns, code)),
        parameters,
    })
}

/// Parameters in declaration order. A `params` element may come as a bare
/// `params` token followed by `type:`/`name:` fields on the list itself.
fn read_parameter_list(list: Node, code: &str) -> Option<Vec<RawParameter>> {
    let mut parameters = Vec::new();
    let mut pending: Option<(Option<String>, Option<String>)> = None;

    let mut cursor = list.walk();
    if !cursor.goto_first_child() {
        return Some(parameters);
    }
    loop {
        let child = cursor.node();
        match (child.kind(), cursor.field_name()) {
            ("parameter" | "parameter_array", _) => parameters.push(read_parameter(child, code)?),
            ("params", _) if !child.is_named() => pending = Some((None, None)),
            (_, Some("type")) if pending.is_some() => {
                if let Some((ty, _)) = pending.as_mut() {
                    *ty = Some(squash(text(child, code)));
                }
            }
            (_, Some("name")) if pending.is_some() => {
                if let Some((_, name)) = pending.as_mut() {
                    *name = Some(text(child, code).to_string());
                }
            }
            _ => {}
        }
        if let Some((Some(ty), Some(name))) = &pending {
            parameters.push(RawParameter {
                name: name.clone(),
                ty: ty.clone(),
                modifiers: vec!["params".to_string()],
            });
            pending = None;
        }
        if !cursor.goto_next_sibling() {
            break;
        }
    }
    Some(parameters)
}

fn read_parameter(node: Node, code: &str) -> Option<RawParameter> {
    let name = node.child_by_field_name("name").map(|n| text(n, code).to_string());
    let ty = node.child_by_field_name("type").map(|n| squash(text(n, code)));
    match (name, ty) {
        (Some(name), Some(ty)) => {
            let mut modifiers = parameter_modifiers(node, code);
            let ty = hoist_type_keywords(&ty, &mut modifiers);
            Some(RawParameter { name, ty, modifiers })
        }
        _ => parse_parameter_text(text(node, code)),
    }
}

/// Some grammar versions fold `ref`/`out`/`in` into the type node
/// (`ref int`); move them back to the modifiers.
fn hoist_type_keywords(ty: &str, modifiers: &mut Vec<String>) -> String {
    let mut rest = ty.trim();
    while let Some((word, tail)) = rest.split_once(char::is_whitespace) {
        if !PARAMETER_KEYWORDS.contains(&word) {
            break;
        }
        if word != "this" && !modifiers.iter().any(|m| m == word) {
            modifiers.push(word.to_string());
        }
        rest = tail.trim_start();
    }
    rest.to_string()
}

/// Passing keywords of a parameter, in source order, without `this`.
fn parameter_modifiers(node: Node, code: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let token = match child.kind() {
            "modifier" | "parameter_modifier" => text(child, code),
            kind => kind,
        };
        if PARAMETER_KEYWORDS.contains(&token) && token != "this" {
            out.push(token.to_string());
        }
    }
    out
}

/// Text fallback for parameter shapes without `name`/`type` fields,
/// e.g. `[NotNull] params int[] values = null`.
fn parse_parameter_text(raw: &str) -> Option<RawParameter> {
    let mut rest = raw.trim();
    while rest.starts_with('[') {
        let close = matching_bracket(rest)?;
        rest = rest[close + 1..].trim_start();
    }
    let rest = top_level_split(rest, '=').trim();

    let name_start = rest
        .rfind(|c: char| !(c.is_alphanumeric() || c == '_' || c == '@'))
        .map_or(0, |i| i + 1);
    let name = &rest[name_start..];
    let mut head = rest[..name_start].trim();
    if name.is_empty() || head.is_empty() {
        return None;
    }

    let mut modifiers = Vec::new();
    loop {
        let Some((word, tail)) = head.split_once(char::is_whitespace) else {
            break;
        };
        if !PARAMETER_KEYWORDS.contains(&word) {
            break;
        }
        if word != "this" {
            modifiers.push(word.to_string());
        }
        head = tail.trim_start();
    }

    Some(RawParameter {
        name: name.to_string(),
        ty: squash(head),
        modifiers,
    })
}

fn read_modifiers(node: Node, code: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "modifier" {
            out.push(text(child, code).to_string());
        } else if !child.is_named() && MODIFIER_KEYWORDS.contains(&child.kind()) {
            out.push(child.kind().to_string());
        }
    }
    out
}

fn read_using(node: Node, code: &str, usings: &mut Usings) {
    let raw = text(node, code).trim();
    let raw = raw.strip_prefix("global").map(str::trim_start).unwrap_or(raw);
    let Some(body) = raw.strip_prefix("using") else {
        return;
    };
    let body = body.trim().trim_end_matches(';').trim();
    if body.starts_with("static ") {
        return;
    }
    match body.split_once('=') {
        Some((alias, target)) => {
            usings
                .aliases
                .insert(alias.trim().to_string(), squash(target));
        }
        None if !body.is_empty() => usings.namespaces.push(squash(body)),
        None => {}
    }
}

fn namespace_name(node: Node, code: &str) -> String {
    field_text(node, "name", code)
        .map(|n| n.split_whitespace().collect())
        .unwrap_or_default()
}

// --- helpers ---

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn field_text(node: Node, field: &str, code: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| text(n, code).trim().to_string())
}

fn text<'a>(node: Node, code: &'a str) -> &'a str {
    node.utf8_text(code.as_bytes()).unwrap_or_default()
}

fn span_of(node: Node) -> Span {
    Span::new(
        node.start_position().row + 1,
        node.end_position().row + 1,
        node.start_byte(),
        node.end_byte(),
    )
}

/// Collapse runs of whitespace into single spaces.
fn squash(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Index of the bracket closing the `[` that starts `s`.
fn matching_bracket(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Part of `s` before the first `sep` outside any bracket pair.
fn top_level_split(s: &str, sep: char) -> &str {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            c if c == sep && depth == 0 => return &s[..i],
            _ => {}
        }
    }
    s
}
