//! Canonical rendering of C# type text.
//!
//! Without a compiler at hand, "canonical" means: aliases expanded, BCL
//! primitive names shown as keywords, project types qualified, whitespace
//! normalized. Anything the resolver cannot place is kept as written.

use crate::parse::Usings;
use std::collections::HashMap;

/// `System` primitive names and their keyword display form.
const KEYWORD_TYPES: &[(&str, &str)] = &[
    ("Boolean", "bool"),
    ("Byte", "byte"),
    ("SByte", "sbyte"),
    ("Char", "char"),
    ("Decimal", "decimal"),
    ("Double", "double"),
    ("Single", "float"),
    ("Int16", "short"),
    ("UInt16", "ushort"),
    ("Int32", "int"),
    ("UInt32", "uint"),
    ("Int64", "long"),
    ("UInt64", "ulong"),
    ("Object", "object"),
    ("String", "string"),
    ("Void", "void"),
];

/// Simple type names declared in the project, mapped to their qualified names.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    by_simple: HashMap<String, Vec<String>>,
}

impl TypeIndex {
    pub fn insert(&mut self, simple: &str, qualified: String) {
        let slot = self.by_simple.entry(simple.to_string()).or_default();
        if !slot.contains(&qualified) {
            slot.push(qualified);
        }
    }

    /// Qualified name when exactly one project type has this simple name.
    pub fn unique(&self, simple: &str) -> Option<&str> {
        match self.by_simple.get(simple).map(Vec::as_slice) {
            Some([only]) => Some(only.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeContext<'a> {
    pub usings: &'a Usings,
    pub index: &'a TypeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Dotted name chain, e.g. `System.Collections.Generic.List`.
    Name(String),
    Punct(char),
}

/// Canonical form of the type text `raw`.
pub fn canonical_type(raw: &str, ctx: TypeContext<'_>) -> String {
    render(&tokenize(raw), ctx, true)
}

fn render(tokens: &[Token], ctx: TypeContext<'_>, expand_aliases: bool) -> String {
    let mut out = String::new();
    let mut prev_name = false;
    let mut rank_depth = 0usize;
    for token in tokens {
        match token {
            Token::Name(chain) => {
                if prev_name {
                    // Tuple element name: `(int count, string name)`.
                    out.push(' ');
                    out.push_str(chain);
                } else {
                    out.push_str(&canonical_name(chain, ctx, expand_aliases));
                }
                prev_name = true;
            }
            Token::Punct(',') => {
                // Array ranks stay compact: `int[,]`.
                out.push_str(if rank_depth > 0 { "," } else { ", " });
                prev_name = false;
            }
            Token::Punct(c) => {
                match *c {
                    '[' => rank_depth += 1,
                    ']' => rank_depth = rank_depth.saturating_sub(1),
                    _ => {}
                }
                out.push(*c);
                prev_name = false;
            }
        }
    }
    out
}

fn canonical_name(chain: &str, ctx: TypeContext<'_>, expand_aliases: bool) -> String {
    if let Some(rest) = chain.strip_prefix("global::") {
        return keyword_for(rest, ctx.usings).unwrap_or(rest).to_string();
    }

    let (head, tail) = match chain.split_once('.') {
        Some((h, t)) => (h, Some(t)),
        None => (chain, None),
    };

    if expand_aliases {
        if let Some(target) = ctx.usings.aliases.get(head) {
            // Alias targets are resolved without further alias expansion.
            let expanded = render(&tokenize(target), ctx, false);
            return match tail {
                Some(t) => format!("{expanded}.{t}"),
                None => expanded,
            };
        }
    }

    if let Some(keyword) = keyword_for(chain, ctx.usings) {
        return keyword.to_string();
    }

    if tail.is_none() {
        if let Some(qualified) = ctx.index.unique(head) {
            return qualified.to_string();
        }
    }
    chain.to_string()
}

fn keyword_for(chain: &str, usings: &Usings) -> Option<&'static str> {
    let simple = match chain.strip_prefix("System.") {
        Some(rest) => rest,
        None if usings.imports("System") => chain,
        None => return None,
    };
    KEYWORD_TYPES
        .iter()
        .find(|(name, _)| *name == simple)
        .map(|(_, keyword)| *keyword)
}

fn tokenize(raw: &str) -> Vec<Token> {
    let chars: Vec<char> = raw.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if is_ident_char(c) {
            let mut chain = String::new();
            loop {
                while i < chars.len() && is_ident_char(chars[i]) {
                    chain.push(chars[i]);
                    i += 1;
                }
                let j = skip_ws(&chars, i);
                if chars.get(j) == Some(&'.') {
                    let k = skip_ws(&chars, j + 1);
                    if chars.get(k).is_some_and(|c| is_ident_char(*c)) {
                        chain.push('.');
                        i = k;
                        continue;
                    }
                } else if chars.get(j) == Some(&':') && chars.get(j + 1) == Some(&':') {
                    let k = skip_ws(&chars, j + 2);
                    if chars.get(k).is_some_and(|c| is_ident_char(*c)) {
                        chain.push_str("::");
                        i = k;
                        continue;
                    }
                }
                break;
            }
            tokens.push(Token::Name(chain));
        } else {
            tokens.push(Token::Punct(c));
            i += 1;
        }
    }
    tokens
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '@'
}

fn skip_ws(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}
