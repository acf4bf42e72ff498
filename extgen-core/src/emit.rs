//! Rendering of extension groups into one C# source unit.
//!
//! Layout of the unit:
//!
//! ```text
//! // <auto-generated/>
//!
//! namespace Util
//! {
//!     public static class MathOpsExtensions
//!     {
//!         public static int Add(this int x, int y) => Util.MathOps.AddExtension(x, y);
//!     }
//! }
//! ```
//!
//! Groups are separated by one blank line. Indentation is four spaces and
//! lines end with `\n`, so identical groups always render to identical bytes.

use crate::errors::Result;
use crate::model::candidate::{
    CandidateMethod, Diagnostic, DiagnosticCode, ExtensionGroup, GENERATED_HINT_NAME,
    GeneratedUnit, Parameter,
};
use std::fmt::Write;
use tracing::{debug, warn};

const HEADER: &str = "// <auto-generated/>";
const INDENT: &str = "    ";
const RECEIVER: &str = "this";
const STATIC_MODIFIER: &str = "static";

/// Parameter tokens that must be repeated at the call site.
const CALL_SITE_MODIFIERS: [&str; 3] = ["ref", "out", "in"];

/// Output of the rendering stage.
#[derive(Debug, Clone)]
pub struct Emission {
    pub unit: GeneratedUnit,
    pub diagnostics: Vec<Diagnostic>,
}

/// Render every group, in order, into the single generated unit.
pub fn emit(groups: &[ExtensionGroup]) -> Result<Emission> {
    let mut text = String::new();
    let mut diagnostics = Vec::new();
    let mut rendered_groups = 0usize;
    let mut rendered_members = 0usize;

    writeln!(text, "{HEADER}")?;

    for group in groups {
        let members = emittable_members(group, &mut diagnostics);
        if members.is_empty() {
            debug!(owner = %group.owner.qualified_name, "emit: nothing left to render");
            continue;
        }
        writeln!(text)?;
        render_group(&mut text, group, &members, &mut diagnostics)?;
        rendered_groups += 1;
        rendered_members += members.len();
    }

    Ok(Emission {
        unit: GeneratedUnit {
            hint_name: GENERATED_HINT_NAME,
            text,
            groups: rendered_groups,
            members: rendered_members,
        },
        diagnostics,
    })
}

/// Members with a usable forwarder name; the rest become diagnostics.
fn emittable_members<'g>(
    group: &'g ExtensionGroup,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<&'g CandidateMethod> {
    let mut kept = Vec::with_capacity(group.members.len());
    for member in &group.members {
        if member.forward_name().is_empty() {
            let message = format!(
                "`{}.{}` has no name left once the suffix is removed; no forwarder generated",
                member.owner().qualified_name,
                member.simple_name()
            );
            warn!("emit: {message}");
            diagnostics.push(Diagnostic {
                code: DiagnosticCode::EmptyForwardName,
                message,
                node: member.node(),
            });
            continue;
        }
        kept.push(member);
    }
    kept
}

fn render_group(
    out: &mut String,
    group: &ExtensionGroup,
    members: &[&CandidateMethod],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<()> {
    let wrapped = !group.namespace_path.is_empty();
    let pad = if wrapped { INDENT } else { "" };

    if wrapped {
        writeln!(out, "namespace {}", group.namespace_path)?;
        writeln!(out, "{{")?;
    }

    writeln!(
        out,
        "{pad}{} class {}",
        wrapper_modifiers(&group.owner_modifiers),
        group.wrapper_name()
    )?;
    writeln!(out, "{pad}{{")?;
    for member in members {
        if member.parameters().is_empty() {
            let message = format!(
                "`{}.{}` has no parameters; forwarded without a receiver",
                member.owner().qualified_name,
                member.simple_name()
            );
            warn!("emit: {message}");
            diagnostics.push(Diagnostic {
                code: DiagnosticCode::MissingReceiver,
                message,
                node: member.node(),
            });
        }
        writeln!(out, "{pad}{INDENT}{}", forwarder_line(member))?;
    }
    writeln!(out, "{pad}}}")?;

    if wrapped {
        writeln!(out, "}}")?;
    }
    Ok(())
}

/// Owner tokens verbatim, plus `static` when the owner is not static already.
fn wrapper_modifiers(owner_modifiers: &[String]) -> String {
    let mut tokens: Vec<&str> = owner_modifiers.iter().map(String::as_str).collect();
    if !tokens.contains(&STATIC_MODIFIER) {
        tokens.push(STATIC_MODIFIER);
    }
    tokens.join(" ")
}

/// `<modifiers> <ret> <Name>(<params>) => <Owner>.<Original>(<args>);`
fn forwarder_line(member: &CandidateMethod) -> String {
    let params = member
        .parameters()
        .iter()
        .enumerate()
        .map(|(i, p)| declared_parameter(p, i == 0))
        .collect::<Vec<_>>()
        .join(", ");
    let args = member
        .parameters()
        .iter()
        .map(call_argument)
        .collect::<Vec<_>>()
        .join(", ");

    let mut head: Vec<&str> = member.modifiers().iter().map(String::as_str).collect();
    head.push(member.return_type());
    head.push(member.forward_name());

    format!(
        "{}({params}) => {}.{}({args});",
        head.join(" "),
        member.owner().qualified_name,
        member.simple_name()
    )
}

fn declared_parameter(p: &Parameter, receiver: bool) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(p.modifiers.len() + 3);
    if receiver {
        parts.push(RECEIVER);
    }
    parts.extend(p.modifiers.iter().map(String::as_str));
    parts.push(&p.ty);
    parts.push(&p.name);
    parts.join(" ")
}

fn call_argument(p: &Parameter) -> String {
    match p
        .modifiers
        .iter()
        .find(|m| CALL_SITE_MODIFIERS.contains(&m.as_str()))
    {
        Some(m) => format!("{m} {}", p.name),
        None => p.name.clone(),
    }
}
