//! Syntactic [`SymbolResolver`] over a lowered C# program.

use crate::canonical::{TypeContext, TypeIndex, canonical_type};
use crate::lower::LoweredProgram;
use crate::parse::Usings;
use extgen_core::namespace::namespace_path;
use extgen_core::{
    MethodSymbol, NodeId, NodeKind, OwnerRef, Parameter, SymbolResolver, SyntaxForest,
};
use std::collections::HashMap;

/// Resolves method nodes using the raw signatures and `using` directives
/// captured while parsing, plus an index of the project's own types.
pub struct CsharpResolver<'a> {
    program: &'a LoweredProgram,
    /// Qualified name of every container node.
    qualified: HashMap<NodeId, String>,
    types: TypeIndex,
    no_usings: Usings,
}

impl<'a> CsharpResolver<'a> {
    pub fn new(program: &'a LoweredProgram) -> Self {
        let forest = &program.forest;
        let mut qualified = HashMap::new();
        let mut types = TypeIndex::default();

        for id in forest.ids() {
            let Some(node) = forest.get(id) else { continue };
            if node.kind != NodeKind::Container || node.name.is_empty() {
                continue;
            }
            let name = qualified_container_name(forest, id);
            types.insert(&node.name, name.clone());
            qualified.insert(id, name);
        }

        Self {
            program,
            qualified,
            types,
            no_usings: Usings::default(),
        }
    }

    /// Qualified name of a container node, e.g. `Util.Outer.Inner`.
    pub fn qualified_name(&self, container: NodeId) -> Option<&str> {
        self.qualified.get(&container).map(String::as_str)
    }

    fn usings_for(&self, forest: &SyntaxForest, id: NodeId) -> &Usings {
        forest
            .unit_of(id)
            .and_then(|unit| self.program.usings.get(&unit))
            .unwrap_or(&self.no_usings)
    }
}

impl SymbolResolver for CsharpResolver<'_> {
    fn resolve_method(&self, forest: &SyntaxForest, id: NodeId) -> Option<MethodSymbol> {
        let node = forest.get(id)?;
        let signature = self.program.signatures.get(&id)?;
        if node.name.is_empty() {
            return None;
        }

        let owner_id = node.parent?;
        let owner = forest.get(owner_id)?;
        if owner.kind != NodeKind::Container {
            return None;
        }
        let qualified_name = self.qualified_name(owner_id)?.to_string();

        let ctx = TypeContext {
            usings: self.usings_for(forest, id),
            index: &self.types,
        };
        let parameters = signature
            .parameters
            .iter()
            .map(|p| {
                Parameter::new(p.name.clone(), canonical_type(&p.ty, ctx))
                    .with_modifiers(p.modifiers.clone())
            })
            .collect();

        Some(MethodSymbol {
            name: node.name.clone(),
            parameters,
            return_type: canonical_type(&signature.return_type, ctx),
            containing_type: OwnerRef {
                node: owner_id,
                name: owner.name.clone(),
                qualified_name,
            },
            modifiers: node.modifiers.clone(),
        })
    }
}

/// Namespace path followed by every enclosing container, outermost first.
fn qualified_container_name(forest: &SyntaxForest, id: NodeId) -> String {
    let mut segments: Vec<&str> = forest
        .ancestors(id)
        .take_while(|a| forest.kind(*a) == Some(NodeKind::Container))
        .filter_map(|a| forest.get(a).map(|n| n.name.as_str()))
        .collect();
    segments.reverse();
    let ns = namespace_path(forest, id);

    let mut parts: Vec<&str> = Vec::with_capacity(segments.len() + 2);
    if !ns.is_empty() {
        parts.push(&ns);
    }
    parts.extend(segments);
    if let Some(node) = forest.get(id) {
        parts.push(&node.name);
    }
    parts.join(".")
}
