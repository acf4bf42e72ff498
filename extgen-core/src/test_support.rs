//! Table-driven resolver for unit tests.

use crate::model::candidate::{MethodSymbol, OwnerRef, Parameter};
use crate::model::forest::{NodeId, SyntaxForest};
use crate::namespace::namespace_path;
use crate::traits::SymbolResolver;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct TableResolver {
    symbols: HashMap<NodeId, MethodSymbol>,
}

impl TableResolver {
    /// Register `id` with name, modifiers and owner taken from the forest.
    pub fn method(&mut self, forest: &SyntaxForest, id: NodeId, parameters: Vec<Parameter>, ret: &str) {
        let node = forest.get(id).expect("node in forest");
        let owner_id = node.parent.expect("method has a parent");
        let owner = forest.get(owner_id).expect("owner in forest");
        let ns = namespace_path(forest, owner_id);
        let qualified_name = if ns.is_empty() {
            owner.name.clone()
        } else {
            format!("{ns}.{}", owner.name)
        };
        self.symbols.insert(
            id,
            MethodSymbol {
                name: node.name.clone(),
                parameters,
                return_type: ret.to_string(),
                containing_type: OwnerRef {
                    node: owner_id,
                    name: owner.name.clone(),
                    qualified_name,
                },
                modifiers: node.modifiers.clone(),
            },
        );
    }
}

impl SymbolResolver for TableResolver {
    fn resolve_method(&self, _forest: &SyntaxForest, id: NodeId) -> Option<MethodSymbol> {
        self.symbols.get(&id).cloned()
    }
}
