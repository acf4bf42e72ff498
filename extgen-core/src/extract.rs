//! Symbol extraction: scanner match -> typed [`CandidateMethod`].

use crate::model::candidate::CandidateMethod;
use crate::model::forest::{NodeId, SyntaxForest};
use crate::traits::SymbolResolver;
use tracing::debug;

/// Resolve one accepted node. Nodes the resolver cannot handle are dropped.
pub fn extract(
    forest: &SyntaxForest,
    resolver: &dyn SymbolResolver,
    id: NodeId,
) -> Option<CandidateMethod> {
    let Some(symbol) = resolver.resolve_method(forest, id) else {
        debug!(node = id.index(), "extract: no method symbol, skipped");
        return None;
    };
    let name = symbol.name.clone();
    let candidate = CandidateMethod::from_symbol(id, symbol);
    if candidate.is_none() {
        debug!(node = id.index(), %name, "extract: resolved name lacks suffix, skipped");
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::candidate::Parameter;
    use crate::model::forest::NodeKind;
    use crate::model::span::Span;
    use crate::test_support::TableResolver;

    #[test]
    fn unresolved_nodes_are_dropped_silently() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("a.cs");
        let class = f.add_child(unit, NodeKind::Container, "C", vec![], Span::default());
        let known = f.add_child(class, NodeKind::Method, "AExtension", vec!["static".into()], Span::default());
        let unknown = f.add_child(class, NodeKind::Method, "BExtension", vec!["static".into()], Span::default());

        let mut resolver = TableResolver::default();
        resolver.method(&f, known, vec![Parameter::new("x", "int")], "int");

        let got = extract(&f, &resolver, known).expect("resolved");
        assert_eq!(got.simple_name(), "AExtension");
        assert_eq!(got.owner().qualified_name, "C");
        assert!(extract(&f, &resolver, unknown).is_none());
    }
}
