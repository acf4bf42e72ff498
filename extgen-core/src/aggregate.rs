//! Grouping of candidates by declaring container.

use crate::model::candidate::{CandidateMethod, ExtensionGroup, OwnerKey};
use crate::model::forest::{NodeId, SyntaxForest};
use crate::namespace::namespace_path;
use std::collections::HashMap;

/// Group `candidates` by owner, keeping first-seen order of groups and members.
///
/// The key is explicit (namespace path, container name, declaration index),
/// so same-named containers in different namespaces or different fragments
/// stay apart. Namespace paths are computed once per owner.
pub fn aggregate(forest: &SyntaxForest, candidates: Vec<CandidateMethod>) -> Vec<ExtensionGroup> {
    let mut groups: Vec<ExtensionGroup> = Vec::new();
    let mut index: HashMap<OwnerKey, usize> = HashMap::new();
    let mut paths: HashMap<NodeId, String> = HashMap::new();

    for candidate in candidates {
        let owner = candidate.owner().clone();
        let path = paths
            .entry(owner.node)
            .or_insert_with(|| namespace_path(forest, owner.node))
            .clone();
        let key = OwnerKey {
            namespace_path: path.clone(),
            container_name: owner.name.clone(),
            decl_index: owner.node.index(),
        };

        match index.get(&key) {
            Some(&pos) => groups[pos].members.push(candidate),
            None => {
                index.insert(key.clone(), groups.len());
                let owner_modifiers = forest
                    .get(owner.node)
                    .map(|n| n.modifiers.clone())
                    .unwrap_or_default();
                groups.push(ExtensionGroup {
                    key,
                    owner,
                    owner_modifiers,
                    namespace_path: path,
                    members: vec![candidate],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::model::candidate::Parameter;
    use crate::model::forest::NodeKind;
    use crate::model::span::Span;
    use crate::test_support::TableResolver;

    #[test]
    fn groups_by_container_identity_in_first_seen_order() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("a.cs");
        let ns_a = f.add_child(unit, NodeKind::BlockNamespace, "A", vec![], Span::default());
        let ns_b = f.add_child(unit, NodeKind::BlockNamespace, "B", vec![], Span::default());
        let helpers_a = f.add_child(ns_a, NodeKind::Container, "Helpers", vec!["public".into()], Span::default());
        let helpers_b = f.add_child(ns_b, NodeKind::Container, "Helpers", vec!["internal".into()], Span::default());

        let stat = || vec!["static".to_string()];
        let m1 = f.add_child(helpers_b, NodeKind::Method, "OneExtension", stat(), Span::default());
        let m2 = f.add_child(helpers_a, NodeKind::Method, "TwoExtension", stat(), Span::default());
        let m3 = f.add_child(helpers_b, NodeKind::Method, "ThreeExtension", stat(), Span::default());

        let mut r = TableResolver::default();
        for m in [m1, m2, m3] {
            r.method(&f, m, vec![Parameter::new("s", "string")], "void");
        }
        let candidates = [m1, m2, m3]
            .into_iter()
            .filter_map(|m| extract(&f, &r, m))
            .collect();

        let groups = aggregate(&f, candidates);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].namespace_path, "B");
        assert_eq!(groups[0].owner_modifiers, vec!["internal".to_string()]);
        let names: Vec<_> = groups[0].members.iter().map(|m| m.simple_name()).collect();
        assert_eq!(names, vec!["OneExtension", "ThreeExtension"]);
        assert_eq!(groups[1].namespace_path, "A");
        assert_eq!(groups[1].key.decl_index, helpers_a.index());
    }

    #[test]
    fn split_fragments_of_one_name_stay_separate() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("a.cs");
        let first = f.add_child(unit, NodeKind::Container, "P", vec!["partial".into()], Span::default());
        let second = f.add_child(unit, NodeKind::Container, "P", vec!["partial".into()], Span::default());
        let m1 = f.add_child(first, NodeKind::Method, "XExtension", vec!["static".into()], Span::default());
        let m2 = f.add_child(second, NodeKind::Method, "YExtension", vec!["static".into()], Span::default());

        let mut r = TableResolver::default();
        r.method(&f, m1, vec![Parameter::new("a", "int")], "int");
        r.method(&f, m2, vec![Parameter::new("a", "int")], "int");
        let candidates = [m1, m2].into_iter().filter_map(|m| extract(&f, &r, m)).collect();

        let groups = aggregate(&f, candidates);
        assert_eq!(groups.len(), 2);
        assert_ne!(groups[0].key, groups[1].key);
    }
}
