//! Enclosing namespace path of a container.

use crate::model::forest::{NodeId, NodeKind, SyntaxForest};

/// Dotted namespace path enclosing `container`, or an empty string.
///
/// The nearest namespace ancestor decides: a file-scoped namespace is the
/// whole path; a block namespace is prefixed by every block namespace that
/// directly encloses it.
pub fn namespace_path(forest: &SyntaxForest, container: NodeId) -> String {
    let mut ancestors = forest.ancestors(container);
    let Some(nearest) = ancestors.find(|a| forest.kind(*a).is_some_and(NodeKind::is_namespace))
    else {
        return String::new();
    };

    let Some(node) = forest.get(nearest) else {
        return String::new();
    };
    if node.kind == NodeKind::FileNamespace {
        return node.name.clone();
    }

    let mut segments = vec![node.name.as_str()];
    for outer in ancestors {
        match forest.get(outer) {
            Some(n) if n.kind == NodeKind::BlockNamespace => segments.push(n.name.as_str()),
            _ => break,
        }
    }
    segments.reverse();
    segments.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::span::Span;

    fn child(f: &mut SyntaxForest, parent: NodeId, kind: NodeKind, name: &str) -> NodeId {
        f.add_child(parent, kind, name, vec![], Span::default())
    }

    #[test]
    fn nested_block_namespaces_join_with_dots() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("a.cs");
        let a = child(&mut f, unit, NodeKind::BlockNamespace, "A");
        let b = child(&mut f, a, NodeKind::BlockNamespace, "B");
        let c = child(&mut f, b, NodeKind::Container, "C");
        assert_eq!(namespace_path(&f, c), "A.B");
    }

    #[test]
    fn dotted_block_names_are_kept() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("a.cs");
        let outer = child(&mut f, unit, NodeKind::BlockNamespace, "Company.Product");
        let inner = child(&mut f, outer, NodeKind::BlockNamespace, "Core");
        let c = child(&mut f, inner, NodeKind::Container, "C");
        assert_eq!(namespace_path(&f, c), "Company.Product.Core");
    }

    #[test]
    fn file_scoped_namespace_is_the_whole_path() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("a.cs");
        let ns = child(&mut f, unit, NodeKind::FileNamespace, "App.Services");
        let c = child(&mut f, ns, NodeKind::Container, "C");
        assert_eq!(namespace_path(&f, c), "App.Services");
    }

    #[test]
    fn nested_containers_skip_to_the_namespace() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("a.cs");
        let ns = child(&mut f, unit, NodeKind::BlockNamespace, "Util");
        let outer = child(&mut f, ns, NodeKind::Container, "Outer");
        let inner = child(&mut f, outer, NodeKind::Container, "Inner");
        assert_eq!(namespace_path(&f, inner), "Util");
    }

    #[test]
    fn no_namespace_gives_empty_path() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("a.cs");
        let c = child(&mut f, unit, NodeKind::Container, "C");
        assert_eq!(namespace_path(&f, c), "");
    }
}
