//! Candidate scanner: which declarations qualify for forwarding.

use crate::model::candidate::EXTENSION_SUFFIX;
use crate::model::forest::{NodeId, NodeKind, SyntaxForest};

const STATIC_MODIFIER: &str = "static";

/// True for a static method-like declaration whose name ends with the suffix
/// and whose immediate parent is a class-like container.
///
/// A method named exactly `Extension` qualifies here; the emitter decides
/// what happens to its empty forwarder name.
pub fn is_candidate(forest: &SyntaxForest, id: NodeId) -> bool {
    let Some(node) = forest.get(id) else {
        return false;
    };
    node.kind == NodeKind::Method
        && node.has_modifier(STATIC_MODIFIER)
        && node.name.ends_with(EXTENSION_SUFFIX)
        && node
            .parent
            .and_then(|p| forest.kind(p))
            .is_some_and(|k| k == NodeKind::Container)
}

/// Every qualifying node, in document order.
pub fn candidates(forest: &SyntaxForest) -> impl Iterator<Item = NodeId> + '_ {
    forest.ids().filter(move |id| is_candidate(forest, *id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::span::Span;

    fn mods(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn accepts_only_static_suffixed_members_of_containers() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("a.cs");
        let ns = f.add_child(unit, NodeKind::BlockNamespace, "Util", vec![], Span::default());
        let class = f.add_child(ns, NodeKind::Container, "MathOps", mods(&["public"]), Span::default());

        let good = f.add_child(
            class,
            NodeKind::Method,
            "AddExtension",
            mods(&["public", "static"]),
            Span::default(),
        );
        let instance = f.add_child(
            class,
            NodeKind::Method,
            "SubExtension",
            mods(&["public"]),
            Span::default(),
        );
        let no_suffix = f.add_child(
            class,
            NodeKind::Method,
            "Mul",
            mods(&["public", "static"]),
            Span::default(),
        );
        let plural = f.add_child(
            class,
            NodeKind::Method,
            "DivExtensions",
            mods(&["static"]),
            Span::default(),
        );
        let local = f.add_child(
            good,
            NodeKind::Method,
            "InnerExtension",
            mods(&["static"]),
            Span::default(),
        );
        let in_namespace = f.add_child(
            ns,
            NodeKind::Method,
            "LooseExtension",
            mods(&["static"]),
            Span::default(),
        );
        let top_level = f.add_child(
            unit,
            NodeKind::Method,
            "TopExtension",
            mods(&["static"]),
            Span::default(),
        );
        let bare = f.add_child(
            class,
            NodeKind::Method,
            "Extension",
            mods(&["static"]),
            Span::default(),
        );

        assert!(is_candidate(&f, good));
        assert!(is_candidate(&f, bare));
        for rejected in [instance, no_suffix, plural, local, in_namespace, top_level, class] {
            assert!(!is_candidate(&f, rejected));
        }
        assert_eq!(candidates(&f).collect::<Vec<_>>(), vec![good, bare]);
    }

    #[test]
    fn static_check_is_case_sensitive() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("a.cs");
        let class = f.add_child(unit, NodeKind::Container, "C", vec![], Span::default());
        let m = f.add_child(
            class,
            NodeKind::Method,
            "FooExtension",
            mods(&["Static"]),
            Span::default(),
        );
        assert!(!is_candidate(&f, m));
    }
}
