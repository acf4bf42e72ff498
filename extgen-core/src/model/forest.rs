//! Portable syntax forest shared by every host adapter.
//!
//! A host lowers its own syntax trees into this arena: one `CompilationUnit`
//! root per source file, with namespaces, containers and method-like
//! declarations hanging below it. Member bodies and other statements are not
//! represented; only what the pipeline classifies is kept.
//!
//! Node ids are handed out in insertion order. Adapters insert in pre-order,
//! so ascending ids are document order across the whole forest.

use crate::model::span::Span;
use serde::{Deserialize, Serialize};

/// Opaque handle of a node inside one [`SyntaxForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena (document order).
    pub fn index(self) -> usize {
        self.0
    }
}

/// Structural classification of a forest node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// One source file; `name` is its repository-relative path.
    CompilationUnit,
    /// Namespace that may contain further namespaces (`namespace A { }`).
    BlockNamespace,
    /// Namespace covering the rest of its file (`namespace A;`).
    FileNamespace,
    /// Class-like declaration: class, struct, record, interface.
    Container,
    /// Method-like declaration: method or local function.
    Method,
}

impl NodeKind {
    pub fn is_namespace(self) -> bool {
        matches!(self, NodeKind::BlockNamespace | NodeKind::FileNamespace)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Simple name as written (namespaces keep their dotted name).
    pub name: String,
    /// Modifier tokens in source order, opaque to the pipeline.
    pub modifiers: Vec<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub span: Span,
}

impl SyntaxNode {
    pub fn has_modifier(&self, token: &str) -> bool {
        self.modifiers.iter().any(|m| m == token)
    }
}

/// Arena holding every lowered file of one compilation.
#[derive(Debug, Clone, Default)]
pub struct SyntaxForest {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new file root.
    pub fn add_unit(&mut self, path: impl Into<String>) -> NodeId {
        self.push(SyntaxNode {
            kind: NodeKind::CompilationUnit,
            name: path.into(),
            modifiers: Vec::new(),
            parent: None,
            children: Vec::new(),
            span: Span::default(),
        })
    }

    /// Append a declaration below `parent`.
    ///
    /// `parent` must come from this forest; a foreign id is attached as a
    /// detached root instead of panicking.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: impl Into<String>,
        modifiers: Vec<String>,
        span: Span,
    ) -> NodeId {
        let attached = (parent.0 < self.nodes.len()).then_some(parent);
        let id = self.push(SyntaxNode {
            kind,
            name: name.into(),
            modifiers,
            parent: attached,
            children: Vec::new(),
            span,
        });
        if let Some(p) = attached {
            self.nodes[p.0].children.push(id);
        }
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.0)
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            forest: self,
            next: self.parent(id),
        }
    }

    /// All node ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// The `CompilationUnit` that contains `id` (or `id` itself).
    pub fn unit_of(&self, id: NodeId) -> Option<NodeId> {
        if self.kind(id) == Some(NodeKind::CompilationUnit) {
            return Some(id);
        }
        self.ancestors(id)
            .find(|a| self.kind(*a) == Some(NodeKind::CompilationUnit))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: SyntaxNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

pub struct Ancestors<'a> {
    forest: &'a SyntaxForest,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        self.next = self.forest.parent(cur);
        Some(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_insertion_and_ancestors_walk_up() {
        let mut f = SyntaxForest::new();
        let unit = f.add_unit("src/A.cs");
        let ns = f.add_child(unit, NodeKind::BlockNamespace, "A", vec![], Span::default());
        let class = f.add_child(ns, NodeKind::Container, "C", vec![], Span::default());
        let m = f.add_child(
            class,
            NodeKind::Method,
            "FooExtension",
            vec!["static".into()],
            Span::default(),
        );

        assert_eq!(f.ids().collect::<Vec<_>>(), vec![unit, ns, class, m]);
        assert_eq!(f.ancestors(m).collect::<Vec<_>>(), vec![class, ns, unit]);
        assert_eq!(f.unit_of(m), Some(unit));
        assert_eq!(f.get(ns).map(|n| n.children.clone()), Some(vec![class]));
        assert!(f.get(m).is_some_and(|n| n.has_modifier("static")));
    }

    #[test]
    fn foreign_parent_becomes_detached_root() {
        let mut other = SyntaxForest::new();
        other.add_unit("a.cs");
        let foreign = other.add_unit("b.cs");

        let mut f = SyntaxForest::new();
        let id = f.add_child(foreign, NodeKind::Container, "C", vec![], Span::default());
        assert_eq!(f.parent(id), None);
        assert_eq!(f.unit_of(id), None);
    }
}
