//! Lowering of parsed outlines into the portable [`SyntaxForest`].

use crate::parse::{OutlineItem, RawSignature, SourceOutline, Usings};
use extgen_core::{NodeId, SyntaxForest};
use std::collections::HashMap;
use tracing::info;

/// A whole compilation lowered for the generator, plus the side tables the
/// resolver needs.
#[derive(Debug, Default)]
pub struct LoweredProgram {
    pub forest: SyntaxForest,
    /// Raw signatures of method nodes.
    pub signatures: HashMap<NodeId, RawSignature>,
    /// `using` directives per compilation unit.
    pub usings: HashMap<NodeId, Usings>,
}

/// Lower `outlines` in the order given. Callers sort them first; the order
/// becomes the order of the generated text.
#[tracing::instrument(level = "debug", skip_all, fields(files = outlines.len()))]
pub fn lower(outlines: &[SourceOutline]) -> LoweredProgram {
    let mut program = LoweredProgram::default();
    for outline in outlines {
        let unit = program.forest.add_unit(outline.path.clone());
        program.usings.insert(unit, outline.usings.clone());
        for item in &outline.items {
            lower_item(&mut program, unit, item);
        }
    }
    info!(
        nodes = program.forest.len(),
        methods = program.signatures.len(),
        "Lowered outlines"
    );
    program
}

fn lower_item(program: &mut LoweredProgram, parent: NodeId, item: &OutlineItem) {
    let id = program.forest.add_child(
        parent,
        item.kind,
        item.name.clone(),
        item.modifiers.clone(),
        item.span,
    );
    if let Some(sig) = &item.signature {
        program.signatures.insert(id, sig.clone());
    }
    for child in &item.children {
        lower_item(program, id, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_source;
    use extgen_core::NodeKind;

    #[test]
    fn units_follow_input_order_and_members_keep_parents() {
        let a = parse_source("a/A.cs", "namespace N { class A { static void XExtension(int i) {} } }").unwrap();
        let b = parse_source("b/B.cs", "class B { }").unwrap();
        let program = lower(&[a, b]);
        let f = &program.forest;

        let units: Vec<_> = f
            .ids()
            .filter(|id| f.kind(*id) == Some(NodeKind::CompilationUnit))
            .map(|id| f.get(id).unwrap().name.clone())
            .collect();
        assert_eq!(units, vec!["a/A.cs", "b/B.cs"]);

        let method = f
            .ids()
            .find(|id| f.kind(*id) == Some(NodeKind::Method))
            .unwrap();
        let owner = f.parent(method).unwrap();
        assert_eq!(f.get(owner).unwrap().name, "A");
        assert!(program.signatures.contains_key(&method));
        assert_eq!(program.usings.len(), 2);
    }
}
