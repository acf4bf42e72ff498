//! Seams between the pipeline and its host.
//!
//! The pipeline never reads files or talks to a compiler. A host supplies a
//! [`SymbolResolver`] over the forest it lowered and receives the generated
//! text through a [`HostSink`].

use crate::errors::{Error, Result};
use crate::model::{candidate::MethodSymbol, forest::NodeId, forest::SyntaxForest};
use std::collections::BTreeMap;

/// Resolves a declaration node into a fully typed method symbol.
pub trait SymbolResolver {
    /// Return `None` when the host cannot produce a method symbol for `id`;
    /// the node is then left out of the output.
    fn resolve_method(&self, forest: &SyntaxForest, id: NodeId) -> Option<MethodSymbol>;
}

/// Receives generated source text and feeds it back to the compilation.
pub trait HostSink {
    /// Register `text` under `hint_name`, replacing anything registered before.
    fn add_source(&mut self, hint_name: &str, text: &str) -> Result<()>;
}

/// In-process sink keyed by hint name.
#[derive(Debug, Default)]
pub struct MemorySink {
    sources: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hint_name: &str) -> Option<&str> {
        self.sources.get(hint_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl HostSink for MemorySink {
    fn add_source(&mut self, hint_name: &str, text: &str) -> Result<()> {
        if hint_name.trim().is_empty() {
            return Err(Error::Sink {
                key: hint_name.to_string(),
                reason: "empty hint name".into(),
            });
        }
        self.sources.insert(hint_name.to_string(), text.to_string());
        Ok(())
    }
}
