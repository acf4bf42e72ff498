//! Host-free generator of extension-method forwarders.
//!
//! A host lowers its syntax trees into a [`SyntaxForest`] and supplies a
//! [`SymbolResolver`]. The pipeline then:
//! 1. **Scans** for static `*Extension` methods declared directly in containers.
//! 2. **Extracts** a typed [`CandidateMethod`] for each through the resolver.
//! 3. **Aggregates** candidates by declaring container.
//! 4. **Resolves** each container's enclosing namespace path.
//! 5. **Emits** one C# unit with a `<Container>Extensions` static class per group.
//!
//! [`run_into`] hands the unit to a [`HostSink`] under [`GENERATED_HINT_NAME`].

pub mod aggregate;
pub mod driver;
pub mod emit;
pub mod errors;
pub mod extract;
pub mod model;
pub mod namespace;
pub mod scan;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use driver::{run, run_into};
pub use emit::Emission;
pub use errors::{Error, Result};
pub use model::candidate::{
    CandidateMethod, Diagnostic, DiagnosticCode, EXTENSION_SUFFIX, ExtensionGroup,
    GENERATED_HINT_NAME, GeneratedUnit, MethodSymbol, OwnerKey, OwnerRef, Parameter,
    WRAPPER_SUFFIX,
};
pub use model::forest::{NodeId, NodeKind, SyntaxForest, SyntaxNode};
pub use model::span::Span;
pub use traits::{HostSink, MemorySink, SymbolResolver};
