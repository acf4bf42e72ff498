//! Value objects built by the transformation stages, before any rendering.

use crate::model::forest::NodeId;
use serde::{Deserialize, Serialize};

/// Name suffix that marks a declaration for forwarding.
pub const EXTENSION_SUFFIX: &str = "Extension";

/// Suffix appended to the owner's name to name the wrapper container.
pub const WRAPPER_SUFFIX: &str = "Extensions";

/// Fixed key of the single generated artifact.
pub const GENERATED_HINT_NAME: &str = "ExtensionMethods.g.cs";

/// One resolved parameter. `ty` is the canonical rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: String,
    /// Passing tokens such as `ref`, `out`, `in`, `params`. Never `this`.
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<String>) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Reference to the declaring container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub node: NodeId,
    /// Simple name, e.g. `MathOps`.
    pub name: String,
    /// Canonical qualified name used at call sites, e.g. `Util.MathOps`.
    pub qualified_name: String,
}

/// What a [`SymbolResolver`](crate::SymbolResolver) knows about one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub containing_type: OwnerRef,
    pub modifiers: Vec<String>,
}

/// A resolved declaration that qualifies for forwarding.
///
/// Only [`CandidateMethod::from_symbol`] builds one, so `simple_name` always
/// ends with [`EXTENSION_SUFFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateMethod {
    node: NodeId,
    owner: OwnerRef,
    simple_name: String,
    parameters: Vec<Parameter>,
    return_type: String,
    modifiers: Vec<String>,
}

impl CandidateMethod {
    pub fn from_symbol(node: NodeId, symbol: MethodSymbol) -> Option<Self> {
        if !symbol.name.ends_with(EXTENSION_SUFFIX) {
            return None;
        }
        Some(Self {
            node,
            owner: symbol.containing_type,
            simple_name: symbol.name,
            parameters: symbol.parameters,
            return_type: symbol.return_type,
            modifiers: symbol.modifiers,
        })
    }

    /// Declaration node this candidate was resolved from.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn owner(&self) -> &OwnerRef {
        &self.owner
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    /// Name of the generated forwarder: the simple name cut at the last
    /// occurrence of the suffix. Empty for a method named exactly `Extension`.
    pub fn forward_name(&self) -> &str {
        match self.simple_name.rfind(EXTENSION_SUFFIX) {
            Some(pos) => &self.simple_name[..pos],
            None => &self.simple_name,
        }
    }
}

/// Grouping key: namespace path + container name + declaration index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OwnerKey {
    pub namespace_path: String,
    pub container_name: String,
    pub decl_index: usize,
}

/// All candidates declared by one container, in source order.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionGroup {
    pub key: OwnerKey,
    pub owner: OwnerRef,
    pub owner_modifiers: Vec<String>,
    /// Dotted namespace path; empty when the owner lives outside any namespace.
    pub namespace_path: String,
    pub members: Vec<CandidateMethod>,
}

impl ExtensionGroup {
    pub fn wrapper_name(&self) -> String {
        format!("{}{}", self.owner.name, WRAPPER_SUFFIX)
    }
}

/// The single text artifact produced by one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    pub hint_name: &'static str,
    pub text: String,
    /// Wrapper containers actually rendered.
    pub groups: usize,
    /// Forwarders actually rendered.
    pub members: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// Method named exactly like the suffix; the forwarder would have no name.
    EmptyForwardName,
    /// Method without parameters; emitted without a receiver.
    MissingReceiver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    pub node: NodeId,
}
