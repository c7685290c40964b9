//! Function catalog boundary.
//!
//! The editor never discovers functions itself. A host hands it a
//! [`FunctionCatalog`] that lists libraries and their functions and resolves
//! `(library, function)` to a [`FunctionSignature`].

use serde::{Deserialize, Serialize};

/// One declared parameter of a catalog function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    pub type_name: String,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self { name: name.into(), type_name: type_name.into() }
    }
}

/// Signature used to synthesize a node's pins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<ParameterInfo>,
    pub return_type: String,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: return_type.into(),
        }
    }

    /// Append a parameter (builder style).
    pub fn param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(ParameterInfo::new(name, type_name));
        self
    }
}

/// Read-only source of node-producing functions.
pub trait FunctionCatalog {
    /// Library identifiers, in presentation order.
    fn libraries(&self) -> Vec<String>;

    /// Function names of `library` in declaration order. Empty for unknown libraries.
    fn functions(&self, library: &str) -> Vec<String>;

    /// Resolve a function's signature, or `None` if it does not exist.
    fn resolve(&self, library: &str, function: &str) -> Option<FunctionSignature>;
}

/// In-memory catalog assembled by the host.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    libraries: Vec<(String, Vec<FunctionSignature>)>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `signature` under `library`, creating the library on first use.
    pub fn with_function(mut self, library: &str, signature: FunctionSignature) -> Self {
        self.add_function(library, signature);
        self
    }

    pub fn add_function(&mut self, library: &str, signature: FunctionSignature) {
        match self.libraries.iter_mut().find(|(name, _)| name == library) {
            Some((_, functions)) => functions.push(signature),
            None => self.libraries.push((library.to_string(), vec![signature])),
        }
    }

    fn library(&self, library: &str) -> Option<&[FunctionSignature]> {
        self.libraries
            .iter()
            .find(|(name, _)| name == library)
            .map(|(_, functions)| functions.as_slice())
    }
}

impl FunctionCatalog for StaticCatalog {
    fn libraries(&self) -> Vec<String> {
        self.libraries.iter().map(|(name, _)| name.clone()).collect()
    }

    fn functions(&self, library: &str) -> Vec<String> {
        self.library(library)
            .map(|functions| functions.iter().map(|f| f.name.clone()).collect())
            .unwrap_or_default()
    }

    fn resolve(&self, library: &str, function: &str) -> Option<FunctionSignature> {
        self.library(library)?
            .iter()
            .find(|signature| signature.name == function)
            .cloned()
    }
}

/// Name of the built-in arithmetic library.
pub const MATH_LIBRARY: &str = "Math";

/// Built-in arithmetic functions over `float`.
pub fn math_library() -> StaticCatalog {
    let binary = |name: &str| {
        FunctionSignature::new(name, "float")
            .param("value1", "float")
            .param("value2", "float")
    };
    let unary = |name: &str| FunctionSignature::new(name, "float").param("value", "float");

    StaticCatalog::new()
        .with_function(MATH_LIBRARY, binary("Add"))
        .with_function(MATH_LIBRARY, binary("Subtract"))
        .with_function(MATH_LIBRARY, binary("Multiply"))
        .with_function(MATH_LIBRARY, binary("Divide"))
        .with_function(MATH_LIBRARY, unary("Sin"))
        .with_function(MATH_LIBRARY, unary("Cos"))
}
