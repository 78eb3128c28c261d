//! Function and egress identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical type of a stateful function, the key functions are registered under
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionType {
    pub namespace: String,
    pub type_name: String,
}

impl FunctionType {
    pub fn new(namespace: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.type_name)
    }
}

/// Address of a single function instance
///
/// Used both as the batch target ("self") and as the target of outgoing
/// messages. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub function_type: FunctionType,
    pub id: String,
}

impl Address {
    pub fn new(
        namespace: impl Into<String>,
        type_name: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            function_type: FunctionType::new(namespace, type_name),
            id: id.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.function_type.namespace
    }

    pub fn type_name(&self) -> &str {
        &self.function_type.type_name
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.function_type, self.id)
    }
}

/// Named output channel; egresses are singleton sinks so there is no id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EgressIdentifier {
    pub namespace: String,
    pub egress_type: String,
}

impl EgressIdentifier {
    pub fn new(namespace: impl Into<String>, egress_type: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            egress_type: egress_type.into(),
        }
    }
}

impl fmt::Display for EgressIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.egress_type)
    }
}
