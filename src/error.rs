use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Errors raised while loading catalogues or building a statement.
///
/// Every variant is a deterministic validation failure: there is no I/O in
/// this crate, so an error always means the call itself violated a contract.
/// The operation that fails leaves the statement untouched.
#[derive(Debug, Eq, PartialEq)]
pub enum ForgeError {
    /// Action name not present in the service's action catalogue.
    UnknownAction(String),

    /// Resource type name not present in the service's resource-type table.
    UnknownResourceType(String),

    /// Condition key not present in the service or global condition
    /// catalogue, or a service-scoped key not supported by any selected
    /// action.
    UnknownConditionKey(String),

    /// Condition operator string not recognized, or the operator's operand
    /// kind does not match the condition key's declared kind.
    InvalidConditionOperator(String),

    /// Resource type is not declared usable by any action on the statement.
    ResourceTypeNotApplicable(String),

    /// Condition key is not valid for the resource type it was scoped to.
    InvalidConditionForResource(String),

    /// ARN template expansion was missing a value for a placeholder.
    UnboundPlaceholder(String),

    /// ARN template contains a malformed placeholder.
    InvalidArnTemplate(String),

    /// Access-level tag in a catalogue table is not a known classification.
    InvalidAccessLevel(String),

    /// Catalogue table text was not valid JSON in the expected shape.
    MalformedTable(String),

    /// A condition was attached with no operand values.
    EmptyConditionValues(String),

    /// The same condition key and operator were attached twice.
    DuplicateCondition(String),

    /// Mutation was attempted after `build()` finalized the statement.
    StatementFinalized,

    /// Serialization was attempted on a statement with no actions.
    EmptyActionSet,

    /// Service prefix not present in the registry.
    UnknownService(String),
}

impl Display for ForgeError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::UnknownAction(action) => write!(f, "Unknown action: {}", action),
            Self::UnknownResourceType(resource_type) => write!(f, "Unknown resource type: {}", resource_type),
            Self::UnknownConditionKey(key) => write!(f, "Unknown condition key: {}", key),
            Self::InvalidConditionOperator(operator) => write!(f, "Invalid condition operator: {}", operator),
            Self::ResourceTypeNotApplicable(resource_type) => {
                write!(f, "Resource type not applicable to any selected action: {}", resource_type)
            }
            Self::InvalidConditionForResource(key) => {
                write!(f, "Condition key not valid for the scoped resource type: {}", key)
            }
            Self::UnboundPlaceholder(placeholder) => write!(f, "Unbound ARN template placeholder: {}", placeholder),
            Self::InvalidArnTemplate(template) => write!(f, "Invalid ARN template: {}", template),
            Self::InvalidAccessLevel(level) => write!(f, "Invalid access level: {}", level),
            Self::MalformedTable(message) => write!(f, "Malformed catalogue table: {}", message),
            Self::EmptyConditionValues(key) => write!(f, "Condition has no operand values: {}", key),
            Self::DuplicateCondition(key_and_op) => write!(f, "Duplicate condition: {}", key_and_op),
            Self::StatementFinalized => f.write_str("Statement is finalized and can no longer be modified"),
            Self::EmptyActionSet => f.write_str("Statement has no actions"),
            Self::UnknownService(service) => write!(f, "Unknown service: {}", service),
        }
    }
}

impl Error for ForgeError {}
