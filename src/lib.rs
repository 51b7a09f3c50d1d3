#![warn(clippy::all)]
pub(crate) mod access;
pub(crate) mod arn;
pub(crate) mod catalog;
pub(crate) mod condition;
pub(crate) mod document;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod statement;

#[macro_use]
pub(crate) mod serutil;

pub use {
    access::AccessLevel,
    arn::ArnTemplate,
    catalog::{
        global_condition_key, ActionDefinition, ConditionKeyDefinition, ResourceTypeDefinition, ServiceCatalog,
        ServiceRegistry,
    },
    condition::{op as condop, Cmp, Condition, ConditionBlock, ConditionMap, ConditionOp, OperandKind, SetQualifier},
    document::{PolicyDocument, StatementDocument, POLICY_VERSION},
    effect::Effect,
    error::ForgeError,
    serutil::StringList,
    statement::{ResourceConstraint, Statement},
};
