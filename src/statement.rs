use {
    crate::{
        catalog::{ConditionKeyDefinition, ServiceCatalog},
        AccessLevel, Condition, ConditionBlock, ConditionOp, Effect, ForgeError,
    },
    log::warn,
    std::sync::Arc,
};

/// Builder lifecycle. Any successful mutation moves `Empty` to `Building`;
/// [Statement::build] moves either state to `Finalized`, after which every
/// mutator fails with [ForgeError::StatementFinalized].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Empty,
    Building,
    Finalized,
}

/// One concrete resource reference on a statement: the resource type it came
/// from, the expanded ARN, and the placeholder bindings used to expand it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceConstraint {
    resource_type: String,
    arn: String,
    bindings: Vec<(String, String)>,
}

impl ResourceConstraint {
    #[inline]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    #[inline]
    pub fn arn(&self) -> &str {
        &self.arn
    }

    #[inline]
    pub fn bindings(&self) -> &[(String, String)] {
        &self.bindings
    }
}

/// A mutable accumulator for one policy statement, validated against a
/// service catalogue as it is built.
///
/// One builder serves every service; the catalogue it holds supplies the
/// vocabulary instead of a per-service subtype. Mutators return
/// `Result<&mut Self, ForgeError>` so calls chain with `?`, and every
/// mutator validates fully before touching the statement, so a failed call
/// leaves it exactly as it was.
///
/// The catalogue is shared read-only; the statement itself is single-owner
/// mutable state and is not meant for concurrent mutation.
#[derive(Clone, Debug)]
pub struct Statement {
    catalog: Arc<ServiceCatalog>,
    sid: Option<String>,
    effect: Effect,
    actions: Vec<String>,
    resources: Vec<ResourceConstraint>,
    conditions: ConditionBlock,
    state: State,
}

impl Statement {
    /// Start an empty statement for a service. The effect defaults to Allow.
    pub fn new(catalog: Arc<ServiceCatalog>) -> Self {
        Self {
            catalog,
            sid: None,
            effect: Effect::Allow,
            actions: Vec::new(),
            resources: Vec::new(),
            conditions: ConditionBlock::new(),
            state: State::Empty,
        }
    }

    pub fn with_sid<S: Into<String>>(catalog: Arc<ServiceCatalog>, sid: S) -> Self {
        let mut statement = Self::new(catalog);
        statement.sid = Some(sid.into());
        statement
    }

    #[inline]
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// The selected actions, as bare catalogue names in insertion order.
    #[inline]
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    #[inline]
    pub fn resources(&self) -> &[ResourceConstraint] {
        &self.resources
    }

    #[inline]
    pub fn conditions(&self) -> &ConditionBlock {
        &self.conditions
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.state == State::Finalized
    }

    fn ensure_mutable(&self) -> Result<(), ForgeError> {
        if self.is_finalized() {
            Err(ForgeError::StatementFinalized)
        } else {
            Ok(())
        }
    }

    pub fn set_sid<S: Into<String>>(&mut self, sid: S) -> Result<&mut Self, ForgeError> {
        self.ensure_mutable()?;
        self.sid = Some(sid.into());
        self.state = State::Building;
        Ok(self)
    }

    pub fn set_effect(&mut self, effect: Effect) -> Result<&mut Self, ForgeError> {
        self.ensure_mutable()?;
        self.effect = effect;
        self.state = State::Building;
        Ok(self)
    }

    pub fn allow(&mut self) -> Result<&mut Self, ForgeError> {
        self.set_effect(Effect::Allow)
    }

    pub fn deny(&mut self) -> Result<&mut Self, ForgeError> {
        self.set_effect(Effect::Deny)
    }

    /// Add an action by bare catalogue name or `service:Action` spelling.
    /// Adding an action twice is a no-op.
    pub fn add_action(&mut self, name: &str) -> Result<&mut Self, ForgeError> {
        self.ensure_mutable()?;
        let bare = self.catalog.resolve_action(name)?.name().to_string();

        if !self.actions.contains(&bare) {
            self.actions.push(bare);
        }
        self.state = State::Building;
        Ok(self)
    }

    /// Add every action in the catalogue, in catalogue order.
    pub fn add_all_actions(&mut self) -> Result<&mut Self, ForgeError> {
        self.ensure_mutable()?;
        let catalog = self.catalog.clone();

        for action in catalog.actions() {
            if !self.actions.iter().any(|a| a == action.name()) {
                self.actions.push(action.name().to_string());
            }
        }
        self.state = State::Building;
        Ok(self)
    }

    /// Add every action with the given access level, in catalogue order.
    pub fn add_actions_with_access_level(&mut self, level: AccessLevel) -> Result<&mut Self, ForgeError> {
        self.ensure_mutable()?;
        let catalog = self.catalog.clone();

        for action in catalog.actions().filter(|a| a.access_level() == level) {
            if !self.actions.iter().any(|a| a == action.name()) {
                self.actions.push(action.name().to_string());
            }
        }
        self.state = State::Building;
        Ok(self)
    }

    /// Scope the statement to a concrete resource by expanding the resource
    /// type's ARN template against the given placeholder bindings.
    ///
    /// At least one already-added action must declare the resource type.
    /// Never calling this leaves the statement on the `*` wildcard resource.
    pub fn scope_to_resource(&mut self, resource_type: &str, bindings: &[(&str, &str)]) -> Result<&mut Self, ForgeError> {
        self.ensure_mutable()?;
        let catalog = self.catalog.clone();
        let definition = catalog.resource_type(resource_type)?;

        let applicable = self
            .actions
            .iter()
            .any(|name| catalog.action(name).map(|a| a.supports_resource_type(resource_type)).unwrap_or(false));
        if !applicable {
            return Err(ForgeError::ResourceTypeNotApplicable(resource_type.to_string()));
        }

        let arn = definition.arn_template().expand(bindings)?;
        self.resources.push(ResourceConstraint {
            resource_type: resource_type.to_string(),
            arn,
            bindings: bindings.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        });
        self.state = State::Building;
        Ok(self)
    }

    /// Attach a statement-scoped condition.
    ///
    /// A bare key is namespaced with the service prefix. Service-scoped keys
    /// must be supported by at least one selected action; `aws:` global keys
    /// are always attachable. When no operator is given the key's default
    /// applies; an explicit operator must compare the key's operand kind.
    /// At least one operand value is required.
    pub fn attach_condition(
        &mut self,
        key: &str,
        operator: Option<ConditionOp>,
        values: &[&str],
    ) -> Result<&mut Self, ForgeError> {
        self.ensure_mutable()?;
        let catalog = self.catalog.clone();
        let qualified = catalog.qualify_key(key);
        let definition = catalog.condition_key(&qualified)?;

        if !definition.name().starts_with("aws:") {
            let supported = self.actions.iter().any(|name| {
                catalog
                    .action(name)
                    .map(|a| a.condition_keys().iter().any(|k| k == definition.name()))
                    .unwrap_or(false)
            });
            if !supported {
                return Err(ForgeError::UnknownConditionKey(qualified));
            }
        }

        let operator = resolve_operator(definition, operator)?;
        self.conditions.attach(Condition::new(
            qualified,
            operator,
            values.iter().map(|v| v.to_string()).collect(),
        ))?;
        self.state = State::Building;
        Ok(self)
    }

    /// Attach a condition scoped to the most recently added resource
    /// constraint. The key must be listed as valid for that constraint's
    /// resource type; with no constraint there is nothing the key could be
    /// valid for and the call fails with
    /// [ForgeError::InvalidConditionForResource].
    ///
    /// The policy grammar has a single condition element per statement, so
    /// the attached condition lands in the same block as statement-scoped
    /// ones and duplicate detection spans both.
    pub fn attach_condition_to_last_resource(
        &mut self,
        key: &str,
        operator: Option<ConditionOp>,
        values: &[&str],
    ) -> Result<&mut Self, ForgeError> {
        self.ensure_mutable()?;
        let catalog = self.catalog.clone();
        let qualified = catalog.qualify_key(key);
        let definition = catalog.condition_key(&qualified)?;

        let constraint = match self.resources.last() {
            Some(constraint) => constraint,
            None => return Err(ForgeError::InvalidConditionForResource(qualified)),
        };
        let resource_type = catalog.resource_type(constraint.resource_type())?;
        if !resource_type.valid_condition_keys().iter().any(|k| k == definition.name()) {
            return Err(ForgeError::InvalidConditionForResource(qualified));
        }

        let operator = resolve_operator(definition, operator)?;
        self.conditions.attach(Condition::new(
            qualified,
            operator,
            values.iter().map(|v| v.to_string()).collect(),
        ))?;
        self.state = State::Building;
        Ok(self)
    }

    /// The maximum access level across the selected actions, under
    /// Read < List < Tagging < Write < PermissionsManagement. `None` when no
    /// actions have been added. Read-only; legal in any state.
    pub fn max_access_level(&self) -> Option<AccessLevel> {
        self.actions.iter().filter_map(|name| self.catalog.access_level(name).ok()).max()
    }

    /// Finalize the statement. Further mutation fails with
    /// [ForgeError::StatementFinalized]; calling `build` again is a no-op.
    ///
    /// Finalizing with no actions is legal (the document stays unserializable
    /// until an action exists) but almost always a caller bug, so it is
    /// logged.
    pub fn build(&mut self) -> &mut Self {
        if !self.is_finalized() {
            if self.actions.is_empty() {
                warn!("Finalizing statement {:?} with no actions", self.sid().unwrap_or("<unnamed>"));
            }
            self.state = State::Finalized;
        }
        self
    }
}

/// Pick the operator for an attachment: the key's default when none is
/// given, otherwise the caller's operator checked against the key's operand
/// kind. `Null` tests key presence and is valid for any kind.
fn resolve_operator(
    definition: &ConditionKeyDefinition,
    operator: Option<ConditionOp>,
) -> Result<ConditionOp, ForgeError> {
    match operator {
        None => Ok(definition.default_operator()),
        Some(operator) => match operator.operand_kind() {
            None => Ok(operator),
            Some(kind) if kind == definition.kind() => Ok(operator),
            Some(_) => Err(ForgeError::InvalidConditionOperator(operator.to_string())),
        },
    }
}
