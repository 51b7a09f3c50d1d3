use {
    crate::{condition::op, AccessLevel, ArnTemplate, ConditionOp, ForgeError, OperandKind},
    lazy_static::lazy_static,
    log::debug,
    regex::Regex,
    serde::Deserialize,
    std::{collections::BTreeMap, str::FromStr, sync::Arc},
};

/// A condition key known to a catalogue: its name, the operand kind it
/// accepts, and the comparison used when a caller attaches a condition
/// without naming an operator.
///
/// Key names may contain `${...}` wildcard segments (`aws:RequestTag/${TagKey}`);
/// such keys match any attached key with the same literal structure.
#[derive(Clone, Debug)]
pub struct ConditionKeyDefinition {
    name: String,
    kind: OperandKind,
    default_op: Option<ConditionOp>,
    description: String,
    pattern: Option<Regex>,
}

impl ConditionKeyDefinition {
    /// Build a definition, rejecting names with malformed wildcard segments
    /// (a `${` without its closing brace) the same way ARN templates are
    /// rejected at load.
    pub fn new<N: Into<String>>(name: N, kind: OperandKind, default_op: Option<ConditionOp>) -> Result<Self, ForgeError> {
        let name = name.into();
        let pattern = key_pattern(&name)?;

        Ok(Self {
            name,
            kind,
            default_op,
            description: String::new(),
            pattern,
        })
    }

    pub fn with_description<D: Into<String>>(mut self, description: D) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> OperandKind {
        self.kind
    }

    /// The operator used when none is supplied, falling back to the operand
    /// kind's default.
    pub fn default_operator(&self) -> ConditionOp {
        self.default_op.unwrap_or_else(|| self.kind.default_op())
    }

    /// Whether an attached key refers to this definition.
    pub fn matches(&self, key: &str) -> bool {
        match &self.pattern {
            None => self.name == key,
            Some(pattern) => pattern.is_match(key),
        }
    }
}

/// Translate a key name with `${...}` wildcard segments into an anchored
/// regex; names without wildcards match by equality instead. An
/// unterminated `${` is malformed.
fn key_pattern(name: &str) -> Result<Option<Regex>, ForgeError> {
    if !name.contains("${") {
        return Ok(None);
    }

    let mut pattern = String::with_capacity(name.len() + 8);
    pattern.push('^');

    let mut rest = name;
    while let Some(start) = rest.find("${") {
        pattern.push_str(&regex::escape(&rest[..start]));
        match rest[start..].find('}') {
            Some(end) => {
                pattern.push_str(".+");
                rest = &rest[start + end + 1..];
            }
            None => {
                debug!("Condition key {} has an unterminated wildcard segment", name);
                return Err(ForgeError::MalformedTable(format!("unterminated wildcard in condition key {}", name)));
            }
        }
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');

    Regex::new(&pattern).map(Some).map_err(|e| ForgeError::MalformedTable(e.to_string()))
}

lazy_static! {
    /// Provider-wide condition keys, available on every statement regardless
    /// of service. Kinds and per-key default operators follow the IAM global
    /// condition key reference.
    static ref GLOBAL_CONDITION_KEYS: Vec<ConditionKeyDefinition> = {
        fn key(name: &str, kind: OperandKind, default_op: Option<ConditionOp>) -> ConditionKeyDefinition {
            ConditionKeyDefinition::new(name, kind, default_op).unwrap()
        }

        vec![
            key("aws:CalledVia", OperandKind::String, Some(op::StringEquals.for_any_value())),
            key("aws:CalledViaFirst", OperandKind::String, None),
            key("aws:CalledViaLast", OperandKind::String, None),
            key("aws:CurrentTime", OperandKind::Date, Some(op::DateLessThanEquals)),
            key("aws:EpochTime", OperandKind::Date, Some(op::DateLessThanEquals)),
            key("aws:MultiFactorAuthAge", OperandKind::Numeric, Some(op::NumericLessThan)),
            key("aws:MultiFactorAuthPresent", OperandKind::Bool, None),
            key("aws:PrincipalAccount", OperandKind::String, None),
            key("aws:PrincipalArn", OperandKind::Arn, None),
            key("aws:PrincipalOrgID", OperandKind::String, None),
            key("aws:PrincipalOrgPaths", OperandKind::String, Some(op::StringEquals)),
            key("aws:PrincipalTag/${TagKey}", OperandKind::String, None),
            key("aws:PrincipalType", OperandKind::String, Some(op::StringEquals)),
            key("aws:Referer", OperandKind::String, None),
            key("aws:RequestTag/${TagKey}", OperandKind::String, None),
            key("aws:RequestedRegion", OperandKind::String, Some(op::StringEquals)),
            key("aws:ResourceTag/${TagKey}", OperandKind::String, None),
            key("aws:SecureTransport", OperandKind::Bool, None),
            key("aws:SourceAccount", OperandKind::String, None),
            key("aws:SourceArn", OperandKind::Arn, None),
            key("aws:SourceIp", OperandKind::IpAddress, None),
            key("aws:SourceVpc", OperandKind::String, Some(op::StringEquals)),
            key("aws:SourceVpce", OperandKind::String, None),
            key("aws:TagKeys", OperandKind::String, None),
            key("aws:TokenIssueTime", OperandKind::Date, Some(op::DateGreaterThanEquals)),
            key("aws:UserAgent", OperandKind::String, None),
            key("aws:ViaAWSService", OperandKind::Bool, None),
            key("aws:VpcSourceIp", OperandKind::IpAddress, None),
            key("aws:userid", OperandKind::String, None),
            key("aws:username", OperandKind::String, None),
        ]
    };
}

/// Look up a provider-wide condition key.
pub fn global_condition_key(key: &str) -> Option<&'static ConditionKeyDefinition> {
    GLOBAL_CONDITION_KEYS.iter().find(|def| def.matches(key))
}

/// A resource type from a service table: an ARN template plus the condition
/// keys that are valid when this type is the scoping resource.
#[derive(Clone, Debug)]
pub struct ResourceTypeDefinition {
    name: String,
    arn_template: ArnTemplate,
    condition_keys: Vec<String>,
}

impl ResourceTypeDefinition {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn arn_template(&self) -> &ArnTemplate {
        &self.arn_template
    }

    /// Condition key names valid when this resource type is referenced.
    #[inline]
    pub fn valid_condition_keys(&self) -> &[String] {
        &self.condition_keys
    }
}

/// An action from a service table.
#[derive(Clone, Debug)]
pub struct ActionDefinition {
    name: String,
    description: String,
    access_level: AccessLevel,
    resource_types: BTreeMap<String, bool>,
    condition_keys: Vec<String>,
}

impl ActionDefinition {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    /// The resource types this action may be scoped to, with the required
    /// flag for each. An action with no entries may only apply to all
    /// resources.
    pub fn resource_types(&self) -> impl Iterator<Item = (&str, bool)> {
        self.resource_types.iter().map(|(name, required)| (name.as_str(), *required))
    }

    pub fn supports_resource_type(&self, resource_type: &str) -> bool {
        self.resource_types.contains_key(resource_type)
    }

    /// Condition key names this action supports.
    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }
}

/// The raw, serde-deserialized shape of a per-service table, equivalent to
/// the generated JSON the upstream tooling produces.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ServiceTable {
    pub prefix: String,
    #[serde(default)]
    pub actions: BTreeMap<String, ActionTable>,
    #[serde(default)]
    pub resource_types: BTreeMap<String, ResourceTypeTable>,
    #[serde(default)]
    pub condition_keys: BTreeMap<String, ConditionKeyTable>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ActionTable {
    #[serde(default)]
    pub description: String,
    pub access_level: AccessLevel,
    #[serde(default)]
    pub resource_types: BTreeMap<String, ResourceTypeRef>,
    #[serde(default)]
    pub conditions: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceTypeRef {
    #[serde(default)]
    pub required: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceTypeTable {
    #[serde(alias = "arnTemplate")]
    pub arn: String,
    #[serde(default)]
    pub conditions: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ConditionKeyTable {
    pub kind: OperandKind,
    #[serde(default)]
    pub default_operator: Option<ConditionOp>,
    #[serde(default)]
    pub description: String,
}

/// The validated catalogue triple for one service: actions, resource types,
/// and service-scoped condition keys. Immutable after construction and
/// safely shared read-only across any number of builders.
///
/// All cross-references in the raw table are resolved here, so a malformed
/// table fails at load time rather than when a statement first touches the
/// bad entry.
#[derive(Clone, Debug)]
pub struct ServiceCatalog {
    prefix: String,
    actions: BTreeMap<String, ActionDefinition>,
    resource_types: BTreeMap<String, ResourceTypeDefinition>,
    condition_keys: Vec<ConditionKeyDefinition>,
}

impl ServiceCatalog {
    /// Load a catalogue from the JSON table format.
    pub fn from_json(json: &str) -> Result<Self, ForgeError> {
        let table: ServiceTable = serde_json::from_str(json).map_err(|e| {
            debug!("Failed to parse service table: {}", e);
            ForgeError::MalformedTable(e.to_string())
        })?;
        Self::try_from(table)
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Look up an action by its catalogue name.
    pub fn action(&self, name: &str) -> Result<&ActionDefinition, ForgeError> {
        self.actions.get(name).ok_or_else(|| ForgeError::UnknownAction(name.to_string()))
    }

    /// All actions, in catalogue (name) order.
    pub fn actions(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.values()
    }

    pub fn access_level(&self, name: &str) -> Result<AccessLevel, ForgeError> {
        Ok(self.action(name)?.access_level())
    }

    /// The resource types an action may be scoped to.
    pub fn allowed_resource_types(&self, name: &str) -> Result<Vec<(&str, bool)>, ForgeError> {
        Ok(self.action(name)?.resource_types().collect())
    }

    pub fn resource_type(&self, name: &str) -> Result<&ResourceTypeDefinition, ForgeError> {
        self.resource_types.get(name).ok_or_else(|| ForgeError::UnknownResourceType(name.to_string()))
    }

    /// Resolve a condition key, checking the service-scoped table first and
    /// the provider-wide table second.
    pub fn condition_key(&self, key: &str) -> Result<&ConditionKeyDefinition, ForgeError> {
        self.condition_keys
            .iter()
            .find(|def| def.matches(key))
            .or_else(|| global_condition_key(key))
            .ok_or_else(|| ForgeError::UnknownConditionKey(key.to_string()))
    }

    /// The operator used for a key when the caller does not supply one.
    pub fn default_operator(&self, key: &str) -> Result<ConditionOp, ForgeError> {
        Ok(self.condition_key(key)?.default_operator())
    }

    /// Resolve a caller-supplied action name, accepting both the bare
    /// catalogue spelling and the `service:Action` form.
    pub fn resolve_action(&self, name: &str) -> Result<&ActionDefinition, ForgeError> {
        match name.split_once(':') {
            None => self.action(name),
            Some((prefix, bare)) if prefix == self.prefix => self.action(bare),
            Some(_) => Err(ForgeError::UnknownAction(name.to_string())),
        }
    }

    /// Prefix a bare condition key with the service namespace, the way the
    /// upstream builder namespaces unqualified keys.
    pub fn qualify_key(&self, key: &str) -> String {
        if key.contains(':') {
            key.to_string()
        } else {
            format!("{}:{}", self.prefix, key)
        }
    }

    /// The fully qualified `service:Action` output spelling.
    pub fn qualify_action(&self, name: &str) -> String {
        format!("{}:{}", self.prefix, name)
    }
}

impl TryFrom<ServiceTable> for ServiceCatalog {
    type Error = ForgeError;

    fn try_from(table: ServiceTable) -> Result<Self, Self::Error> {
        let mut resource_types = BTreeMap::new();
        for (name, rt) in table.resource_types {
            let arn_template = ArnTemplate::from_str(&rt.arn)?;
            resource_types.insert(
                name.clone(),
                ResourceTypeDefinition {
                    name,
                    arn_template,
                    condition_keys: rt.conditions,
                },
            );
        }

        let mut condition_keys = Vec::with_capacity(table.condition_keys.len());
        for (name, key) in table.condition_keys {
            condition_keys
                .push(ConditionKeyDefinition::new(name, key.kind, key.default_operator)?.with_description(key.description));
        }

        let mut actions = BTreeMap::new();
        for (name, action) in table.actions {
            for resource_type in action.resource_types.keys() {
                if !resource_types.contains_key(resource_type) {
                    debug!("Action {} references undeclared resource type {}", name, resource_type);
                    return Err(ForgeError::UnknownResourceType(resource_type.clone()));
                }
            }

            // Every condition key an action names must resolve somewhere.
            for key in &action.conditions {
                let known = condition_keys.iter().any(|def| def.matches(key)) || global_condition_key(key).is_some();
                if !known {
                    debug!("Action {} references unknown condition key {}", name, key);
                    return Err(ForgeError::UnknownConditionKey(key.clone()));
                }
            }

            actions.insert(
                name.clone(),
                ActionDefinition {
                    name,
                    description: action.description,
                    access_level: action.access_level,
                    resource_types: action.resource_types.into_iter().map(|(n, r)| (n, r.required)).collect(),
                    condition_keys: action.conditions,
                },
            );
        }

        // Resource-type condition lists are validated the same way.
        for rt in resource_types.values() {
            for key in &rt.condition_keys {
                let known = condition_keys.iter().any(|def| def.matches(key)) || global_condition_key(key).is_some();
                if !known {
                    debug!("Resource type {} references unknown condition key {}", rt.name, key);
                    return Err(ForgeError::UnknownConditionKey(key.clone()));
                }
            }
        }

        Ok(Self {
            prefix: table.prefix,
            actions,
            resource_types,
            condition_keys,
        })
    }
}

/// An immutable map from service prefix to its catalogue, constructed once
/// and shared read-only. There is no process-global mutable registry; hosts
/// build one of these from their generated tables and hand out
/// [Arc]<[ServiceCatalog]> clones.
#[derive(Clone, Debug, Default)]
pub struct ServiceRegistry {
    services: BTreeMap<String, Arc<ServiceCatalog>>,
}

impl ServiceRegistry {
    pub fn new<I: IntoIterator<Item = ServiceCatalog>>(catalogs: I) -> Self {
        Self {
            services: catalogs.into_iter().map(|c| (c.prefix.clone(), Arc::new(c))).collect(),
        }
    }

    pub fn get(&self, prefix: &str) -> Result<Arc<ServiceCatalog>, ForgeError> {
        self.services.get(prefix).cloned().ok_or_else(|| ForgeError::UnknownService(prefix.to_string()))
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// A small catalogue in the shape of the upstream Athena table, shared by
/// tests across the crate.
#[cfg(test)]
pub(crate) fn sample_catalog() -> ServiceCatalog {
    use indoc::indoc;

    ServiceCatalog::from_json(indoc! { r#"
        {
            "prefix": "athena",
            "actions": {
                "GetQueryResults": {
                    "description": "Grants permissions to get the query results",
                    "accessLevel": "Read",
                    "resourceTypes": { "workgroup": { "required": true } }
                },
                "ListWorkGroups": {
                    "description": "Grants permissions to return a list of workgroups",
                    "accessLevel": "List"
                },
                "CreateWorkGroup": {
                    "description": "Grants permissions to create a workgroup",
                    "accessLevel": "Tagging",
                    "resourceTypes": { "workgroup": { "required": true } },
                    "conditions": ["aws:RequestTag/${TagKey}", "aws:TagKeys"]
                },
                "StartQueryExecution": {
                    "description": "Grants permissions to start a query execution",
                    "accessLevel": "Write",
                    "resourceTypes": { "workgroup": { "required": true } },
                    "conditions": ["athena:QueryString"]
                },
                "StopQueryExecution": {
                    "description": "Grants permissions to stop the specified query execution",
                    "accessLevel": "Write",
                    "resourceTypes": { "workgroup": { "required": true } }
                },
                "DeleteWorkGroupPolicy": {
                    "description": "Grants permissions to delete the workgroup resource policy",
                    "accessLevel": "Permissions management",
                    "resourceTypes": { "workgroup": { "required": true } }
                }
            },
            "resourceTypes": {
                "workgroup": {
                    "arn": "arn:${Partition}:athena:${Region}:${Account}:workgroup/${WorkGroupName}",
                    "conditions": ["aws:ResourceTag/${TagKey}"]
                },
                "datacatalog": {
                    "arn": "arn:${Partition}:athena:${Region}:${Account}:datacatalog/${DataCatalogName}"
                }
            },
            "conditionKeys": {
                "athena:QueryString": { "kind": "String" }
            }
        }"# })
    .unwrap()
}

#[cfg(test)]
mod tests {
    use {
        super::{global_condition_key, sample_catalog, ServiceCatalog},
        crate::{condition::op, AccessLevel, ForgeError},
        indoc::indoc,
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_action_lookup() {
        let catalog = sample_catalog();
        assert_eq!(catalog.prefix(), "athena");

        let action = catalog.action("GetQueryResults").unwrap();
        assert_eq!(action.name(), "GetQueryResults");
        assert_eq!(action.access_level(), AccessLevel::Read);
        assert_eq!(action.description(), "Grants permissions to get the query results");
        assert!(action.supports_resource_type("workgroup"));
        assert!(!action.supports_resource_type("datacatalog"));

        assert_eq!(catalog.access_level("ListWorkGroups").unwrap(), AccessLevel::List);
        assert_eq!(catalog.access_level("DeleteWorkGroupPolicy").unwrap(), AccessLevel::PermissionsManagement);

        let e = catalog.action("RunQuery").unwrap_err();
        assert_eq!(e, ForgeError::UnknownAction("RunQuery".to_string()));

        assert_eq!(catalog.actions().count(), 6);
    }

    #[test_log::test]
    fn test_resolve_action_prefixed() {
        let catalog = sample_catalog();
        assert_eq!(catalog.resolve_action("ListWorkGroups").unwrap().name(), "ListWorkGroups");
        assert_eq!(catalog.resolve_action("athena:ListWorkGroups").unwrap().name(), "ListWorkGroups");

        let e = catalog.resolve_action("glue:ListWorkGroups").unwrap_err();
        assert_eq!(e, ForgeError::UnknownAction("glue:ListWorkGroups".to_string()));

        assert_eq!(catalog.qualify_action("ListWorkGroups"), "athena:ListWorkGroups");
    }

    #[test_log::test]
    fn test_allowed_resource_types() {
        let catalog = sample_catalog();
        assert_eq!(catalog.allowed_resource_types("GetQueryResults").unwrap(), vec![("workgroup", true)]);
        assert_eq!(catalog.allowed_resource_types("ListWorkGroups").unwrap(), vec![]);

        let rt = catalog.resource_type("workgroup").unwrap();
        assert_eq!(rt.name(), "workgroup");
        assert_eq!(rt.valid_condition_keys(), ["aws:ResourceTag/${TagKey}"]);

        let e = catalog.resource_type("table").unwrap_err();
        assert_eq!(e, ForgeError::UnknownResourceType("table".to_string()));
    }

    #[test_log::test]
    fn test_condition_key_resolution() {
        let catalog = sample_catalog();

        // Service-scoped key wins over the global table.
        let def = catalog.condition_key("athena:QueryString").unwrap();
        assert_eq!(def.name(), "athena:QueryString");
        assert_eq!(def.default_operator(), op::StringLike);

        // Fallback to the global table, including wildcard keys.
        let def = catalog.condition_key("aws:RequestTag/Dept").unwrap();
        assert_eq!(def.name(), "aws:RequestTag/${TagKey}");
        assert!(def.matches("aws:RequestTag/CostCenter"));
        assert!(!def.matches("aws:RequestTag/"));

        assert_eq!(catalog.default_operator("aws:SecureTransport").unwrap(), op::Bool);
        assert_eq!(catalog.default_operator("aws:CurrentTime").unwrap(), op::DateLessThanEquals);
        assert_eq!(catalog.default_operator("aws:MultiFactorAuthAge").unwrap(), op::NumericLessThan);
        assert_eq!(catalog.default_operator("aws:CalledVia").unwrap(), op::StringEquals.for_any_value());
        assert_eq!(catalog.default_operator("aws:SourceArn").unwrap(), op::ArnLike);
        assert_eq!(catalog.default_operator("aws:SourceIp").unwrap(), op::IpAddress);

        let e = catalog.condition_key("athena:Missing").unwrap_err();
        assert_eq!(e, ForgeError::UnknownConditionKey("athena:Missing".to_string()));
    }

    #[test_log::test]
    fn test_qualify_key() {
        let catalog = sample_catalog();
        assert_eq!(catalog.qualify_key("QueryString"), "athena:QueryString");
        assert_eq!(catalog.qualify_key("aws:TagKeys"), "aws:TagKeys");
    }

    #[test_log::test]
    fn test_global_keys() {
        assert!(global_condition_key("aws:SecureTransport").is_some());
        assert!(global_condition_key("aws:PrincipalTag/Team").is_some());
        assert!(global_condition_key("aws:NoSuchKey").is_none());
    }

    #[test_log::test]
    fn test_load_rejects_undeclared_resource_type() {
        let e = ServiceCatalog::from_json(indoc! { r#"
            {
                "prefix": "svc",
                "actions": {
                    "DoThing": {
                        "accessLevel": "Write",
                        "resourceTypes": { "thing": { "required": true } }
                    }
                }
            }"# })
        .unwrap_err();
        assert_eq!(e, ForgeError::UnknownResourceType("thing".to_string()));
    }

    #[test_log::test]
    fn test_load_rejects_unknown_condition_key() {
        let e = ServiceCatalog::from_json(indoc! { r#"
            {
                "prefix": "svc",
                "actions": {
                    "DoThing": {
                        "accessLevel": "Write",
                        "conditions": ["svc:Nope"]
                    }
                }
            }"# })
        .unwrap_err();
        assert_eq!(e, ForgeError::UnknownConditionKey("svc:Nope".to_string()));
    }

    #[test_log::test]
    fn test_load_rejects_malformed_key_name() {
        use crate::{ConditionKeyDefinition, OperandKind};

        let e = ServiceCatalog::from_json(indoc! { r#"
            {
                "prefix": "svc",
                "conditionKeys": {
                    "svc:Tag/${TagKey": { "kind": "String" }
                }
            }"# })
        .unwrap_err();
        assert_eq!(
            e,
            ForgeError::MalformedTable("unterminated wildcard in condition key svc:Tag/${TagKey".to_string())
        );

        assert!(ConditionKeyDefinition::new("svc:Tag/${TagKey", OperandKind::String, None).is_err());
        assert!(ConditionKeyDefinition::new("svc:Tag/${TagKey}", OperandKind::String, None).is_ok());
    }

    #[test_log::test]
    fn test_load_rejects_bad_access_level() {
        assert!(ServiceCatalog::from_json(
            r#"{ "prefix": "svc", "actions": { "DoThing": { "accessLevel": "Root" } } }"#
        )
        .is_err());
    }

    #[test_log::test]
    fn test_load_rejects_bad_template() {
        let e = ServiceCatalog::from_json(indoc! { r#"
            {
                "prefix": "svc",
                "resourceTypes": {
                    "thing": { "arn": "arn:${Partition" }
                }
            }"# })
        .unwrap_err();
        assert_eq!(e, ForgeError::InvalidArnTemplate("arn:${Partition".to_string()));
    }

    #[test_log::test]
    fn test_registry() {
        use crate::ServiceRegistry;

        let registry = ServiceRegistry::new([sample_catalog()]);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert_eq!(registry.prefixes().collect::<Vec<_>>(), vec!["athena"]);

        let catalog = registry.get("athena").unwrap();
        assert_eq!(catalog.prefix(), "athena");

        let e = registry.get("glue").unwrap_err();
        assert_eq!(e, ForgeError::UnknownService("glue".to_string()));
    }
}
