use {
    crate::{display_json, from_str_json, serutil::StringList, ConditionBlock, Effect, ForgeError, Statement},
    serde::{Deserialize, Serialize},
};

/// The policy language version every document carries.
pub const POLICY_VERSION: &str = "2012-10-17";

/// One rendered policy statement in the IAM JSON grammar.
///
/// Single-element `Action`/`Resource` sets collapse to a scalar; the
/// `Condition` element is omitted entirely when no conditions were attached.
/// `Display` renders pretty JSON and `FromStr` parses it back.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct StatementDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    sid: Option<String>,
    effect: Effect,
    action: StringList,
    resource: StringList,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<ConditionBlock>,
}

impl StatementDocument {
    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn action(&self) -> &StringList {
        &self.action
    }

    #[inline]
    pub fn resource(&self) -> &StringList {
        &self.resource
    }

    #[inline]
    pub fn condition(&self) -> Option<&ConditionBlock> {
        self.condition.as_ref()
    }
}

display_json!(StatementDocument);
from_str_json!(StatementDocument);

impl Statement {
    /// Render the statement into the policy grammar.
    ///
    /// Legal in any state, so callers can inspect the document while still
    /// building; the statement itself is untouched. A statement with no
    /// actions grants or denies nothing and fails with
    /// [ForgeError::EmptyActionSet]. Actions render as `service:Action`;
    /// zero resource constraints render as the `*` wildcard.
    pub fn to_document(&self) -> Result<StatementDocument, ForgeError> {
        if self.actions().is_empty() {
            return Err(ForgeError::EmptyActionSet);
        }

        let action =
            StringList::from_parts(self.actions().iter().map(|name| self.catalog().qualify_action(name)).collect());

        let resource = if self.resources().is_empty() {
            StringList::from("*")
        } else {
            StringList::from_parts(self.resources().iter().map(|c| c.arn().to_string()).collect())
        };

        let condition = if self.conditions().is_empty() {
            None
        } else {
            Some(self.conditions().clone())
        };

        Ok(StatementDocument {
            sid: self.sid().map(str::to_string),
            effect: self.effect(),
            action,
            resource,
            condition,
        })
    }
}

/// A complete policy document: a version tag and the rendered statements.
///
/// Purely an output aggregate; no cross-statement analysis happens here.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct PolicyDocument {
    version: String,
    statement: Vec<StatementDocument>,
}

impl PolicyDocument {
    pub fn new(statements: Vec<StatementDocument>) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: statements,
        }
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn statements(&self) -> &[StatementDocument] {
        &self.statement
    }
}

display_json!(PolicyDocument);
from_str_json!(PolicyDocument);

#[cfg(test)]
mod tests {
    use {
        crate::{
            catalog::sample_catalog, condition::op, Effect, ForgeError, PolicyDocument, Statement,
            StatementDocument,
        },
        indoc::indoc,
        pretty_assertions::assert_eq,
        std::{str::FromStr, sync::Arc},
    };

    fn statement() -> Statement {
        Statement::new(Arc::new(sample_catalog()))
    }

    #[test_log::test]
    fn test_single_action_wildcard_resource() {
        let mut statement = statement();
        statement.add_action("ListWorkGroups").unwrap();
        statement.build();

        let document = statement.to_document().unwrap();
        assert_eq!(
            document.to_string(),
            indoc! { r#"
            {
                "Effect": "Allow",
                "Action": "athena:ListWorkGroups",
                "Resource": "*"
            }"# }
        );
    }

    #[test_log::test]
    fn test_scoped_statement_with_condition() {
        let mut statement = statement();
        statement
            .add_action("StartQueryExecution")
            .unwrap()
            .add_action("StopQueryExecution")
            .unwrap()
            .scope_to_resource(
                "workgroup",
                &[("WorkGroupName", "primary"), ("Region", "us-east-1"), ("Account", "123456789012")],
            )
            .unwrap()
            .attach_condition_to_last_resource("aws:ResourceTag/Team", None, &["analytics"])
            .unwrap()
            .build();

        let document = statement.to_document().unwrap();
        assert_eq!(
            document.to_string(),
            indoc! { r#"
            {
                "Effect": "Allow",
                "Action": [
                    "athena:StartQueryExecution",
                    "athena:StopQueryExecution"
                ],
                "Resource": "arn:aws:athena:us-east-1:123456789012:workgroup/primary",
                "Condition": {
                    "StringLike": {
                        "aws:ResourceTag/Team": "analytics"
                    }
                }
            }"# }
        );
    }

    #[test_log::test]
    fn test_deny_with_sid_and_grouped_conditions() {
        let mut statement = Statement::with_sid(Arc::new(sample_catalog()), "DenyInsecureAthena");
        statement
            .deny()
            .unwrap()
            .add_action("StartQueryExecution")
            .unwrap()
            .attach_condition("aws:SecureTransport", None, &["false"])
            .unwrap()
            .attach_condition("aws:RequestedRegion", None, &["eu-west-1", "eu-central-1"])
            .unwrap()
            .build();

        let document = statement.to_document().unwrap();
        assert_eq!(document.sid(), Some("DenyInsecureAthena"));
        assert_eq!(document.effect(), Effect::Deny);
        assert_eq!(
            document.to_string(),
            indoc! { r#"
            {
                "Sid": "DenyInsecureAthena",
                "Effect": "Deny",
                "Action": "athena:StartQueryExecution",
                "Resource": "*",
                "Condition": {
                    "Bool": {
                        "aws:SecureTransport": "false"
                    },
                    "StringEquals": {
                        "aws:RequestedRegion": [
                            "eu-west-1",
                            "eu-central-1"
                        ]
                    }
                }
            }"# }
        );
    }

    #[test_log::test]
    fn test_empty_action_set() {
        let mut statement = statement();
        assert_eq!(statement.to_document().unwrap_err(), ForgeError::EmptyActionSet);

        // Still rejected after an all-wildcard finalize.
        statement.build();
        assert_eq!(statement.to_document().unwrap_err(), ForgeError::EmptyActionSet);
    }

    #[test_log::test]
    fn test_document_legal_before_finalize() {
        let mut statement = statement();
        statement.add_action("GetQueryResults").unwrap();

        let before = statement.to_document().unwrap();
        statement.build();
        let after = statement.to_document().unwrap();
        assert_eq!(before, after);

        // Rejected mutation leaves the rendered document unaffected.
        assert_eq!(statement.add_action("ListWorkGroups").unwrap_err(), ForgeError::StatementFinalized);
        assert_eq!(statement.to_document().unwrap(), after);
    }

    #[test_log::test]
    fn test_round_trip() {
        let mut statement = statement();
        statement
            .add_action("CreateWorkGroup")
            .unwrap()
            .scope_to_resource("workgroup", &[("WorkGroupName", "*")])
            .unwrap()
            .attach_condition("aws:RequestTag/Dept", Some(op::StringEquals), &["Accounting"])
            .unwrap()
            .attach_condition("aws:TagKeys", Some(op::StringLike.for_all_values()), &["Dept", "CostCenter"])
            .unwrap()
            .build();

        let document = statement.to_document().unwrap();
        let parsed = StatementDocument::from_str(&document.to_string()).unwrap();
        assert_eq!(parsed, document);
        assert_eq!(parsed.action().to_vec(), vec!["athena:CreateWorkGroup"]);
        assert_eq!(parsed.resource().to_vec(), vec!["arn:aws:athena:*:*:workgroup/*"]);
        assert_eq!(parsed.condition().unwrap().len(), 2);
    }

    #[test_log::test]
    fn test_rejects_unknown_fields() {
        assert!(StatementDocument::from_str(
            r#"{ "Effect": "Allow", "Action": "a:B", "Resource": "*", "Principal": "*" }"#
        )
        .is_err());
    }

    #[test_log::test]
    fn test_policy_document() {
        let mut read = statement();
        read.add_action("GetQueryResults").unwrap().build();
        let mut deny = statement();
        deny.deny().unwrap().add_action("StopQueryExecution").unwrap().build();

        let policy = PolicyDocument::new(vec![read.to_document().unwrap(), deny.to_document().unwrap()]);
        assert_eq!(policy.version(), "2012-10-17");
        assert_eq!(policy.statements().len(), 2);

        let text = policy.to_string();
        assert!(text.starts_with("{\n    \"Version\": \"2012-10-17\","));
        assert_eq!(PolicyDocument::from_str(&text).unwrap(), policy);
    }
}
