pub mod op;

pub use op::{Cmp, ConditionOp, OperandKind, SetQualifier};

use {
    crate::{display_json, from_str_json, serutil::StringList, ForgeError},
    serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::collections::{btree_map::Iter, BTreeMap},
};

/// Condition keys sharing one operator, in the shape the policy grammar
/// nests under the operator name.
pub type ConditionMap = BTreeMap<String, StringList>;

/// One condition attached to a statement: a key, a comparison operator, and
/// the operand values. Owned by the statement it was attached to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Condition {
    key: String,
    op: ConditionOp,
    values: Vec<String>,
}

impl Condition {
    pub fn new<K: Into<String>>(key: K, op: ConditionOp, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            op,
            values,
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn op(&self) -> &ConditionOp {
        &self.op
    }

    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// The accumulated condition block of one statement, grouped by operator the
/// way the policy grammar expects: `{ operator: { key: value(s) } }`.
///
/// Keys sharing an operator merge into one operator group. Attaching the
/// same key and operator twice is rejected rather than merged, since the
/// grammar defines no deterministic merge for that case; the same key under
/// a different operator forms a separate group (the grammar ANDs groups).
/// BTreeMap ordering keeps serialized output deterministic.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConditionBlock {
    map: BTreeMap<ConditionOp, ConditionMap>,
}

impl ConditionBlock {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition, failing with [ForgeError::EmptyConditionValues] if
    /// it carries no operand values and [ForgeError::DuplicateCondition] if
    /// the key is already present under the same operator. The block is
    /// unchanged on failure.
    pub fn attach(&mut self, condition: Condition) -> Result<(), ForgeError> {
        if condition.values.is_empty() {
            return Err(ForgeError::EmptyConditionValues(condition.key));
        }

        let group = self.map.entry(condition.op).or_default();
        if group.contains_key(&condition.key) {
            return Err(ForgeError::DuplicateCondition(format!("{} {}", condition.key, condition.op)));
        }

        group.insert(condition.key, StringList::from_parts(condition.values));
        Ok(())
    }

    /// Whether the key is present under the operator.
    pub fn contains(&self, key: &str, op: &ConditionOp) -> bool {
        self.map.get(op).map(|group| group.contains_key(key)).unwrap_or(false)
    }

    pub fn get(&self, op: &ConditionOp) -> Option<&ConditionMap> {
        self.map.get(op)
    }

    pub fn iter(&self) -> Iter<'_, ConditionOp, ConditionMap> {
        self.map.iter()
    }

    /// Condition keys across all operator groups.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.values().flat_map(|group| group.keys().map(String::as_str))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The number of operator groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }
}

impl<'de> Deserialize<'de> for ConditionBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::deserialize(deserializer)?;

        Ok(Self {
            map,
        })
    }
}

impl Serialize for ConditionBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

display_json!(ConditionBlock);
from_str_json!(ConditionBlock);

impl<'a> IntoIterator for &'a ConditionBlock {
    type Item = (&'a ConditionOp, &'a ConditionMap);
    type IntoIter = Iter<'a, ConditionOp, ConditionMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{condition::op, Condition, ConditionBlock, ForgeError},
        indoc::indoc,
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    fn tag_condition() -> Condition {
        Condition::new("aws:RequestTag/Dept", op::StringEquals, vec!["Accounting".to_string()])
    }

    #[test_log::test]
    fn test_group_by_operator() {
        let mut block = ConditionBlock::new();
        block.attach(tag_condition()).unwrap();
        block
            .attach(Condition::new("aws:PrincipalTag/Team", op::StringEquals, vec!["blue".to_string()]))
            .unwrap();
        block.attach(Condition::new("aws:SecureTransport", op::Bool, vec!["true".to_string()])).unwrap();

        // Two StringEquals keys merge into one group.
        assert_eq!(block.len(), 2);
        assert_eq!(block.get(&op::StringEquals).unwrap().len(), 2);
        assert_eq!(
            block.keys().collect::<Vec<_>>(),
            vec!["aws:SecureTransport", "aws:PrincipalTag/Team", "aws:RequestTag/Dept"]
        );

        assert_eq!(
            block.to_string(),
            indoc! { r#"
            {
                "Bool": {
                    "aws:SecureTransport": "true"
                },
                "StringEquals": {
                    "aws:PrincipalTag/Team": "blue",
                    "aws:RequestTag/Dept": "Accounting"
                }
            }"# }
        );
    }

    #[test_log::test]
    fn test_duplicate_key_same_operator() {
        let mut block = ConditionBlock::new();
        block.attach(tag_condition()).unwrap();

        let e = block
            .attach(Condition::new("aws:RequestTag/Dept", op::StringEquals, vec!["Marketing".to_string()]))
            .unwrap_err();
        assert_eq!(e, ForgeError::DuplicateCondition("aws:RequestTag/Dept StringEquals".to_string()));

        // The first attachment is intact.
        assert_eq!(block.get(&op::StringEquals).unwrap()["aws:RequestTag/Dept"].to_vec(), vec!["Accounting"]);
    }

    #[test_log::test]
    fn test_same_key_different_operator_is_legal() {
        let mut block = ConditionBlock::new();
        block.attach(tag_condition()).unwrap();
        block
            .attach(Condition::new("aws:RequestTag/Dept", op::StringLike, vec!["Acc*".to_string()]))
            .unwrap();

        assert_eq!(block.len(), 2);
        assert!(block.contains("aws:RequestTag/Dept", &op::StringEquals));
        assert!(block.contains("aws:RequestTag/Dept", &op::StringLike));
        assert!(!block.contains("aws:RequestTag/Dept", &op::StringNotEquals));
    }

    #[test_log::test]
    fn test_multiple_values_serialize_as_list() {
        let mut block = ConditionBlock::new();
        block
            .attach(Condition::new(
                "aws:TagKeys",
                op::StringLike.for_all_values(),
                vec!["Dept".to_string(), "CostCenter".to_string()],
            ))
            .unwrap();

        let text = block.to_string();
        assert_eq!(
            text,
            indoc! { r#"
            {
                "ForAllValues:StringLike": {
                    "aws:TagKeys": [
                        "Dept",
                        "CostCenter"
                    ]
                }
            }"# }
        );

        let parsed = ConditionBlock::from_str(&text).unwrap();
        assert_eq!(parsed, block);
    }

    #[test_log::test]
    fn test_no_values_rejected() {
        let mut block = ConditionBlock::new();
        let e = block.attach(Condition::new("aws:RequestTag/Dept", op::StringEquals, vec![])).unwrap_err();
        assert_eq!(e, ForgeError::EmptyConditionValues("aws:RequestTag/Dept".to_string()));

        // Nothing landed in the block, not even an empty operator group.
        assert!(block.is_empty());
        assert_eq!(block.to_string(), "{}");
    }

    #[test_log::test]
    fn test_empty() {
        let block = ConditionBlock::new();
        assert!(block.is_empty());
        assert_eq!(block.to_string(), "{}");
    }
}
