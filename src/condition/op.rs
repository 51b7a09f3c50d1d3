use {
    crate::ForgeError,
    serde::{de, de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The kind of operand a condition key accepts, as declared in the condition
/// catalogue.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum OperandKind {
    String,
    Numeric,
    Date,
    Bool,
    Arn,
    IpAddress,
}

impl OperandKind {
    /// The comparison used when a key of this kind carries no per-key default
    /// operator. String keys default to `StringLike`, matching the upstream
    /// builder's behavior.
    pub fn default_op(&self) -> ConditionOp {
        match self {
            Self::String => op::StringLike,
            Self::Numeric => op::NumericEquals,
            Self::Date => op::DateEquals,
            Self::Bool => op::Bool,
            Self::Arn => op::ArnLike,
            Self::IpAddress => op::IpAddress,
        }
    }
}

/// Set-operator prefix for multivalued condition keys.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SetQualifier {
    None,
    ForAllValues,
    ForAnyValue,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StringCmp {
    Equals,
    NotEquals,
    EqualsIgnoreCase,
    NotEqualsIgnoreCase,
    Like,
    NotLike,
}

/// Comparisons shared by the numeric and date operator families.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum OrderedCmp {
    Equals,
    NotEquals,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ArnCmp {
    Equals,
    NotEquals,
    Like,
    NotLike,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum IpCmp {
    Match,
    NotMatch,
}

/// Variant order matches the alphabetical order of the IAM operator names so
/// that the derived [Ord] keeps serialized condition blocks in a stable,
/// readable order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Cmp {
    Arn(ArnCmp),
    Bool,
    Date(OrderedCmp),
    IpAddress(IpCmp),
    Null,
    Numeric(OrderedCmp),
    String(StringCmp),
}

/// An operator for a condition clause.
///
/// Modeled as comparison × set qualifier × `IfExists` flag so that the full
/// IAM operator vocabulary (`ForAnyValue:StringEqualsIfExists` and friends)
/// composes instead of being enumerated. `Display` and `FromStr` round-trip
/// the IAM spelling.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ConditionOp {
    // Field order drives the derived Ord: comparison family first, then the
    // set qualifier, then the IfExists flag.
    cmp: Cmp,
    qualifier: SetQualifier,
    if_exists: bool,
}

impl ConditionOp {
    pub const fn new(cmp: Cmp) -> Self {
        Self {
            cmp,
            qualifier: SetQualifier::None,
            if_exists: false,
        }
    }

    /// The operand kind this operator compares. [Cmp::Null] tests key
    /// presence and works with keys of any kind, so it has none.
    pub fn operand_kind(&self) -> Option<OperandKind> {
        match self.cmp {
            Cmp::String(_) => Some(OperandKind::String),
            Cmp::Numeric(_) => Some(OperandKind::Numeric),
            Cmp::Date(_) => Some(OperandKind::Date),
            Cmp::Bool => Some(OperandKind::Bool),
            Cmp::Arn(_) => Some(OperandKind::Arn),
            Cmp::IpAddress(_) => Some(OperandKind::IpAddress),
            Cmp::Null => None,
        }
    }

    #[inline]
    pub fn cmp(&self) -> Cmp {
        self.cmp
    }

    /// The `...IfExists` form of this operator.
    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// The `ForAllValues:` form of this operator.
    pub fn for_all_values(mut self) -> Self {
        self.qualifier = SetQualifier::ForAllValues;
        self
    }

    /// The `ForAnyValue:` form of this operator.
    pub fn for_any_value(mut self) -> Self {
        self.qualifier = SetQualifier::ForAnyValue;
        self
    }

    fn base_name(&self) -> String {
        match self.cmp {
            Cmp::String(cmp) => {
                let suffix = match cmp {
                    StringCmp::Equals => "Equals",
                    StringCmp::NotEquals => "NotEquals",
                    StringCmp::EqualsIgnoreCase => "EqualsIgnoreCase",
                    StringCmp::NotEqualsIgnoreCase => "NotEqualsIgnoreCase",
                    StringCmp::Like => "Like",
                    StringCmp::NotLike => "NotLike",
                };
                format!("String{}", suffix)
            }
            Cmp::Numeric(cmp) => format!("Numeric{}", ordered_suffix(cmp)),
            Cmp::Date(cmp) => format!("Date{}", ordered_suffix(cmp)),
            Cmp::Bool => "Bool".to_string(),
            Cmp::Arn(cmp) => {
                let suffix = match cmp {
                    ArnCmp::Equals => "Equals",
                    ArnCmp::NotEquals => "NotEquals",
                    ArnCmp::Like => "Like",
                    ArnCmp::NotLike => "NotLike",
                };
                format!("Arn{}", suffix)
            }
            Cmp::IpAddress(IpCmp::Match) => "IpAddress".to_string(),
            Cmp::IpAddress(IpCmp::NotMatch) => "NotIpAddress".to_string(),
            Cmp::Null => "Null".to_string(),
        }
    }
}

fn ordered_suffix(cmp: OrderedCmp) -> &'static str {
    match cmp {
        OrderedCmp::Equals => "Equals",
        OrderedCmp::NotEquals => "NotEquals",
        OrderedCmp::LessThan => "LessThan",
        OrderedCmp::LessThanEquals => "LessThanEquals",
        OrderedCmp::GreaterThan => "GreaterThan",
        OrderedCmp::GreaterThanEquals => "GreaterThanEquals",
    }
}

impl Display for ConditionOp {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self.qualifier {
            SetQualifier::None => (),
            SetQualifier::ForAllValues => f.write_str("ForAllValues:")?,
            SetQualifier::ForAnyValue => f.write_str("ForAnyValue:")?,
        }

        f.write_str(&self.base_name())?;

        if self.if_exists {
            f.write_str("IfExists")?;
        }

        Ok(())
    }
}

impl FromStr for ConditionOp {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (qualifier, rest) = if let Some(rest) = s.strip_prefix("ForAllValues:") {
            (SetQualifier::ForAllValues, rest)
        } else if let Some(rest) = s.strip_prefix("ForAnyValue:") {
            (SetQualifier::ForAnyValue, rest)
        } else {
            (SetQualifier::None, s)
        };

        let (base, if_exists) = match rest.strip_suffix("IfExists") {
            Some(base) if !base.is_empty() => (base, true),
            _ => (rest, false),
        };

        let cmp = match base {
            "StringEquals" => Cmp::String(StringCmp::Equals),
            "StringNotEquals" => Cmp::String(StringCmp::NotEquals),
            "StringEqualsIgnoreCase" => Cmp::String(StringCmp::EqualsIgnoreCase),
            "StringNotEqualsIgnoreCase" => Cmp::String(StringCmp::NotEqualsIgnoreCase),
            "StringLike" => Cmp::String(StringCmp::Like),
            "StringNotLike" => Cmp::String(StringCmp::NotLike),
            "NumericEquals" => Cmp::Numeric(OrderedCmp::Equals),
            "NumericNotEquals" => Cmp::Numeric(OrderedCmp::NotEquals),
            "NumericLessThan" => Cmp::Numeric(OrderedCmp::LessThan),
            "NumericLessThanEquals" => Cmp::Numeric(OrderedCmp::LessThanEquals),
            "NumericGreaterThan" => Cmp::Numeric(OrderedCmp::GreaterThan),
            "NumericGreaterThanEquals" => Cmp::Numeric(OrderedCmp::GreaterThanEquals),
            "DateEquals" => Cmp::Date(OrderedCmp::Equals),
            "DateNotEquals" => Cmp::Date(OrderedCmp::NotEquals),
            "DateLessThan" => Cmp::Date(OrderedCmp::LessThan),
            "DateLessThanEquals" => Cmp::Date(OrderedCmp::LessThanEquals),
            "DateGreaterThan" => Cmp::Date(OrderedCmp::GreaterThan),
            "DateGreaterThanEquals" => Cmp::Date(OrderedCmp::GreaterThanEquals),
            "Bool" => Cmp::Bool,
            "ArnEquals" => Cmp::Arn(ArnCmp::Equals),
            "ArnNotEquals" => Cmp::Arn(ArnCmp::NotEquals),
            "ArnLike" => Cmp::Arn(ArnCmp::Like),
            "ArnNotLike" => Cmp::Arn(ArnCmp::NotLike),
            "IpAddress" => Cmp::IpAddress(IpCmp::Match),
            "NotIpAddress" => Cmp::IpAddress(IpCmp::NotMatch),
            "Null" => Cmp::Null,
            _ => return Err(ForgeError::InvalidConditionOperator(s.to_string())),
        };

        // IAM does not define an IfExists form of Null.
        if cmp == Cmp::Null && if_exists {
            return Err(ForgeError::InvalidConditionOperator(s.to_string()));
        }

        Ok(Self {
            qualifier,
            cmp,
            if_exists,
        })
    }
}

impl<'de> Deserialize<'de> for ConditionOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        ConditionOp::from_str(&value).map_err(de::Error::custom)
    }
}

impl Serialize for ConditionOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// The named operators, usable without assembling a [ConditionOp] by hand.
#[allow(non_upper_case_globals)]
pub mod op {
    use super::{ArnCmp, Cmp, ConditionOp, IpCmp, OrderedCmp, StringCmp};

    pub const StringEquals: ConditionOp = ConditionOp::new(Cmp::String(StringCmp::Equals));
    pub const StringNotEquals: ConditionOp = ConditionOp::new(Cmp::String(StringCmp::NotEquals));
    pub const StringEqualsIgnoreCase: ConditionOp = ConditionOp::new(Cmp::String(StringCmp::EqualsIgnoreCase));
    pub const StringNotEqualsIgnoreCase: ConditionOp = ConditionOp::new(Cmp::String(StringCmp::NotEqualsIgnoreCase));
    pub const StringLike: ConditionOp = ConditionOp::new(Cmp::String(StringCmp::Like));
    pub const StringNotLike: ConditionOp = ConditionOp::new(Cmp::String(StringCmp::NotLike));

    pub const NumericEquals: ConditionOp = ConditionOp::new(Cmp::Numeric(OrderedCmp::Equals));
    pub const NumericNotEquals: ConditionOp = ConditionOp::new(Cmp::Numeric(OrderedCmp::NotEquals));
    pub const NumericLessThan: ConditionOp = ConditionOp::new(Cmp::Numeric(OrderedCmp::LessThan));
    pub const NumericLessThanEquals: ConditionOp = ConditionOp::new(Cmp::Numeric(OrderedCmp::LessThanEquals));
    pub const NumericGreaterThan: ConditionOp = ConditionOp::new(Cmp::Numeric(OrderedCmp::GreaterThan));
    pub const NumericGreaterThanEquals: ConditionOp = ConditionOp::new(Cmp::Numeric(OrderedCmp::GreaterThanEquals));

    pub const DateEquals: ConditionOp = ConditionOp::new(Cmp::Date(OrderedCmp::Equals));
    pub const DateNotEquals: ConditionOp = ConditionOp::new(Cmp::Date(OrderedCmp::NotEquals));
    pub const DateLessThan: ConditionOp = ConditionOp::new(Cmp::Date(OrderedCmp::LessThan));
    pub const DateLessThanEquals: ConditionOp = ConditionOp::new(Cmp::Date(OrderedCmp::LessThanEquals));
    pub const DateGreaterThan: ConditionOp = ConditionOp::new(Cmp::Date(OrderedCmp::GreaterThan));
    pub const DateGreaterThanEquals: ConditionOp = ConditionOp::new(Cmp::Date(OrderedCmp::GreaterThanEquals));

    pub const Bool: ConditionOp = ConditionOp::new(Cmp::Bool);

    pub const ArnEquals: ConditionOp = ConditionOp::new(Cmp::Arn(ArnCmp::Equals));
    pub const ArnNotEquals: ConditionOp = ConditionOp::new(Cmp::Arn(ArnCmp::NotEquals));
    pub const ArnLike: ConditionOp = ConditionOp::new(Cmp::Arn(ArnCmp::Like));
    pub const ArnNotLike: ConditionOp = ConditionOp::new(Cmp::Arn(ArnCmp::NotLike));

    pub const IpAddress: ConditionOp = ConditionOp::new(Cmp::IpAddress(IpCmp::Match));
    pub const NotIpAddress: ConditionOp = ConditionOp::new(Cmp::IpAddress(IpCmp::NotMatch));

    pub const Null: ConditionOp = ConditionOp::new(Cmp::Null);
}

pub use self::op::*;
