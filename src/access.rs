use {
    crate::ForgeError,
    serde::{de, de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Coarse classification of an action's impact, as tagged in the service
/// action tables.
///
/// The derived ordering is the fixed total order used by
/// [max access level][crate::Statement::max_access_level] aggregation:
/// `Read < List < Tagging < Write < PermissionsManagement`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AccessLevel {
    Read,
    List,
    Tagging,
    Write,
    PermissionsManagement,
}

impl AccessLevel {
    /// The spelling used in the upstream action tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::List => "List",
            Self::Tagging => "Tagging",
            Self::Write => "Write",
            Self::PermissionsManagement => "Permissions management",
        }
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Read" => Ok(Self::Read),
            "List" => Ok(Self::List),
            "Tagging" => Ok(Self::Tagging),
            "Write" => Ok(Self::Write),
            // Both spellings occur in the wild.
            "Permissions management" | "PermissionsManagement" => Ok(Self::PermissionsManagement),
            _ => Err(ForgeError::InvalidAccessLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for AccessLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        AccessLevel::from_str(&value).map_err(de::Error::custom)
    }
}

impl Serialize for AccessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use {crate::AccessLevel, pretty_assertions::assert_eq, std::str::FromStr};

    #[test_log::test]
    fn test_total_order() {
        let mut levels = vec![
            AccessLevel::PermissionsManagement,
            AccessLevel::Read,
            AccessLevel::Write,
            AccessLevel::List,
            AccessLevel::Tagging,
        ];
        levels.sort();
        assert_eq!(
            levels,
            vec![
                AccessLevel::Read,
                AccessLevel::List,
                AccessLevel::Tagging,
                AccessLevel::Write,
                AccessLevel::PermissionsManagement,
            ]
        );
        assert!(AccessLevel::Read < AccessLevel::List);
        assert!(AccessLevel::Write < AccessLevel::PermissionsManagement);
    }

    #[test_log::test]
    fn test_from_str() {
        assert_eq!(AccessLevel::from_str("Read").unwrap(), AccessLevel::Read);
        assert_eq!(AccessLevel::from_str("Permissions management").unwrap(), AccessLevel::PermissionsManagement);
        assert_eq!(AccessLevel::from_str("PermissionsManagement").unwrap(), AccessLevel::PermissionsManagement);

        let e = AccessLevel::from_str("Admin").unwrap_err();
        assert_eq!(e.to_string(), "Invalid access level: Admin");
    }

    #[test_log::test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&AccessLevel::Tagging).unwrap(), r#""Tagging""#);
        assert_eq!(
            serde_json::to_string(&AccessLevel::PermissionsManagement).unwrap(),
            r#""Permissions management""#
        );
        assert_eq!(serde_json::from_str::<AccessLevel>(r#""Write""#).unwrap(), AccessLevel::Write);
        assert!(serde_json::from_str::<AccessLevel>(r#""Root""#).is_err());
    }
}
