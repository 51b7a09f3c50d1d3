use {
    serde::{
        de::{self, Deserializer, SeqAccess, Visitor},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::{
        fmt::{Formatter, Result as FmtResult},
        ops::Index,
        slice::Iter,
    },
};

/// Implement Display for a type by formatting it as pretty-printed JSON.
#[macro_export]
macro_rules! display_json {
    ($cls:ident) => {
        impl ::std::fmt::Display for $cls {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                let formatter = ::serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = ::serde_json::Serializer::with_formatter(Vec::new(), formatter);
                self.serialize(&mut ser).map_err(|e| {
                    ::log::error!("Failed to serialize {}: {}", stringify!($cls), e);
                    ::std::fmt::Error
                })?;
                let buf = ser.into_inner();
                let s = ::std::str::from_utf8(&buf).map_err(|e| {
                    ::log::error!("JSON serialization of {} was not UTF-8: {}", stringify!($cls), e);
                    ::std::fmt::Error
                })?;
                f.write_str(s)
            }
        }
    };
}

/// Implement FromStr for a type by parsing it as JSON.
#[macro_export]
macro_rules! from_str_json {
    ($cls:ident) => {
        impl ::std::str::FromStr for $cls {
            type Err = ::serde_json::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                ::serde_json::from_str::<Self>(s).map_err(|e| {
                    ::log::debug!("Failed to parse {}: {}: {:?}", stringify!($cls), s, e);
                    e
                })
            }
        }
    };
}

/// A JSON field that is either a bare string or an array of strings.
///
/// The IAM grammar collapses single-element `Action`/`Resource` arrays to a
/// scalar; `StringList` preserves which form was used while comparing the two
/// forms as equal when they hold the same single element. List order is
/// insertion order and is preserved through serialization.
#[derive(Clone, Debug)]
pub enum StringList {
    Single(String),
    List(Vec<String>),
}

impl StringList {
    /// Build a list from parts, collapsing a single element to the scalar
    /// form the way the target grammar renders it.
    pub fn from_parts(mut parts: Vec<String>) -> Self {
        if parts.len() == 1 {
            Self::Single(parts.remove(0))
        } else {
            Self::List(parts)
        }
    }

    pub fn to_vec(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::List(list) => list.iter().map(String::as_str).collect(),
        }
    }

    pub fn iter(&self) -> Iter<'_, String> {
        match self {
            Self::Single(s) => std::slice::from_ref(s).iter(),
            Self::List(list) => list.iter(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::List(list) => list.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::List(list) => list.len(),
        }
    }
}

impl PartialEq for StringList {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Single(a), Self::Single(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Single(a), Self::List(b)) => b.len() == 1 && a == &b[0],
            (Self::List(a), Self::Single(b)) => a.len() == 1 && &a[0] == b,
        }
    }
}

impl Eq for StringList {}

impl From<String> for StringList {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<&str> for StringList {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<Vec<String>> for StringList {
    fn from(list: Vec<String>) -> Self {
        Self::List(list)
    }
}

impl Index<usize> for StringList {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Self::Single(s) => {
                if index == 0 {
                    s
                } else {
                    panic!("index out of bounds: the len is 1 but the index is {}", index)
                }
            }
            Self::List(list) => &list[index],
        }
    }
}

struct StringListVisitor;

impl<'de> Visitor<'de> for StringListVisitor {
    type Value = StringList;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("string or list of strings")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(StringList::Single(v.to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = match access.size_hint() {
            Some(size) => Vec::with_capacity(size),
            None => Vec::new(),
        };

        while let Some(el) = access.next_element::<String>()? {
            result.push(el);
        }

        Ok(StringList::List(result))
    }
}

impl<'de> Deserialize<'de> for StringList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StringListVisitor)
    }
}

impl Serialize for StringList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(s) => s.serialize(serializer),
            Self::List(list) => list.serialize(serializer),
        }
    }
}
