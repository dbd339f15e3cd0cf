use std::{fmt, str::FromStr};

use cynic_parser::common::WrappingType;
use serde::{Deserialize, Deserializer, Serialize};

use crate::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListWrapping {
    NullableList,
    RequiredList,
}

/// List and non-null modifiers around a named type. List wrappings are stored innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wrapping {
    inner_is_required: bool,
    list_wrappings: Vec<ListWrapping>,
}

impl Wrapping {
    pub fn nullable() -> Self {
        Self::default()
    }

    pub fn required() -> Self {
        Self {
            inner_is_required: true,
            list_wrappings: Vec::new(),
        }
    }

    #[must_use]
    pub fn list(mut self) -> Self {
        self.list_wrappings.push(ListWrapping::NullableList);
        self
    }

    #[must_use]
    pub fn list_non_null(mut self) -> Self {
        self.list_wrappings.push(ListWrapping::RequiredList);
        self
    }

    /// Whether the outermost layer is non-null.
    pub fn is_required(&self) -> bool {
        match self.list_wrappings.last() {
            Some(list) => *list == ListWrapping::RequiredList,
            None => self.inner_is_required,
        }
    }

    pub fn is_list(&self) -> bool {
        !self.list_wrappings.is_empty()
    }

    pub fn inner_is_required(&self) -> bool {
        self.inner_is_required
    }

    /// Builds the wrapping from parser wrappers, which come outermost first.
    pub(crate) fn from_wrappers(wrappers: impl IntoIterator<Item = WrappingType>) -> Self {
        let wrappers = wrappers.into_iter().collect::<Vec<_>>();
        let mut wrappers = wrappers.into_iter().rev().peekable();

        let mut wrapping = if wrappers.next_if(|w| matches!(w, WrappingType::NonNull)).is_some() {
            Wrapping::required()
        } else {
            Wrapping::nullable()
        };

        while let Some(next) = wrappers.next() {
            debug_assert_eq!(next, WrappingType::List, "double non-null wrapping type not possible");

            wrapping = if wrappers.next_if(|w| matches!(w, WrappingType::NonNull)).is_some() {
                wrapping.list_non_null()
            } else {
                wrapping.list()
            }
        }

        wrapping
    }
}

/// A named type with its wrapping, as written in a field or argument signature: `[users!]!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    name: String,
    wrapping: Wrapping,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, wrapping: Wrapping) -> Self {
        Self {
            name: name.into(),
            wrapping,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Wrapping::nullable())
    }

    /// The innermost named type.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wrapping(&self) -> &Wrapping {
        &self.wrapping
    }

    pub fn is_required(&self) -> bool {
        self.wrapping.is_required()
    }

    pub fn is_list(&self) -> bool {
        self.wrapping.is_list()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in &self.wrapping.list_wrappings {
            f.write_str("[")?;
        }

        f.write_str(&self.name)?;

        if self.wrapping.inner_is_required {
            f.write_str("!")?;
        }

        for list in &self.wrapping.list_wrappings {
            f.write_str("]")?;

            if *list == ListWrapping::RequiredList {
                f.write_str("!")?;
            }
        }

        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchemaError::InvalidTypeReference { reference: s.to_string() };

        let mut wrappers = Vec::new();
        let mut rest = s.trim();

        loop {
            if let Some(inner) = rest.strip_suffix('!') {
                if matches!(wrappers.last(), Some(WrappingType::NonNull)) {
                    return Err(invalid());
                }

                wrappers.push(WrappingType::NonNull);
                rest = inner.trim_end();
            } else if let Some(inner) = rest.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                wrappers.push(WrappingType::List);
                rest = inner.trim();
            } else {
                break;
            }
        }

        if !is_name(rest) {
            return Err(invalid());
        }

        Ok(TypeRef::new(rest, Wrapping::from_wrappers(wrappers)))
    }
}

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// `/[_A-Za-z][_0-9A-Za-z]*/`
pub(crate) fn is_name(s: &str) -> bool {
    let mut chars = s.chars();

    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}
