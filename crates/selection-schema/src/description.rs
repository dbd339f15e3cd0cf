use serde::{Deserialize, Serialize};

use crate::TypeRef;

/// The pre-generated schema description a client is constructed from.
///
/// ```json
/// {
///   "queryType": "query_root",
///   "types": [
///     { "kind": "OBJECT", "name": "users", "fields": [{ "name": "id", "type": "Int!" }] },
///     { "kind": "UNION", "name": "Media", "members": ["Image", "Video"] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaDescription {
    /// Defaults to `Query`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    /// Defaults to `Mutation` when such a type exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_type: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeDescription {
    Object {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        interfaces: Vec<String>,
        #[serde(default)]
        fields: Vec<FieldDescription>,
    },
    Interface {
        name: String,
        #[serde(default)]
        fields: Vec<FieldDescription>,
    },
    Union {
        name: String,
        #[serde(default)]
        members: Vec<String>,
    },
    Enum {
        name: String,
        #[serde(default)]
        values: Vec<String>,
    },
    Scalar {
        name: String,
    },
    InputObject {
        name: String,
        #[serde(default)]
        fields: Vec<InputValueDescription>,
    },
}

impl TypeDescription {
    pub fn name(&self) -> &str {
        match self {
            TypeDescription::Object { name, .. }
            | TypeDescription::Interface { name, .. }
            | TypeDescription::Union { name, .. }
            | TypeDescription::Enum { name, .. }
            | TypeDescription::Scalar { name }
            | TypeDescription::InputObject { name, .. } => name,
        }
    }

    /// Appends the fields, members or values of an extension of the same kind.
    /// Returns the extension back when the kinds differ.
    pub(crate) fn merge(&mut self, extension: TypeDescription) -> Result<(), TypeDescription> {
        match (self, extension) {
            (
                TypeDescription::Object { interfaces, fields, .. },
                TypeDescription::Object {
                    interfaces: extra_interfaces,
                    fields: extra_fields,
                    ..
                },
            ) => {
                interfaces.extend(extra_interfaces);
                fields.extend(extra_fields);
            }
            (TypeDescription::Interface { fields, .. }, TypeDescription::Interface { fields: extra, .. }) => {
                fields.extend(extra);
            }
            (TypeDescription::Union { members, .. }, TypeDescription::Union { members: extra, .. }) => {
                members.extend(extra);
            }
            (TypeDescription::Enum { values, .. }, TypeDescription::Enum { values: extra, .. }) => {
                values.extend(extra);
            }
            (TypeDescription::InputObject { fields, .. }, TypeDescription::InputObject { fields: extra, .. }) => {
                fields.extend(extra);
            }
            (TypeDescription::Scalar { .. }, TypeDescription::Scalar { .. }) => {}
            (_, extension) => return Err(extension),
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<InputValueDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputValueDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}
