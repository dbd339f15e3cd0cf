use cynic_parser::type_system::{self as ast, Definition, TypeDefinition, Value};

use crate::{
    description::{FieldDescription, InputValueDescription, SchemaDescription, TypeDescription},
    SchemaError, TypeRef, Wrapping,
};

/// Reads an SDL document into a description. Directives and descriptions are ignored and
/// `extend` definitions are merged into the type they extend.
pub(crate) fn description_from_sdl(sdl: &str) -> Result<SchemaDescription, SchemaError> {
    let document =
        cynic_parser::parse_type_system_document(sdl).map_err(|err| SchemaError::InvalidSdl(err.to_string()))?;

    let mut description = SchemaDescription::default();
    let mut extensions = Vec::new();

    for definition in document.definitions() {
        match definition {
            Definition::Schema(schema) => {
                if let Some(query) = schema.query_type() {
                    description.query_type = Some(query.named_type().to_owned());
                }

                if let Some(mutation) = schema.mutation_type() {
                    description.mutation_type = Some(mutation.named_type().to_owned());
                }
            }
            Definition::Type(ty) => description.types.push(convert_type(ty)),
            Definition::TypeExtension(ty) => extensions.push(convert_type(ty)),
            _ => (),
        }
    }

    for extension in extensions {
        let name = extension.name().to_string();

        match description.types.iter_mut().find(|ty| ty.name() == name) {
            Some(ty) => ty
                .merge(extension)
                .map_err(|_| SchemaError::MismatchedExtension { name })?,
            // An extension without a base definition stands in for it.
            None => description.types.push(extension),
        }
    }

    Ok(description)
}

fn convert_type(ty: TypeDefinition<'_>) -> TypeDescription {
    match ty {
        TypeDefinition::Scalar(scalar) => TypeDescription::Scalar {
            name: scalar.name().to_string(),
        },
        TypeDefinition::Object(object) => TypeDescription::Object {
            name: object.name().to_string(),
            interfaces: object.implements_interfaces().map(str::to_string).collect(),
            fields: object.fields().map(convert_field).collect(),
        },
        TypeDefinition::Interface(interface) => TypeDescription::Interface {
            name: interface.name().to_string(),
            fields: interface.fields().map(convert_field).collect(),
        },
        TypeDefinition::Union(union) => TypeDescription::Union {
            name: union.name().to_string(),
            members: union.members().map(|member| member.name().to_string()).collect(),
        },
        TypeDefinition::Enum(enm) => TypeDescription::Enum {
            name: enm.name().to_string(),
            values: enm.values().map(|value| value.value().to_string()).collect(),
        },
        TypeDefinition::InputObject(input_object) => TypeDescription::InputObject {
            name: input_object.name().to_string(),
            fields: input_object.fields().map(convert_input_value).collect(),
        },
    }
}

fn convert_field(field: ast::FieldDefinition<'_>) -> FieldDescription {
    FieldDescription {
        name: field.name().to_string(),
        ty: convert_type_ref(field.ty()),
        args: field.arguments().map(convert_input_value).collect(),
    }
}

fn convert_input_value(input_value: ast::InputValueDefinition<'_>) -> InputValueDescription {
    InputValueDescription {
        name: input_value.name().to_string(),
        ty: convert_type_ref(input_value.ty()),
        default_value: input_value.default_value().map(convert_value),
    }
}

fn convert_type_ref(ty: ast::Type<'_>) -> TypeRef {
    TypeRef::new(ty.name(), Wrapping::from_wrappers(ty.wrappers()))
}

fn convert_value(value: Value<'_>) -> serde_json::Value {
    match value {
        // Variables cannot appear in default values.
        Value::Null | Value::Variable(_) => serde_json::Value::Null,
        Value::Int(n) => n.as_i64().into(),
        Value::Float(n) => f64::from(n).into(),
        Value::String(s) | Value::BlockString(s) => s.into(),
        Value::Boolean(b) => b.into(),
        Value::Enum(name) => name.into(),
        Value::List(items) => serde_json::Value::Array(items.into_iter().map(convert_value).collect()),
        Value::Object(fields) => serde_json::Value::Object(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), convert_value(value)))
                .collect(),
        ),
    }
}
