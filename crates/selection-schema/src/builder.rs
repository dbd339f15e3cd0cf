use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::{
    description::{FieldDescription, InputValueDescription, SchemaDescription, TypeDescription},
    wrapping::is_name,
    EnumDefinition, FieldDefinition, InputObjectDefinition, InputValueDefinition, InterfaceDefinition,
    ObjectDefinition, OperationKind, RootOperation, ScalarDefinition, Schema, SchemaError, TypeDefinition, TypeKind,
    TypeRef, UnionDefinition,
};

pub(crate) const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

const DEFAULT_QUERY_TYPE: &str = "Query";
const DEFAULT_MUTATION_TYPE: &str = "Mutation";

pub(crate) fn build(description: SchemaDescription) -> Result<Schema, SchemaError> {
    let SchemaDescription {
        query_type,
        mutation_type,
        types: descriptions,
    } = description;

    let mut kinds = BUILTIN_SCALARS
        .iter()
        .map(|name| (name.to_string(), TypeKind::Scalar))
        .collect::<IndexMap<_, _>>();

    for ty in &descriptions {
        check_name("schema", ty.name())?;
        let kind = description_kind(ty);

        match kinds.get(ty.name()) {
            None => {
                kinds.insert(ty.name().to_string(), kind);
            }
            // Introspection-derived descriptions list the built-in scalars too.
            Some(TypeKind::Scalar) if kind == TypeKind::Scalar && BUILTIN_SCALARS.contains(&ty.name()) => {}
            Some(_) => {
                return Err(SchemaError::DuplicateType {
                    name: ty.name().to_string(),
                })
            }
        }
    }

    let query_type = query_type.unwrap_or_else(|| DEFAULT_QUERY_TYPE.to_string());
    let mutation_type = mutation_type.or_else(|| {
        kinds
            .contains_key(DEFAULT_MUTATION_TYPE)
            .then(|| DEFAULT_MUTATION_TYPE.to_string())
    });

    let ctx = BuildContext {
        kinds: &kinds,
        query_type: &query_type,
        mutation_type: mutation_type.as_deref(),
    };

    let mut types = IndexMap::with_capacity(kinds.len());

    for name in BUILTIN_SCALARS {
        types.insert(
            name.to_string(),
            TypeDefinition::Scalar(ScalarDefinition { name: name.to_string() }),
        );
    }

    for ty in descriptions {
        let definition = ctx.convert_type(ty)?;
        types.insert(definition.name().to_string(), definition);
    }

    let implementations = types
        .values()
        .filter_map(|definition| match definition {
            TypeDefinition::Object(object) => Some(object),
            _ => None,
        })
        .flat_map(|object| {
            object
                .interfaces
                .iter()
                .map(|interface| (interface.clone(), object.name.clone()))
        })
        .collect::<Vec<_>>();

    for (interface, object) in implementations {
        if let Some(TypeDefinition::Interface(definition)) = types.get_mut(&interface) {
            definition.implementors.insert(object);
        }
    }

    let queries = root_operations(&types, OperationKind::Query, &query_type)?;
    let mutations = match &mutation_type {
        Some(name) => root_operations(&types, OperationKind::Mutation, name)?,
        None => IndexMap::new(),
    };

    tracing::debug!(
        types = types.len(),
        queries = queries.len(),
        mutations = mutations.len(),
        "Built schema model"
    );

    Ok(Schema {
        types,
        query_type,
        mutation_type,
        queries,
        mutations,
    })
}

/// Declared names end up verbatim in operation documents.
fn check_name(location: &str, name: &str) -> Result<(), SchemaError> {
    if is_name(name) {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            location: location.to_string(),
            name: name.to_string(),
        })
    }
}

fn description_kind(ty: &TypeDescription) -> TypeKind {
    match ty {
        TypeDescription::Object { .. } => TypeKind::Object,
        TypeDescription::Interface { .. } => TypeKind::Interface,
        TypeDescription::Union { .. } => TypeKind::Union,
        TypeDescription::Enum { .. } => TypeKind::Enum,
        TypeDescription::Scalar { .. } => TypeKind::Scalar,
        TypeDescription::InputObject { .. } => TypeKind::InputObject,
    }
}

fn root_operations(
    types: &IndexMap<String, TypeDefinition>,
    kind: OperationKind,
    root_type: &str,
) -> Result<IndexMap<String, RootOperation>, SchemaError> {
    let object = match types.get(root_type) {
        Some(TypeDefinition::Object(object)) => object,
        Some(_) => {
            return Err(SchemaError::RootTypeNotObject {
                kind,
                name: root_type.to_string(),
            })
        }
        None => {
            return Err(SchemaError::MissingRootType {
                kind,
                name: root_type.to_string(),
            })
        }
    };

    Ok(object
        .fields
        .iter()
        .map(|field| {
            let operation = RootOperation {
                name: field.name.clone(),
                kind,
                return_type: field.ty.clone(),
                arguments: field.arguments.clone(),
            };

            (field.name.clone(), operation)
        })
        .collect())
}

struct BuildContext<'a> {
    kinds: &'a IndexMap<String, TypeKind>,
    query_type: &'a str,
    mutation_type: Option<&'a str>,
}

impl BuildContext<'_> {
    fn convert_type(&self, ty: TypeDescription) -> Result<TypeDefinition, SchemaError> {
        let definition = match ty {
            TypeDescription::Object {
                name,
                interfaces,
                fields,
            } => {
                for interface in &interfaces {
                    match self.kinds.get(interface) {
                        Some(TypeKind::Interface) => (),
                        Some(_) => {
                            return Err(SchemaError::NotAnInterface {
                                object: name,
                                name: interface.clone(),
                            })
                        }
                        None => {
                            return Err(SchemaError::UnknownType {
                                location: name,
                                name: interface.clone(),
                            })
                        }
                    }
                }

                let fields = self.convert_fields(&name, fields)?;

                TypeDefinition::Object(ObjectDefinition {
                    name,
                    interfaces,
                    fields,
                })
            }
            TypeDescription::Interface { name, fields } => {
                let fields = self.convert_fields(&name, fields)?;

                TypeDefinition::Interface(InterfaceDefinition {
                    name,
                    fields,
                    implementors: IndexSet::new(),
                })
            }
            TypeDescription::Union { name, members } => {
                let mut possible_types = IndexSet::with_capacity(members.len());

                for member in members {
                    match self.kinds.get(&member) {
                        Some(TypeKind::Object) => {
                            possible_types.insert(member);
                        }
                        Some(_) => return Err(SchemaError::InvalidUnionMember { union: name, name: member }),
                        None => {
                            return Err(SchemaError::UnknownType {
                                location: name,
                                name: member,
                            })
                        }
                    }
                }

                TypeDefinition::Union(UnionDefinition {
                    name,
                    members: possible_types,
                })
            }
            TypeDescription::Enum { name, values } => {
                for value in &values {
                    check_name(&name, value)?;
                }

                TypeDefinition::Enum(EnumDefinition {
                    name,
                    values: values.into_iter().collect(),
                })
            }
            TypeDescription::Scalar { name } => TypeDefinition::Scalar(ScalarDefinition { name }),
            TypeDescription::InputObject { name, fields } => {
                let mut seen = HashSet::with_capacity(fields.len());
                let mut input_fields = Vec::with_capacity(fields.len());

                for field in fields {
                    check_name(&name, &field.name)?;

                    if !seen.insert(field.name.clone()) {
                        return Err(SchemaError::DuplicateField { ty: name, field: field.name });
                    }

                    let location = format!("{name}.{}", field.name);
                    input_fields.push(self.convert_input_value(location, field)?);
                }

                TypeDefinition::InputObject(InputObjectDefinition {
                    name,
                    fields: input_fields,
                })
            }
        };

        Ok(definition)
    }

    fn convert_fields(&self, ty: &str, fields: Vec<FieldDescription>) -> Result<Vec<FieldDefinition>, SchemaError> {
        let mut seen = HashSet::with_capacity(fields.len());
        let mut definitions = Vec::with_capacity(fields.len());

        for field in fields {
            check_name(ty, &field.name)?;

            if !seen.insert(field.name.clone()) {
                return Err(self.duplicate_field(ty, field.name));
            }

            let location = format!("{ty}.{}", field.name);
            let kind = self.output_kind(location.clone(), &field.ty)?;

            let arguments = field
                .args
                .into_iter()
                .map(|argument| {
                    check_name(&location, &argument.name)?;

                    let location = format!("{ty}.{}({}:)", field.name, argument.name);
                    self.convert_input_value(location, argument)
                })
                .collect::<Result<Vec<_>, _>>()?;

            definitions.push(FieldDefinition {
                name: field.name,
                ty: field.ty,
                is_composite: kind.is_composite(),
                arguments,
            });
        }

        Ok(definitions)
    }

    fn duplicate_field(&self, ty: &str, field: String) -> SchemaError {
        if ty == self.query_type {
            SchemaError::DuplicateRootField {
                kind: OperationKind::Query,
                name: field,
            }
        } else if Some(ty) == self.mutation_type {
            SchemaError::DuplicateRootField {
                kind: OperationKind::Mutation,
                name: field,
            }
        } else {
            SchemaError::DuplicateField {
                ty: ty.to_string(),
                field,
            }
        }
    }

    fn output_kind(&self, location: String, ty: &TypeRef) -> Result<TypeKind, SchemaError> {
        match self.kinds.get(ty.name()) {
            Some(kind) if kind.is_output() => Ok(*kind),
            Some(_) => Err(SchemaError::NotAnOutputType {
                location,
                name: ty.name().to_string(),
            }),
            None => Err(SchemaError::UnknownType {
                location,
                name: ty.name().to_string(),
            }),
        }
    }

    fn convert_input_value(
        &self,
        location: String,
        value: InputValueDescription,
    ) -> Result<InputValueDefinition, SchemaError> {
        match self.kinds.get(value.ty.name()) {
            Some(kind) if kind.is_input() => Ok(InputValueDefinition {
                name: value.name,
                ty: value.ty,
                has_default: value.default_value.is_some(),
            }),
            Some(kind) => Err(SchemaError::NotAnInputType {
                location,
                name: value.ty.name().to_string(),
                kind: *kind,
            }),
            None => Err(SchemaError::UnknownType {
                location,
                name: value.ty.name().to_string(),
            }),
        }
    }
}
