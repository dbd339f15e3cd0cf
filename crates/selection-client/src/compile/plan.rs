use selection_schema::{FieldDefinition, Schema, TypeDefinition};

use crate::{CompileError, FieldSelection, Narrowing, Selection};

const TYPENAME: &str = "__typename";

#[derive(Debug, Default)]
pub(super) struct SelectionSet<'a> {
    pub(super) items: Vec<Item<'a>>,
}

#[derive(Debug)]
pub(super) enum Item<'a> {
    Typename,
    Field {
        name: &'a str,
        selection_set: Option<SelectionSet<'a>>,
    },
    InlineFragment {
        type_condition: &'a str,
        selection_set: SelectionSet<'a>,
    },
}

impl<'a> SelectionSet<'a> {
    fn push_typename(&mut self) {
        if !self.items.iter().any(|item| matches!(item, Item::Typename)) {
            self.items.push(Item::Typename);
        }
    }

    fn push_leaf(&mut self, field: &'a FieldDefinition) {
        self.items.push(Item::Field {
            name: &field.name,
            selection_set: None,
        });
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Turns a selection tree into a selection set of fields known to the schema.
pub(super) struct Planner<'a> {
    pub(super) schema: &'a Schema,
}

impl<'a> Planner<'a> {
    pub(super) fn plan(
        &self,
        type_name: &str,
        selection: Option<&Selection>,
        narrowing: Option<&Narrowing>,
    ) -> Result<SelectionSet<'a>, CompileError> {
        let mut set = SelectionSet::default();

        let Some(definition) = self.schema.definition(type_name) else {
            set.push_typename();
            return Ok(set);
        };

        if narrowing.is_some() && definition.is_abstract() {
            set.push_typename();
        }

        match selection {
            Some(selection) => self.plan_explicit(definition, selection, &mut set)?,
            None => self.plan_wildcard(definition.scalar_fields(), &mut set),
        }

        if let Some(narrowing) = narrowing {
            self.plan_narrowing(definition, narrowing, &mut set)?;
        }

        if set.is_empty() {
            set.push_typename();
        }

        Ok(set)
    }

    fn plan_explicit(
        &self,
        definition: &'a TypeDefinition,
        selection: &Selection,
        set: &mut SelectionSet<'a>,
    ) -> Result<(), CompileError> {
        for (name, field_selection) in selection.iter() {
            if field_selection.is_excluded() {
                continue;
            }

            if name == TYPENAME {
                set.push_typename();
                continue;
            }

            let Some(field) = definition.field(name) else {
                tracing::debug!(ty = definition.name(), field = name, "Dropping unknown field from the selection");
                continue;
            };

            if !field.is_composite {
                set.push_leaf(field);
                continue;
            }

            let selection_set = match field_selection {
                FieldSelection::Nested(nested) => {
                    self.plan(field.ty.name(), nested.select.as_ref(), nested.on.as_ref())?
                }
                FieldSelection::Include(_) => self.plan(field.ty.name(), None, None)?,
            };

            set.items.push(Item::Field {
                name: &field.name,
                selection_set: Some(selection_set),
            });
        }

        Ok(())
    }

    /// Leaf fields that can be requested without arguments.
    fn plan_wildcard(&self, fields: impl Iterator<Item = &'a FieldDefinition>, set: &mut SelectionSet<'a>) {
        for field in fields {
            if field.arguments.iter().any(|argument| argument.is_required()) {
                continue;
            }

            set.push_leaf(field);
        }
    }

    fn plan_narrowing(
        &self,
        definition: &'a TypeDefinition,
        narrowing: &Narrowing,
        set: &mut SelectionSet<'a>,
    ) -> Result<(), CompileError> {
        for (type_name, entry) in narrowing.iter() {
            if !self.schema.is_possible_type(definition.name(), type_name) {
                return Err(CompileError::UnknownNarrowingType {
                    ty: definition.name().to_string(),
                    narrowed: type_name.to_string(),
                });
            }

            let Some(concrete) = self.schema.definition(type_name) else {
                continue;
            };

            let selection_set = match entry {
                FieldSelection::Include(false) => continue,
                FieldSelection::Nested(nested) if nested.select.is_some() => {
                    self.plan(type_name, nested.select.as_ref(), nested.on.as_ref())?
                }
                FieldSelection::Include(true) | FieldSelection::Nested(_) => {
                    let mut exclusive = SelectionSet::default();
                    let fields = concrete
                        .scalar_fields()
                        .filter(|field| definition.field(&field.name).is_none());

                    self.plan_wildcard(fields, &mut exclusive);
                    exclusive
                }
            };

            if selection_set.is_empty() {
                tracing::debug!(ty = definition.name(), narrowed = type_name, "Skipping empty inline fragment");
                continue;
            }

            set.items.push(Item::InlineFragment {
                type_condition: concrete.name(),
                selection_set,
            });
        }

        Ok(())
    }
}
