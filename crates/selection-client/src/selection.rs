use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Requested fields of a composite type, keyed by field name, in request order.
///
/// Deserializes from the plain data shape `{ "id": true, "user": { "select": { "name": true } } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(IndexMap<String, FieldSelection>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a field. Composite fields expand to their own scalar fields.
    #[must_use]
    pub fn field(self, name: impl Into<String>) -> Self {
        self.with(name, FieldSelection::ALL)
    }

    /// Selects a composite field with an explicit sub-selection.
    #[must_use]
    pub fn nested(self, name: impl Into<String>, selection: Selection) -> Self {
        self.with(name, FieldSelection::select(selection))
    }

    /// Selects an interface or union field, narrowed per concrete type. Without a
    /// sub-selection the common scalar fields are selected.
    #[must_use]
    pub fn narrowed(self, name: impl Into<String>, selection: Option<Selection>, narrowing: Narrowing) -> Self {
        self.with(
            name,
            FieldSelection::Nested(NestedSelection {
                select: selection,
                on: Some(narrowing),
            }),
        )
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, selection: FieldSelection) -> Self {
        self.0.insert(name.into(), selection);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSelection> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSelection)> + '_ {
        self.0.iter().map(|(name, selection)| (name.as_str(), selection))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldSelection)> for Selection {
    fn from_iter<T: IntoIterator<Item = (K, FieldSelection)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(name, selection)| (name.into(), selection)).collect())
    }
}

/// Per concrete type selections for an interface or union value, keyed by type name.
///
/// `true` selects the fields exclusive to that type, a nested selection picks them explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Narrowing(IndexMap<String, FieldSelection>);

impl Narrowing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects every scalar field exclusive to `type_name`.
    #[must_use]
    pub fn all(self, type_name: impl Into<String>) -> Self {
        self.with(type_name, FieldSelection::ALL)
    }

    #[must_use]
    pub fn select(self, type_name: impl Into<String>, selection: Selection) -> Self {
        self.with(type_name, FieldSelection::select(selection))
    }

    #[must_use]
    pub fn with(mut self, type_name: impl Into<String>, selection: FieldSelection) -> Self {
        self.0.insert(type_name.into(), selection);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSelection)> + '_ {
        self.0.iter().map(|(name, selection)| (name.as_str(), selection))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldSelection)> for Narrowing {
    fn from_iter<T: IntoIterator<Item = (K, FieldSelection)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(name, selection)| (name.into(), selection)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSelection {
    /// `true` selects with the default field set, `false` leaves the entry out.
    Include(bool),
    Nested(NestedSelection),
}

impl FieldSelection {
    pub const ALL: FieldSelection = FieldSelection::Include(true);
    pub const NONE: FieldSelection = FieldSelection::Include(false);

    pub fn select(selection: Selection) -> Self {
        FieldSelection::Nested(NestedSelection {
            select: Some(selection),
            on: None,
        })
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, FieldSelection::Include(false))
    }
}

impl From<bool> for FieldSelection {
    fn from(value: bool) -> Self {
        FieldSelection::Include(value)
    }
}

impl From<Selection> for FieldSelection {
    fn from(selection: Selection) -> Self {
        FieldSelection::select(selection)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NestedSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Selection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<Narrowing>,
}

/// Arguments of a root field accessor. All parts are optional: the default value selects the
/// return type's scalar fields without variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperationArgs {
    pub variables: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Selection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<Narrowing>,
}

impl OperationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables.extend(variables);
        self
    }

    #[must_use]
    pub fn select(mut self, selection: Selection) -> Self {
        self.select = Some(selection);
        self
    }

    #[must_use]
    pub fn on(mut self, narrowing: Narrowing) -> Self {
        self.on = Some(narrowing);
        self
    }
}
