use selection_schema::RootOperation;

use super::plan::{Item, SelectionSet};
use crate::VariableDefinition;

pub(super) fn render_document(
    operation: &RootOperation,
    variables: &[VariableDefinition],
    selection_set: Option<&SelectionSet<'_>>,
) -> String {
    let mut rendered = String::from(operation.kind.as_str());

    if !variables.is_empty() {
        let declarations = variables
            .iter()
            .map(|variable| format!("${}: {}", variable.name, variable.ty))
            .collect::<Vec<_>>();

        rendered.push('(');
        rendered.push_str(&declarations.join(", "));
        rendered.push(')');
    }

    rendered.push_str(" { ");
    rendered.push_str(&operation.name);

    if !variables.is_empty() {
        let arguments = variables
            .iter()
            .map(|variable| format!("{0}: ${0}", variable.name))
            .collect::<Vec<_>>();

        rendered.push('(');
        rendered.push_str(&arguments.join(", "));
        rendered.push(')');
    }

    if let Some(selection_set) = selection_set {
        render_selection_set(selection_set, &mut rendered);
    }

    rendered.push_str(" }");
    rendered
}

fn render_selection_set(selection_set: &SelectionSet<'_>, rendered: &mut String) {
    rendered.push_str(" {");

    for item in &selection_set.items {
        rendered.push(' ');

        match item {
            Item::Typename => rendered.push_str("__typename"),
            Item::Field { name, selection_set } => {
                rendered.push_str(name);

                if let Some(selection_set) = selection_set {
                    render_selection_set(selection_set, rendered);
                }
            }
            Item::InlineFragment {
                type_condition,
                selection_set,
            } => {
                rendered.push_str("... on ");
                rendered.push_str(type_condition);
                render_selection_set(selection_set, rendered);
            }
        }
    }

    rendered.push_str(" }");
}
