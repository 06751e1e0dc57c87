//! Variable substitution engine for views

use std::collections::HashSet;

use crate::metrics::VariableMetrics;

use super::scanner::{variable_directives, VariableDirective};
use super::types::Bindings;

/// Replace every `## [e]@name[|default] ##` directive in `text`.
///
/// Bound values are inserted raw, or HTML-escaped for `e@` directives.
/// Unbound names fall back to the directive's default, or to the empty string.
/// Replacement is textual: all occurrences of an identical directive are
/// replaced together.
pub fn substitute(text: &str, bindings: &Bindings) -> String {
    let directives = variable_directives(text);
    if directives.is_empty() {
        return text.to_string();
    }

    let mut compiled = text.to_string();
    let mut resolved = HashSet::new();

    for directive in &directives {
        // Identical directives were already replaced in one step
        if !resolved.insert(directive.raw) {
            continue;
        }

        let value = resolve_value(directive, bindings);
        compiled = compiled.replace(directive.raw, &value);
    }

    compiled
}

fn resolve_value(directive: &VariableDirective<'_>, bindings: &Bindings) -> String {
    match bindings.get_text(directive.name) {
        Some(value) => {
            VariableMetrics::record_bound();
            if directive.escaped {
                html_escape::encode_quoted_attribute(&*value).into_owned()
            } else {
                value.into_owned()
            }
        }
        None => {
            VariableMetrics::record_default();
            directive.default.to_string()
        }
    }
}
