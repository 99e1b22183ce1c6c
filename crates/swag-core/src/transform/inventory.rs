use std::collections::HashSet;

use crate::ir::{ModelDescriptor, ModelKind, ModelNames};
use crate::parse::Document;
use crate::report::Diagnostic;

use super::categorizer::categorize;
use super::classifier::classify;
use super::name_normalizer::{pluralize, sanitize_type_name, to_valid_class_name, unique_identifier};
use super::type_resolver::resolve_type;

/// Classify and categorize every top-level definition, in document order.
///
/// Names are sanitized and made unique across the whole inventory; a renamed
/// definition is reported. Fallback models are kept but reported.
pub fn build_inventory(document: &Document) -> (Vec<ModelDescriptor>, Vec<Diagnostic>) {
    let mut models = Vec::new();
    let mut diagnostics = Vec::new();
    let mut used = HashSet::new();

    let Some(definitions) = document.schemas().entries() else {
        return (models, diagnostics);
    };

    for (original_name, node) in definitions {
        let base = sanitize_type_name(original_name);
        let name = unique_identifier(&base, &used);
        used.insert(name.clone());
        if name != base {
            let message = format!("`{base}` is already taken; emitting `{name}`");
            log::warn!("{original_name}: {message}");
            diagnostics.push(Diagnostic::warning(original_name, message));
        }

        let kind = classify(node);
        if kind == ModelKind::Fallback {
            let reason = if node.is_object() {
                "no `enum`, `properties` or `type`; emitting a placeholder"
            } else {
                "definition is not an object; emitting a placeholder"
            };
            log::warn!("{original_name}: {reason}");
            diagnostics.push(Diagnostic::warning(original_name, reason));
        }

        let category = categorize(&base);
        let folder = pluralize(&to_valid_class_name(&category));

        models.push(ModelDescriptor {
            name,
            original_name: original_name.to_string(),
            kind,
            category,
            folder,
            resolved_type: None,
            source: node.value().clone(),
        });
    }

    // Wrapped types may reference definitions declared later
    let names = ModelNames::from_models(&models);
    for model in models.iter_mut().filter(|m| m.kind == ModelKind::SimpleWrapper) {
        let resolved = resolve_type(model.node(), &names);
        model.resolved_type = Some(resolved);
    }

    (models, diagnostics)
}
