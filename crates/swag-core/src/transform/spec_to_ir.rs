use crate::ir::{ModelNames, ModelNamespaceIndex, SpecInfo, SwagSpec};
use crate::parse::Document;

use super::endpoint_grouper::group_endpoints;
use super::inventory::build_inventory;

/// Transform a parsed document into the spec every generator works from.
///
/// Never fails: structural problems in single definitions or operations end up
/// in `SwagSpec::diagnostics`.
pub fn transform(document: &Document) -> SwagSpec {
    // Phase 1: classify and categorize definitions
    let (models, mut diagnostics) = build_inventory(document);

    // Phase 2: freeze the namespace index and name table before anything reads them
    let namespace_index = ModelNamespaceIndex::from_models(&models);
    let model_names = ModelNames::from_models(&models);

    // Phase 3: group operations by primary tag
    let (services, endpoint_diagnostics) = group_endpoints(document, &model_names);
    diagnostics.extend(endpoint_diagnostics);

    log::info!(
        "transformed {} definitions and {} endpoints in {} groups",
        models.len(),
        services.values().map(Vec::len).sum::<usize>(),
        services.len()
    );

    SwagSpec {
        info: SpecInfo {
            title: document.title().map(str::to_string),
            version: document.version().map(str::to_string),
        },
        models,
        namespace_index,
        model_names,
        services,
        diagnostics,
    }
}
