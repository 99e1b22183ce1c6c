use crate::ir::ModelKind;
use crate::parse::SchemaNode;

/// Decide how a top-level definition is rendered.
///
/// First match wins: `enum`, then `properties`, then a bare `type`. Anything
/// else, including a node that is not an object, is a fallback.
pub fn classify(node: SchemaNode<'_>) -> ModelKind {
    if node.has("enum") {
        ModelKind::Enum
    } else if node.has("properties") {
        ModelKind::Object
    } else if node.has("type") {
        ModelKind::SimpleWrapper
    } else {
        ModelKind::Fallback
    }
}
