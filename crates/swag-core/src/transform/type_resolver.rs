use crate::ir::{ModelNames, TypeRef};
use crate::parse::{NodeView, SchemaNode};

use super::name_normalizer::sanitize_type_name;

/// Resolve the value type of a schema node.
///
/// `$ref` wins and names the target without following it, translated through
/// `names` so renamed definitions are found. Otherwise `type`
/// and `format` pick a primitive, arrays look one `items` hop deep, and
/// objects with `additionalProperties` become string-keyed maps. Anything
/// unrecognized is `Any`.
pub fn resolve_type(node: SchemaNode<'_>, names: &ModelNames) -> TypeRef {
    if let Some(reference) = node.get("$ref") {
        return reference
            .as_str()
            .map(|r| ref_type(r, names))
            .unwrap_or(TypeRef::Any);
    }
    let Some(type_name) = node.type_name() else {
        return TypeRef::Any;
    };
    match type_name {
        "array" => TypeRef::List(Box::new(resolve_item_type(node.get("items"), names))),
        "object" => resolve_object_type(node, names),
        other => resolve_primitive(other, node.format()).unwrap_or(TypeRef::Any),
    }
}

/// Element type of an array. Only one hop: array or object items are `Any`.
pub fn resolve_item_type(items: Option<SchemaNode<'_>>, names: &ModelNames) -> TypeRef {
    let Some(items) = items else {
        return TypeRef::Any;
    };
    if let Some(reference) = items.get("$ref") {
        return reference
            .as_str()
            .map(|r| ref_type(r, names))
            .unwrap_or(TypeRef::Any);
    }
    items
        .type_name()
        .and_then(|t| resolve_primitive(t, items.format()))
        .unwrap_or(TypeRef::Any)
}

/// `#/definitions/Order` -> `Order`. The last segment is looked up as a
/// definition key; unknown targets are sanitized as a type name.
pub fn ref_type(reference: &str, names: &ModelNames) -> TypeRef {
    let last = reference.rsplit('/').next().unwrap_or(reference);
    let name = names
        .get(last)
        .map(str::to_string)
        .unwrap_or_else(|| sanitize_type_name(last));
    TypeRef::Ref(name)
}

/// Type of a parameter: its `schema` if present, else the parameter node's
/// own `type`/`format`/`items`.
pub fn resolve_parameter_type(parameter: SchemaNode<'_>, names: &ModelNames) -> TypeRef {
    match parameter.get("schema") {
        Some(schema) => resolve_type(schema, names),
        None => resolve_type(parameter, names),
    }
}

/// Success type of an operation: the `200` response, else `201`.
///
/// Reads a Swagger 2 `schema` or an OpenAPI 3 `content` entry. No response or
/// no schema means `Void`.
pub fn resolve_return_type(operation: SchemaNode<'_>, names: &ModelNames) -> TypeRef {
    let Some(responses) = operation.get("responses") else {
        return TypeRef::Void;
    };
    let Some(response) = responses.get("200").or_else(|| responses.get("201")) else {
        return TypeRef::Void;
    };
    match response.get("schema").or_else(|| content_schema(response)) {
        Some(schema) => resolve_type(schema, names),
        None => TypeRef::Void,
    }
}

/// `content["application/json"].schema`, or the first content entry's schema.
pub fn content_schema(node: SchemaNode<'_>) -> Option<SchemaNode<'_>> {
    let content = node.get("content")?;
    if let Some(schema) = content.get("application/json").and_then(|m| m.get("schema")) {
        return Some(schema);
    }
    content
        .entries()?
        .find_map(|(_, media)| media.get("schema"))
}

fn resolve_object_type(node: SchemaNode<'_>, names: &ModelNames) -> TypeRef {
    match node.get("additionalProperties").map(|ap| ap.view()) {
        Some(NodeView::Object(values)) => TypeRef::Map(Box::new(resolve_type(values, names))),
        Some(NodeView::Bool(true)) => TypeRef::Map(Box::new(TypeRef::Any)),
        _ => TypeRef::Any,
    }
}

fn resolve_primitive(type_name: &str, format: Option<&str>) -> Option<TypeRef> {
    let resolved = match (type_name, format) {
        ("string", Some("date-time" | "date")) => TypeRef::DateTime,
        ("string", Some("byte" | "binary")) => TypeRef::Bytes,
        ("string", _) => TypeRef::String,
        ("integer", Some("int64")) => TypeRef::Int64,
        ("integer", _) => TypeRef::Int32,
        ("number", Some("float")) => TypeRef::Float,
        ("number", Some("double")) => TypeRef::Double,
        ("number", _) => TypeRef::Decimal,
        ("boolean", _) => TypeRef::Boolean,
        _ => return None,
    };
    Some(resolved)
}
