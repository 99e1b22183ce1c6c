use crate::parse::SchemaNode;

const VALUE_TYPES: &[&str] = &["integer", "number", "boolean"];

const CONSTRAINTS: &[&str] = &[
    "minLength",
    "maxLength",
    "minimum",
    "maximum",
    "pattern",
    "enum",
];

/// Whether a property must be present. The first applicable rule decides:
///
/// 1. the parent's `required` list names it;
/// 2. the property says `required: true`;
/// 3. the property says `nullable: true` (not required);
/// 4. it is an integer, number or boolean without `x-nullable: true`;
/// 5. it carries a validation constraint.
pub fn is_required(property: SchemaNode<'_>, name: &str, parent: SchemaNode<'_>) -> bool {
    let listed = parent
        .get("required")
        .and_then(|r| r.elements())
        .is_some_and(|mut names| names.any(|n| n.as_str() == Some(name)));
    if listed || property.is_true("required") {
        return true;
    }
    if property.is_true("nullable") {
        return false;
    }
    if let Some(type_name) = property.type_name() {
        if VALUE_TYPES.contains(&type_name) {
            return !property.is_true("x-nullable");
        }
    }
    CONSTRAINTS.iter().any(|key| property.has(key))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn required(property: Value, name: &str, parent: Value) -> bool {
        is_required(SchemaNode::new(&property), name, SchemaNode::new(&parent))
    }

    #[test]
    fn test_parent_required_list() {
        let parent = json!({ "required": ["note"] });
        assert!(required(json!({ "type": "string" }), "note", parent.clone()));
        assert!(!required(json!({ "type": "string" }), "other", parent));
    }

    #[test]
    fn test_parent_list_beats_nullable() {
        let parent = json!({ "required": ["id"] });
        assert!(required(json!({ "type": "integer", "nullable": true }), "id", parent));
    }

    #[test]
    fn test_property_required_flag() {
        assert!(required(json!({ "type": "string", "required": true }), "a", json!({})));
        assert!(!required(json!({ "type": "string", "required": "yes" }), "a", json!({})));
    }

    #[test]
    fn test_value_types_required_unless_x_nullable() {
        let parent = json!({});
        assert!(required(json!({ "type": "integer" }), "id", parent.clone()));
        assert!(required(json!({ "type": "number" }), "total", parent.clone()));
        assert!(required(json!({ "type": "boolean" }), "paid", parent.clone()));
        assert!(!required(
            json!({ "type": "integer", "x-nullable": true }),
            "id",
            parent
        ));
    }

    #[test]
    fn test_nullable_never_required() {
        assert!(!required(json!({ "type": "integer", "nullable": true }), "id", json!({})));
        assert!(!required(
            json!({ "type": "string", "nullable": true, "minLength": 1 }),
            "name",
            json!({})
        ));
    }

    #[test]
    fn test_constraints_make_required() {
        for key in ["minLength", "maxLength", "minimum", "maximum", "pattern"] {
            let mut property = json!({ "type": "string" });
            property[key] = json!(1);
            assert!(required(property, "x", json!({})), "{key}");
        }
        assert!(required(json!({ "enum": ["a"] }), "x", json!({})));
    }

    #[test]
    fn test_plain_string_optional() {
        assert!(!required(json!({ "type": "string" }), "note", json!({})));
        assert!(!required(json!({ "$ref": "#/definitions/Order" }), "order", json!({})));
    }
}
