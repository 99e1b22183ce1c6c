use std::collections::HashSet;

use crate::error::SchemaError;
use crate::ir::{EnumMember, FieldDescriptor, ModelNames};
use crate::parse::{NodeView, SchemaNode};

use super::name_normalizer::{enum_member_identifier, resolve_property_identifier, unique_identifier};
use super::requirement::is_required;
use super::type_resolver::resolve_type;

/// Fields of an object model, in declaration order, with unique identifiers.
pub fn describe_fields(
    owner: &str,
    node: SchemaNode<'_>,
    names: &ModelNames,
) -> Result<Vec<FieldDescriptor>, SchemaError> {
    let properties = node
        .get("properties")
        .and_then(|p| p.entries())
        .ok_or_else(|| SchemaError::InvalidShape {
            key: "properties".to_string(),
            expected: "an object",
        })?;

    let mut used = HashSet::new();
    let mut fields = Vec::new();
    for (json_name, property) in properties {
        if !property.is_object() {
            return Err(SchemaError::InvalidProperty(json_name.to_string()));
        }
        let name = resolve_property_identifier(json_name, owner, &used);
        used.insert(name.clone());
        fields.push(FieldDescriptor {
            name,
            json_name: json_name.to_string(),
            field_type: resolve_type(property, names),
            required: is_required(property, json_name, node),
            description: property.description().map(str::to_string),
        });
    }
    Ok(fields)
}

/// Members of an enum model, numbered from 0. Blank strings are skipped and
/// do not consume a number; `null` becomes a `Null` member.
pub fn describe_enum_members(node: SchemaNode<'_>) -> Result<Vec<EnumMember>, SchemaError> {
    let values = node
        .get("enum")
        .and_then(|e| e.elements())
        .ok_or_else(|| SchemaError::InvalidShape {
            key: "enum".to_string(),
            expected: "an array",
        })?;

    let mut used = HashSet::new();
    let mut members = Vec::new();
    for value in values {
        let label = match value.view() {
            NodeView::String(s) if s.trim().is_empty() => continue,
            _ => value.to_text(),
        };
        let name = unique_identifier(&enum_member_identifier(&label), &used);
        used.insert(name.clone());
        members.push(EnumMember {
            name,
            label,
            value: members.len(),
        });
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::ir::TypeRef;

    use super::*;

    #[test]
    fn test_fields_in_declaration_order() {
        let node = json!({
            "required": ["id"],
            "properties": {
                "id": { "type": "integer", "format": "int64" },
                "note": { "type": "string", "description": "Free text" },
                "lines": { "type": "array", "items": { "$ref": "#/definitions/OrderLine" } }
            }
        });
        let fields = describe_fields("Order", SchemaNode::new(&node), &ModelNames::default()).unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Id", "Note", "Lines"]);
        assert!(fields[0].required);
        assert_eq!(fields[0].field_type, TypeRef::Int64);
        assert!(!fields[1].required);
        assert_eq!(fields[1].description.as_deref(), Some("Free text"));
        assert_eq!(
            fields[2].field_type,
            TypeRef::List(Box::new(TypeRef::Ref("OrderLine".to_string())))
        );
    }

    #[test]
    fn test_field_identifiers_are_unique() {
        let node = json!({
            "properties": {
                "order": { "type": "string" },
                "id": { "type": "string" },
                "Id": { "type": "string" },
                "i-d": { "type": "string" }
            }
        });
        let fields = describe_fields("Order", SchemaNode::new(&node), &ModelNames::default()).unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["OrderValue", "Id", "Id1", "Id2"]);
        assert_eq!(fields[3].json_name, "i-d");
    }

    #[test]
    fn test_properties_must_be_object() {
        let node = json!({ "properties": ["id"] });
        let err = describe_fields("Order", SchemaNode::new(&node), &ModelNames::default()).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidShape { ref key, .. } if key == "properties"));
    }

    #[test]
    fn test_property_must_be_object() {
        let node = json!({ "properties": { "id": "integer" } });
        let err = describe_fields("Order", SchemaNode::new(&node), &ModelNames::default()).unwrap_err();
        assert_eq!(err, SchemaError::InvalidProperty("id".to_string()));
    }

    #[test]
    fn test_enum_members_skip_blanks() {
        let node = json!({ "enum": ["active", "", "inactive", "  ", "on-hold"] });
        let members = describe_enum_members(SchemaNode::new(&node)).unwrap();
        let pairs: Vec<(&str, usize)> = members.iter().map(|m| (m.name.as_str(), m.value)).collect();
        assert_eq!(pairs, vec![("Active", 0), ("Inactive", 1), ("OnHold", 2)]);
    }

    #[test]
    fn test_enum_null_entry_is_a_member() {
        let node = json!({ "enum": ["active", null, "inactive"] });
        let members = describe_enum_members(SchemaNode::new(&node)).unwrap();
        let pairs: Vec<(&str, &str, usize)> = members
            .iter()
            .map(|m| (m.name.as_str(), m.label.as_str(), m.value))
            .collect();
        assert_eq!(
            pairs,
            vec![("Active", "active", 0), ("Null", "null", 1), ("Inactive", "inactive", 2)]
        );
    }

    #[test]
    fn test_field_refs_use_emitted_names() {
        let doc = crate::parse::from_json(
            r##"{
                "swagger": "2.0",
                "paths": {},
                "definitions": {
                    "Page«Order»": { "type": "object", "properties": {} },
                    "PageOrder": { "type": "object", "properties": {} },
                    "Holder": {
                        "type": "object",
                        "properties": {
                            "p": { "$ref": "#/definitions/PageOrder" },
                            "q": { "$ref": "#/definitions/Page«Order»" }
                        }
                    }
                }
            }"##,
        )
        .unwrap();
        let (models, _) = crate::transform::inventory::build_inventory(&doc);
        let names = ModelNames::from_models(&models);

        let fields = describe_fields("Holder", models[2].node(), &names).unwrap();
        assert_eq!(fields[0].field_type, TypeRef::Ref("PageOrder1".to_string()));
        assert_eq!(fields[1].field_type, TypeRef::Ref("PageOrder".to_string()));
    }

    #[test]
    fn test_enum_members_numeric_and_duplicates() {
        let node = json!({ "enum": [1, 2, "active", "ACTIVE"] });
        let members = describe_enum_members(SchemaNode::new(&node)).unwrap();
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Value1", "Value2", "Active", "Active1"]);
        assert_eq!(members[0].label, "1");
    }

    #[test]
    fn test_enum_must_be_array() {
        let node = json!({ "enum": "active" });
        assert!(describe_enum_members(SchemaNode::new(&node)).is_err());
    }
}
