use crate::ir::{
    EndpointInfo, HttpMethod, ModelNames, ParameterInfo, ParameterLocation, ServiceGroups, TypeRef,
};
use crate::parse::{Document, SchemaNode};
use crate::report::{Diagnostic, ItemOutcome};

use super::type_resolver::{content_schema, resolve_parameter_type, resolve_return_type, resolve_type};

/// Group key for endpoints whose tags are all blank.
pub const DEFAULT_GROUP: &str = "General";

/// Partition every (path, method) pair into service groups by primary tag.
///
/// Groups and the endpoints inside them keep document order. Operations that
/// cannot be grouped are skipped and reported. `$ref` targets are translated
/// through `names`.
pub fn group_endpoints(
    document: &Document,
    names: &ModelNames,
) -> (ServiceGroups, Vec<Diagnostic>) {
    let mut groups = ServiceGroups::new();
    let mut diagnostics = Vec::new();

    let Some(paths) = document.paths().entries() else {
        return (groups, diagnostics);
    };

    for (url, path_item) in paths {
        let Some(operations) = path_item.entries() else {
            let message = "path item is not an object";
            log::warn!("{url}: {message}");
            diagnostics.push(Diagnostic::warning(url, message));
            continue;
        };
        for (key, operation) in operations {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            let item = format!("{} {url}", method.as_str());
            match describe_endpoint(url, method, path_item, operation, names, &mut diagnostics) {
                ItemOutcome::Ok(endpoint) => {
                    groups.entry(endpoint.tag.clone()).or_default().push(endpoint);
                }
                ItemOutcome::Skipped(reason) | ItemOutcome::Failed(reason) => {
                    log::warn!("skipping {item}: {reason}");
                    diagnostics.push(Diagnostic::warning(item, reason));
                }
            }
        }
    }

    (groups, diagnostics)
}

fn describe_endpoint(
    url: &str,
    method: HttpMethod,
    path_item: SchemaNode<'_>,
    operation: SchemaNode<'_>,
    names: &ModelNames,
    diagnostics: &mut Vec<Diagnostic>,
) -> ItemOutcome<EndpointInfo> {
    let Some(tags) = operation.get("tags") else {
        return ItemOutcome::Skipped("missing `tags`".to_string());
    };
    let Some(operation_id) = operation.get("operationId") else {
        return ItemOutcome::Skipped("missing `operationId`".to_string());
    };
    let operation_id = match operation_id.as_str().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return ItemOutcome::Skipped("empty `operationId`".to_string()),
    };

    let tag = primary_tag(tags).unwrap_or(DEFAULT_GROUP).to_string();
    let item = format!("{} {url}", method.as_str());
    let parameters = collect_parameters(&item, path_item, operation, names, diagnostics);
    let summary = operation
        .str("summary")
        .or_else(|| operation.str("description"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    ItemOutcome::Ok(EndpointInfo {
        url: url.to_string(),
        method,
        operation_id,
        summary,
        parameters,
        return_type: resolve_return_type(operation, names),
        tag,
    })
}

/// First non-blank tag.
fn primary_tag(tags: SchemaNode<'_>) -> Option<&str> {
    tags.elements()?
        .filter_map(|t| t.as_str())
        .map(str::trim)
        .find(|t| !t.is_empty())
}

/// Path-level parameters, overridden by operation-level ones with the same
/// name and location, then the OpenAPI 3 request body as `body`.
fn collect_parameters(
    item: &str,
    path_item: SchemaNode<'_>,
    operation: SchemaNode<'_>,
    names: &ModelNames,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ParameterInfo> {
    let mut parameters: Vec<ParameterInfo> = Vec::new();
    let declared = [path_item.get("parameters"), operation.get("parameters")];
    for list in declared.into_iter().flatten() {
        let Some(list) = list.elements() else {
            continue;
        };
        for node in list {
            let Some(parameter) = describe_parameter(item, node, names, diagnostics) else {
                continue;
            };
            match parameters
                .iter_mut()
                .find(|p| p.name == parameter.name && p.location == parameter.location)
            {
                Some(existing) => *existing = parameter,
                None => parameters.push(parameter),
            }
        }
    }
    if let Some(body) = operation
        .get("requestBody")
        .and_then(|b| describe_request_body(b, names))
    {
        parameters.push(body);
    }
    parameters
}

fn describe_parameter(
    item: &str,
    node: SchemaNode<'_>,
    names: &ModelNames,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ParameterInfo> {
    let name = node.str("name")?;
    let location_key = node.str("in")?;
    let Some(location) = ParameterLocation::from_key(location_key) else {
        let message = format!("parameter `{name}` in `{location_key}` is not supported");
        log::warn!("{item}: {message}");
        diagnostics.push(Diagnostic::warning(item, message));
        return None;
    };
    Some(ParameterInfo {
        name: name.to_string(),
        location,
        param_type: resolve_parameter_type(node, names),
        required: node.is_true("required"),
        description: node.description().map(str::to_string),
    })
}

fn describe_request_body(request_body: SchemaNode<'_>, names: &ModelNames) -> Option<ParameterInfo> {
    if !request_body.is_object() {
        return None;
    }
    let param_type = content_schema(request_body)
        .map(|schema| resolve_type(schema, names))
        .unwrap_or(TypeRef::Any);
    Some(ParameterInfo {
        name: "body".to_string(),
        location: ParameterLocation::Body,
        param_type,
        required: request_body.is_true("required"),
        description: request_body.description().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use crate::parse::from_json;

    use super::*;

    fn group(json: &str) -> (ServiceGroups, Vec<Diagnostic>) {
        group_endpoints(&from_json(json).unwrap(), &ModelNames::default())
    }

    #[test]
    fn test_groups_by_first_tag_in_discovery_order() {
        let (groups, diagnostics) = group(
            r#"{
                "swagger": "2.0",
                "definitions": {},
                "paths": {
                    "/users": { "get": { "tags": ["Users", "Admin"], "operationId": "listUsers" } },
                    "/orders": {
                        "get": { "tags": ["Orders"], "operationId": "listOrders" },
                        "post": { "tags": ["Orders"], "operationId": "createOrder" }
                    },
                    "/users/{id}": { "delete": { "tags": ["Users"], "operationId": "deleteUser" } }
                }
            }"#,
        );
        assert!(diagnostics.is_empty());
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Users", "Orders"]);
        let users: Vec<&str> = groups["Users"].iter().map(|e| e.operation_id.as_str()).collect();
        assert_eq!(users, vec!["listUsers", "deleteUser"]);
        assert_eq!(groups["Orders"][1].method, HttpMethod::Post);
    }

    #[test]
    fn test_skips_missing_tags_or_operation_id() {
        let (groups, diagnostics) = group(
            r#"{
                "swagger": "2.0",
                "definitions": {},
                "paths": {
                    "/a": { "get": { "operationId": "noTags" } },
                    "/b": { "get": { "tags": ["B"] } },
                    "/c": { "get": { "tags": ["C"], "operationId": "  " } },
                    "/d": { "get": { "tags": ["D"], "operationId": "ok" } }
                }
            }"#,
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0].item, "GET /a");
        assert!(diagnostics[2].message.contains("empty"));
    }

    #[test]
    fn test_blank_tags_default_group() {
        let (groups, _) = group(
            r#"{
                "swagger": "2.0",
                "definitions": {},
                "paths": {
                    "/a": { "get": { "tags": ["", "  "], "operationId": "a" } },
                    "/b": { "get": { "tags": [], "operationId": "b" } },
                    "/c": { "get": { "tags": ["", "Real"], "operationId": "c" } }
                }
            }"#,
        );
        assert_eq!(groups[DEFAULT_GROUP].len(), 2);
        assert_eq!(groups["Real"][0].operation_id, "c");
    }

    #[test]
    fn test_non_method_keys_ignored() {
        let (groups, diagnostics) = group(
            r#"{
                "swagger": "2.0",
                "definitions": {},
                "paths": {
                    "/orders/{id}": {
                        "parameters": [{ "name": "id", "in": "path", "required": true, "type": "integer" }],
                        "x-owner": "team",
                        "get": { "tags": ["Orders"], "operationId": "getOrder" }
                    }
                }
            }"#,
        );
        assert!(diagnostics.is_empty());
        let endpoint = &groups["Orders"][0];
        assert_eq!(endpoint.parameters.len(), 1);
        assert_eq!(endpoint.parameters[0].location, ParameterLocation::Path);
        assert_eq!(endpoint.parameters[0].param_type, TypeRef::Int32);
    }

    #[test]
    fn test_operation_parameters_override_path_level() {
        let (groups, _) = group(
            r#"{
                "swagger": "2.0",
                "definitions": {},
                "paths": {
                    "/orders/{id}": {
                        "parameters": [{ "name": "id", "in": "path", "type": "integer" }],
                        "get": {
                            "tags": ["Orders"],
                            "operationId": "getOrder",
                            "parameters": [
                                { "name": "id", "in": "path", "required": true, "type": "string" },
                                { "name": "expand", "in": "query", "type": "boolean" }
                            ]
                        }
                    }
                }
            }"#,
        );
        let params = &groups["Orders"][0].parameters;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].param_type, TypeRef::String);
        assert!(params[0].required);
        assert_eq!(params[1].name, "expand");
    }

    #[test]
    fn test_unsupported_and_incomplete_parameters() {
        let (groups, diagnostics) = group(
            r##"{
                "swagger": "2.0",
                "definitions": {},
                "paths": {
                    "/upload": {
                        "post": {
                            "tags": ["Files"],
                            "operationId": "upload",
                            "parameters": [
                                { "name": "file", "in": "formData", "type": "file" },
                                { "in": "query", "type": "string" },
                                { "$ref": "#/parameters/Shared" },
                                { "name": "X-Trace", "in": "header", "type": "string" }
                            ]
                        }
                    }
                }
            }"##,
        );
        let params = &groups["Files"][0].parameters;
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].location, ParameterLocation::Header);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("formData"));
    }

    #[test]
    fn test_openapi3_request_body_becomes_body_parameter() {
        let (groups, _) = group(
            r##"{
                "openapi": "3.0.1",
                "components": { "schemas": {} },
                "paths": {
                    "/orders": {
                        "post": {
                            "tags": ["Orders"],
                            "operationId": "createOrder",
                            "parameters": [{ "name": "dryRun", "in": "query", "schema": { "type": "boolean" } }],
                            "requestBody": {
                                "required": true,
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Order" } } }
                            },
                            "responses": {
                                "201": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Order" } } } }
                            }
                        }
                    }
                }
            }"##,
        );
        let endpoint = &groups["Orders"][0];
        assert_eq!(endpoint.parameters.len(), 2);
        let body = endpoint.body_parameter().unwrap();
        assert_eq!(body.name, "body");
        assert!(body.required);
        assert_eq!(body.param_type, TypeRef::Ref("Order".to_string()));
        assert_eq!(endpoint.return_type, TypeRef::Ref("Order".to_string()));
        assert_eq!(endpoint.parameters[0].param_type, TypeRef::Boolean);
    }

    #[test]
    fn test_summary_falls_back_to_description() {
        let (groups, _) = group(
            r#"{
                "swagger": "2.0",
                "definitions": {},
                "paths": {
                    "/a": { "get": { "tags": ["A"], "operationId": "a", "description": "Lists things" } }
                }
            }"#,
        );
        assert_eq!(groups["A"][0].summary.as_deref(), Some("Lists things"));
    }

    #[test]
    fn test_refs_translated_through_model_names() {
        let doc = from_json(
            r##"{
                "openapi": "3.0.1",
                "components": {
                    "schemas": {
                        "Page«Order»": { "type": "object", "properties": {} },
                        "PageOrder": { "type": "object", "properties": {} }
                    }
                },
                "paths": {
                    "/pages": {
                        "post": {
                            "tags": ["Pages"],
                            "operationId": "createPage",
                            "parameters": [{ "name": "copy", "in": "query", "schema": { "$ref": "#/components/schemas/PageOrder" } }],
                            "requestBody": {
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/PageOrder" } } }
                            },
                            "responses": {
                                "200": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Page«Order»" } } } }
                            }
                        }
                    }
                }
            }"##,
        )
        .unwrap();
        let (models, _) = crate::transform::inventory::build_inventory(&doc);
        let (groups, _) = group_endpoints(&doc, &ModelNames::from_models(&models));

        let endpoint = &groups["Pages"][0];
        let renamed = TypeRef::Ref("PageOrder1".to_string());
        assert_eq!(endpoint.parameters[0].param_type, renamed);
        assert_eq!(endpoint.body_parameter().unwrap().param_type, renamed);
        assert_eq!(endpoint.return_type, TypeRef::Ref("PageOrder".to_string()));
    }
}
