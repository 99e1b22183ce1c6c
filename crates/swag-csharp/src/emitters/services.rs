use std::collections::HashSet;

use swag_core::ir::{
    EndpointInfo, HttpMethod, ModelNamespaceIndex, ParameterInfo, ParameterLocation, TypeRef,
};
use swag_core::transform::name_normalizer::{clean_operation_id, to_camel_case, unique_identifier};
use swag_core::{GeneratedFile, GenerationReport, ItemOutcome};

use crate::error::EmitError;
use crate::type_mapper::{escape_identifier, parameter_type, task_type, type_ref_to_csharp};

use super::fragments::{SourceUnit, UnitRenderer, doc_comment, escape_string};

/// Field name of the injected HTTP client in implementations.
const CLIENT_FIELD: &str = "httpClient";

/// Namespaces and client capability shared by every service file.
pub struct ServiceContext<'a> {
    pub models_namespace: &'a str,
    pub services_namespace: &'a str,
    /// Type name of the injected HTTP client capability.
    pub client_interface: &'a str,
    /// Extra `using` needed to see `client_interface`.
    pub client_namespace: Option<&'a str>,
    pub index: &'a ModelNamespaceIndex,
    pub renderer: &'a UnitRenderer,
}

#[derive(Debug)]
pub struct PlannedParameter<'a> {
    /// C# identifier, unique within the method and keyword-escaped.
    pub identifier: String,
    pub info: &'a ParameterInfo,
}

/// One endpoint with its method and parameter names fixed.
#[derive(Debug)]
pub struct MethodPlan<'a> {
    pub endpoint: &'a EndpointInfo,
    /// Cleaned operation id, unique within the service.
    pub stem: String,
    pub parameters: Vec<PlannedParameter<'a>>,
}

impl MethodPlan<'_> {
    pub fn method_name(&self) -> String {
        format!("{}Async", self.stem)
    }

    fn parameter(&self, name: &str, location: ParameterLocation) -> Option<&PlannedParameter<'_>> {
        self.parameters
            .iter()
            .find(|p| p.info.location == location && p.info.name == name)
    }

    fn body(&self) -> Option<&PlannedParameter<'_>> {
        self.parameters
            .iter()
            .find(|p| p.info.location == ParameterLocation::Body)
    }

    fn types(&self) -> impl Iterator<Item = &TypeRef> {
        std::iter::once(&self.endpoint.return_type)
            .chain(self.parameters.iter().map(|p| &p.info.param_type))
    }
}

/// Fix the method name and parameter identifiers for one endpoint.
///
/// `used` holds the stems already taken in the same service.
pub fn plan_method<'a>(
    endpoint: &'a EndpointInfo,
    used: &HashSet<String>,
) -> Result<MethodPlan<'a>, EmitError> {
    match endpoint.method {
        HttpMethod::Get | HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete => {}
        other => return Err(EmitError::UnsupportedMethod(other.as_str().to_string())),
    }

    let stem = unique_identifier(&clean_operation_id(&endpoint.operation_id), used);
    let mut taken = HashSet::new();
    let mut parameters = Vec::with_capacity(endpoint.parameters.len());
    for info in &endpoint.parameters {
        let base = unique_identifier(&to_camel_case(&info.name), &taken);
        taken.insert(base.clone());
        parameters.push(PlannedParameter {
            identifier: escape_identifier(&base),
            info,
        });
    }
    Ok(MethodPlan {
        endpoint,
        stem,
        parameters,
    })
}

/// Plan every endpoint of a group, recording unsupported ones in `report`.
pub fn plan_methods<'a>(
    endpoints: &'a [EndpointInfo],
    report: &mut GenerationReport,
) -> Vec<MethodPlan<'a>> {
    let mut used = HashSet::new();
    let mut plans = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        let item = format!("{} {}", endpoint.method.as_str(), endpoint.url);
        let outcome = match plan_method(endpoint, &used) {
            Ok(plan) => ItemOutcome::Ok(plan),
            Err(e) => ItemOutcome::Failed(e.to_string()),
        };
        if let Some(plan) = report.record(&item, outcome) {
            used.insert(plan.stem.clone());
            plans.push(plan);
        }
    }
    plans
}

/// `Task<R> NameAsync(T a, U? b)`
pub fn signature(plan: &MethodPlan<'_>) -> String {
    let params: Vec<String> = plan
        .parameters
        .iter()
        .map(|p| {
            format!(
                "{} {}",
                parameter_type(&p.info.param_type, p.info.required),
                p.identifier
            )
        })
        .collect();
    format!(
        "{} {}({})",
        task_type(&plan.endpoint.return_type),
        plan.method_name(),
        params.join(", ")
    )
}

enum UrlPart<'a> {
    Text(&'a str),
    Hole(&'a str),
}

/// C# string expression for the request URL.
///
/// Path placeholders become interpolation holes for the matching parameter;
/// placeholders without one are kept as literal text. Query parameters are
/// appended as `key={value}` pairs.
pub fn url_expression(plan: &MethodPlan<'_>) -> String {
    let url = plan.endpoint.url.as_str();
    let mut parts = Vec::new();
    let mut rest = url;
    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        let raw = &rest[open + 1..open + len];
        parts.push(UrlPart::Text(&rest[..open]));
        match plan.parameter(raw, ParameterLocation::Path) {
            Some(param) => parts.push(UrlPart::Hole(&param.identifier)),
            None => parts.push(UrlPart::Text(&rest[open..=open + len])),
        }
        rest = &rest[open + len + 1..];
    }
    parts.push(UrlPart::Text(rest));

    let mut separator = if url.contains('?') { "&" } else { "?" };
    for param in plan
        .parameters
        .iter()
        .filter(|p| p.info.location == ParameterLocation::Query)
    {
        parts.push(UrlPart::Text(separator));
        parts.push(UrlPart::Text(&param.info.name));
        parts.push(UrlPart::Text("="));
        parts.push(UrlPart::Hole(&param.identifier));
        separator = "&";
    }

    let interpolated = parts.iter().any(|p| matches!(p, UrlPart::Hole(_)));
    let mut body = String::new();
    for part in &parts {
        match part {
            UrlPart::Text(text) if interpolated => {
                body.push_str(&escape_string(text).replace('{', "{{").replace('}', "}}"));
            }
            UrlPart::Text(text) => body.push_str(&escape_string(text)),
            UrlPart::Hole(ident) => {
                body.push('{');
                body.push_str(ident);
                body.push('}');
            }
        }
    }
    if interpolated {
        format!("$\"{body}\"")
    } else {
        format!("\"{body}\"")
    }
}

/// The awaited HTTP client call, e.g. `httpClient.GetAsync<Order>(url)`.
pub fn call_expression(plan: &MethodPlan<'_>) -> String {
    let url = url_expression(plan);
    let returns = &plan.endpoint.return_type;
    let result = if returns.is_void() {
        "bool".to_string()
    } else {
        type_ref_to_csharp(returns)
    };

    match plan.endpoint.method {
        HttpMethod::Get if returns.is_void() => format!("{CLIENT_FIELD}.GetAsync({url})"),
        HttpMethod::Get => format!("{CLIENT_FIELD}.GetAsync<{result}>({url})"),
        HttpMethod::Delete => format!("{CLIENT_FIELD}.DeleteAsync<{result}>({url})"),
        method => {
            let verb = if method == HttpMethod::Put { "PutAsync" } else { "PostAsync" };
            match plan.body() {
                Some(body) => format!(
                    "{CLIENT_FIELD}.{verb}<{}, {result}>({url}, {})",
                    type_ref_to_csharp(&body.info.param_type),
                    body.identifier
                ),
                None => format!("{CLIENT_FIELD}.{verb}<{result}>({url})"),
            }
        }
    }
}

fn interface_name(service: &str) -> String {
    format!("I{service}Service")
}

/// `Services/Interfaces/I{Service}Service.cs`
pub fn emit_interface(
    service: &str,
    plans: &[MethodPlan<'_>],
    ctx: &ServiceContext<'_>,
) -> Result<GeneratedFile, EmitError> {
    let namespace = format!("{}.Interfaces", ctx.services_namespace);
    let mut unit = SourceUnit::new(namespace, format!("public interface {}", interface_name(service)));
    unit.doc = doc_comment(Some(&format!("Service interface for {service} operations")));
    add_service_usings(&mut unit, plans, ctx);

    for plan in plans {
        let mut lines = doc_comment(plan.endpoint.summary.as_deref());
        lines.push(format!("{};", signature(plan)));
        unit.members.push(lines);
    }

    Ok(GeneratedFile {
        path: format!("Services/Interfaces/{}.cs", interface_name(service)),
        content: ctx.renderer.render(&unit)?,
    })
}

/// `Services/Implementations/{Service}Service.cs`
pub fn emit_implementation(
    service: &str,
    plans: &[MethodPlan<'_>],
    ctx: &ServiceContext<'_>,
) -> Result<GeneratedFile, EmitError> {
    let namespace = format!("{}.Implementations", ctx.services_namespace);
    let declaration = format!(
        "public class {service}Service({} {CLIENT_FIELD}) : {}",
        ctx.client_interface,
        interface_name(service)
    );
    let mut unit = SourceUnit::new(namespace, declaration);
    unit.doc = doc_comment(Some(&format!("Service implementation for {service} operations")));
    add_service_usings(&mut unit, plans, ctx);
    unit.add_using(format!("{}.Interfaces", ctx.services_namespace));
    if let Some(client_namespace) = ctx.client_namespace {
        unit.add_using(client_namespace);
    }

    for plan in plans {
        let mut lines = doc_comment(plan.endpoint.summary.as_deref());
        lines.push(format!("public async {}", signature(plan)));
        lines.push("{".to_string());
        if plan.endpoint.return_type.is_void() {
            lines.push(format!("    await {};", call_expression(plan)));
        } else {
            lines.push(format!("    var response = await {};", call_expression(plan)));
            lines.push("    return response.Result;".to_string());
        }
        lines.push("}".to_string());
        unit.members.push(lines);
    }

    Ok(GeneratedFile {
        path: format!("Services/Implementations/{service}Service.cs"),
        content: ctx.renderer.render(&unit)?,
    })
}

fn add_service_usings(unit: &mut SourceUnit, plans: &[MethodPlan<'_>], ctx: &ServiceContext<'_>) {
    unit.add_using("System.Collections.Generic");
    unit.add_using("System.Threading.Tasks");
    for type_ref in plans.iter().flat_map(MethodPlan::types) {
        if type_ref.mentions_date_time() {
            unit.add_using("System");
        }
        for name in type_ref.referenced_models() {
            match ctx.index.lookup(name) {
                Some(hint) => unit.add_using(format!("{}.{}", ctx.models_namespace, hint.relative())),
                None => log::debug!("no namespace known for `{name}`"),
            }
        }
    }
}
