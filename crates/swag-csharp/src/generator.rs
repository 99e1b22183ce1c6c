use std::collections::HashSet;

use swag_core::config::SwagConfig;
use swag_core::error::GeneratorError;
use swag_core::ir::{ServiceGroups, SwagSpec};
use swag_core::transform::name_normalizer::{clean_interface_name, to_valid_class_name, unique_identifier};
use swag_core::{CodeGenerator, GenerationReport, ItemOutcome};

use crate::emitters::services::MethodPlan;
use crate::emitters::{
    ModelContext, ServiceContext, UnitRenderer, emit_implementation, emit_interface, emit_model,
    plan_methods,
};

/// Configuration for the C# generator.
#[derive(Debug, Clone)]
pub struct CSharpOptions {
    pub models_namespace: String,
    pub services_namespace: String,
    pub client_interface: String,
    pub client_namespace: Option<String>,
    pub strip_resource: bool,
    pub strip_version: bool,
}

impl Default for CSharpOptions {
    fn default() -> Self {
        Self::from(&SwagConfig::default())
    }
}

impl From<&SwagConfig> for CSharpOptions {
    fn from(config: &SwagConfig) -> Self {
        Self {
            models_namespace: config.namespaces.models.trim().to_string(),
            services_namespace: config.namespaces.services.trim().to_string(),
            client_interface: config.client.interface.trim().to_string(),
            client_namespace: config
                .client
                .namespace
                .as_deref()
                .map(str::trim)
                .filter(|ns| !ns.is_empty())
                .map(str::to_string),
            strip_resource: config.naming.strip_resource,
            strip_version: config.naming.strip_version,
        }
    }
}

impl CSharpOptions {
    fn validate(&self) -> Result<(), GeneratorError> {
        let required = [
            ("namespaces.models", &self.models_namespace),
            ("namespaces.services", &self.services_namespace),
            ("client.interface", &self.client_interface),
        ];
        for (key, value) in required {
            if value.is_empty() {
                return Err(GeneratorError::InvalidConfig(format!("`{key}` must not be empty")));
            }
        }
        Ok(())
    }

    /// Class-name stem for a tag: `order-resource-v2` becomes `Order`.
    pub fn service_name(&self, tag: &str) -> String {
        clean_interface_name(
            &to_valid_class_name(tag),
            self.strip_resource,
            self.strip_version,
        )
    }

    /// Class-name stems for every group, in group order. Groups whose tags
    /// clean to the same stem get numeric suffixes: `Order`, `Order1`.
    pub fn service_names(&self, groups: &ServiceGroups) -> Vec<String> {
        let mut used = HashSet::new();
        groups
            .keys()
            .map(|tag| {
                let name = unique_identifier(&self.service_name(tag), &used);
                used.insert(name.clone());
                name
            })
            .collect()
    }
}

/// C# models and services generator.
pub struct CSharpGenerator;

impl CodeGenerator for CSharpGenerator {
    type Config = CSharpOptions;
    type Error = GeneratorError;

    fn generate(
        &self,
        spec: &SwagSpec,
        config: &Self::Config,
    ) -> Result<GenerationReport, Self::Error> {
        config.validate()?;

        let renderer = UnitRenderer::new();
        let mut report = GenerationReport {
            files: Vec::new(),
            diagnostics: spec.diagnostics.clone(),
        };

        // Models
        let model_ctx = ModelContext {
            root: &config.models_namespace,
            index: &spec.namespace_index,
            names: &spec.model_names,
            renderer: &renderer,
        };
        for model in &spec.models {
            let outcome = match emit_model(model, &model_ctx) {
                Ok(file) => ItemOutcome::Ok(file),
                Err(e) => ItemOutcome::Failed(e.to_string()),
            };
            if let Some(file) = report.record(&model.original_name, outcome) {
                report.push_file(file);
            }
        }

        // Services
        let service_ctx = ServiceContext {
            models_namespace: &config.models_namespace,
            services_namespace: &config.services_namespace,
            client_interface: &config.client_interface,
            client_namespace: config.client_namespace.as_deref(),
            index: &spec.namespace_index,
            renderer: &renderer,
        };
        let service_names = config.service_names(&spec.services);
        for (endpoints, service) in spec.services.values().zip(&service_names) {
            let plans = plan_methods(endpoints, &mut report);
            emit_service(service, &plans, &service_ctx, &mut report);
        }

        log::info!(
            "generated {} files ({} errors)",
            report.files.len(),
            report.errors().count()
        );
        Ok(report)
    }
}

fn emit_service(
    service: &str,
    plans: &[MethodPlan<'_>],
    ctx: &ServiceContext<'_>,
    report: &mut GenerationReport,
) {
    let files = [
        (format!("I{service}Service"), emit_interface(service, plans, ctx)),
        (format!("{service}Service"), emit_implementation(service, plans, ctx)),
    ];
    for (item, result) in files {
        let outcome = match result {
            Ok(file) => ItemOutcome::Ok(file),
            Err(e) => ItemOutcome::Failed(e.to_string()),
        };
        if let Some(file) = report.record(&item, outcome) {
            report.push_file(file);
        }
    }
}
