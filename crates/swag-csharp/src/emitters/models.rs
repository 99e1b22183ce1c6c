use swag_core::GeneratedFile;
use swag_core::ir::{ModelDescriptor, ModelKind, ModelNames, ModelNamespaceIndex, TypeRef};
use swag_core::transform::fields::{describe_enum_members, describe_fields};

use crate::error::EmitError;
use crate::type_mapper::{property_type, type_ref_to_csharp};

use super::fragments::{SourceUnit, UnitRenderer, doc_comment, escape_string};

const FALLBACK_DOC: &str = "Auto-generated fallback model";

/// What model emission needs besides the model itself.
pub struct ModelContext<'a> {
    /// Models namespace root, e.g. `GeneratedCode.Models`.
    pub root: &'a str,
    pub index: &'a ModelNamespaceIndex,
    /// Definition key to model name, for `$ref` targets.
    pub names: &'a ModelNames,
    pub renderer: &'a UnitRenderer,
}

impl ModelContext<'_> {
    fn namespace_of(&self, model: &ModelDescriptor) -> String {
        format!("{}.{}", self.root, model.namespace_hint().relative())
    }

    /// Import the namespaces of every model `type_ref` mentions, except the
    /// one being emitted into.
    fn add_model_usings(&self, unit: &mut SourceUnit, type_ref: &TypeRef) {
        for name in type_ref.referenced_models() {
            let Some(hint) = self.index.lookup(name) else {
                log::debug!("no namespace known for `{name}`");
                continue;
            };
            let namespace = format!("{}.{}", self.root, hint.relative());
            if namespace != unit.namespace {
                unit.add_using(namespace);
            }
        }
    }
}

/// Emit `Models/{Folder}/{Name}.cs` (enums under `Enums/`).
pub fn emit_model(model: &ModelDescriptor, ctx: &ModelContext<'_>) -> Result<GeneratedFile, EmitError> {
    let unit = match model.kind {
        ModelKind::Enum => enum_unit(model, ctx)?,
        ModelKind::Object => object_unit(model, ctx)?,
        ModelKind::SimpleWrapper => wrapper_unit(model, ctx),
        ModelKind::Fallback => fallback_unit(model, ctx),
    };
    Ok(GeneratedFile {
        path: model_path(model),
        content: ctx.renderer.render(&unit)?,
    })
}

pub fn model_path(model: &ModelDescriptor) -> String {
    format!(
        "Models/{}/{}.cs",
        model.namespace_hint().directory(),
        model.name
    )
}

fn enum_unit(model: &ModelDescriptor, ctx: &ModelContext<'_>) -> Result<SourceUnit, EmitError> {
    let members = describe_enum_members(model.node())?;
    let mut unit = SourceUnit::new(ctx.namespace_of(model), format!("public enum {}", model.name));
    unit.doc = doc_comment(model.node().description());
    unit.spaced = false;
    let last = members.len().saturating_sub(1);
    for (i, member) in members.iter().enumerate() {
        let separator = if i == last { "" } else { "," };
        unit.members
            .push(vec![format!("{} = {}{separator}", member.name, member.value)]);
    }
    Ok(unit)
}

fn object_unit(model: &ModelDescriptor, ctx: &ModelContext<'_>) -> Result<SourceUnit, EmitError> {
    let fields = describe_fields(&model.name, model.node(), ctx.names)?;
    let mut unit = SourceUnit::new(ctx.namespace_of(model), format!("public record {}", model.name));
    unit.doc = doc_comment(model.node().description());
    unit.add_using("System.Text.Json.Serialization");

    for field in &fields {
        unit.add_type_usings(&field.field_type);
        ctx.add_model_usings(&mut unit, &field.field_type);

        let mut lines = doc_comment(field.description.as_deref());
        lines.push(format!(
            "[JsonPropertyName(\"{}\")]",
            escape_string(&field.json_name)
        ));
        let initializer = if field.required { " = default;" } else { "" };
        lines.push(format!(
            "public {} {} {{ get; set; }}{initializer}",
            property_type(&field.field_type, field.required),
            field.name
        ));
        unit.members.push(lines);
    }
    Ok(unit)
}

fn wrapper_unit(model: &ModelDescriptor, ctx: &ModelContext<'_>) -> SourceUnit {
    let value_type = model.resolved_type.clone().unwrap_or(TypeRef::Any);
    let mut unit = SourceUnit::new(ctx.namespace_of(model), format!("public record {}", model.name));
    unit.doc = doc_comment(model.node().description());
    unit.add_type_usings(&value_type);
    ctx.add_model_usings(&mut unit, &value_type);
    unit.members.push(vec![format!(
        "public {} Value {{ get; set; }}",
        type_ref_to_csharp(&value_type)
    )]);
    unit
}

fn fallback_unit(model: &ModelDescriptor, ctx: &ModelContext<'_>) -> SourceUnit {
    let mut unit = SourceUnit::new(ctx.namespace_of(model), format!("public record {}", model.name));
    unit.doc = doc_comment(Some(model.node().description().unwrap_or(FALLBACK_DOC)));
    unit
}
