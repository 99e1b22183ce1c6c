use std::collections::BTreeSet;

use minijinja::{Environment, context};
use swag_core::ir::TypeRef;

use crate::error::EmitError;

/// One C# source file, collected as fragments and rendered once at the end.
#[derive(Debug, Clone, Default)]
pub struct SourceUnit {
    usings: BTreeSet<String>,
    pub namespace: String,
    /// `///` lines above the declaration.
    pub doc: Vec<String>,
    pub declaration: String,
    /// Member blocks, one line per entry, unindented.
    pub members: Vec<Vec<String>>,
    /// Put a blank line between member blocks.
    pub spaced: bool,
}

impl SourceUnit {
    pub fn new(namespace: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            declaration: declaration.into(),
            spaced: true,
            ..Self::default()
        }
    }

    pub fn add_using(&mut self, namespace: impl Into<String>) {
        self.usings.insert(namespace.into());
    }

    /// Usings needed to name `type_ref` itself (not the models it references).
    pub fn add_type_usings(&mut self, type_ref: &TypeRef) {
        if type_ref.mentions_date_time() {
            self.add_using("System");
        }
        if type_ref.is_container() {
            self.add_using("System.Collections.Generic");
        }
    }

    /// `System*` first, then the rest, each group alphabetical.
    pub fn usings(&self) -> Vec<&str> {
        let (mut system, other): (Vec<&str>, Vec<&str>) = self
            .usings
            .iter()
            .map(String::as_str)
            .partition(|u| *u == "System" || u.starts_with("System."));
        system.extend(other);
        system
    }
}

/// Renders `SourceUnit`s through the shared file layout template.
pub struct UnitRenderer {
    env: Environment<'static>,
}

impl UnitRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_template("unit.cs.j2", include_str!("../../templates/unit.cs.j2"))
            .expect("template should be valid");
        Self { env }
    }

    pub fn render(&self, unit: &SourceUnit) -> Result<String, EmitError> {
        let tmpl = self.env.get_template("unit.cs.j2")?;
        let content = tmpl.render(context! {
            usings => unit.usings(),
            namespace => &unit.namespace,
            doc => &unit.doc,
            declaration => &unit.declaration,
            members => &unit.members,
            spaced => unit.spaced,
        })?;
        Ok(content)
    }
}

impl Default for UnitRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `<summary>` block for a description; empty when there is nothing to say.
pub fn doc_comment(text: Option<&str>) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };
    let body: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("/// {}", escape_xml(line)))
        .collect();
    if body.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push("/// <summary>".to_string());
    lines.extend(body);
    lines.push("/// </summary>".to_string());
    lines
}

/// Escape text for a C# regular string literal.
pub fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let mut unit = SourceUnit::new("Shop.Models.Orders", "public record Order");
        unit.add_using("System.Text.Json.Serialization");
        unit.doc = doc_comment(Some("An order"));
        unit.members.push(vec![
            "[JsonPropertyName(\"id\")]".to_string(),
            "public long Id { get; set; } = default;".to_string(),
        ]);
        unit.members.push(vec!["public string? Note { get; set; }".to_string()]);

        let rendered = UnitRenderer::new().render(&unit).unwrap();
        let expected = "using System.Text.Json.Serialization;

namespace Shop.Models.Orders;

/// <summary>
/// An order
/// </summary>
public record Order
{
    [JsonPropertyName(\"id\")]
    public long Id { get; set; } = default;

    public string? Note { get; set; }
}
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_without_usings_or_members() {
        let unit = SourceUnit::new("Shop.Models.Blobs", "public record Blob");
        let rendered = UnitRenderer::new().render(&unit).unwrap();
        assert_eq!(rendered, "namespace Shop.Models.Blobs;\n\npublic record Blob\n{\n}\n");
    }

    #[test]
    fn test_render_unspaced_members() {
        let mut unit = SourceUnit::new("Shop.Models.Orders.Enums", "public enum Status");
        unit.spaced = false;
        unit.members.push(vec!["Active = 0,".to_string()]);
        unit.members.push(vec!["Inactive = 1".to_string()]);
        let rendered = UnitRenderer::new().render(&unit).unwrap();
        assert!(rendered.ends_with("{\n    Active = 0,\n    Inactive = 1\n}\n"));
    }

    #[test]
    fn test_usings_system_first() {
        let mut unit = SourceUnit::default();
        unit.add_using("Shop.Models.Orders");
        unit.add_using("System.Threading.Tasks");
        unit.add_using("System");
        unit.add_using("Shop.Models.Orders");
        unit.add_using("Acme.Http");
        assert_eq!(
            unit.usings(),
            vec!["System", "System.Threading.Tasks", "Acme.Http", "Shop.Models.Orders"]
        );
    }

    #[test]
    fn test_type_usings() {
        let mut unit = SourceUnit::default();
        unit.add_type_usings(&TypeRef::List(Box::new(TypeRef::DateTime)));
        assert_eq!(unit.usings(), vec!["System", "System.Collections.Generic"]);
    }

    #[test]
    fn test_doc_comment_multiline_and_escaping() {
        assert_eq!(
            doc_comment(Some("First line\n  second <b>&</b>\n\n")),
            vec![
                "/// <summary>",
                "/// First line",
                "/// second &lt;b&gt;&amp;&lt;/b&gt;",
                "/// </summary>",
            ]
        );
        assert!(doc_comment(Some("  \n ")).is_empty());
        assert!(doc_comment(None).is_empty());
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string(r#"a"b\c"#), r#"a\"b\\c"#);
    }
}
