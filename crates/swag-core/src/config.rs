use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.swag.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwagConfig {
    pub input: String,
    pub output: String,
    pub namespaces: NamespaceConfig,
    pub naming: NamingConfig,
    pub client: ClientConfig,
}

impl Default for SwagConfig {
    fn default() -> Self {
        Self {
            input: "swagger.json".to_string(),
            output: "generated".to_string(),
            namespaces: NamespaceConfig::default(),
            naming: NamingConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

/// Root namespaces for emitted code.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    pub models: String,
    pub services: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            models: "GeneratedCode.Models".to_string(),
            services: "GeneratedCode.Services".to_string(),
        }
    }
}

/// Interface-name cleaning toggles.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Drop `resource` from service names (`OrderResource` -> `Order`).
    pub strip_resource: bool,
    /// Drop version tokens from service names (`OrderV2` -> `Order`).
    pub strip_version: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            strip_resource: true,
            strip_version: true,
        }
    }
}

/// The HTTP client capability generated services delegate to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub interface: String,
    /// Extra `using` needed to see `interface`, if it lives elsewhere.
    pub namespace: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            interface: "IHttpClientService".to_string(),
            namespace: None,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swag.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SwagConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: SwagConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swag configuration
input: swagger.json
output: generated

namespaces:
  models: GeneratedCode.Models
  services: GeneratedCode.Services

naming:
  strip_resource: true   # OrderResource -> Order in service names
  strip_version: true    # OrderV2 -> Order in service names

client:
  interface: IHttpClientService
  # namespace: MyApp.Http   # extra using for the client interface
"#
}
