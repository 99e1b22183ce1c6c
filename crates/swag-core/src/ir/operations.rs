use super::types::TypeRef;

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Map a path-item key to a method. Non-method keys (`parameters`,
    /// `summary`, extensions) yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "put" => Some(HttpMethod::Put),
            "post" => Some(HttpMethod::Post),
            "delete" => Some(HttpMethod::Delete),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            "patch" => Some(HttpMethod::Patch),
            _ => None,
        }
    }
}

/// Where a parameter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Body,
    Header,
}

impl ParameterLocation {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "body" => Some(ParameterLocation::Body),
            "header" => Some(ParameterLocation::Header),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Body => "body",
            ParameterLocation::Header => "header",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Name as written in the document.
    pub name: String,
    pub location: ParameterLocation,
    pub param_type: TypeRef,
    pub required: bool,
    pub description: Option<String>,
}

/// One (path, method) pair that made it into a service group.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointInfo {
    pub url: String,
    pub method: HttpMethod,
    pub operation_id: String,
    pub summary: Option<String>,
    pub parameters: Vec<ParameterInfo>,
    pub return_type: TypeRef,
    /// Group key this endpoint was bucketed under.
    pub tag: String,
}

impl EndpointInfo {
    pub fn body_parameter(&self) -> Option<&ParameterInfo> {
        self.parameters
            .iter()
            .find(|p| p.location == ParameterLocation::Body)
    }

    pub fn parameters_in(
        &self,
        location: ParameterLocation,
    ) -> impl Iterator<Item = &ParameterInfo> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_key() {
        assert_eq!(HttpMethod::from_key("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("PATCH"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::from_key("parameters"), None);
        assert_eq!(HttpMethod::from_key("x-internal"), None);
    }

    #[test]
    fn test_location_from_key() {
        assert_eq!(ParameterLocation::from_key("path"), Some(ParameterLocation::Path));
        assert_eq!(ParameterLocation::from_key("formData"), None);
        assert_eq!(ParameterLocation::from_key("cookie"), None);
    }
}
