use swag_core::ir::TypeRef;

/// Reserved words that need an `@` prefix when used as identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class",
    "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto", "if",
    "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace", "new",
    "null", "object", "operator", "out", "override", "params", "private", "protected", "public",
    "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static",
    "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong",
    "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/// Map a `TypeRef` to its C# type string representation.
pub fn type_ref_to_csharp(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::String => "string".to_string(),
        TypeRef::DateTime => "DateTime".to_string(),
        TypeRef::Bytes => "byte[]".to_string(),
        TypeRef::Int32 => "int".to_string(),
        TypeRef::Int64 => "long".to_string(),
        TypeRef::Decimal => "decimal".to_string(),
        TypeRef::Float => "float".to_string(),
        TypeRef::Double => "double".to_string(),
        TypeRef::Boolean => "bool".to_string(),
        TypeRef::List(inner) => format!("List<{}>", type_ref_to_csharp(inner)),
        TypeRef::Map(values) => format!("Dictionary<string, {}>", type_ref_to_csharp(values)),
        TypeRef::Ref(name) => name.clone(),
        TypeRef::Any => "object".to_string(),
        TypeRef::Void => "void".to_string(),
    }
}

/// Property type: optional properties are nullable.
pub fn property_type(type_ref: &TypeRef, required: bool) -> String {
    let base = type_ref_to_csharp(type_ref);
    if required { base } else { format!("{base}?") }
}

/// Parameter type: optional parameters are nullable unless they are a list or
/// dictionary.
pub fn parameter_type(type_ref: &TypeRef, required: bool) -> String {
    let base = type_ref_to_csharp(type_ref);
    if required || type_ref.is_container() {
        base
    } else {
        format!("{base}?")
    }
}

/// `Task` for void, `Task<T>` otherwise.
pub fn task_type(return_type: &TypeRef) -> String {
    match return_type {
        TypeRef::Void => "Task".to_string(),
        other => format!("Task<{}>", type_ref_to_csharp(other)),
    }
}

/// Prefix reserved words with `@`.
pub fn escape_identifier(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("@{name}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(inner: TypeRef) -> TypeRef {
        TypeRef::List(Box::new(inner))
    }

    #[test]
    fn test_primitives() {
        assert_eq!(type_ref_to_csharp(&TypeRef::String), "string");
        assert_eq!(type_ref_to_csharp(&TypeRef::DateTime), "DateTime");
        assert_eq!(type_ref_to_csharp(&TypeRef::Bytes), "byte[]");
        assert_eq!(type_ref_to_csharp(&TypeRef::Int32), "int");
        assert_eq!(type_ref_to_csharp(&TypeRef::Int64), "long");
        assert_eq!(type_ref_to_csharp(&TypeRef::Decimal), "decimal");
        assert_eq!(type_ref_to_csharp(&TypeRef::Boolean), "bool");
        assert_eq!(type_ref_to_csharp(&TypeRef::Any), "object");
    }

    #[test]
    fn test_containers() {
        assert_eq!(
            type_ref_to_csharp(&list(TypeRef::Ref("Item".to_string()))),
            "List<Item>"
        );
        assert_eq!(
            type_ref_to_csharp(&TypeRef::Map(Box::new(list(TypeRef::Int64)))),
            "Dictionary<string, List<long>>"
        );
    }

    #[test]
    fn test_nullability() {
        assert_eq!(property_type(&TypeRef::Int64, true), "long");
        assert_eq!(property_type(&TypeRef::String, false), "string?");
        assert_eq!(property_type(&list(TypeRef::String), false), "List<string>?");
        assert_eq!(parameter_type(&TypeRef::Int32, false), "int?");
        assert_eq!(parameter_type(&list(TypeRef::String), false), "List<string>");
        assert_eq!(parameter_type(&TypeRef::String, true), "string");
    }

    #[test]
    fn test_task_type() {
        assert_eq!(task_type(&TypeRef::Void), "Task");
        assert_eq!(
            task_type(&list(TypeRef::Ref("Order".to_string()))),
            "Task<List<Order>>"
        );
    }

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("event"), "@event");
        assert_eq!(escape_identifier("orderId"), "orderId");
    }
}
