use crate::core::{ParameterSignature, SignatureView};
use serde::Serialize;

/// Declared types of one PHP function or method.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FunctionSignature {
    pub return_type: Option<String>,
    pub parameters: Vec<DeclaredParameter>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeclaredParameter {
    /// Without the leading `$`.
    pub name: String,
    pub type_hint: Option<String>,
}

impl FunctionSignature {
    pub fn new(return_type: Option<&str>) -> Self {
        Self {
            return_type: return_type.map(str::to_string),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: &str, type_hint: Option<&str>) -> Self {
        self.parameters.push(DeclaredParameter {
            name: name.to_string(),
            type_hint: type_hint.map(str::to_string),
        });
        self
    }
}

impl SignatureView for FunctionSignature {
    fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    fn parameters(&self) -> Vec<ParameterSignature> {
        self.parameters
            .iter()
            .map(|param| ParameterSignature::new(param.name.as_str(), param.type_hint.as_deref()))
            .collect()
    }
}

/// Declared types carry no meaningful whitespace: `int | null` is `int|null`.
pub fn normalize_type(text: &str) -> Option<String> {
    let normalized: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    (!normalized.is_empty()).then_some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_view() {
        let signature = FunctionSignature::new(Some("bool"))
            .with_parameter("id", Some("int"))
            .with_parameter("rest", None);

        assert_eq!(SignatureView::return_type(&signature), Some("bool"));
        let params = signature.parameters();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].declared_raw(), Some("int"));
        assert_eq!(params[1].declared_type, None);
    }

    #[test]
    fn test_normalize_type() {
        assert_eq!(normalize_type("int | null").as_deref(), Some("int|null"));
        assert_eq!(normalize_type("?\\App\\Foo").as_deref(), Some("?\\App\\Foo"));
        assert_eq!(normalize_type("  "), None);
    }
}
