use crate::canonical::SettingValue;
use crate::flexible::{flexible, from_value, scalar_string};
use serde::Deserialize;
use serde_yaml::Value;

#[derive(Deserialize)]
struct SecretRef {
    from_secret: String,
}

fn secret_name(raw: &Value) -> Option<String> {
    if !raw.is_mapping() {
        return None;
    }
    from_value::<SecretRef>(raw)
        .map(|r| r.from_secret)
        .filter(|name| !name.is_empty())
}

/// An environment entry: a literal value or a reference to a named secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variable {
    Value(String),
    Secret(String),
}

/// A plugin setting: a secret reference, a literal of any shape, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Secret(String),
    Literal(SettingValue),
    Empty,
}

flexible! {
    Variable as "environment variable" {
        "scalar" => |raw: &Value| scalar_string(raw).map(Variable::Value),
        "null" => |raw: &Value| raw.is_null().then(|| Variable::Value(String::new())),
        "secret reference" => |raw: &Value| secret_name(raw).map(Variable::Secret),
    }

    // A `{from_secret: x}` mapping is also a valid literal mapping, so the secret
    // candidate must come first.
    Parameter as "setting" {
        "secret reference" => |raw: &Value| secret_name(raw).map(Parameter::Secret),
        "null" => |raw: &Value| raw.is_null().then_some(Parameter::Empty),
        "literal" => |raw: &Value| SettingValue::from_yaml(raw).map(Parameter::Literal),
    }
}
