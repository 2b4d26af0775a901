use super::{flexible, from_value};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Registry credentials: a bare name, or a name plus the registry pattern it applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub name: String,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_pattern: Option<String>,
}

impl Credentials {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            match_pattern: None,
        }
    }
}

#[derive(Deserialize)]
struct CredentialsFields {
    name: String,
    #[serde(default, rename = "match")]
    match_pattern: Option<String>,
}

flexible! {
    Credentials as "credentials" {
        "string" => |raw: &Value| raw.as_str().map(Credentials::named),
        "mapping" => |raw: &Value| {
            from_value::<CredentialsFields>(raw).map(|f| Credentials {
                name: f.name,
                match_pattern: f.match_pattern,
            })
        },
    }
}
