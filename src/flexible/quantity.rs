use super::flexible;
use serde::Serialize;
use serde_yaml::Value;

/// A CPU quantity: an integer, or a string carrying its own unit (`"500m"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Quantity {
    Int(i64),
    Str(String),
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Int(0)
    }
}

impl Quantity {
    pub fn is_zero(&self) -> bool {
        match self {
            Quantity::Int(n) => *n == 0,
            Quantity::Str(s) => s.is_empty() || s == "0",
        }
    }
}

flexible! {
    Quantity as "cpu quantity" {
        "integer" => |raw: &Value| raw.as_i64().map(Quantity::Int),
        "decimal" => |raw: &Value| raw.as_f64().map(|n| Quantity::Str(n.to_string())),
        "string" => |raw: &Value| raw.as_str().map(|s| Quantity::Str(s.trim().to_string())),
    }
}

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;
const TIB: u64 = 1 << 40;
const PIB: u64 = 1 << 50;

/// A memory size in bytes. Strings carry a unit suffix; every suffix is binary,
/// so `1g`, `1gb`, `1Gi` and `1GiB` all mean 2^30 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BytesSize(pub u64);

impl BytesSize {
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parses a human-readable size such as `512Mi`, `1.5GiB` or `2048`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let split = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(text.len());
        let (number, unit) = text.split_at(split);
        let number: f64 = number.parse().ok()?;
        let multiplier = match unit.trim().to_ascii_lowercase().as_str() {
            "" | "b" => 1,
            "k" | "kb" | "ki" | "kib" => KIB,
            "m" | "mb" | "mi" | "mib" => MIB,
            "g" | "gb" | "gi" | "gib" => GIB,
            "t" | "tb" | "ti" | "tib" => TIB,
            "p" | "pb" | "pi" | "pib" => PIB,
            _ => return None,
        };
        if number < 0.0 {
            return None;
        }
        Some(BytesSize((number * multiplier as f64) as u64))
    }
}

impl Serialize for BytesSize {
    /// Emits the largest binary suffix that divides the size evenly, or a plain integer.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bytes = self.0;
        match bytes {
            0 => serializer.serialize_u64(0),
            b if b % GIB == 0 => serializer.serialize_str(&format!("{}Gi", b / GIB)),
            b if b % MIB == 0 => serializer.serialize_str(&format!("{}Mi", b / MIB)),
            b if b % KIB == 0 => serializer.serialize_str(&format!("{}Ki", b / KIB)),
            b => serializer.serialize_u64(b),
        }
    }
}

flexible! {
    BytesSize as "memory size" {
        "integer" => |raw: &Value| raw.as_u64().map(BytesSize),
        "string with unit" => |raw: &Value| raw.as_str().and_then(BytesSize::parse),
    }
}
