//! JSON and YAML serialization of engine results.

use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Serialization format for plans, tier tables and subnet records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// Serialize `value` in the requested format (pretty JSON or YAML).
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("Error serializing JSON: {e}"))?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("Error serializing YAML: {e}"))?
        }
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::calculate_subnet;

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_subnet() {
        let subnet = calculate_subnet("10.0.0.0/30").unwrap();
        let json = render(&subnet, OutputFormat::Json).unwrap();
        assert!(json.contains("\"networkAddress\": \"10.0.0.0\""));
        assert!(!json.contains("children"));

        let yaml = render(&subnet, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("usableHosts: 2"));
        assert!(yaml.contains("cidr: 10.0.0.0/30"));
    }
}
