//! Reading plan requests from JSON or YAML files.

use crate::models::PlanRequest;
use std::error::Error;
use std::path::Path;

/// Read a [`PlanRequest`] from a file; `.yaml`/`.yml` files are parsed as
/// YAML, anything else as JSON.
pub fn read_plan_request(path: &Path) -> Result<PlanRequest, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading request file {}: {e}", path.display()))?;
    let yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    log::info!("Reading plan request from {}", path.display());
    parse_plan_request(&text, yaml)
}

/// Parse a request body, reporting the path of the offending field on error.
pub fn parse_plan_request(text: &str, yaml: bool) -> Result<PlanRequest, Box<dyn Error>> {
    let request = if yaml {
        let deserializer = serde_yaml::Deserializer::from_str(text);
        serde_path_to_error::deserialize(deserializer)
            .map_err(|e| format!("Error parsing request: path={} error={}", e.path(), e))?
    } else {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| format!("Error parsing request: path={} error={}", e.path(), e))?
    };
    log::debug!("parsed request: {request:?}");
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_request() {
        let request = parse_plan_request(
            r#"{"deploymentSize":"professional","provider":"eks","vpcCidr":"10.0.0.0/16"}"#,
            false,
        )
        .unwrap();
        assert_eq!(
            request,
            PlanRequest::new("professional")
                .provider("eks")
                .vpc_cidr("10.0.0.0/16")
        );
    }

    #[test]
    fn test_parse_yaml_request() {
        let request =
            parse_plan_request("deploymentSize: micro\ndeploymentName: lab\n", true).unwrap();
        assert_eq!(request, PlanRequest::new("micro").deployment_name("lab"));
    }

    #[test]
    fn test_parse_error_reports_path() {
        let err = parse_plan_request(r#"{"deploymentSize":"micro","provider":7}"#, false)
            .unwrap_err()
            .to_string();
        assert!(err.contains("path=provider"), "{err}");
    }

    #[test]
    fn test_missing_file() {
        let err = read_plan_request(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
