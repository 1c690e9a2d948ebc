//! studio.yaml parsing and validation.
//!
//! Validates the constraints the provisioning engine cannot check for us:
//! - project_id must be non-empty
//! - use_lb requires a well-formed, non-empty domain (a missing domain would
//!   otherwise surface much later as an invalid certificate request)
//! - initial_user, when set, must look like an email principal
//! - service_name must satisfy the platform's service naming rule

use super::types::ProjectConfig;
use regex::Regex;
use std::path::Path;

// Lowercase RFC-1035 label, 20 chars max so derived account ids stay under
// the platform's 30-char limit.
const SERVICE_NAME_PATTERN: &str = r"^[a-z]([a-z0-9-]{0,18}[a-z0-9])?$";
const DOMAIN_PATTERN: &str = r"^([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}$";
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a studio.yaml file from disk.
pub fn parse_config_file(path: &Path) -> Result<ProjectConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_config(&content)
}

/// Parse a studio.yaml from a string.
pub fn parse_config(yaml: &str) -> Result<ProjectConfig, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &ProjectConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let service_name_re = Regex::new(SERVICE_NAME_PATTERN).expect("static pattern");
    let domain_re = Regex::new(DOMAIN_PATTERN).expect("static pattern");
    let email_re = Regex::new(EMAIL_PATTERN).expect("static pattern");

    if config.project_id.is_empty() {
        errors.push(ValidationError {
            message: "project_id must not be empty".to_string(),
        });
    }

    if config.region.is_empty() {
        errors.push(ValidationError {
            message: "region must not be empty".to_string(),
        });
    }

    if !service_name_re.is_match(&config.service_name) {
        errors.push(ValidationError {
            message: format!(
                "service_name '{}' must be a lowercase label of at most 20 characters",
                config.service_name
            ),
        });
    }

    // Fail fast instead of letting an empty domain reach certificate
    // provisioning on the load-balancer path.
    if config.use_lb && config.domain.is_empty() {
        errors.push(ValidationError {
            message: "use_lb requires a non-empty domain".to_string(),
        });
    }

    if !config.domain.is_empty() && !domain_re.is_match(&config.domain) {
        errors.push(ValidationError {
            message: format!("domain '{}' is not a valid hostname", config.domain),
        });
    }

    if let Some(user) = &config.initial_user {
        if !email_re.is_match(user) {
            errors.push(ValidationError {
                message: format!("initial_user '{}' is not a valid email address", user),
            });
        }
    }

    for (name, model_id) in &config.models {
        if model_id.is_empty() {
            errors.push(ValidationError {
                message: format!("model '{}' has an empty model id", name),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ProjectConfig {
        parse_config(yaml).unwrap()
    }

    #[test]
    fn test_parse_valid() {
        let config = parse("project_id: studio-prod\n");
        assert_eq!(config.project_id, "studio-prod");
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_empty_project_id() {
        let config = parse("project_id: \"\"\n");
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.message.contains("project_id")));
    }

    #[test]
    fn test_lb_requires_domain() {
        let config = parse("project_id: p\nuse_lb: true\n");
        let errors = validate_config(&config);
        assert!(errors
            .iter()
            .any(|e| e.message.contains("use_lb requires a non-empty domain")));
    }

    #[test]
    fn test_lb_with_domain_ok() {
        let config = parse("project_id: p\nuse_lb: true\ndomain: studio.example.com\n");
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_malformed_domain() {
        let config = parse("project_id: p\ndomain: \"not a domain\"\n");
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.message.contains("not a valid hostname")));
    }

    #[test]
    fn test_empty_domain_without_lb_is_fine() {
        let config = parse("project_id: p\nuse_lb: false\n");
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_bad_initial_user() {
        let config = parse("project_id: p\ninitial_user: not-an-email\n");
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.message.contains("initial_user")));
    }

    #[test]
    fn test_good_initial_user() {
        let config = parse("project_id: p\ninitial_user: alice@example.com\n");
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_service_name_rules() {
        let config = parse("project_id: p\nservice_name: Bad_Name\n");
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.message.contains("service_name")));

        let config = parse("project_id: p\nservice_name: this-name-is-far-too-long-ok\n");
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.message.contains("service_name")));
    }

    #[test]
    fn test_empty_region() {
        let config = parse("project_id: p\nregion: \"\"\n");
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.message.contains("region")));
    }

    #[test]
    fn test_empty_model_id() {
        let config = parse("project_id: p\nmodels:\n  image: \"\"\n");
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.message.contains("model 'image'")));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio.yaml");
        std::fs::write(&path, "project_id: file-test\n").unwrap();
        let config = parse_config_file(&path).unwrap();
        assert_eq!(config.project_id, "file-test");
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_config_file(Path::new("/nonexistent/studio.yaml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("failed to read"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_config("not: [valid: yaml: {{");
        assert!(result.is_err());
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let config = parse("project_id: \"\"\nuse_lb: true\ninitial_user: bogus\n");
        let errors = validate_config(&config);
        assert!(errors.len() >= 3);
    }
}
