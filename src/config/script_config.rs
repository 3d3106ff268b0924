use crate::core::session::Command;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEMO_SCRIPT: &str = include_str!("../../demos/hospital_demo.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub session: SessionConfig,
    #[serde(default)]
    pub steps: Vec<Command>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub name: String,
    pub description: Option<String>,
}

impl ScriptConfig {
    /// 從 TOML 檔案載入腳本
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析腳本
    ///
    /// Every `${NAME}` in the text, comments included, is replaced with the environment
    /// variable `NAME`; an unset variable fails with `ConfigError`. Write `$${NAME}` to keep
    /// a literal `${NAME}`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// The bundled hospital walkthrough.
    pub fn demo() -> Result<Self> {
        Self::from_toml_str(DEMO_SCRIPT)
    }

    /// 替換環境變數 (例如 ${WARD_DOCTOR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$(\$?)\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            RegistryError::ConfigError {
                message: format!("Invalid substitution pattern: {}", e),
            }
        })?;

        let mut missing = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[2];
            if !caps[1].is_empty() {
                return format!("${{{}}}", var_name);
            }
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    missing.push(var_name.to_string());
                    caps[0].to_string()
                }
            }
        });

        if !missing.is_empty() {
            return Err(RegistryError::ConfigError {
                message: format!("Undefined environment variables: {}", missing.join(", ")),
            });
        }

        Ok(result.into_owned())
    }

    pub fn mutation_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_mutation()).count()
    }
}

impl Validate for ScriptConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("session.name", &self.session.name)?;
        validate_positive_number("steps", self.steps.len(), 1)?;

        for (i, step) in self.steps.iter().enumerate() {
            let field = |name: &str| format!("steps[{}].{}", i, name);
            match step {
                Command::AddPatient { name, doctor, .. } => {
                    validate_non_empty_string(&field("name"), name)?;
                    validate_non_empty_string(&field("doctor"), doctor)?;
                }
                Command::RemovePatient { name } | Command::ShowPatient { name } => {
                    validate_non_empty_string(&field("name"), name)?;
                }
                Command::AddMember {
                    patient, member, ..
                }
                | Command::RemoveMember { patient, member } => {
                    validate_non_empty_string(&field("patient"), patient)?;
                    validate_non_empty_string(&field("member"), member)?;
                }
                Command::ShowDoctor { doctor } => {
                    validate_non_empty_string(&field("doctor"), doctor)?;
                }
                Command::ListAll | Command::ShowYear { .. } | Command::Echo { .. } => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let toml_content = r#"
[session]
name = "ward-check"

[[steps]]
op = "add_patient"
name = "Michael Johnson"
doctor = "Emma Thompson"
day = 19
month = 12
year = 2022

[[steps]]
op = "show_year"
year = 2022
"#;

        let config = ScriptConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.session.name, "ward-check");
        assert!(config.session.description.is_none());
        assert_eq!(config.steps.len(), 2);
        assert_eq!(config.mutation_count(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_script_fails_validation() {
        let config = ScriptConfig::from_toml_str("[session]\nname = \"nothing\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_names_fail_validation() {
        let toml_content = r#"
[session]
name = "blank"

[[steps]]
op = "remove_member"
patient = "Mason Moore"
member = "  "
"#;
        let config = ScriptConfig::from_toml_str(toml_content).unwrap();
        match config.validate() {
            Err(RegistryError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "steps[0].member")
            }
            other => panic!("unexpected validation result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_op_is_a_parse_error() {
        let toml_content = r#"
[session]
name = "bad"

[[steps]]
op = "discharge"
name = "Ethan Lee"
"#;
        assert!(matches!(
            ScriptConfig::from_toml_str(toml_content),
            Err(RegistryError::ScriptParseError(_))
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PATIENT_REGISTRY_TEST_DOCTOR", "Lucas Lewis");
        let toml_content = r#"
[session]
name = "env"

[[steps]]
op = "show_doctor"
doctor = "${PATIENT_REGISTRY_TEST_DOCTOR}"
"#;
        let config = ScriptConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.steps[0],
            Command::ShowDoctor {
                doctor: "Lucas Lewis".to_string()
            }
        );

        let missing = "[session]\nname = \"${PATIENT_REGISTRY_TEST_UNSET_VAR}\"\n";
        assert!(matches!(
            ScriptConfig::from_toml_str(missing),
            Err(RegistryError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_escaped_placeholder_is_kept_literally() {
        let toml_content = r#"
[session]
name = "billing"

[[steps]]
op = "add_member"
patient = "Ethan Lee"
member = "Megan Price"
role = "Billing $${PATIENT_REGISTRY_TEST_CODE_UNSET}"
"#;
        let config = ScriptConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.steps[0],
            Command::AddMember {
                patient: "Ethan Lee".to_string(),
                member: "Megan Price".to_string(),
                role: "Billing ${PATIENT_REGISTRY_TEST_CODE_UNSET}".to_string(),
            }
        );

        let unescaped = toml_content.replace("$${", "${");
        assert!(matches!(
            ScriptConfig::from_toml_str(&unescaped),
            Err(RegistryError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_demo_script_is_valid() {
        let config = ScriptConfig::demo().unwrap();
        assert_eq!(config.session.name, "hospital-demo");
        assert!(config.validate().is_ok());
    }
}
