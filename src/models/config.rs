use serde::{Deserialize, Serialize};

/// Scores classified when none are given on the command line.
pub const SAMPLE_SCORES: [i32; 14] = [100, 99, 50, 80, 22, 33, 79, 56, 44, 69, 0, -1, 101, 999];

/// Driver settings from `grade-gate.yaml`
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    #[serde(rename = "Grade File", default = "default_grade_file")]
    pub grade_file: String,

    #[serde(rename = "Log Directory", default = "default_log_dir")]
    pub log_dir: String,

    #[serde(rename = "Log Prefix", default = "default_log_prefix")]
    pub log_prefix: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Console Output", default = "default_console_output")]
    pub console_output: bool,

    #[serde(rename = "Default Scores", default = "default_scores")]
    pub default_scores: Vec<i32>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            grade_file: default_grade_file(),
            log_dir: default_log_dir(),
            log_prefix: default_log_prefix(),
            debug_mode: false,
            console_output: default_console_output(),
            default_scores: default_scores(),
        }
    }
}

fn default_grade_file() -> String {
    "grade.ini".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "grade-gate".to_string()
}

fn default_console_output() -> bool {
    true
}

fn default_scores() -> Vec<i32> {
    SAMPLE_SCORES.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_settings_defaults() {
        let settings = RunSettings::default();
        assert_eq!(settings.grade_file, "grade.ini");
        assert_eq!(settings.log_dir, "logs");
        assert!(settings.console_output);
        assert!(!settings.debug_mode);
        assert_eq!(settings.default_scores.len(), 14);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "Grade File: \"custom.ini\"\nDebug Mode: true\n";
        let settings: RunSettings = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(settings.grade_file, "custom.ini");
        assert!(settings.debug_mode);
        assert_eq!(settings.log_prefix, "grade-gate");
        assert_eq!(settings.default_scores, SAMPLE_SCORES.to_vec());
    }
}
