//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# spec-lint configuration

# Built-in rule set used when no --rules file is given: "recommended" or "basic"
preset = "recommended"

# Lowest severity that makes `spec-lint check` exit with status 1
fail_on = "error"

[engine]
# Size assumed for text with mixed font sizes
mixed_font_size = 14.0
# Minimum enforced by font-size rules that give no bounds
default_min_font_size = 12.0
# Text at or above this size counts as a heading
heading_min_font_size = 18.0
# Default layer name that does not count as an image description
placeholder_image_name = "Rectangle"

[engine.label_proximity]
horizontal = 200.0
vertical = 100.0

[engine.alt_text_proximity]
horizontal = 100.0
vertical = 100.0

# Rule configurations, keyed by rule id
# Each rule can be enabled/disabled and have its severity overridden

[rules.btn-alignment]
enabled = false

# [rules.duplicate-cta]
# severity = "error"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("spec-lint.toml");
    write_config(config_path, force)?;

    println!("Created spec-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit spec-lint.toml to configure rules");
    println!("  2. Run: spec-lint check <document.json>");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spec_lint_core::{Config, Severity};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(config.fail_on(), Severity::Error);
        assert!(!config.is_rule_enabled("btn-alignment"));
        assert!(config.is_rule_enabled("duplicate-cta"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("spec-lint.toml");
        std::fs::write(&path, "fail_on = \"warning\"").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "fail_on = \"warning\""
        );

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
