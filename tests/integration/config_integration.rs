//! Integration tests for Configuration System

use crate::integration::test_utils::with_isolated_config;
use scaffold::cli::RunContext;
use scaffold::config::{global_config_path, ConfigLoader, ValidationError};
use scaffold::error::ScaffoldError;
use tempfile::TempDir;

#[cfg(target_os = "linux")]
#[test]
fn test_layer_precedence() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_config(&test_dir, || {
        let global = global_config_path().unwrap();
        assert!(global.starts_with(test_dir.path()));
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(
            &global,
            r#"
[generator]
component = "global-component"
package_manager = "yarn"

[logging]
level = "info"
"#,
        )
        .unwrap();

        let ws = test_dir.path().join("ws");
        std::fs::create_dir_all(ws.join(".scaffold")).unwrap();
        std::fs::write(
            ws.join(".scaffold/config.toml"),
            "[generator]\ncomponent = \"server\"\n",
        )
        .unwrap();
        std::fs::write(
            ws.join(".scaffold/staging.toml"),
            "[logging]\nlevel = \"error\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(&ws).unwrap();
        assert_eq!(config.generator.component, "server");
        assert_eq!(config.generator.package_manager, "yarn");
        assert_eq!(config.logging.level, "info", "staging overlay not selected");

        std::env::set_var("SCAFFOLD_ENV", "staging");
        let config = ConfigLoader::load(&ws).unwrap();
        assert_eq!(config.logging.level, "error");
    });
}

#[test]
fn test_invalid_configuration_is_rejected_by_run_context() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_config(&test_dir, || {
        let config_file = test_dir.path().join("bad.toml");
        std::fs::write(
            &config_file,
            "[generator]\ncomponent = \"a/b\"\n\n[logging]\nformat = \"xml\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&config_file).unwrap();
        let errors = config.validate().unwrap_err();
        assert!(matches!(errors[0], ValidationError::Generator(_)));
        assert!(matches!(errors[1], ValidationError::Logging(_)));

        let result = RunContext::new(test_dir.path().to_path_buf(), Some(config_file));
        match result {
            Err(ScaffoldError::ConfigError(msg)) => {
                assert!(msg.contains("Configuration validation failed"));
                assert!(msg.contains("xml"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("invalid configuration accepted"),
        }
    });
}

#[test]
fn test_malformed_file_is_a_config_error() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_config(&test_dir, || {
        let config_file = test_dir.path().join("broken.toml");
        std::fs::write(&config_file, "[generator\ncomponent = ").unwrap();
        assert!(matches!(
            ConfigLoader::load_from_file(&config_file),
            Err(ScaffoldError::ConfigError(_))
        ));
    });
}
