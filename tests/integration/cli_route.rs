//! RunContext dispatch with scripted collaborators

use crate::integration::test_utils::{scripted, with_isolated_config};
use scaffold::actions::GeneratorOptions;
use scaffold::cli::{Commands, RunContext};
use scaffold::error::ScaffoldError;
use serde_json::{json, Value};
use tempfile::TempDir;

fn new_project(test_dir: &TempDir) -> std::path::PathBuf {
    let ws = test_dir.path().join("shop");
    std::fs::create_dir_all(&ws).unwrap();
    let ctx = RunContext::new(ws.clone(), None).unwrap();
    let (collaborators, _, _) = scripted(json!({}));
    ctx.execute_with(&Commands::App { name: Some("shop".to_string()) }, collaborators)
        .unwrap();
    ws
}

#[test]
fn test_app_then_model_then_listing() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_config(&test_dir, || {
        let ws = new_project(&test_dir);
        let ctx = RunContext::new(ws.clone(), None)
            .unwrap()
            .with_options(GeneratorOptions {
                skip_install: true,
                ..GeneratorOptions::default()
            });

        let (collaborators, _, installer) = scripted(json!({ "dataSource": "db" }));
        let output = ctx
            .execute_with(
                &Commands::Model {
                    name: Some("Product".to_string()),
                },
                collaborators,
            )
            .unwrap();
        assert!(output.contains("create"));
        assert!(output.contains("models/product.json"));
        assert!(installer.requests().is_empty(), "model runs never install");

        let (collaborators, _, _) = scripted(json!({}));
        let listing = ctx
            .execute_with(
                &Commands::Models {
                    format: "json".to_string(),
                },
                collaborators,
            )
            .unwrap();
        let parsed: Value = serde_json::from_str(&listing).unwrap();
        assert_eq!(parsed["total"], 6);
        assert_eq!(parsed["models"][5]["name"], "Product");

        let (collaborators, _, _) = scripted(json!({}));
        let table = ctx
            .execute_with(
                &Commands::Datasources {
                    format: "text".to_string(),
                },
                collaborators,
            )
            .unwrap();
        assert!(table.contains("memory"));
        assert!(table.ends_with("Total: 1 data source(s)"));
    });
}

#[test]
fn test_configured_skip_install_applies_to_app() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_config(&test_dir, || {
        let ws = test_dir.path().join("app");
        std::fs::create_dir_all(ws.join(".scaffold")).unwrap();
        std::fs::write(
            ws.join(".scaffold/config.toml"),
            "[generator]\nskip_install = true\n",
        )
        .unwrap();

        let ctx = RunContext::new(ws.clone(), None)
            .unwrap()
            .with_options(GeneratorOptions::default());
        assert!(ctx.options().skip_install);

        let (collaborators, _, installer) = scripted(json!({}));
        ctx.execute_with(&Commands::App { name: Some("app".to_string()) }, collaborators)
            .unwrap();
        assert_eq!(installer.requests().len(), 1);
        assert_eq!(installer.installs(), 0);
    });
}

#[test]
fn test_validate_reports_invalid_directory() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_config(&test_dir, || {
        let ctx = RunContext::new(test_dir.path().to_path_buf(), None).unwrap();
        let (collaborators, _, _) = scripted(json!({}));
        let err = ctx.execute_with(&Commands::Validate, collaborators).unwrap_err();
        assert!(matches!(err, ScaffoldError::Store(_)));
        assert!(scaffold::cli::map_error(&err).contains("scaffold app"));
    });
}

#[test]
fn test_validate_accepts_generated_project() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_config(&test_dir, || {
        let ws = new_project(&test_dir);
        let ctx = RunContext::new(ws, None).unwrap();
        let (collaborators, _, _) = scripted(json!({}));
        let output = ctx.execute_with(&Commands::Validate, collaborators).unwrap();
        assert!(output.contains("valid project"));
        assert!(output.contains("rest"));
    });
}

#[test]
fn test_custom_component_is_used_by_generators_and_listing() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_config(&test_dir, || {
        let ws = test_dir.path().join("api");
        std::fs::create_dir_all(&ws).unwrap();
        let config_file = test_dir.path().join("scaffold.toml");
        std::fs::write(&config_file, "[generator]\ncomponent = \"server\"\n").unwrap();

        let ctx = RunContext::new(ws.clone(), Some(config_file)).unwrap();
        let (collaborators, _, _) = scripted(json!({}));
        ctx.execute_with(&Commands::App { name: Some("api".to_string()) }, collaborators)
            .unwrap();
        assert!(ws.join("server/models.json").is_file());
        assert!(!ws.join("rest").exists());

        let (collaborators, _, _) = scripted(json!({ "connector": "rest" }));
        ctx.execute_with(
            &Commands::Datasource {
                name: Some("remote".to_string()),
            },
            collaborators,
        )
        .unwrap();
        let datasources: Value =
            serde_json::from_str(&std::fs::read_to_string(ws.join("server/datasources.json")).unwrap())
                .unwrap();
        assert_eq!(datasources["remote"]["connector"], "rest");
    });
}

#[test]
fn test_config_command_prints_toml() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_config(&test_dir, || {
        let ctx = RunContext::new(test_dir.path().to_path_buf(), None).unwrap();
        let (collaborators, _, _) = scripted(json!({}));
        let output = ctx.execute_with(&Commands::Config, collaborators).unwrap();
        assert!(output.contains("package_manager = \"npm\""));
        assert!(output.contains("[logging]"));
    });
}
