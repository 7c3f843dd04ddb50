//! Application generator: destination resolution, project skeleton and installation

use scaffold::actions::GeneratorOptions;
use scaffold::error::{ScaffoldError, StoreError};
use scaffold::harness::{create_generator, Sandbox};
use scaffold::install::InstallRequest;
use serde_json::json;
use std::path::PathBuf;

fn app_generator(sandbox: &Sandbox, args: &[&str], skip_install: bool) -> scaffold::harness::TestGenerator {
    create_generator(
        sandbox.path(),
        "scaffold:app",
        &[],
        args.iter().map(|a| a.to_string()).collect(),
        GeneratorOptions {
            skip_install,
            ..GeneratorOptions::default()
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_creates_project_in_new_directory() {
    let sandbox = Sandbox::temporary().unwrap();
    let mut generator = app_generator(&sandbox, &["my-app"], true);
    generator.mock_prompt(json!({}));

    generator.run().await.unwrap();

    assert_eq!(generator.prompter().asked(), vec!["dir"]);
    assert_eq!(
        sandbox.files(),
        vec![
            PathBuf::from("my-app/package.json"),
            PathBuf::from("my-app/rest/datasources.json"),
            PathBuf::from("my-app/rest/models.json"),
        ]
    );
    assert!(sandbox.join("my-app/models").is_dir());
    assert_eq!(sandbox.read_json("my-app/package.json").unwrap()["name"], "my-app");
    assert_eq!(
        sandbox.read_json("my-app/rest/datasources.json").unwrap()["db"],
        json!({ "name": "db", "connector": "memory" })
    );

    let ctx = generator.context().unwrap();
    assert_eq!(ctx.destination_root(), sandbox.join("my-app"));
    assert_eq!(ctx.created_files()[0], PathBuf::from("my-app/"));
}

#[tokio::test]
async fn test_destination_named_after_app_is_used_as_is() {
    let sandbox = Sandbox::temporary().unwrap();
    let root = sandbox.join("shop");
    std::fs::create_dir(&root).unwrap();

    let mut generator = create_generator(
        &root,
        "scaffold:app",
        &[],
        vec!["shop".to_string()],
        GeneratorOptions::default(),
    )
    .unwrap();
    generator.run().await.unwrap();

    assert!(generator.prompter().asked().is_empty(), "no directory prompt");
    assert!(root.join("package.json").is_file());
    assert!(!root.join("shop").exists(), "no nested directory");
}

#[tokio::test]
async fn test_dot_keeps_current_directory() {
    let sandbox = Sandbox::temporary().unwrap();
    let mut generator = app_generator(&sandbox, &["my-app"], true);
    generator.mock_prompt(json!({ "dir": "." }));

    generator.run().await.unwrap();

    assert!(sandbox.join("package.json").is_file());
    assert!(!sandbox.join("my-app").exists());
    assert_eq!(generator.context().unwrap().dir.as_deref(), Some("."));
}

#[tokio::test]
async fn test_prompts_for_name_when_missing() {
    let sandbox = Sandbox::temporary().unwrap();
    let mut generator = app_generator(&sandbox, &[], true);
    generator.mock_prompt(json!({ "appname": "inventory", "dir": "inv" }));

    generator.run().await.unwrap();

    assert_eq!(generator.prompter().asked(), vec!["appname", "dir"]);
    assert_eq!(sandbox.read_json("inv/package.json").unwrap()["name"], "inventory");
}

#[tokio::test]
async fn test_install_request_carries_skip_flag() {
    for skip_install in [true, false] {
        let sandbox = Sandbox::temporary().unwrap();
        let mut generator = app_generator(&sandbox, &["my-app"], skip_install);
        generator.run().await.unwrap();

        assert_eq!(
            generator.installer().requests(),
            vec![InstallRequest {
                project_dir: sandbox.join("my-app"),
                skip_install,
            }]
        );
        assert_eq!(generator.context().unwrap().skip_install(), skip_install);
    }
}

#[tokio::test]
async fn test_refuses_to_overwrite_existing_project() {
    let sandbox = Sandbox::temporary().unwrap();
    std::fs::create_dir(sandbox.join("my-app")).unwrap();
    std::fs::write(sandbox.join("my-app/package.json"), r#"{"name":"old"}"#).unwrap();

    let mut generator = app_generator(&sandbox, &["my-app"], true);
    let err = generator.run().await.unwrap_err();

    assert!(matches!(
        err,
        ScaffoldError::Store(StoreError::InvalidProject { .. })
    ));
    assert_eq!(sandbox.read_json("my-app/package.json").unwrap()["name"], "old");
    assert!(generator.installer().requests().is_empty());
}

#[tokio::test]
async fn test_invalid_app_name() {
    let sandbox = Sandbox::temporary().unwrap();
    let mut generator = app_generator(&sandbox, &["../escape"], true);

    let err = generator.run().await.unwrap_err();
    assert!(matches!(err, ScaffoldError::InvalidName(_)));
    assert!(sandbox.files().is_empty());
}
