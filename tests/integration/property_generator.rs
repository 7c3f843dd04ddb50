//! Property generator, standalone and composed by the model generator

use scaffold::actions::GeneratorOptions;
use scaffold::error::{ScaffoldError, StoreError};
use scaffold::harness::{create_dummy_project, create_generator, Sandbox};
use scaffold::prompt::FixedAnswers;
use serde_json::{json, Map, Value};

async fn project_with_product() -> Sandbox {
    let sandbox = Sandbox::temporary().unwrap();
    create_dummy_project(sandbox.path(), "test-app").await.unwrap();
    let mut model = create_generator(
        sandbox.path(),
        "scaffold:model",
        &["scaffold:property"],
        vec!["Product".to_string()],
        GeneratorOptions::default(),
    )
    .unwrap();
    model.mock_prompt(json!({ "dataSource": "db" }));
    model.run().await.unwrap();
    sandbox
}

fn answers(fixed: Value) -> Map<String, Value> {
    fixed.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_adds_properties_until_empty_name() {
    let sandbox = project_with_product().await;
    let mut generator = create_generator(
        sandbox.path(),
        "scaffold:property",
        &[],
        vec!["Product".to_string()],
        GeneratorOptions::default(),
    )
    .unwrap();
    generator.with_prompter(
        FixedAnswers::new(answers(json!({})))
            .with_sequence("propertyName", vec![json!("name"), json!(" price "), json!("")])
            .with_sequence("propertyType", vec![json!("string"), json!("number")])
            .with_sequence("required", vec![json!(true), json!(false)]),
    );

    generator.run().await.unwrap();

    let product = sandbox.read_json("models/product.json").unwrap();
    assert_eq!(
        product["properties"],
        json!({
            "name": { "type": "string", "required": true },
            "price": { "type": "number" }
        })
    );
    let keys: Vec<&String> = product["properties"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["name", "price"]);
}

#[tokio::test]
async fn test_selects_model_when_not_given() {
    let sandbox = project_with_product().await;
    let mut generator = create_generator(
        sandbox.path(),
        "scaffold:property",
        &[],
        Vec::new(),
        GeneratorOptions::default(),
    )
    .unwrap();
    generator.with_prompter(
        FixedAnswers::new(answers(json!({ "model": "Product", "propertyType": "boolean" })))
            .with_sequence("propertyName", vec![json!("active")]),
    );

    generator.run().await.unwrap();

    assert_eq!(generator.prompter().asked()[0], "model");
    let product = sandbox.read_json("models/product.json").unwrap();
    assert_eq!(product["properties"]["active"]["type"], "boolean");
}

#[tokio::test]
async fn test_adds_property_to_builtin_model() {
    let sandbox = Sandbox::temporary().unwrap();
    create_dummy_project(sandbox.path(), "test-app").await.unwrap();
    let mut generator = create_generator(
        sandbox.path(),
        "scaffold:property",
        &[],
        Vec::new(),
        GeneratorOptions::default(),
    )
    .unwrap();
    generator.with_prompter(
        FixedAnswers::new(answers(json!({})))
            .with_sequence("propertyName", vec![json!("email"), json!("")]),
    );

    generator.run().await.unwrap();

    assert_eq!(
        generator.prompter().asked(),
        vec!["model", "propertyName", "propertyType", "required", "propertyName"]
    );
    let user = sandbox.read_json("models/user.json").unwrap();
    assert_eq!(user["name"], "User");
    assert_eq!(user["properties"]["email"], json!({ "type": "string" }));
}

#[tokio::test]
async fn test_unknown_model_fails() {
    let sandbox = project_with_product().await;
    let mut generator = create_generator(
        sandbox.path(),
        "scaffold:property",
        &[],
        vec!["Missing".to_string()],
        GeneratorOptions::default(),
    )
    .unwrap();
    generator.with_prompter(
        FixedAnswers::new(answers(json!({}))).with_sequence("propertyName", vec![json!("x")]),
    );

    let err = generator.run().await.unwrap_err();
    assert!(matches!(
        err,
        ScaffoldError::Store(StoreError::ModelNotFound(ref m)) if m == "Missing"
    ));
}

#[tokio::test]
async fn test_invalid_property_name() {
    let sandbox = project_with_product().await;
    let mut generator = create_generator(
        sandbox.path(),
        "scaffold:property",
        &[],
        vec!["Product".to_string()],
        GeneratorOptions::default(),
    )
    .unwrap();
    generator.mock_prompt(json!({ "propertyName": "1st" }));

    let err = generator.run().await.unwrap_err();
    assert!(matches!(err, ScaffoldError::InvalidName(_)));
}
