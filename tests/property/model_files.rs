//! Model creation writes exactly one definition file and one registry entry

use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use scaffold::actions::GeneratorOptions;
use scaffold::harness::{create_dummy_project, create_generator, Sandbox};
use scaffold::workspace::BUILTIN_MODELS;
use serde_json::json;
use std::collections::BTreeSet;

fn model_name() -> impl Strategy<Value = String> {
    "[A-Za-z_$][A-Za-z0-9_$]{0,15}"
        .prop_filter("builtin model", |name| {
            !BUILTIN_MODELS
                .iter()
                .any(|(builtin, _)| builtin.eq_ignore_ascii_case(name))
        })
}

/// For any valid name N: `models/<lowercase N>.json` holds `name == N` and no
/// `public`, and the registry gains exactly `N` with every prior entry untouched.
#[test]
fn test_model_creation_property() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut runner = TestRunner::new(Config {
        cases: 32,
        ..Config::default()
    });

    runner
        .run(&(model_name(), any::<bool>()), |(name, public)| {
            let sandbox = Sandbox::temporary().unwrap();
            rt.block_on(create_dummy_project(sandbox.path(), "test-app"))
                .unwrap();
            let before = sandbox.read_models_json(Some("rest")).unwrap();

            let mut generator = create_generator(
                sandbox.path(),
                "scaffold:model",
                &["scaffold:property"],
                vec![name.clone()],
                GeneratorOptions::default(),
            )
            .unwrap();
            generator.mock_prompt(json!({
                "dataSource": "db",
                "public": public,
                "propertyName": ""
            }));
            rt.block_on(generator.run()).unwrap();

            let definition = sandbox
                .read_json(format!("models/{}.json", name.to_lowercase()))
                .unwrap();
            prop_assert_eq!(&definition["name"], &json!(name));
            prop_assert!(definition.get("public").is_none());

            let after = sandbox.read_models_json(Some("rest")).unwrap();
            let before_keys: BTreeSet<&String> = before.keys().collect();
            let mut expected = before_keys.clone();
            expected.insert(&name);
            prop_assert_eq!(after.keys().collect::<BTreeSet<_>>(), expected);
            for key in before_keys {
                prop_assert_eq!(&after[key], &before[key]);
            }
            prop_assert_eq!(
                &after[&name],
                &json!({ "dataSource": "db", "public": public })
            );
            Ok(())
        })
        .unwrap();
}
