//! The no-data-source entry is prepended to an order-preserving projection

use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use scaffold::actions::{
    Collaborators, GeneratorContext, GeneratorOptions, NO_DATA_SOURCE_LABEL,
};
use scaffold::generator::GeneratorRegistry;
use scaffold::harness::{create_dummy_project, Sandbox};
use scaffold::install::RecordingInstaller;
use scaffold::prompt::FixedAnswers;
use scaffold::workspace::JsonStoreFactory;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

fn connector() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["memory", "mysql", "mongodb", "rest"]).prop_map(String::from)
}

fn collaborators() -> Collaborators {
    Collaborators {
        prompter: Arc::new(FixedAnswers::default()),
        stores: Arc::new(JsonStoreFactory),
        installer: Arc::new(RecordingInstaller::new()),
        generators: Arc::new(GeneratorRegistry::new()),
    }
}

#[test]
fn test_null_item_prepended_to_projection() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut runner = TestRunner::new(Config {
        cases: 48,
        ..Config::default()
    });
    let entries = prop::collection::vec(("[a-z][a-zA-Z0-9]{0,8}", connector()), 0..8);

    runner
        .run(&entries, |entries| {
            let mut seen = HashSet::new();
            let entries: Vec<(String, String)> = entries
                .into_iter()
                .filter(|(name, _)| seen.insert(name.clone()))
                .collect();

            let sandbox = Sandbox::temporary().unwrap();
            rt.block_on(create_dummy_project(sandbox.path(), "test-app"))
                .unwrap();
            let mut datasources = Map::new();
            for (name, connector) in &entries {
                datasources.insert(name.clone(), json!({ "connector": connector }));
            }
            std::fs::write(
                sandbox.join("rest/datasources.json"),
                serde_json::to_string_pretty(&Value::Object(datasources)).unwrap(),
            )
            .unwrap();

            let mut ctx =
                GeneratorContext::new(sandbox.path(), GeneratorOptions::default(), collaborators());
            rt.block_on(ctx.load_project()).unwrap();
            rt.block_on(ctx.load_data_sources()).unwrap();
            ctx.add_null_data_source_item().unwrap();

            let choices = ctx.data_sources.clone().unwrap();
            prop_assert_eq!(choices.len(), entries.len() + 1);
            prop_assert_eq!(choices[0].name.as_str(), NO_DATA_SOURCE_LABEL);
            prop_assert!(choices[0].value.is_none());
            for (choice, (name, connector)) in choices[1..].iter().zip(&entries) {
                prop_assert_eq!(&choice.name, &format!("{} ({})", name, connector));
                prop_assert_eq!(choice.value.as_deref(), Some(name.as_str()));
                prop_assert_eq!(choice.connector.as_deref(), Some(connector.as_str()));
            }
            Ok(())
        })
        .unwrap();
}
