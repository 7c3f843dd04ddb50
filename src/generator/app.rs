//! `scaffold:app` - create a new project skeleton.

use super::{validate_app_name, Generator, APP};
use crate::actions::GeneratorContext;
use crate::error::ScaffoldError;
use crate::prompt::Question;
use async_trait::async_trait;
use tracing::info;

pub struct AppGenerator {
    name: Option<String>,
}

impl AppGenerator {
    /// `args[0]`, when present, is the application name
    pub fn new(args: Vec<String>) -> Self {
        Self {
            name: args.into_iter().next(),
        }
    }
}

#[async_trait]
impl Generator for AppGenerator {
    fn name(&self) -> &'static str {
        APP
    }

    async fn run(&mut self, ctx: &mut GeneratorContext) -> Result<(), ScaffoldError> {
        let app_name = match self.name.take() {
            Some(name) => name,
            None => {
                let question = Question::input("appname", "What's the name of your application?")
                    .with_default(ctx.app_name.clone());
                let answers = ctx.prompt(std::slice::from_ref(&question)).await?;
                answers.str("appname").unwrap_or_default().to_string()
            }
        };
        validate_app_name(&app_name)?;
        ctx.app_name = app_name;

        ctx.configure_destination_dir().await?;
        ctx.init_workspace();

        let written = ctx.store()?.create_project(&ctx.app_name).await?;
        for path in written {
            ctx.record_created(path);
        }
        ctx.save_project().await?;

        ctx.install_deps().await?;
        info!(app = %ctx.app_name, root = %ctx.destination_root().display(), "Project created");
        Ok(())
    }
}
