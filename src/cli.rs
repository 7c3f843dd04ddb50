//! CLI domain: parse, route, help, output, and presentation only.
//! Generator orchestration stays in `actions`; the route table maps commands onto it.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, generator_invocation};
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_config_toml, format_created_files, format_data_source_list, format_model_list,
    format_validate_result,
};
pub use route::RunContext;
