//! CLI presentation: text and json formatters per command family.

mod generate;
mod listing;
mod shared;

pub use generate::format_created_files;
pub use listing::{format_data_source_list, format_model_list};
pub use shared::{format_config_toml, format_validate_result};
