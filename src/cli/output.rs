//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ScaffoldError, StoreError};

/// Map domain/service errors to a single line for CLI output.
pub fn map_error(e: &ScaffoldError) -> String {
    match e {
        ScaffoldError::Store(StoreError::InvalidProject { .. }) => {
            format!("{} (run `scaffold app` to create a project)", e)
        }
        _ => e.to_string(),
    }
}
