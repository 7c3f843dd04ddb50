//! Property-based tests for generator invariants

mod data_source_projection;
mod model_files;
