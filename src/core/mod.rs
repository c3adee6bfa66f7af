//! Core routing logic: types, classification, language selection,
//! rendering dispatch, output, configuration, and the pipeline.

pub mod classifier;
pub mod codegen;
pub mod config;
pub mod error;
pub mod lang_select;
pub mod output;
pub mod pipeline;
pub mod slug;
pub mod types;
