//! Backend worker: a dedicated thread owning the tokio runtime and the search dispatcher.

pub mod commands;
pub mod runtime;
