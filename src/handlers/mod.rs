//! Ready-made handlers.

pub mod static_files;
