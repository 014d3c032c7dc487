pub mod assist;
pub mod backend;
pub mod diagnostics;
pub mod document;
pub mod features;
pub mod models;
