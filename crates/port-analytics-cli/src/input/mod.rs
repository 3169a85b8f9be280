pub mod file;
pub mod portfolio;
pub mod stdin;
