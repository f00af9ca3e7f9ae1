pub mod file;
pub mod tokens;
