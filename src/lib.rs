pub mod answers;
pub mod api;
pub mod archive;
pub mod backend;
pub mod checkbox;
pub mod config;
pub mod document;
pub mod export;
pub mod form;
pub mod record;
pub mod store;

#[cfg(test)]
mod tests;
