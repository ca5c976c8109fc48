//! # Mailcraft HTML Compiler
//!
//! Turns a component tree plus canvas settings into one self-contained HTML
//! document that survives legacy mail clients: table layout, inline styles,
//! no stylesheets.

mod compiler;
mod context;
mod inline;

pub use compiler::{compile_html, compile_template, compile_with_options};
pub use context::CompileOptions;
pub use inline::{escape_html, inline_style};

#[cfg(test)]
mod tests;
