pub mod ast;
pub mod compiler;
pub mod config;
pub mod transform;
pub mod visitors;
