//! Main module for skein parsing functionality

pub mod classify;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod flavor;
pub mod indentation;
pub mod lines;
pub mod lints;
pub mod parsing;
pub mod range;
pub mod source;
pub mod token;
pub mod tree;
pub mod typing;
pub mod value;
