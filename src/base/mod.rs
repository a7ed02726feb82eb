//! Foundation types for the doctree toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - File identifiers inside a [`SourceSet`]
//! - [`TextRange`], [`TextSize`] - Byte positions
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Span`], [`Location`], [`Ranges`] - The range pair carried by AST nodes
//! - [`Source`], [`SourceSet`] - Parse inputs
//!
//! This module has NO dependencies on other doctree modules.

mod file_id;
mod source;
mod span;

pub use file_id::FileId;
pub use source::{Source, SourceSet};
pub use span::{LineCol, LineIndex, Location, Ranges, Span, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
