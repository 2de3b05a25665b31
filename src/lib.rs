//! Core library for pkgdoc, providing the main API for extracting and
//! pretty-printing package documentation.
//!
//! A language toolchain parses a package and hands pkgdoc the result as a
//! package description document. This crate resolves symbol queries against
//! it and renders either full documentation or compact one-line summaries.
//! It is UI-agnostic and can be used by any frontend (CLI, language server,
//! test harness, etc.).

/// Documentation index: declarations grouped by kind and owning type.
pub mod docindex;

/// Error helpers for the library.
pub mod error;

/// Query execution: symbol resolution, visibility filtering, rendering.
pub mod query;

/// Native-syntax rendering of declarations and doc-comment text.
pub mod render;

/// Syntax-tree data model for the toolchain handoff.
pub mod syntax;

pub use crate::error::{Error, Result};
pub use crate::query::{Config, Package};
pub use crate::syntax::PackageInput;
