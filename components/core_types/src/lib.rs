//! Shared source-location and diagnostic types.
//!
//! This crate provides the foundational types used by the ECMAScript front end
//! and its command-line driver.
//!
//! # Overview
//!
//! - [`SourcePosition`] - Line, column and byte offset of a point in source
//! - [`SourceLocation`] - A start/end region, serialized as an ESTree `loc`
//! - [`ErrorCategory`] - Taxonomy of front-end diagnostics
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorCategory, SourcePosition};
//!
//! let pos = SourcePosition::new(1, 0, 0);
//! assert_eq!(pos, SourcePosition::origin());
//! assert_eq!(ErrorCategory::Module.as_str(), "module");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::ErrorCategory;
pub use source::{SourceLocation, SourcePosition};
