//! Output formatters for duplicate scan results.
//!
//! This module provides different output formats for scan results:
//! - Text for people (colored tree per group, totals, verification footer)
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::duplicates::DuplicateFinder;
//! use dupefinder::output::{ReportStyle, TextReport};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! let report = TextReport::new(&groups, &summary, ReportStyle::plain());
//! report.write_to(&mut std::io::stdout().lock()).unwrap();
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::JsonOutput;
pub use text::{format_size, ReportStyle, TextReport};
