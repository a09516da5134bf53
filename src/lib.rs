//! The library code for `export-html`, which turns the ScalikeJDBC Cookbook
//! manuscript into a standalone HTML document for e-book packaging. The
//! pipeline is strictly linear:
//!
//! 1. Collect the markdown from input files or stdin ([`crate::input`])
//! 2. Render it to an HTML fragment ([`crate::markdown`])
//! 3. Mark top-level headings as chapters ([`crate::chapter`])
//! 4. Wrap the fragment in the document shell carrying the edition's
//!    metadata ([`crate::document`], [`crate::config`])
//!
//! [`crate::export`] ties the steps together and emits the document with a
//! single write, so a failed run leaves nothing on stdout.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod autolink;
pub mod chapter;
pub mod config;
pub mod document;
pub mod export;
pub mod input;
pub mod markdown;
