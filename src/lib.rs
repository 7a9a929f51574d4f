//! # lbi - latest build installer
//!
//! Finds the newest build of a release that publishes a given installer
//! bundle, compares it with the local installation and, when needed,
//! downloads, installs and configures it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lbi::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
