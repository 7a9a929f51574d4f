//! Core library modules.
//!
//! ## Layout
//!
//! - **Discovery**: `release`, `build_id`, `bundle`, `locator`
//! - **Local state**: `installation`, `license`, `hosts`
//! - **Transfer and install**: `download`, `extract`, `mount`, `installer`, `process`
//! - **Workflow**: `update` chains all of the above
//! - **Infrastructure**: `config`, `data_storage`, `error`, `logger`, `messages`

pub mod build_id;
pub mod bundle;
pub mod config;
pub mod data_storage;
pub mod download;
pub mod error;
pub mod extract;
pub mod hosts;
pub mod installation;
pub mod installer;
pub mod license;
pub mod locator;
pub mod logger;
pub mod messages;
pub mod mount;
pub mod process;
pub mod release;
pub mod update;
