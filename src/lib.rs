//! Async adapter around the `kubectl` command-line tool.
//!
//! Every call spawns `kubectl` once with the connection flags of the shared
//! [`Config`], waits for it to exit and returns its output. Anything written
//! to stderr is reported as an [`AppError`].

pub mod args;
pub mod config;
pub mod error;
pub mod kubectl;
pub mod model;
pub mod runner;
mod utils;

pub use config::Config;
pub use error::AppError;
pub use kubectl::{Handle, Kubectl};
pub use model::{Node, Pod, ReplicationController, ResourceKind, Selector, Service};
