//! Resource definitions, grouped by API version.
//!
//! ```text
//! resources/
//!   mod.rs    <- this file (re-exports the current version)
//!   v4/       <- GitLab REST API v4
//! ```
//!
//! The current version is re-exported here:
//!
//! ```rust
//! use gitlab_api::rest::resources::{Project, ProjectManager};
//! // Equivalent:
//! use gitlab_api::rest::resources::v4::{Project as V4Project, ProjectManager as V4ProjectManager};
//! ```

pub mod v4;

pub use v4::*;
