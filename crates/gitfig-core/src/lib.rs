#![forbid(unsafe_code)]

//! Configuration and scenario model for `gitfig`.
//!
//! The diagram pipeline is `DiagramConfig` → [`CloneScenario`] → layout → SVG.
//! This crate owns the first two stages: loading the JSON configuration file and
//! expanding it into the concrete, fully-synthesized scenario the layout pass
//! consumes (titles, command lines, branch lists, seeded commit records).

pub mod config;
pub mod error;
pub mod scenario;

pub use config::{DiagramConfig, ThirdRepoConfig};
pub use error::{Error, Result};
pub use scenario::{CloneScenario, CommitRecord, FileRow, RepoContents, DEFAULT_SEED};
