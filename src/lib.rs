//! Gator - a pluggable checker for the files and content of a project
//!
//! A host discovers "check" plugins from a compiled-in set and from
//! checker directories, dispatches command-line arguments to the chosen
//! plugin, and the plugin inspects a target file and writes a pass/fail
//! [`CheckResult`] into the [`Report`].

pub mod domain;
pub mod storage;
pub mod plugin;
pub mod checks;
pub mod cli;

pub use domain::{CheckResult, Report};
pub use plugin::{Checker, PluginSource};
