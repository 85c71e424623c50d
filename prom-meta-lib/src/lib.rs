#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for prom-meta
//!
//! This library retrieves the metric metadata published by a Prometheus server and
//! renders it in one of several output formats.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface, configuration, and orchestration
//! - [`metadata`]: Metadata model and the HTTP fetcher
//! - [`reports`]: Format dispatch and the renderers

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

mod commands;
pub mod metadata;
pub mod reports;

pub use crate::commands::{Config, Host, run};
