#![allow(clippy::new_without_default)]

pub mod controller;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod orchestrator;
pub mod runtime;
pub mod util;
pub mod webapi;

pub use dashboard::Dashboard;
