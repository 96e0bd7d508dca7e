#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dependencies used by main.rs
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing as _;

pub mod logging;
pub mod parser;

pub use logging::init_tracing;
pub use parser::{Cli, OPTS_ENV};
