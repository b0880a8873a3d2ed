//! Kmap - knowledge-map dependency graph extraction.
//!
//! This crate provides both a CLI application and a library for turning a
//! store of concept nodes and their prerequisite edges into a Graphviz DOT
//! description, either of the whole map or of a bounded neighborhood around
//! a key node.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod domain;
pub mod dot;
pub mod error;
pub mod extract;
pub mod store;

// Public CLI module (needed by binary)
pub mod cli;

pub mod config;
pub mod output;

pub use error::{Error, Result};
