//! Ortholog lookup against FungiDB for fungal genomes.
//!
//! Start from [`service::OrthologService`] with a
//! [`client::FungidbHttpClient`]; the CLI and the REST API in [`api`] are
//! thin wrappers around it.

pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod fasta;
pub mod genomes;
pub mod organism;
pub mod output;
pub mod service;
pub mod table;
