#![doc = "trello-docs-core: core logic library for trello-docs."]

//! This crate turns Trello lists into a single searchable, printable HTML
//! document. It contains the API client, the markdown formatter, the document
//! assembler, the configuration model and the generation pipeline.
//!
//! # Usage
//! Build a [`config::GeneratorConfig`], pick a [`contract::BoardSource`]
//! (normally [`client::TrelloClient`]) and call [`generate::generate`].

pub mod assemble;
pub mod attachments;
pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod format;
pub mod generate;
pub mod model;
pub mod template;

pub use error::{DocsError, Result};
