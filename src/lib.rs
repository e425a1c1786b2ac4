//! # genome-tui - Terminal front-end for genomic predictions
//!
//! Collects a DNA sequence, a single-nucleotide variant or a chromosome
//! interval, validates it, sends it to a remote prediction service and
//! shows the shapes of the returned tensors, with a JSON export.
//!
//! ## Architecture
//!
//! The application follows an event-driven architecture with clear separation:
//! - `genome`: Organisms, tissues, output types, coordinates and queries
//! - `i18n`: Turkish and English message tables
//! - `validate`: Input checks run before any service call
//! - `request`: Query to service request, including the variant context window
//! - `client`: Prediction service adapter (HTTP) and its factory seam
//! - `outcome`: Analysis records and failures
//! - `present`: Display text and the downloadable JSON
//! - `fasta`: Sequence file loading
//! - `config`: Layered settings
//! - `model`: Session state and forms
//! - `event`: Keyboard event handling (Vim-style navigation)
//! - `ui`: TUI rendering with ratatui
//! - `controller`: Terminal loop and analysis orchestration

pub mod client;
pub mod config;
pub mod controller;
pub mod event;
pub mod fasta;
pub mod genome;
pub mod i18n;
pub mod model;
pub mod outcome;
pub mod present;
pub mod request;
pub mod ui;
pub mod validate;
