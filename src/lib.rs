//! # SeqPair - Pairwise Alignment Viewer
//!
//! A terminal viewer for two aligned amino acid sequences using ratatui.
//! Rows wrap to the terminal width, residues are colored by chemical class
//! and the second sequence is only colored where it differs from the first.
//! Dragging over residues copies them to the clipboard.
//!
//! ## Architecture
//!
//! - `colors`: residue to color mapping
//! - `partition`: splitting the pair into synchronized rows
//! - `layout`: row capacity from the measured panel width
//! - `grid`: colored display lines with mismatch highlighting
//! - `selection`: mouse selection and selected text extraction
//! - `clipboard`: copy-on-select with asynchronous clipboard writes
//! - `model`: sequences, rows and application state
//! - `input` / `fasta`: reading and checking the two sequences
//! - `event`: keyboard and mouse handling
//! - `ui`: TUI rendering with ratatui
//! - `controller`: orchestration of the event loop
//! - `logging`: file-based diagnostics

pub mod clipboard;
pub mod colors;
pub mod controller;
pub mod event;
pub mod fasta;
pub mod grid;
pub mod input;
pub mod layout;
pub mod logging;
pub mod model;
pub mod partition;
pub mod selection;
pub mod ui;
