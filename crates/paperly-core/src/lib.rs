//! paperly-core — Question generation, paper merging, and practice scoring.
//!
//! This crate holds the data model and the three engines the rest of
//! paperly is built around: the generator, the merger, and the practice
//! session. Everything here is synchronous and free of I/O except the
//! params-file parser and the [`traits::PaperStore`] seam.

pub mod doubt;
pub mod draft;
pub mod edit;
pub mod error;
pub mod generator;
pub mod merge;
pub mod model;
pub mod parser;
pub mod practice;
pub mod traits;

pub use generator::generate;
pub use merge::merge;
pub use practice::PracticeSession;
