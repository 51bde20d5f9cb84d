//! Document model types for reformatting.
//!
//! This module defines the intermediate representation that bridges
//! scanning and rendering. Scanners produce [`Block`]s, the classifier
//! assigns each a [`Role`], and the aggregator groups them into a
//! [`Document`] of [`Section`]s. Dialogue transcripts use
//! [`DialogueTurn`] instead.

mod block;
mod dialogue;
mod document;

pub use block::{Block, BlockHints, FontSize, Role, SourceKind};
pub use dialogue::{DialogueTurn, KeyInfo, TurnRole};
pub use document::{Document, Metadata, Section, SectionEntry};
