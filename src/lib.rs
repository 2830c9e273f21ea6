// SPDX-License-Identifier: MIT

//! A line- and character-level text diff engine.
//!
//! The main entry point is [`diff::compute_diff`], which takes two documents
//! as arrays of lines plus a [`diff::DiffOptions`] and produces a
//! [`diff::LinesDiff`]: a list of change mappings with character-granular
//! inner changes, an optional list of moved blocks, and a flag indicating
//! whether the computation ran into its wall-clock budget.

pub mod diff;
pub mod utils;
