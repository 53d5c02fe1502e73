//! Core engine — apply fixture outcomes, then rank the table.

pub mod applier;
pub mod ranker;
pub mod simulation;
