//! Integration tests exercising the public API end to end.

mod ingest;
mod simulation;
