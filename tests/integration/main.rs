//! End-to-end tests: library pipeline and the `mutagen` binary.

mod cli;
mod scenarios;
