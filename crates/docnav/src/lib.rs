//! Read, write and delete values in JSON documents by path.
//!
//! The navigation itself lives in [`docnav_path`]. This crate adds what the
//! `docnav` binary needs around it: document loading and rendering, value
//! argument parsing and script-driven batch writes.

pub mod cli;

pub use docnav_path as path;
