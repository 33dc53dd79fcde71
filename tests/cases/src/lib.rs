//! # Election test cases
//!
//! Whole-cluster scenarios for the Bully and Ring election
//! algorithms, run in-process over the in-proc transport.

#[macro_use]
extern crate log;

pub mod cases;
mod steps;
