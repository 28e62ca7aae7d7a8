//! Operator console for the billing service.
//!
//! # Overview
//! The binary is a thin shell around `billing_core`: `cli` parses arguments
//! and wires configuration, logging and the ureq transport together;
//! `session` owns one instance of every screen and maps each action to a
//! single screen call; `shell` reads actions line by line so screen state
//! survives between them.

pub mod cli;
pub mod session;
pub mod shell;
pub mod transport;
