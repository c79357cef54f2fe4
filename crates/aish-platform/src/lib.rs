//! Capability seams for aish.
//!
//! The interpreter depends on two external engines it does not implement: a
//! program-execution engine and an AI chat backend. This crate defines the
//! async traits for both, plus offline stand-ins for hosts (and tests) that
//! run without the real engines attached.

mod offline;
mod services;

pub use offline::{CannedChat, StubRunner};
pub use services::{ChatClient, ChatContext, ProgramRunner, RunOutcome};
