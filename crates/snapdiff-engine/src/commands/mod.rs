//! Engine commands

pub mod capture;
pub mod compare;
pub mod engine_command;
pub mod engine_query;
