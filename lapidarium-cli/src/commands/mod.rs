//! CLI subcommands.

pub mod common;
pub mod count;
pub mod layers;
pub mod select;
