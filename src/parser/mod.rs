//! Low-level parsing infrastructure.
//!
//! This module provides the byte parser underneath the extended Newick
//! reader in [crate::newick], its error type and label escaping helpers.

pub mod byte_parser;
pub mod parsing_error;
pub mod utils;

pub use parsing_error::{ParsingError, ParsingErrorType};
