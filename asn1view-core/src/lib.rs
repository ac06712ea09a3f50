//! Core types for the asn1view TLV structure decoder
//!
//! This crate provides the decoded-tree data model, the result DTO and
//! error handling used throughout the asn1view workspace.

pub mod error;
pub mod node;
pub mod result;

pub use error::{Asn1Result, DecodeError};
pub use node::{TagClass, TlvNode};
pub use result::{DecodeResult, PARSING_STRATEGY_DESC};
