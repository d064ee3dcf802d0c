//! Conversion of classification trees into flat FHIR CodeSystem models.
//!
//! The pipeline is: [`flatten`] the tree in pre-order, [`build_concept`]
//! for every non-root node with the kind's [`ConversionStrategy`], then
//! [`dedupe`] concepts sharing a code. [`convert_tree`] runs all three.

pub mod builder;
pub mod convert;
pub mod dedupe;
pub mod error;
pub mod strategy;
pub mod walker;

pub use builder::build_concept;
pub use convert::{ConversionOutcome, convert_tree};
pub use dedupe::{DUPLICATE_EXEMPT_CODE, DedupeOutcome, dedupe};
pub use error::{ConvertError, Result};
pub use strategy::{ConversionStrategy, strategy, strategy_for};
pub use walker::{WalkedNode, flatten};
