//! Functional core for storekeep.
//!
//! Everything in this crate is pure: the item model, the marshalling layer
//! between JSON and the attribute-typed wire form, the update-expression
//! builder, the store trait, and the response envelope. Nothing here talks to
//! AWS; the `storekeep` crate provides the imperative shell.
//!
//! The `dynamodb` feature adds conversions between wire items and the SDK's
//! attribute values.

#[cfg(feature = "dynamodb")]
pub mod attribute;
pub mod envelope;
pub mod item;
pub mod marshal;
pub mod storage;
