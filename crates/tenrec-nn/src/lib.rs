//! # tenrec-nn
//!
//! The tensor engine's sole consumer: an allocation-free LSTM forward
//! pass. [`Lstm`] owns its whole state trajectory as pre-allocated
//! tensors and drives every step through in-place `tenrec-core` ops.

pub mod lstm;

pub use lstm::Lstm;
