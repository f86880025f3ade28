//! # tenrec-core
//!
//! A minimal 2-D tensor engine: flat f64 buffers shared between
//! reference-counted views, with every arithmetic operation expressed
//! as an in-place write into a pre-allocated destination.
//!
//! This crate provides:
//! - [`Storage`] — the shared flat buffer, the unit of ownership
//! - [`Shape`] — validated rank-1/2 shape
//! - [`Tensor`] — a (buffer, offset, shape) view, the unit of computation
//! - [`approx`] — the rational sigmoid/tanh approximations
//! - [`Error`] / [`Result`] — the engine-wide error contract

pub mod approx;
pub mod error;
pub mod shape;
pub mod storage;
pub mod tensor;

pub use error::{Error, Result};
pub use shape::Shape;
pub use storage::Storage;
pub use tensor::Tensor;
