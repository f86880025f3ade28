use std::fmt;

use crate::error::{Error, Result};

// Shape — validated 1-D or 2-D shape of a tensor
//
// The engine only deals in vectors and matrices, so a shape is one or
// two axis sizes. Validation happens once, at construction: a Shape
// that exists is always rank 1 or 2 with every axis >= 1, and every
// downstream invariant (length == product of axes, view bounds) can
// rely on that.

/// Highest rank the engine supports.
pub const MAX_RANK: usize = 2;

/// The shape of a tensor: one or two positive axis sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Create a shape from axis sizes, rejecting rank 0, rank > 2, and
    /// zero-sized axes.
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() || dims.len() > MAX_RANK || dims.iter().any(|&d| d == 0) {
            return Err(Error::InvalidDimensions {
                dims: dims.to_vec(),
            });
        }
        Ok(Shape(dims.to_vec()))
    }

    /// The axis sizes as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Number of axes (1 for vectors, 2 for matrices).
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements (product of all axes).
    pub fn elem_count(&self) -> usize {
        self.0.iter().product()
    }

    /// Size of the first axis.
    pub fn rows(&self) -> usize {
        self.0[0]
    }

    /// Size of the second axis, or 1 for a rank-1 shape.
    pub fn cols(&self) -> usize {
        self.0.get(1).copied().unwrap_or(1)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}
