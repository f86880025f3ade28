use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::Rng;

use crate::approx;
use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::storage::Storage;

// Tensor — a shape + offset view over shared storage
//
// A Tensor never owns its elements exclusively. It holds an
// `Arc<RwLock<Storage>>` together with plain view metadata (shape and
// an element offset into the buffer), so any number of tensors can
// alias one buffer at different offsets. That is how a row view is
// realized: same buffer, bumped offset, new shape, no copy.
//
// MEMORY MODEL:
//
//   - The Arc strong count is the buffer's refcount. `Clone` retains,
//     `Drop` releases, and the storage is freed exactly once when the
//     last handle goes away. Rebinding a tensor is ordinary assignment,
//     which drops the old handle first; a stray free of a still-shared
//     buffer cannot be written.
//   - Every arithmetic operation writes into a caller-supplied,
//     pre-allocated destination (`self`), so a multi-step computation
//     over fixed-size state performs no per-step heap allocation.
//
// INVARIANTS (established at construction, preserved by every op):
//
//   - elem_count == product of the shape's axes
//   - offset + elem_count <= buffer length
//
// ALIASING:
//
//   Elementwise destinations may alias their operands; loads and
//   stores run index-sequentially, so reading element i after writing
//   element i-1 is well defined. Matmul destinations must be disjoint
//   from both operands (partial writes would corrupt unread operand
//   data) and that precondition is checked, not assumed.

/// A 1-D or 2-D view over shared, reference-counted f64 storage.
pub struct Tensor {
    storage: Arc<RwLock<Storage>>,
    shape: Shape,
    offset: usize,
}

impl Clone for Tensor {
    /// Alias the same buffer: the refcount goes up, the view metadata
    /// is copied, no elements move. Dropping the clone releases its
    /// reference.
    fn clone(&self) -> Self {
        Tensor {
            storage: Arc::clone(&self.storage),
            shape: self.shape.clone(),
            offset: self.offset,
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tensor(shape={}, offset={}, refs={})",
            self.shape,
            self.offset,
            self.ref_count()
        )
    }
}

/// Where a read operand's elements come from when the destination's
/// write guard may already cover the same buffer.
enum OperandSource<'a> {
    /// Shares the destination's storage; read through the write guard.
    Dest,
    /// Shares the first operand's storage; read through its guard.
    First,
    Guard(RwLockReadGuard<'a, Storage>),
}

impl Tensor {
    // Construction

    fn from_storage(storage: Storage, shape: Shape) -> Self {
        Tensor {
            storage: Arc::new(RwLock::new(storage)),
            shape,
            offset: 0,
        }
    }

    /// Allocate a fresh zero-filled buffer for the given shape.
    pub fn new(dims: &[usize]) -> Result<Self> {
        let shape = Shape::new(dims)?;
        let storage = Storage::new(shape.elem_count())?;
        Ok(Self::from_storage(storage, shape))
    }

    /// A tensor of zeros.
    pub fn zeros(dims: &[usize]) -> Result<Self> {
        Self::new(dims)
    }

    /// A tensor of ones.
    pub fn ones(dims: &[usize]) -> Result<Self> {
        let t = Self::new(dims)?;
        t.fill(1.0)?;
        Ok(t)
    }

    /// A tensor of uniform random values in [-1, 1).
    pub fn rand(dims: &[usize]) -> Result<Self> {
        let t = Self::new(dims)?;
        let mut rng = rand::thread_rng();
        let mut w = t.write_storage()?;
        for v in w.data_mut() {
            *v = rng.gen_range(-1.0..1.0);
        }
        drop(w);
        Ok(t)
    }

    /// Build a tensor from a flat row-major slice.
    pub fn from_slice(data: &[f64], dims: &[usize]) -> Result<Self> {
        let shape = Shape::new(dims)?;
        let expected = shape.elem_count();
        if data.len() != expected {
            return Err(Error::ElementCountMismatch {
                shape,
                expected,
                got: data.len(),
            });
        }
        Ok(Self::from_storage(Storage::from_vec(data.to_vec()), shape))
    }

    // Accessors

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The axis sizes as a slice.
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Total number of logical elements.
    pub fn elem_count(&self) -> usize {
        self.shape.elem_count()
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// Element offset of this view into its buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of live references to this tensor's buffer.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.storage)
    }

    /// Whether two tensors are views over the same buffer.
    pub fn shares_storage(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    /// Length of the backing buffer in elements.
    pub fn buffer_len(&self) -> Result<usize> {
        Ok(self.read_storage()?.len())
    }

    fn read_storage(&self) -> Result<RwLockReadGuard<'_, Storage>> {
        self.storage
            .read()
            .map_err(|_| Error::msg("storage lock poisoned"))
    }

    fn write_storage(&self) -> Result<RwLockWriteGuard<'_, Storage>> {
        self.storage
            .write()
            .map_err(|_| Error::msg("storage lock poisoned"))
    }

    /// Copy the logical elements (respecting the view offset) out into
    /// a vector.
    pub fn to_vec(&self) -> Result<Vec<f64>> {
        let g = self.read_storage()?;
        Ok(g.data()[self.offset..self.offset + self.elem_count()].to_vec())
    }

    /// Read a single element by (row, col) index.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::msg(format!(
                "index ({row}, {col}) out of bounds for shape {}",
                self.shape
            )));
        }
        let g = self.read_storage()?;
        Ok(g.data()[self.offset + row * self.cols() + col])
    }

    /// Overwrite every logical element with `value`.
    pub fn fill(&self, value: f64) -> Result<()> {
        let n = self.elem_count();
        let mut w = self.write_storage()?;
        for v in &mut w.data_mut()[self.offset..self.offset + n] {
            *v = value;
        }
        Ok(())
    }

    // Views and copies

    /// Zero-copy view of row `index`, as a `[cols, 1]` column tensor.
    ///
    /// The view shares this tensor's buffer (refcount goes up by one);
    /// writes through the view are visible through the parent and vice
    /// versa.
    pub fn row(&self, index: usize) -> Result<Tensor> {
        if index >= self.rows() {
            return Err(Error::RowOutOfBounds {
                index,
                rows: self.rows(),
            });
        }
        let cols = self.cols();
        Ok(Tensor {
            storage: Arc::clone(&self.storage),
            shape: Shape::new(&[cols, 1])?,
            offset: self.offset + index * cols,
        })
    }

    /// Deep copy: fresh storage holding this view's logical elements,
    /// sharing nothing with `self`.
    pub fn deep_clone(&self) -> Result<Tensor> {
        let n = self.elem_count();
        let mut storage = Storage::new(n)?;
        {
            let g = self.read_storage()?;
            storage
                .data_mut()
                .copy_from_slice(&g.data()[self.offset..self.offset + n]);
        }
        Ok(Self::from_storage(storage, self.shape.clone()))
    }

    // In-place operations: the destination is `self`, pre-allocated by
    // the caller. None of these allocate.

    /// Resolve how `t1` and `t2` will be read while `self`'s write
    /// guard is held, without ever locking the same buffer twice.
    fn operand_sources<'a>(
        &self,
        t1: &'a Tensor,
        t2: &'a Tensor,
    ) -> Result<(OperandSource<'a>, OperandSource<'a>)> {
        let src1 = if self.shares_storage(t1) {
            OperandSource::Dest
        } else {
            OperandSource::Guard(t1.read_storage()?)
        };
        let src2 = if self.shares_storage(t2) {
            OperandSource::Dest
        } else if t2.shares_storage(t1) {
            OperandSource::First
        } else {
            OperandSource::Guard(t2.read_storage()?)
        };
        Ok((src1, src2))
    }

    fn binary_from(&self, t1: &Tensor, t2: &Tensor, op: impl Fn(f64, f64) -> f64) -> Result<()> {
        if t1.shape != t2.shape {
            return Err(Error::ShapeMismatch {
                expected: t1.shape.clone(),
                got: t2.shape.clone(),
            });
        }
        if self.shape != t1.shape {
            return Err(Error::ShapeMismatch {
                expected: t1.shape.clone(),
                got: self.shape.clone(),
            });
        }
        let n = self.elem_count();
        let (src1, src2) = self.operand_sources(t1, t2)?;
        let mut w = self.write_storage()?;
        for i in 0..n {
            let a = match &src1 {
                OperandSource::Guard(g) => g.data()[t1.offset + i],
                _ => w.data()[t1.offset + i],
            };
            let b = match (&src2, &src1) {
                (OperandSource::Guard(g), _) => g.data()[t2.offset + i],
                (OperandSource::First, OperandSource::Guard(g)) => g.data()[t2.offset + i],
                _ => w.data()[t2.offset + i],
            };
            w.data_mut()[self.offset + i] = op(a, b);
        }
        Ok(())
    }

    /// `self[i] = t1[i] + t2[i]`. The destination may alias either
    /// operand.
    pub fn add_from(&self, t1: &Tensor, t2: &Tensor) -> Result<()> {
        self.binary_from(t1, t2, |a, b| a + b)
    }

    /// `self[i] = t1[i] * t2[i]` (elementwise). The destination may
    /// alias either operand.
    pub fn mul_from(&self, t1: &Tensor, t2: &Tensor) -> Result<()> {
        self.binary_from(t1, t2, |a, b| a * b)
    }

    /// Stack `t1` on top of `t2` along the first axis into `self`.
    ///
    /// Requires `t1.cols == t2.cols` and a destination of shape
    /// `[t1.rows + t2.rows, cols]`.
    pub fn concat_from(&self, t1: &Tensor, t2: &Tensor) -> Result<()> {
        if t1.cols() != t2.cols() {
            return Err(Error::ShapeMismatch {
                expected: t1.shape.clone(),
                got: t2.shape.clone(),
            });
        }
        let expected = Shape::new(&[t1.rows() + t2.rows(), t1.cols()])?;
        if self.rows() != expected.rows() || self.cols() != expected.cols() {
            return Err(Error::ShapeMismatch {
                expected,
                got: self.shape.clone(),
            });
        }
        let n1 = t1.elem_count();
        let n2 = t2.elem_count();
        let (src1, src2) = self.operand_sources(t1, t2)?;
        let mut w = self.write_storage()?;
        for i in 0..n1 {
            let a = match &src1 {
                OperandSource::Guard(g) => g.data()[t1.offset + i],
                _ => w.data()[t1.offset + i],
            };
            w.data_mut()[self.offset + i] = a;
        }
        for i in 0..n2 {
            let b = match (&src2, &src1) {
                (OperandSource::Guard(g), _) => g.data()[t2.offset + i],
                (OperandSource::First, OperandSource::Guard(g)) => g.data()[t2.offset + i],
                _ => w.data()[t2.offset + i],
            };
            w.data_mut()[self.offset + n1 + i] = b;
        }
        Ok(())
    }

    /// Matrix product `t1 @ t2` written into `self`.
    ///
    /// `[m, k] @ [k, n]` requires a `[m, n]` destination that shares
    /// storage with neither operand. A 1x1 result is computed as a dot
    /// product; otherwise the classic triple loop runs with a
    /// zero-initialized accumulator per output cell.
    pub fn matmul_from(&self, t1: &Tensor, t2: &Tensor) -> Result<()> {
        if self.shares_storage(t1) || self.shares_storage(t2) {
            return Err(Error::AliasedDestination { op: "matmul" });
        }
        let (m, k) = (t1.rows(), t1.cols());
        let (k2, n) = (t2.rows(), t2.cols());
        if k != k2 {
            return Err(Error::MatmulShapeMismatch { m, k1: k, k2, n });
        }
        if self.rows() != m || self.cols() != n {
            return Err(Error::ShapeMismatch {
                expected: Shape::new(&[m, n])?,
                got: self.shape.clone(),
            });
        }
        let g1 = t1.read_storage()?;
        // t2 may be the same buffer as t1 (squaring a matrix); reuse
        // the guard rather than locking twice.
        let g2 = if t2.shares_storage(t1) {
            None
        } else {
            Some(t2.read_storage()?)
        };
        let mut w = self.write_storage()?;
        let (o, o1, o2) = (self.offset, t1.offset, t2.offset);
        let a = g1.data();
        let b = match &g2 {
            Some(g) => g.data(),
            None => g1.data(),
        };
        let c = w.data_mut();
        if m == 1 && n == 1 {
            let mut acc = 0.0;
            for i in 0..k {
                acc += a[o1 + i] * b[o2 + i];
            }
            c[o] = acc;
        } else {
            for i in 0..m {
                for j in 0..n {
                    let mut acc = 0.0;
                    for l in 0..k {
                        acc += a[o1 + i * k + l] * b[o2 + l * n + j];
                    }
                    c[o + i * n + j] = acc;
                }
            }
        }
        Ok(())
    }

    fn apply_(&self, f: impl Fn(f64) -> f64) -> Result<()> {
        let n = self.elem_count();
        let mut w = self.write_storage()?;
        for v in &mut w.data_mut()[self.offset..self.offset + n] {
            *v = f(*v);
        }
        Ok(())
    }

    fn unary_from(&self, src: &Tensor, f: impl Fn(f64) -> f64) -> Result<()> {
        if self.shape != src.shape {
            return Err(Error::ShapeMismatch {
                expected: src.shape.clone(),
                got: self.shape.clone(),
            });
        }
        let n = self.elem_count();
        let g = if self.shares_storage(src) {
            None
        } else {
            Some(src.read_storage()?)
        };
        let mut w = self.write_storage()?;
        for i in 0..n {
            let x = match &g {
                Some(g) => g.data()[src.offset + i],
                None => w.data()[src.offset + i],
            };
            w.data_mut()[self.offset + i] = f(x);
        }
        Ok(())
    }

    /// Apply the rational sigmoid approximation to every element in
    /// place.
    pub fn sigmoid_(&self) -> Result<()> {
        self.apply_(approx::sigmoid)
    }

    /// Apply the rational tanh approximation to every element in place.
    pub fn tanh_(&self) -> Result<()> {
        self.apply_(approx::tanh)
    }

    /// `self[i] = sigmoid(src[i])`, leaving `src` intact unless the two
    /// views alias.
    pub fn sigmoid_from(&self, src: &Tensor) -> Result<()> {
        self.unary_from(src, approx::sigmoid)
    }

    /// `self[i] = tanh(src[i])`, leaving `src` intact unless the two
    /// views alias.
    pub fn tanh_from(&self, src: &Tensor) -> Result<()> {
        self.unary_from(src, approx::tanh)
    }
}

impl fmt::Display for Tensor {
    /// Nested-bracket rendering: `Tensor([[1,2],[3,4]])`, row-major,
    /// comma separated. Rank-1 tensors render as a flat list.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.storage.read().map_err(|_| fmt::Error)?;
        let data = g.data();
        write!(f, "Tensor([")?;
        if self.rank() == 1 {
            for i in 0..self.rows() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", data[self.offset + i])?;
            }
        } else {
            let cols = self.cols();
            for i in 0..self.rows() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "[")?;
                for j in 0..cols {
                    if j > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", data[self.offset + i * cols + j])?;
                }
                write!(f, "]")?;
            }
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero_filled() {
        let t = Tensor::new(&[2, 3]).unwrap();
        assert_eq!(t.dims(), &[2, 3]);
        assert_eq!(t.elem_count(), 6);
        assert_eq!(t.to_vec().unwrap(), vec![0.0; 6]);
    }

    #[test]
    fn test_ones() {
        let t = Tensor::ones(&[3]).unwrap();
        assert_eq!(t.to_vec().unwrap(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_rand_range() {
        let t = Tensor::rand(&[4, 4]).unwrap();
        for v in t.to_vec().unwrap() {
            assert!((-1.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_from_slice_count_mismatch() {
        let err = Tensor::from_slice(&[1.0, 2.0, 3.0], &[2, 2]).unwrap_err();
        assert!(matches!(err, Error::ElementCountMismatch { .. }));
    }

    #[test]
    fn test_shape_invariants_after_view() {
        let t = Tensor::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let r = t.row(1).unwrap();
        assert_eq!(r.dims(), &[3, 1]);
        assert_eq!(r.elem_count(), 3);
        assert_eq!(r.offset(), 3);
        assert!(r.offset() + r.elem_count() <= r.buffer_len().unwrap());
        assert_eq!(r.to_vec().unwrap(), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_row_out_of_bounds() {
        let t = Tensor::zeros(&[2, 3]).unwrap();
        let err = t.row(2).unwrap_err();
        assert!(matches!(err, Error::RowOutOfBounds { index: 2, rows: 2 }));
    }

    #[test]
    fn test_row_view_aliases_parent() {
        let t = Tensor::zeros(&[2, 3]).unwrap();
        let r = t.row(1).unwrap();
        assert!(r.shares_storage(&t));
        r.fill(7.0).unwrap();
        // The write through the view is visible in the parent...
        assert_eq!(t.to_vec().unwrap(), vec![0.0, 0.0, 0.0, 7.0, 7.0, 7.0]);
        // ...and an unrelated tensor is untouched by construction.
        let other = Tensor::zeros(&[2, 3]).unwrap();
        assert!(!other.shares_storage(&t));
    }

    #[test]
    fn test_ref_count_tracks_views() {
        let t = Tensor::zeros(&[2, 2]).unwrap();
        assert_eq!(t.ref_count(), 1);
        let v = t.row(0).unwrap();
        let c = t.clone();
        assert_eq!(t.ref_count(), 3);
        drop(v);
        assert_eq!(t.ref_count(), 2);
        drop(c);
        assert_eq!(t.ref_count(), 1);
    }

    #[test]
    fn test_rebind_releases_old_buffer() {
        let a = Tensor::zeros(&[2, 2]).unwrap();
        let b = Tensor::zeros(&[2, 2]).unwrap();
        let keep = a.clone();
        assert_eq!(keep.ref_count(), 2);
        // Rebinding is assignment: the old reference drops exactly once.
        let mut handle = a;
        assert!(handle.shares_storage(&keep));
        handle = b.clone();
        assert_eq!(keep.ref_count(), 1);
        assert!(handle.shares_storage(&b));
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let t = Tensor::from_slice(&[1.0, 2.0], &[2, 1]).unwrap();
        let d = t.deep_clone().unwrap();
        assert!(!d.shares_storage(&t));
        d.fill(9.0).unwrap();
        assert_eq!(t.to_vec().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_deep_clone_of_view_copies_logical_range() {
        let t = Tensor::from_slice(&[1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let d = t.row(1).unwrap().deep_clone().unwrap();
        assert_eq!(d.offset(), 0);
        assert_eq!(d.to_vec().unwrap(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_concat_round_trip() {
        let a = Tensor::from_slice(&[1.0, 2.0], &[2, 1]).unwrap();
        let b = Tensor::from_slice(&[3.0, 4.0, 5.0], &[3, 1]).unwrap();
        let dest = Tensor::new(&[5, 1]).unwrap();
        dest.concat_from(&a, &b).unwrap();
        let v = dest.to_vec().unwrap();
        assert_eq!(&v[..2], &a.to_vec().unwrap()[..]);
        assert_eq!(&v[2..], &b.to_vec().unwrap()[..]);
    }

    #[test]
    fn test_concat_shape_mismatch() {
        let a = Tensor::zeros(&[2, 1]).unwrap();
        let b = Tensor::zeros(&[2, 2]).unwrap();
        let dest = Tensor::new(&[4, 1]).unwrap();
        assert!(matches!(
            dest.concat_from(&a, &b),
            Err(Error::ShapeMismatch { .. })
        ));
        let small = Tensor::new(&[3, 1]).unwrap();
        let b = Tensor::zeros(&[2, 1]).unwrap();
        assert!(matches!(
            small.concat_from(&a, &b),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_add_and_mul() {
        let a = Tensor::from_slice(&[1.0, 2.0, 3.0], &[3, 1]).unwrap();
        let b = Tensor::from_slice(&[4.0, 5.0, 6.0], &[3, 1]).unwrap();
        let dest = Tensor::new(&[3, 1]).unwrap();
        dest.add_from(&a, &b).unwrap();
        assert_eq!(dest.to_vec().unwrap(), vec![5.0, 7.0, 9.0]);
        dest.mul_from(&a, &b).unwrap();
        assert_eq!(dest.to_vec().unwrap(), vec![4.0, 10.0, 18.0]);
    }

    #[test]
    fn test_elementwise_self_aliasing() {
        // dest aliases both operands: t = t * t, then t = t + t.
        let t = Tensor::from_slice(&[2.0, 3.0], &[2, 1]).unwrap();
        t.mul_from(&t, &t).unwrap();
        assert_eq!(t.to_vec().unwrap(), vec![4.0, 9.0]);
        t.add_from(&t, &t).unwrap();
        assert_eq!(t.to_vec().unwrap(), vec![8.0, 18.0]);
    }

    #[test]
    fn test_elementwise_aliasing_through_views() {
        // dest is a view of the same buffer as one operand.
        let m = Tensor::from_slice(&[1.0, 2.0, 10.0, 20.0], &[2, 2]).unwrap();
        let top = m.row(0).unwrap();
        let bottom = m.row(1).unwrap();
        top.add_from(&top, &bottom).unwrap();
        assert_eq!(m.to_vec().unwrap(), vec![11.0, 22.0, 10.0, 20.0]);
    }

    #[test]
    fn test_elementwise_shape_mismatch() {
        let a = Tensor::zeros(&[2, 1]).unwrap();
        let b = Tensor::zeros(&[3, 1]).unwrap();
        let dest = Tensor::new(&[2, 1]).unwrap();
        assert!(matches!(
            dest.add_from(&a, &b),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_matmul_fixed_values() {
        let a = Tensor::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let b = Tensor::from_slice(&[7.0, 8.0, 9.0, 10.0, 11.0, 12.0], &[3, 2]).unwrap();
        let dest = Tensor::new(&[2, 2]).unwrap();
        dest.matmul_from(&a, &b).unwrap();
        assert_eq!(dest.to_vec().unwrap(), vec![58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_matmul_dot_product_path() {
        let a = Tensor::from_slice(&[1.0, 2.0, 3.0], &[1, 3]).unwrap();
        let b = Tensor::from_slice(&[4.0, 5.0, 6.0], &[3, 1]).unwrap();
        let dest = Tensor::new(&[1, 1]).unwrap();
        dest.matmul_from(&a, &b).unwrap();
        assert_eq!(dest.to_vec().unwrap(), vec![32.0]);
    }

    #[test]
    fn test_matmul_same_operand_buffer() {
        // Squaring a matrix: both operands are the same tensor.
        let a = Tensor::from_slice(&[1.0, 1.0, 0.0, 1.0], &[2, 2]).unwrap();
        let dest = Tensor::new(&[2, 2]).unwrap();
        dest.matmul_from(&a, &a).unwrap();
        assert_eq!(dest.to_vec().unwrap(), vec![1.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_matmul_inner_dim_mismatch() {
        let a = Tensor::zeros(&[2, 3]).unwrap();
        let b = Tensor::zeros(&[2, 2]).unwrap();
        let dest = Tensor::new(&[2, 2]).unwrap();
        assert!(matches!(
            dest.matmul_from(&a, &b),
            Err(Error::MatmulShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_matmul_rejects_aliased_destination() {
        let a = Tensor::from_slice(&[1.0, 0.0, 0.0, 1.0], &[2, 2]).unwrap();
        let b = Tensor::zeros(&[2, 2]).unwrap();
        assert!(matches!(
            a.matmul_from(&a, &b),
            Err(Error::AliasedDestination { .. })
        ));
        assert!(matches!(
            b.matmul_from(&a, &b),
            Err(Error::AliasedDestination { .. })
        ));
    }

    #[test]
    fn test_sigmoid_inplace_matches_scalar() {
        let t = Tensor::from_slice(&[0.0, 2.0, -2.0], &[3, 1]).unwrap();
        t.sigmoid_().unwrap();
        assert_eq!(
            t.to_vec().unwrap(),
            vec![
                approx::sigmoid(0.0),
                approx::sigmoid(2.0),
                approx::sigmoid(-2.0)
            ]
        );
    }

    #[test]
    fn test_tanh_from_preserves_source() {
        let src = Tensor::from_slice(&[2.0, -2.0], &[2, 1]).unwrap();
        let dest = Tensor::new(&[2, 1]).unwrap();
        dest.tanh_from(&src).unwrap();
        assert_eq!(src.to_vec().unwrap(), vec![2.0, -2.0]);
        assert_eq!(
            dest.to_vec().unwrap(),
            vec![approx::tanh(2.0), approx::tanh(-2.0)]
        );
    }

    #[test]
    fn test_display_matrix() {
        let t = Tensor::from_slice(&[1.0, 2.5, 3.0, 4.0], &[2, 2]).unwrap();
        assert_eq!(format!("{t}"), "Tensor([[1,2.5],[3,4]])");
    }

    #[test]
    fn test_display_vector() {
        let t = Tensor::from_slice(&[1.0, 2.0], &[2]).unwrap();
        assert_eq!(format!("{t}"), "Tensor([1,2])");
    }
}
