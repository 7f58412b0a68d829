//! Core Tensor type

use super::Layout;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Owned dense numeric array of rank 2 or 3
///
/// `Tensor` is the data structure marshalled into and out of OpenCV images.
/// It consists of:
/// - **Storage**: reference-counted host memory, stored as raw bytes
/// - **Layout**: shape, strides, and offset defining the view into storage
/// - **DType**: element type (determined at runtime)
///
/// The first two dimensions are rows and columns; the optional third is the
/// channel count (1 when absent).
///
/// # Views
///
/// `transpose` creates a tensor sharing the same underlying storage with
/// swapped strides; the result is non-contiguous. Operations that hand
/// memory to OpenCV require contiguity and normalize through
/// [`Tensor::contiguous`] first.
#[derive(Clone)]
pub struct Tensor {
    /// Host memory, reference-counted so views are zero-copy
    storage: Arc<Vec<u8>>,
    /// Element type
    dtype: DType,
    /// Shape, strides, offset
    layout: Layout,
}

impl Tensor {
    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if the shape is not rank 2 or 3 or if `data.len()` does not
    /// equal the product of the `shape` dimensions. For a fallible
    /// alternative, use [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Self {
        Self::try_from_slice(data, shape).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    ///
    /// Returns an error if the shape is not rank 2 or 3, or if `data.len()`
    /// does not equal the product of the `shape` dimensions.
    pub fn try_from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        let expected = checked_elem_count(shape)?;
        if data.len() != expected {
            return Err(Error::invalid_argument(
                "data",
                format!(
                    "expected {} elements for shape {:?}, got {}",
                    expected,
                    shape,
                    data.len()
                ),
            ));
        }

        let bytes = bytemuck::cast_slice::<T, u8>(data).to_vec();
        Self::from_parts(bytes, T::DTYPE, Layout::contiguous(shape))
    }

    /// Create a tensor filled with zeros
    ///
    /// # Panics
    ///
    /// Panics if the shape is not rank 2 or 3. For a fallible alternative,
    /// use [`Self::try_zeros`].
    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        Self::try_zeros(shape, dtype).expect("Tensor::zeros failed")
    }

    /// Create a tensor filled with zeros (fallible version)
    pub fn try_zeros(shape: &[usize], dtype: DType) -> Result<Self> {
        let len = checked_elem_count(shape)?;
        let bytes = vec![0u8; len * dtype.size_in_bytes()];
        Self::from_parts(bytes, dtype, Layout::contiguous(shape))
    }

    /// Create a tensor from raw bytes and a layout
    ///
    /// The layout must be contiguous and the byte length must match
    /// `elem_count * dtype.size_in_bytes()`.
    pub(crate) fn from_parts(bytes: Vec<u8>, dtype: DType, layout: Layout) -> Result<Self> {
        let rank = layout.ndim();
        if !(2..=3).contains(&rank) {
            return Err(Error::invalid_argument(
                "shape",
                format!("expected rank 2 or 3, got rank {rank}"),
            ));
        }
        debug_assert!(layout.is_contiguous());
        debug_assert_eq!(bytes.len(), layout.elem_count() * dtype.size_in_bytes());

        Ok(Self {
            storage: Arc::new(bytes),
            dtype,
            layout,
        })
    }

    // ===== Accessors =====

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get the total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Number of rows (first dimension)
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape()[0]
    }

    /// Number of columns (second dimension)
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape()[1]
    }

    /// Channel count: the third dimension, or 1 for rank-2 tensors
    #[inline]
    pub fn channels(&self) -> usize {
        if self.ndim() == 3 {
            self.shape()[2]
        } else {
            1
        }
    }

    /// Check if the tensor is contiguous in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Borrow the tensor's bytes
    ///
    /// Only valid on contiguous tensors, where the storage is exactly the
    /// elements in row-major order.
    pub(crate) fn contiguous_bytes(&self) -> &[u8] {
        debug_assert!(self.is_contiguous());
        &self.storage[..self.numel() * self.dtype.size_in_bytes()]
    }

    /// Mutably borrow the tensor's bytes, unsharing the storage if needed
    ///
    /// Only valid on contiguous tensors.
    pub(crate) fn contiguous_bytes_mut(&mut self) -> &mut [u8] {
        debug_assert!(self.is_contiguous());
        let len = self.numel() * self.dtype.size_in_bytes();
        &mut Arc::make_mut(&mut self.storage)[..len]
    }

    // ===== Views =====

    /// Transpose two dimensions (zero-copy)
    ///
    /// The result shares storage with `self` and is non-contiguous unless
    /// the swap is trivial.
    pub fn transpose(&self, dim0: isize, dim1: isize) -> Result<Self> {
        let layout = self
            .layout
            .transpose(dim0, dim1)
            .ok_or_else(|| {
                Error::invalid_argument(
                    "dim",
                    format!(
                        "dimensions ({dim0}, {dim1}) out of range for rank {}",
                        self.ndim()
                    ),
                )
            })?;

        Ok(Self {
            storage: self.storage.clone(),
            dtype: self.dtype,
            layout,
        })
    }

    /// Return a contiguous tensor with the same logical contents
    ///
    /// Already-contiguous tensors are returned as cheap clones sharing
    /// storage. Non-contiguous tensors are gathered element by element in
    /// row-major logical order into a freshly owned buffer; that buffer is
    /// independent of the source and is dropped whenever the returned tensor
    /// is.
    pub fn contiguous(&self) -> Self {
        if self.is_contiguous() {
            return self.clone();
        }

        Self {
            storage: Arc::new(self.gather_bytes()),
            dtype: self.dtype,
            layout: Layout::contiguous(self.shape()),
        }
    }

    /// Copy the elements out in logical row-major order
    ///
    /// Works on contiguous and non-contiguous tensors alike. Fails with
    /// `InvalidArgument` if `T` does not match the tensor's dtype.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        if T::DTYPE != self.dtype {
            return Err(Error::invalid_argument(
                "T",
                format!("tensor holds {}, requested {}", self.dtype, T::DTYPE),
            ));
        }

        let c = self.contiguous();
        let esize = self.dtype.size_in_bytes();
        // Storage has byte alignment, so typed reads go through
        // pod_read_unaligned rather than slice casts.
        Ok(c.contiguous_bytes()
            .chunks_exact(esize)
            .map(|chunk| bytemuck::pod_read_unaligned(chunk))
            .collect())
    }

    /// Gather the tensor's elements in logical row-major order as bytes
    fn gather_bytes(&self) -> Vec<u8> {
        let esize = self.dtype.size_in_bytes();
        let shape = self.layout.shape();
        let strides = self.layout.strides();
        let src = self.storage.as_slice();
        let mut out = Vec::with_capacity(self.numel() * esize);

        if self.numel() == 0 {
            return out;
        }

        let mut indices = [0usize; 3];
        let rank = shape.len();
        'gather: loop {
            let mut linear = self.layout.offset() as isize;
            for (&i, &s) in indices[..rank].iter().zip(strides) {
                linear += i as isize * s;
            }
            let start = linear as usize * esize;
            out.extend_from_slice(&src[start..start + esize]);

            for d in (0..rank).rev() {
                indices[d] += 1;
                if indices[d] < shape[d] {
                    continue 'gather;
                }
                indices[d] = 0;
            }
            break;
        }

        out
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tensor {{ shape: {:?}, dtype: {}, contiguous: {} }}",
            self.shape(),
            self.dtype,
            self.is_contiguous()
        )
    }
}

fn checked_elem_count(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| Error::invalid_argument("shape", format!("element count overflows: {shape:?}")))
}
