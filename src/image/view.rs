//! Borrowed image views over tensor memory

use super::depth::Depth;
use crate::error::{Error, Result};
use crate::tensor::{Layout, Tensor};
use opencv::core::{self, Mat};
use opencv::prelude::*;
use std::ffi::c_void;

/// Non-owning view of a contiguous tensor's memory as a pixel grid
///
/// Rows and columns come from the tensor's first two dimensions, the channel
/// count from the optional third (1 when absent), and the pixel depth from
/// the fixed correspondence table. The view borrows the tensor's bytes; no
/// pixel data is duplicated.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    rows: usize,
    cols: usize,
    channels: usize,
    depth: Depth,
    data: &'a [u8],
}

impl<'a> ImageView<'a> {
    /// Adapt a contiguous tensor as an image view
    ///
    /// Fails with `InvalidArgument` on a non-contiguous tensor (normalize
    /// with [`Tensor::contiguous`] or use [`with_image_view`]) and with
    /// `UnsupportedDType` when the element type has no pixel depth.
    pub fn from_tensor(tensor: &'a Tensor) -> Result<Self> {
        if !tensor.is_contiguous() {
            return Err(Error::invalid_argument(
                "tensor",
                "tensor memory is not contiguous; call contiguous() first",
            ));
        }

        let depth = Depth::from_dtype(tensor.dtype())
            .ok_or_else(|| Error::unsupported_dtype(tensor.dtype(), "tensor_to_view"))?;

        let channels = tensor.channels();
        if channels == 0 || channels > core::CV_CN_MAX as usize {
            return Err(Error::invalid_argument(
                "tensor",
                format!("channel count {channels} outside 1..={}", core::CV_CN_MAX),
            ));
        }
        dim_i32(tensor.rows(), "rows")?;
        dim_i32(tensor.cols(), "cols")?;

        Ok(Self {
            rows: tensor.rows(),
            cols: tensor.cols(),
            channels,
            depth,
            data: tensor.contiguous_bytes(),
        })
    }

    /// Adapt a continuous OpenCV matrix as an image view
    ///
    /// Fails with `UnsupportedDepth` when the matrix depth has no tensor
    /// element type.
    pub fn from_mat(mat: &'a Mat) -> Result<Self> {
        if !mat.is_continuous() {
            return Err(Error::invalid_argument(
                "mat",
                "matrix memory is not continuous",
            ));
        }
        if mat.dims() > 2 {
            return Err(Error::invalid_argument(
                "mat",
                format!("expected a 2-dimensional matrix, got {} dims", mat.dims()),
            ));
        }

        let depth = Depth::from_cv_code(mat.depth())
            .ok_or_else(|| Error::unsupported_depth(mat.depth(), "view_from_mat"))?;

        let rows = mat.rows() as usize;
        let cols = mat.cols() as usize;
        let channels = mat.channels() as usize;
        let data = mat.data_bytes()?;

        let expected = rows * cols * channels * depth.size_in_bytes();
        if data.len() != expected {
            return Err(Error::invalid_argument(
                "mat",
                format!("matrix holds {} bytes, expected {expected}", data.len()),
            ));
        }

        Ok(Self {
            rows,
            cols,
            channels,
            depth,
            data,
        })
    }

    /// Copy the view out into a freshly owned, contiguous tensor
    ///
    /// Single-channel views produce rank-2 tensors (rows, cols); multi-channel
    /// views produce rank-3 tensors (rows, cols, channels). The copy is full
    /// and the source view/image can be discarded afterward.
    pub fn to_tensor(&self) -> Tensor {
        let shape: &[usize] = if self.channels == 1 {
            &[self.rows, self.cols]
        } else {
            &[self.rows, self.cols, self.channels]
        };

        Tensor::from_parts(
            self.data.to_vec(),
            self.depth.dtype(),
            Layout::contiguous(shape),
        )
        .expect("view geometry is a valid tensor shape")
    }

    /// Borrow the view's memory as an OpenCV matrix header
    ///
    /// The matrix references the view's bytes without owning them.
    pub(crate) fn to_mat(&self) -> Result<Mat> {
        let typ = core::CV_MAKETYPE(self.depth.cv_code(), self.channels as i32);
        // SAFETY: `data` spans exactly rows * cols * channels elements of
        // `depth` (checked at construction) and outlives the returned Mat,
        // which is only used within the borrow of `self`. OpenCV does not
        // write through source matrices, so the *mut cast does not alias a
        // mutable access.
        let mat = unsafe {
            Mat::new_rows_cols_with_data_unsafe_def(
                self.rows as i32,
                self.cols as i32,
                typ,
                self.data.as_ptr() as *mut c_void,
            )
        }?;
        Ok(mat)
    }

    /// Image height in pixels
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Image width in pixels
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Channels per pixel
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Per-channel pixel depth
    #[inline]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// The viewed bytes, row-major with interleaved channels
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// Mutable counterpart of [`ImageView`] for caller-supplied destinations
#[derive(Debug)]
pub struct ImageViewMut<'a> {
    rows: usize,
    cols: usize,
    channels: usize,
    depth: Depth,
    data: &'a mut [u8],
}

impl<'a> ImageViewMut<'a> {
    /// Adapt a contiguous tensor as a mutable image view
    ///
    /// Shared storage is unshared first, so writes through the view never
    /// reach aliasing tensors.
    pub fn from_tensor(tensor: &'a mut Tensor) -> Result<Self> {
        if !tensor.is_contiguous() {
            return Err(Error::invalid_argument(
                "tensor",
                "tensor memory is not contiguous; call contiguous() first",
            ));
        }

        let depth = Depth::from_dtype(tensor.dtype())
            .ok_or_else(|| Error::unsupported_dtype(tensor.dtype(), "tensor_to_view"))?;

        let channels = tensor.channels();
        if channels == 0 || channels > core::CV_CN_MAX as usize {
            return Err(Error::invalid_argument(
                "tensor",
                format!("channel count {channels} outside 1..={}", core::CV_CN_MAX),
            ));
        }
        let rows = dim_i32(tensor.rows(), "rows")? as usize;
        let cols = dim_i32(tensor.cols(), "cols")? as usize;

        Ok(Self {
            rows,
            cols,
            channels,
            depth,
            data: tensor.contiguous_bytes_mut(),
        })
    }

    /// Borrow the view's memory as a writable OpenCV matrix header
    pub(crate) fn to_mat(&mut self) -> Result<Mat> {
        let typ = core::CV_MAKETYPE(self.depth.cv_code(), self.channels as i32);
        // SAFETY: `data` spans exactly rows * cols * channels elements of
        // `depth` (checked at construction), is exclusively borrowed for the
        // lifetime of `self`, and outlives the returned Mat.
        let mat = unsafe {
            Mat::new_rows_cols_with_data_unsafe_def(
                self.rows as i32,
                self.cols as i32,
                typ,
                self.data.as_mut_ptr() as *mut c_void,
            )
        }?;
        Ok(mat)
    }
}

/// Run `f` with an image view over `tensor`, normalizing contiguity
///
/// Non-contiguous tensors are copied to a temporary contiguous buffer that
/// is exclusively owned by this call and dropped before it returns; the view
/// handed to `f` never outlives the call.
pub fn with_image_view<R, F>(tensor: &Tensor, f: F) -> Result<R>
where
    F: FnOnce(&ImageView<'_>) -> Result<R>,
{
    let contiguous = tensor.contiguous();
    let view = ImageView::from_tensor(&contiguous)?;
    f(&view)
}

fn dim_i32(value: usize, arg: &'static str) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| Error::invalid_argument(arg, format!("{value} exceeds i32 range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;

    #[test]
    fn test_from_tensor_derives_geometry() {
        let t = Tensor::zeros(&[4, 6, 3], DType::U8);
        let view = ImageView::from_tensor(&t).unwrap();
        assert_eq!(view.rows(), 4);
        assert_eq!(view.cols(), 6);
        assert_eq!(view.channels(), 3);
        assert_eq!(view.depth(), Depth::U8);
        assert_eq!(view.data().len(), 4 * 6 * 3);
    }

    #[test]
    fn test_rank_2_defaults_to_one_channel() {
        let t = Tensor::zeros(&[4, 6], DType::F32);
        let view = ImageView::from_tensor(&t).unwrap();
        assert_eq!(view.channels(), 1);
        assert_eq!(view.depth(), Depth::F32);
    }

    #[test]
    fn test_rejects_non_contiguous() {
        let t = Tensor::zeros(&[4, 6], DType::U8).transpose(0, 1).unwrap();
        assert!(matches!(
            ImageView::from_tensor(&t),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_rejects_unsupported_dtype() {
        let t = Tensor::zeros(&[2, 2], DType::I64);
        assert!(matches!(
            ImageView::from_tensor(&t),
            Err(Error::UnsupportedDType {
                dtype: DType::I64,
                ..
            })
        ));
    }

    #[test]
    fn test_view_borrows_no_copy() {
        let t = Tensor::from_slice(&[1u8, 2, 3, 4, 5, 6], &[2, 3]);
        let view = ImageView::from_tensor(&t).unwrap();
        assert_eq!(view.data().as_ptr(), t.contiguous_bytes().as_ptr());
    }
}
