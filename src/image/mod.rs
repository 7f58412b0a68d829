//! Tensor-to-image buffer adaptation
//!
//! This module is the boundary between owned tensors and OpenCV's image
//! container. An [`ImageView`] reinterprets a contiguous tensor's memory as
//! a row-major pixel grid without copying; it is constructed immediately
//! before an OpenCV call and discarded right after, and never owns memory.
//! Copying happens in exactly two places: normalizing a non-contiguous
//! tensor (see [`with_image_view`]) and materializing an OpenCV result back
//! into a freshly owned tensor ([`ImageView::to_tensor`]).

mod depth;
mod view;

pub use depth::Depth;
pub use view::{with_image_view, ImageView, ImageViewMut};

use crate::error::Result;
use crate::tensor::Tensor;
use opencv::core::Mat;
use opencv::prelude::*;

/// Copy an OpenCV matrix out into a freshly owned tensor
///
/// Non-continuous matrices (e.g. region views) are cloned to continuous
/// storage first.
pub(crate) fn tensor_from_mat(mat: Mat) -> Result<Tensor> {
    let mat = if mat.is_continuous() {
        mat
    } else {
        mat.try_clone()?
    };
    let view = ImageView::from_mat(&mat)?;
    Ok(view.to_tensor())
}
