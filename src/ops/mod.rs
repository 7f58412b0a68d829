//! Pass-through image operations
//!
//! Each operation adapts its input tensor(s) to image views, invokes the
//! corresponding OpenCV primitive with caller-supplied parameters, and
//! adapts the result back into a freshly owned tensor. No state is carried
//! between calls; an OpenCV failure is forwarded to the caller unchanged.

mod color;
mod geometry;

pub use color::{cvt_color, ColorConversion, COLOR_CONVERSION_NAMES};
pub use geometry::{
    get_affine_transform, resize, resize_into, warp_affine, warp_affine_into, Interpolation,
    INTERPOLATION_NAMES,
};

use crate::error::{Error, Result};
use opencv::core::Size;

/// Convert a requested output size to an OpenCV `Size`
pub(crate) fn target_size(width: usize, height: usize) -> Result<Size> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_argument(
            "size",
            format!("target size {width}x{height} must be non-zero"),
        ));
    }
    let w = i32::try_from(width)
        .map_err(|_| Error::invalid_argument("width", format!("{width} exceeds i32 range")))?;
    let h = i32::try_from(height)
        .map_err(|_| Error::invalid_argument("height", format!("{height} exceeds i32 range")))?;
    Ok(Size::new(w, h))
}
