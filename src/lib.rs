//! # tensorcv
//!
//! **Dense numeric tensors in and out of OpenCV, with pass-through vision operations.**
//!
//! tensorcv marshals owned, dense numeric arrays into OpenCV's native image
//! container (`cv::Mat`) and back, and exposes a small set of OpenCV
//! algorithms over those arrays: resize, affine warp, affine-transform
//! estimation, color conversion, image load/save, and display. The image
//! algorithms themselves run entirely inside OpenCV (via the `opencv` crate);
//! this crate's own logic is limited to buffer adaptation, parameter
//! validation, and enumeration lookup.
//!
//! ## Design
//!
//! - **Tensors**: rank-2 or rank-3 row-major arrays (rows, cols, optional
//!   channels) with a runtime element type and stride-based layout
//! - **Image views**: non-owning reinterpretations of a contiguous tensor's
//!   memory as a pixel grid, built immediately before an OpenCV call and
//!   discarded after
//! - **Fixed correspondence**: the element-type-to-pixel-depth mapping is a
//!   single explicit table; a type outside it is a typed error, never a
//!   silently degraded result
//! - **Allocate and return**: every operation produces a fresh tensor;
//!   `resize_into`/`warp_affine_into` additionally accept caller-supplied
//!   destinations, validated in full before any OpenCV call
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tensorcv::prelude::*;
//!
//! let img = tensorcv::io::load("photo.png")?;
//! let small = tensorcv::ops::resize(&img, 320, 240, Interpolation::Area)?;
//! let gray = tensorcv::ops::cvt_color(&small, ColorConversion::Bgr2Gray)?;
//! tensorcv::io::save("gray.png", &gray)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `display` (default): window display via OpenCV highgui; disable for
//!   headless builds

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod image;
pub mod io;
pub mod ops;
#[cfg(feature = "display")]
pub mod show;
pub mod tensor;

pub use dtype::{DType, Element};
pub use error::{Error, Result};
pub use image::{with_image_view, Depth, ImageView, ImageViewMut};
pub use ops::{ColorConversion, Interpolation};
pub use tensor::Tensor;

/// Commonly used types and operations
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::image::{with_image_view, Depth, ImageView, ImageViewMut};
    pub use crate::io::{load, save};
    pub use crate::ops::{
        cvt_color, get_affine_transform, resize, resize_into, warp_affine, warp_affine_into,
        ColorConversion, Interpolation,
    };
    #[cfg(feature = "display")]
    pub use crate::show::display;
    pub use crate::tensor::Tensor;
}
