//! Geometric operations: resize, affine warp, affine-transform estimation

use super::target_size;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::image::{tensor_from_mat, with_image_view, ImageViewMut};
use crate::tensor::Tensor;
use opencv::core::{self, Mat, Point2f, Scalar, Vector};
use opencv::imgproc;
use opencv::prelude::*;
use std::fmt;
use tracing::debug;

/// Interpolation mode for resize and warp
///
/// The variants are OpenCV's interpolation codes, forwarded verbatim.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Nearest-neighbor
    Nearest,
    /// Bilinear
    Linear,
    /// Bicubic over a 4x4 neighborhood
    Cubic,
    /// Pixel-area relation (preferred for decimation)
    Area,
    /// Lanczos over an 8x8 neighborhood
    Lanczos4,
}

/// Name-to-mode table exposed to hosting environments
///
/// Immutable and process-wide; looked up by [`Interpolation::from_name`].
pub const INTERPOLATION_NAMES: [(&str, Interpolation); 5] = [
    ("nearest", Interpolation::Nearest),
    ("linear", Interpolation::Linear),
    ("cubic", Interpolation::Cubic),
    ("area", Interpolation::Area),
    ("lanczos4", Interpolation::Lanczos4),
];

impl Interpolation {
    /// The OpenCV interpolation constant for this mode
    pub const fn cv_code(self) -> i32 {
        match self {
            Self::Nearest => imgproc::INTER_NEAREST,
            Self::Linear => imgproc::INTER_LINEAR,
            Self::Cubic => imgproc::INTER_CUBIC,
            Self::Area => imgproc::INTER_AREA,
            Self::Lanczos4 => imgproc::INTER_LANCZOS4,
        }
    }

    /// The name this mode is looked up by
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
            Self::Cubic => "cubic",
            Self::Area => "area",
            Self::Lanczos4 => "lanczos4",
        }
    }

    /// Look up a mode by name
    pub fn from_name(name: &str) -> Result<Self> {
        INTERPOLATION_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, mode)| *mode)
            .ok_or_else(|| {
                Error::invalid_argument("interpolation", format!("unknown mode '{name}'"))
            })
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resize a tensor image to the given width and height
///
/// Allocates and returns a fresh tensor shaped (height, width) or
/// (height, width, channels).
pub fn resize(src: &Tensor, width: usize, height: usize, interp: Interpolation) -> Result<Tensor> {
    let dsize = target_size(width, height)?;
    debug!(
        "resize {}x{} -> {}x{} ({})",
        src.cols(),
        src.rows(),
        width,
        height,
        interp
    );

    with_image_view(src, |view| {
        let src_mat = view.to_mat()?;
        let mut dst = Mat::default();
        imgproc::resize(&src_mat, &mut dst, dsize, 0.0, 0.0, interp.cv_code())?;
        tensor_from_mat(dst)
    })
}

/// Resize a tensor image into a caller-supplied destination
///
/// The destination must be contiguous, match the source dtype and channel
/// count, and be shaped exactly (height, width[, channels]); any mismatch
/// fails with `InvalidArgument` before OpenCV is called, leaving the
/// destination untouched.
pub fn resize_into(
    src: &Tensor,
    dst: &mut Tensor,
    width: usize,
    height: usize,
    interp: Interpolation,
) -> Result<()> {
    let dsize = target_size(width, height)?;
    check_destination(src, dst, width, height)?;

    with_image_view(src, |view| {
        let src_mat = view.to_mat()?;
        let mut dst_view = ImageViewMut::from_tensor(dst)?;
        let mut dst_mat = dst_view.to_mat()?;
        imgproc::resize(&src_mat, &mut dst_mat, dsize, 0.0, 0.0, interp.cv_code())?;
        Ok(())
    })
}

/// Warp a tensor image by a 2x3 affine transform
///
/// `matrix` is a rank-2 (2, 3) tensor of f32 or f64. With `fill` set,
/// outlier pixels are filled with zeros (`WARP_FILL_OUTLIERS`), matching
/// OpenCV's constant-border behavior.
pub fn warp_affine(
    src: &Tensor,
    matrix: &Tensor,
    width: usize,
    height: usize,
    interp: Interpolation,
    fill: bool,
) -> Result<Tensor> {
    let dsize = target_size(width, height)?;
    let m = warp_matrix(matrix)?;
    let flags = warp_flags(interp, fill);
    debug!(
        "warp_affine {}x{} -> {}x{} ({}, fill={})",
        src.cols(),
        src.rows(),
        width,
        height,
        interp,
        fill
    );

    with_image_view(src, |view| {
        let src_mat = view.to_mat()?;
        let mut dst = Mat::default();
        imgproc::warp_affine(
            &src_mat,
            &mut dst,
            &m,
            dsize,
            flags,
            core::BORDER_CONSTANT,
            Scalar::all(0.0),
        )?;
        tensor_from_mat(dst)
    })
}

/// Warp a tensor image into a caller-supplied destination
///
/// Destination requirements and failure behavior match [`resize_into`].
pub fn warp_affine_into(
    src: &Tensor,
    dst: &mut Tensor,
    matrix: &Tensor,
    width: usize,
    height: usize,
    interp: Interpolation,
    fill: bool,
) -> Result<()> {
    let dsize = target_size(width, height)?;
    let m = warp_matrix(matrix)?;
    check_destination(src, dst, width, height)?;
    let flags = warp_flags(interp, fill);

    with_image_view(src, |view| {
        let src_mat = view.to_mat()?;
        let mut dst_view = ImageViewMut::from_tensor(dst)?;
        let mut dst_mat = dst_view.to_mat()?;
        imgproc::warp_affine(
            &src_mat,
            &mut dst_mat,
            &m,
            dsize,
            flags,
            core::BORDER_CONSTANT,
            Scalar::all(0.0),
        )?;
        Ok(())
    })
}

/// Estimate the affine transform mapping three source points to three
/// destination points
///
/// Both point sets are rank-2 (3, 2) tensors of f32 or f64, one (x, y) row
/// per point. Returns the 2x3 transform as a rank-2 f64 tensor, suitable
/// for [`warp_affine`].
pub fn get_affine_transform(from: &Tensor, to: &Tensor) -> Result<Tensor> {
    let src_pts = point_triplet(from, "from")?;
    let dst_pts = point_triplet(to, "to")?;

    let m = imgproc::get_affine_transform(&src_pts, &dst_pts)?;
    tensor_from_mat(m)
}

fn warp_flags(interp: Interpolation, fill: bool) -> i32 {
    let fill_flag = if fill { imgproc::WARP_FILL_OUTLIERS } else { 0 };
    interp.cv_code() | fill_flag
}

/// Validate a caller-supplied destination against the requested output
fn check_destination(src: &Tensor, dst: &Tensor, width: usize, height: usize) -> Result<()> {
    if dst.dtype() != src.dtype() {
        return Err(Error::invalid_argument(
            "dst",
            format!("destination dtype {} != source dtype {}", dst.dtype(), src.dtype()),
        ));
    }
    if !dst.is_contiguous() {
        return Err(Error::invalid_argument(
            "dst",
            "destination memory is not contiguous",
        ));
    }
    if dst.rows() != height || dst.cols() != width || dst.channels() != src.channels() {
        return Err(Error::invalid_argument(
            "dst",
            format!(
                "destination is {}x{}x{}, operation produces {}x{}x{}",
                dst.cols(),
                dst.rows(),
                dst.channels(),
                width,
                height,
                src.channels()
            ),
        ));
    }
    Ok(())
}

/// Read a (rows, cols) f32/f64 tensor out as f64 values
fn matrix_values(
    t: &Tensor,
    arg: &'static str,
    rows: usize,
    cols: usize,
) -> Result<Vec<f64>> {
    if t.ndim() != 2 || t.rows() != rows || t.cols() != cols {
        return Err(Error::invalid_argument(
            arg,
            format!("expected a {rows}x{cols} matrix, got shape {:?}", t.shape()),
        ));
    }
    match t.dtype() {
        DType::F32 => Ok(t.to_vec::<f32>()?.into_iter().map(f64::from).collect()),
        DType::F64 => t.to_vec::<f64>(),
        other => Err(Error::invalid_argument(
            arg,
            format!("expected f32 or f64 elements, got {other}"),
        )),
    }
}

/// Build the 2x3 CV_64F warp matrix OpenCV expects
fn warp_matrix(t: &Tensor) -> Result<Mat> {
    let vals = matrix_values(t, "matrix", 2, 3)?;

    let mut m = Mat::new_rows_cols_with_default(2, 3, core::CV_64F, Scalar::all(0.0))?;
    for r in 0..2 {
        for c in 0..3 {
            *m.at_2d_mut::<f64>(r, c)? = vals[(r * 3 + c) as usize];
        }
    }
    Ok(m)
}

/// Read a (3, 2) point tensor into an OpenCV point vector
fn point_triplet(t: &Tensor, arg: &'static str) -> Result<Vector<Point2f>> {
    let vals = matrix_values(t, arg, 3, 2)?;

    let mut pts = Vector::<Point2f>::new();
    for pair in vals.chunks_exact(2) {
        pts.push(Point2f::new(pair[0] as f32, pair[1] as f32));
    }
    Ok(pts)
}
