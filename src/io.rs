//! Image file load and save

use crate::error::{Error, Result};
use crate::image::{tensor_from_mat, with_image_view};
use crate::tensor::Tensor;
use opencv::core::{self, Vector};
use opencv::imgcodecs;
use opencv::prelude::*;
use std::path::Path;
use tracing::{debug, error};

/// Load an image file into a tensor
///
/// The file is decoded unchanged (`IMREAD_UNCHANGED`): channel count and
/// pixel depth are preserved, and the tensor's element type follows the
/// decoded depth through the fixed correspondence table. An unreadable or
/// undecodable file fails with a forwarded load error; no tensor is
/// produced.
pub fn load(path: impl AsRef<Path>) -> Result<Tensor> {
    let path = path.as_ref();
    let path_str = path_str(path)?;

    let mat = imgcodecs::imread(path_str, imgcodecs::IMREAD_UNCHANGED)?;
    if mat.empty() {
        // imread reports unreadable files with an empty matrix, not an
        // exception; surface it as the load failure it is.
        error!("imread returned no image for {}", path.display());
        return Err(Error::Vision(opencv::Error::new(
            core::StsError,
            format!("imread: cannot load image from '{}'", path.display()),
        )));
    }

    debug!(
        "loaded {} ({}x{}, {} channels)",
        path.display(),
        mat.cols(),
        mat.rows(),
        mat.channels()
    );
    tensor_from_mat(mat)
}

/// Save a tensor image to a file
///
/// The format is chosen by OpenCV from the file extension. A refused encode
/// (unknown extension, unwritable path) fails with a forwarded save error.
pub fn save(path: impl AsRef<Path>, tensor: &Tensor) -> Result<()> {
    let path = path.as_ref();
    let path_str = path_str(path)?;

    with_image_view(tensor, |view| {
        let mat = view.to_mat()?;
        let written = imgcodecs::imwrite(path_str, &mat, &Vector::<i32>::new())?;
        if !written {
            error!("imwrite refused {}", path.display());
            return Err(Error::Vision(opencv::Error::new(
                core::StsError,
                format!("imwrite: cannot write image to '{}'", path.display()),
            )));
        }
        debug!(
            "saved {} ({}x{}, {} channels)",
            path.display(),
            view.cols(),
            view.rows(),
            view.channels()
        );
        Ok(())
    })
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| Error::invalid_argument("path", "path is not valid UTF-8"))
}
