//! Color-space conversion

use crate::error::{Error, Result};
use crate::image::{tensor_from_mat, with_image_view};
use crate::tensor::Tensor;
use opencv::core::Mat;
use opencv::imgproc;
use std::fmt;
use tracing::debug;

/// Color-space conversion code
///
/// The variants are OpenCV's conversion codes, forwarded verbatim; the set
/// covers BGR to and from BGRA, RGB, gray, XYZ, HSV, HLS, and Lab.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorConversion {
    /// BGR to BGRA (add alpha channel)
    Bgr2Bgra,
    /// BGRA to BGR (drop alpha channel)
    Bgra2Bgr,
    /// BGR to RGB (swap channel order)
    Bgr2Rgb,
    /// RGB to BGR (swap channel order)
    Rgb2Bgr,
    /// BGR to single-channel gray
    Bgr2Gray,
    /// Single-channel gray to BGR
    Gray2Bgr,
    /// BGR to CIE XYZ
    Bgr2Xyz,
    /// CIE XYZ to BGR
    Xyz2Bgr,
    /// BGR to HSV
    Bgr2Hsv,
    /// HSV to BGR
    Hsv2Bgr,
    /// BGR to HLS
    Bgr2Hls,
    /// HLS to BGR
    Hls2Bgr,
    /// BGR to CIE Lab
    Bgr2Lab,
    /// CIE Lab to BGR
    Lab2Bgr,
}

/// Name-to-code table exposed to hosting environments
///
/// Immutable and process-wide; looked up by [`ColorConversion::from_name`].
pub const COLOR_CONVERSION_NAMES: [(&str, ColorConversion); 14] = [
    ("bgr2bgra", ColorConversion::Bgr2Bgra),
    ("bgra2bgr", ColorConversion::Bgra2Bgr),
    ("bgr2rgb", ColorConversion::Bgr2Rgb),
    ("rgb2bgr", ColorConversion::Rgb2Bgr),
    ("bgr2gray", ColorConversion::Bgr2Gray),
    ("gray2bgr", ColorConversion::Gray2Bgr),
    ("bgr2xyz", ColorConversion::Bgr2Xyz),
    ("xyz2bgr", ColorConversion::Xyz2Bgr),
    ("bgr2hsv", ColorConversion::Bgr2Hsv),
    ("hsv2bgr", ColorConversion::Hsv2Bgr),
    ("bgr2hls", ColorConversion::Bgr2Hls),
    ("hls2bgr", ColorConversion::Hls2Bgr),
    ("bgr2lab", ColorConversion::Bgr2Lab),
    ("lab2bgr", ColorConversion::Lab2Bgr),
];

impl ColorConversion {
    /// The OpenCV conversion constant for this code
    pub const fn cv_code(self) -> i32 {
        match self {
            Self::Bgr2Bgra => imgproc::COLOR_BGR2BGRA,
            Self::Bgra2Bgr => imgproc::COLOR_BGRA2BGR,
            Self::Bgr2Rgb => imgproc::COLOR_BGR2RGB,
            Self::Rgb2Bgr => imgproc::COLOR_RGB2BGR,
            Self::Bgr2Gray => imgproc::COLOR_BGR2GRAY,
            Self::Gray2Bgr => imgproc::COLOR_GRAY2BGR,
            Self::Bgr2Xyz => imgproc::COLOR_BGR2XYZ,
            Self::Xyz2Bgr => imgproc::COLOR_XYZ2BGR,
            Self::Bgr2Hsv => imgproc::COLOR_BGR2HSV,
            Self::Hsv2Bgr => imgproc::COLOR_HSV2BGR,
            Self::Bgr2Hls => imgproc::COLOR_BGR2HLS,
            Self::Hls2Bgr => imgproc::COLOR_HLS2BGR,
            Self::Bgr2Lab => imgproc::COLOR_BGR2Lab,
            Self::Lab2Bgr => imgproc::COLOR_Lab2BGR,
        }
    }

    /// The name this code is looked up by
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bgr2Bgra => "bgr2bgra",
            Self::Bgra2Bgr => "bgra2bgr",
            Self::Bgr2Rgb => "bgr2rgb",
            Self::Rgb2Bgr => "rgb2bgr",
            Self::Bgr2Gray => "bgr2gray",
            Self::Gray2Bgr => "gray2bgr",
            Self::Bgr2Xyz => "bgr2xyz",
            Self::Xyz2Bgr => "xyz2bgr",
            Self::Bgr2Hsv => "bgr2hsv",
            Self::Hsv2Bgr => "hsv2bgr",
            Self::Bgr2Hls => "bgr2hls",
            Self::Hls2Bgr => "hls2bgr",
            Self::Bgr2Lab => "bgr2lab",
            Self::Lab2Bgr => "lab2bgr",
        }
    }

    /// Look up a conversion by name
    pub fn from_name(name: &str) -> Result<Self> {
        COLOR_CONVERSION_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, code)| *code)
            .ok_or_else(|| {
                Error::invalid_argument("conversion", format!("unknown conversion '{name}'"))
            })
    }
}

impl fmt::Display for ColorConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Convert a tensor image between color spaces
///
/// Allocates and returns a fresh tensor; the output channel count is
/// whatever OpenCV produces for the conversion (e.g. 1 for `Bgr2Gray`,
/// 4 for `Bgr2Bgra`).
pub fn cvt_color(src: &Tensor, code: ColorConversion) -> Result<Tensor> {
    debug!("cvt_color {}x{}x{} ({})", src.cols(), src.rows(), src.channels(), code);

    with_image_view(src, |view| {
        let src_mat = view.to_mat()?;
        let mut dst = Mat::default();
        imgproc::cvt_color_def(&src_mat, &mut dst, code.cv_code())?;
        tensor_from_mat(dst)
    })
}
