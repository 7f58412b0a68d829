//! Integration tests for color-space conversion

use tensorcv::dtype::DType;
use tensorcv::ops::{cvt_color, ColorConversion};
use tensorcv::tensor::Tensor;
use tensorcv::Error;

#[test]
fn test_bgr_to_gray_collapses_channels() {
    // Equal B, G, R components convert to exactly that gray value
    let src = Tensor::from_slice(&[100u8; 12], &[2, 2, 3]);
    let gray = cvt_color(&src, ColorConversion::Bgr2Gray).unwrap();

    assert_eq!(gray.shape(), &[2, 2]);
    assert_eq!(gray.dtype(), DType::U8);
    assert_eq!(gray.to_vec::<u8>().unwrap(), vec![100u8; 4]);
}

#[test]
fn test_gray_to_bgr_broadcasts_channels() {
    let src = Tensor::from_slice(&[5u8, 6, 7, 8], &[2, 2]);
    let bgr = cvt_color(&src, ColorConversion::Gray2Bgr).unwrap();

    assert_eq!(bgr.shape(), &[2, 2, 3]);
    assert_eq!(
        bgr.to_vec::<u8>().unwrap(),
        vec![5, 5, 5, 6, 6, 6, 7, 7, 7, 8, 8, 8]
    );
}

#[test]
fn test_bgr_to_bgra_adds_opaque_alpha() {
    let src = Tensor::from_slice(&[10u8, 20, 30, 40, 50, 60], &[1, 2, 3]);
    let bgra = cvt_color(&src, ColorConversion::Bgr2Bgra).unwrap();

    assert_eq!(bgra.shape(), &[1, 2, 4]);
    assert_eq!(
        bgra.to_vec::<u8>().unwrap(),
        vec![10, 20, 30, 255, 40, 50, 60, 255]
    );
}

#[test]
fn test_bgr_rgb_swap_is_involutive() {
    let src = Tensor::from_slice(&[1u8, 2, 3, 4, 5, 6], &[1, 2, 3]);

    let rgb = cvt_color(&src, ColorConversion::Bgr2Rgb).unwrap();
    assert_eq!(rgb.to_vec::<u8>().unwrap(), vec![3, 2, 1, 6, 5, 4]);

    let back = cvt_color(&rgb, ColorConversion::Rgb2Bgr).unwrap();
    assert_eq!(back.to_vec::<u8>().unwrap(), src.to_vec::<u8>().unwrap());
}

#[test]
fn test_conversion_preserves_dtype() {
    let src = Tensor::from_slice(&[0.5f32; 12], &[2, 2, 3]);
    let hsv = cvt_color(&src, ColorConversion::Bgr2Hsv).unwrap();

    assert_eq!(hsv.dtype(), DType::F32);
    assert_eq!(hsv.shape(), &[2, 2, 3]);
}

#[test]
fn test_unsupported_dtype_rejected_before_call() {
    let src = Tensor::zeros(&[2, 2, 3], DType::I64);
    assert!(matches!(
        cvt_color(&src, ColorConversion::Bgr2Gray),
        Err(Error::UnsupportedDType { .. })
    ));
}
