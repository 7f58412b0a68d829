//! Integration tests for the tensor-to-image buffer adapter
//!
//! Tests verify correctness across:
//! - Round-trip through a view for every supported element type
//! - Rank-2 and rank-3 shapes
//! - Contiguity normalization of transposed tensors
//! - Rejection of element types outside the correspondence table

use tensorcv::dtype::{DType, Element};
use tensorcv::image::{with_image_view, Depth, ImageView};
use tensorcv::tensor::Tensor;
use tensorcv::Error;

// ============================================================================
// Round-Trip Tests
// ============================================================================

fn roundtrip<T: Element + PartialEq + std::fmt::Debug>(data: &[T], shape: &[usize]) {
    let t = Tensor::from_slice(data, shape);
    let view = ImageView::from_tensor(&t).unwrap();
    let back = view.to_tensor();

    assert_eq!(back.shape(), t.shape());
    assert_eq!(back.dtype(), t.dtype());
    assert_eq!(back.to_vec::<T>().unwrap(), data);
}

#[test]
fn test_roundtrip_u8() {
    roundtrip(&[0u8, 1, 2, 3, 4, 5], &[2, 3]);
}

#[test]
fn test_roundtrip_i8() {
    roundtrip(&[-3i8, -2, -1, 0, 1, 2], &[2, 3]);
}

#[test]
fn test_roundtrip_u16() {
    roundtrip(&[0u16, 1000, 2000, 3000, 4000, 5000], &[2, 3]);
}

#[test]
fn test_roundtrip_i32() {
    roundtrip(&[-3i32, -2, -1, 0, 1, 2], &[2, 3]);
}

#[test]
fn test_roundtrip_f32() {
    roundtrip(&[0.5f32, 1.5, 2.5, 3.5, 4.5, 5.5], &[2, 3]);
}

#[test]
fn test_roundtrip_f64() {
    roundtrip(&[0.25f64, 1.25, 2.25, 3.25, 4.25, 5.25], &[2, 3]);
}

#[test]
fn test_roundtrip_three_channels() {
    let data: Vec<u8> = (0..24).collect();
    roundtrip(&data, &[2, 4, 3]);
}

#[test]
fn test_roundtrip_four_channels_f32() {
    let data: Vec<f32> = (0..16).map(|v| v as f32).collect();
    roundtrip(&data, &[2, 2, 4]);
}

#[test]
fn test_single_channel_dim_is_squeezed() {
    // A (r, c, 1) tensor and a (r, c) tensor describe the same image; the
    // copy out of a single-channel view is rank 2.
    let t = Tensor::from_slice(&[1u8, 2, 3, 4, 5, 6], &[2, 3, 1]);
    let view = ImageView::from_tensor(&t).unwrap();
    assert_eq!(view.channels(), 1);

    let back = view.to_tensor();
    assert_eq!(back.shape(), &[2, 3]);
    assert_eq!(back.to_vec::<u8>().unwrap(), vec![1, 2, 3, 4, 5, 6]);
}

// ============================================================================
// Type Coverage Tests
// ============================================================================

#[test]
fn test_supported_types_produce_documented_depth() {
    let cases = [
        (DType::U8, Depth::U8),
        (DType::I8, Depth::S8),
        (DType::U16, Depth::U16),
        (DType::I32, Depth::S32),
        (DType::F32, Depth::F32),
        (DType::F64, Depth::F64),
    ];

    for (dtype, depth) in cases {
        let t = Tensor::zeros(&[2, 2], dtype);
        let view = ImageView::from_tensor(&t).unwrap();
        assert_eq!(view.depth(), depth, "dtype {dtype}");
    }
}

#[test]
fn test_unsupported_types_fail() {
    for dtype in [DType::I16, DType::U32, DType::U64, DType::I64] {
        let t = Tensor::zeros(&[2, 2], dtype);
        let err = ImageView::from_tensor(&t).unwrap_err();
        assert!(
            matches!(err, Error::UnsupportedDType { dtype: d, .. } if d == dtype),
            "dtype {dtype}: got {err}"
        );
    }
}

// ============================================================================
// Contiguity Normalization Tests
// ============================================================================

#[test]
fn test_transposed_tensor_views_in_logical_order() {
    // [[0, 1, 2], [3, 4, 5]] transposed is [[0, 3], [1, 4], [2, 5]]
    let t = Tensor::from_slice(&[0u8, 1, 2, 3, 4, 5], &[2, 3]);
    let transposed = t.transpose(0, 1).unwrap();
    assert!(!transposed.is_contiguous());

    let back = with_image_view(&transposed, |view| {
        assert_eq!(view.rows(), 3);
        assert_eq!(view.cols(), 2);
        Ok(view.to_tensor())
    })
    .unwrap();

    assert_eq!(back.shape(), &[3, 2]);
    assert_eq!(back.to_vec::<u8>().unwrap(), vec![0, 3, 1, 4, 2, 5]);
}

#[test]
fn test_direct_view_of_non_contiguous_is_rejected() {
    let t = Tensor::from_slice(&[0f32, 1.0, 2.0, 3.0], &[2, 2]);
    let transposed = t.transpose(0, 1).unwrap();
    assert!(matches!(
        ImageView::from_tensor(&transposed),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_normalization_does_not_touch_source() {
    let t = Tensor::from_slice(&[0u8, 1, 2, 3, 4, 5], &[2, 3]);
    let transposed = t.transpose(0, 1).unwrap();
    with_image_view(&transposed, |_| Ok(())).unwrap();

    // The temporary contiguous copy is separately owned; the source view is
    // unchanged afterwards.
    assert!(!transposed.is_contiguous());
    assert_eq!(transposed.to_vec::<u8>().unwrap(), vec![0, 3, 1, 4, 2, 5]);
    assert_eq!(t.to_vec::<u8>().unwrap(), vec![0, 1, 2, 3, 4, 5]);
}
