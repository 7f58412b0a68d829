//! Tensor types
//!
//! This module provides the core `Tensor` type, an owned dense numeric array
//! of rank 2 or 3 (rows, cols, optional channels), and the `Layout`
//! describing its shape, strides, and contiguity.

mod core;
mod layout;

pub use core::Tensor;
pub use layout::{Layout, Shape, Strides};
