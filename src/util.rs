// Copyright (c) Radzivon Bartoshyk. All rights reserved.

//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
// 1.  Redistributions of source code must retain the above copyright notice, this
// list of conditions and the following disclaimer.
//
// 2.  Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3.  Neither the name of the copyright holder nor the names of its
// contributors may be used to endorse or promote products derived from
// this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
use crate::dispatch::{Backend, KernelKind};
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KernelError {
    ZeroBaseSize,
    MinimumSliceSizeMismatch(MismatchedSize),
    MinimumStrideSizeMismatch(MismatchedSize),
    ImagesMustMatch,
    UnsupportedMatrixSize(KernelKind, u32),
    BackendUnavailable(Backend),
    UnsupportedBitDepth(u32),
    InvalidThreshold(f32),
    InvalidCoordinates(usize),
    InvalidMatrix(usize),
    CoefficientOutOfRange(f64),
    PlaneCountMismatch(MismatchedSize),
    ThreadPoolCreation,
}

impl Error for KernelError {}

impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            KernelError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum plane slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            KernelError::MinimumStrideSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
            KernelError::ZeroBaseSize => f.write_str("Plane size must not be zero"),
            KernelError::ImagesMustMatch => {
                f.write_str("Source and destination planes must match in their dimensions")
            }
            KernelError::UnsupportedMatrixSize(kind, size) => f.write_fmt(format_args!(
                "Matrix size {size} is not supported by {kind:?}"
            )),
            KernelError::BackendUnavailable(backend) => f.write_fmt(format_args!(
                "Backend {backend:?} is not available on this CPU or in this build"
            )),
            KernelError::UnsupportedBitDepth(bits) => f.write_fmt(format_args!(
                "Only 8..16 bit integer planes are supported, but received {bits}"
            )),
            KernelError::InvalidThreshold(threshold) => f.write_fmt(format_args!(
                "Threshold {threshold} must be non negative and not bigger than the maximum sample value"
            )),
            KernelError::InvalidCoordinates(count) => f.write_fmt(format_args!(
                "Coordinates must contain exactly 8 entries, but received {count}"
            )),
            KernelError::InvalidMatrix(count) => f.write_fmt(format_args!(
                "Convolution matrix with {count} elements is not supported for this mode"
            )),
            KernelError::CoefficientOutOfRange(value) => f.write_fmt(format_args!(
                "Integer convolution coefficients must lie in -1023..=1023, but received {value}"
            )),
            KernelError::PlaneCountMismatch(size) => f.write_fmt(format_args!(
                "Plane count mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            KernelError::ThreadPoolCreation => f.write_str("Failed to create a thread pool"),
        }
    }
}

pub(crate) fn check_slice_size<T>(
    arr: &[T],
    stride: usize,
    width: usize,
    height: usize,
) -> Result<(), KernelError> {
    if width == 0 || height == 0 {
        return Err(KernelError::ZeroBaseSize);
    }
    if stride < width {
        return Err(KernelError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: width,
            received: stride,
        }));
    }
    if arr.len() < stride * (height - 1) + width {
        return Err(KernelError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: stride * (height - 1) + width,
            received: arr.len(),
        }));
    }
    Ok(())
}
