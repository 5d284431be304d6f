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
//! Portable per pixel implementations.
//!
//! Every pixel is computed on its own from mirrored coordinates, without vectors or
//! edge blocks. These are the `Scalar` backend and the yardstick for the vector ones.
mod convolution;
mod neighborhood;

use crate::dispatch::{KernelKind, PlaneKernel};
use crate::sample::Sample;

pub(crate) use convolution::{conv_h, conv_sep, conv_v, convolve_2d};
pub(crate) use neighborhood::{deflate, inflate, maximum, median, minimum, prewitt, sobel};

/// Scalar kernel for `(kind, matrixsize)`, `None` when the kind rejects the matrix size.
pub(crate) fn select<T: Sample>(kind: KernelKind, matrixsize: u32) -> Option<PlaneKernel<T>> {
    if !kind.supports_matrix_size(matrixsize) {
        return None;
    }
    let kernel: PlaneKernel<T> = match kind {
        KernelKind::Prewitt => prewitt::<T>,
        KernelKind::Sobel => sobel::<T>,
        KernelKind::Minimum => minimum::<T>,
        KernelKind::Maximum => maximum::<T>,
        KernelKind::Median => median::<T>,
        KernelKind::Deflate => deflate::<T>,
        KernelKind::Inflate => inflate::<T>,
        KernelKind::Convolution3x3 => convolve_2d::<T, 3>,
        KernelKind::Convolution5x5 => convolve_2d::<T, 5>,
        KernelKind::ConvolutionH => conv_h::<T>,
        KernelKind::ConvolutionV => conv_v::<T>,
        KernelKind::ConvolutionSeparable => conv_sep::<T>,
    };
    Some(kernel)
}

#[cfg(test)]
mod equivalence;
