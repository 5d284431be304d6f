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
#![allow(clippy::too_many_arguments)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Pixel kernels over single channel planes: 3x3 neighbourhood operators, 3x3 and
//! 5x5 convolutions, 1D and separable convolutions up to 25 taps.
//!
//! Every kernel exists for `u8`, `u16` and `f32` samples and for each compiled in
//! backend. Borders are mirrored without repeating the edge sample.
//!
//! ```
//! use plane_kernels::{filter_plane, Backend, ConvolutionMode, FilterSettings, Plane, PlaneMut,
//!     SampleFormat};
//!
//! let data = [10u8; 16];
//! let src = Plane::borrow(&data, 4, 4);
//! let mut dst = PlaneMut::alloc(4, 4);
//! let (kind, params) = FilterSettings::new(SampleFormat::Byte, 8)
//!     .unwrap()
//!     .convolution(&[1.; 9], ConvolutionMode::Square, None, 0., true)
//!     .unwrap();
//! filter_plane(kind, &src, &mut dst, &params, Backend::best()).unwrap();
//! assert_eq!(dst.data.borrow(), &[10u8; 16]);
//! ```

#[cfg(all(target_arch = "x86_64", feature = "avx"))]
mod avx;
mod dispatch;
mod edge_mode;
mod filter1d;
mod filter2d;
mod frame;
pub mod kernels;
mod lanes;
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
mod neon;
mod params;
mod plane;
mod plane_filter;
mod reference;
mod sample;
mod settings;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
mod sse;
mod threading_policy;
mod util;

pub use dispatch::{select_kernel, Backend, KernelKind, KernelSample, PlaneKernel};
pub use frame::filter_planes;
pub use params::{FilterParams, FULL_STENCIL, MAX_MATRIX_SIZE};
pub use plane::{BufferStore, Plane, PlaneMut};
pub use plane_filter::filter_plane;
pub use sample::{Sample, SampleFormat};
pub use settings::{ConvolutionMode, FilterSettings, MAX_COEFFICIENT};
pub use threading_policy::ThreadingPolicy;
pub use util::{KernelError, MismatchedSize};
