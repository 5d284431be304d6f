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
//! Named kernel entry points, `kernels::<backend>::<family>_<sample>`.
//!
//! Each function resolves its variant through [crate::select_kernel] and panics when
//! the backend is unavailable on the running CPU or `params.matrixsize` has no
//! variant. Use [crate::filter_plane] for the checked path.
//!
//! ```
//! use plane_kernels::{kernels, FilterParams};
//!
//! let src = [200u8];
//! let mut dst = [0u8];
//! kernels::scalar::sobel_3x3_byte(&src, 1, &mut dst, 1, &FilterParams::default(), 1, 1);
//! assert_eq!(dst, [0]);
//! ```

/// Portable kernels, available everywhere.
pub mod scalar {
    crate::dispatch::named_kernels!(crate::Backend::Scalar);
}

/// SSE2 kernels, 4 lanes.
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
#[cfg_attr(docsrs, doc(cfg(feature = "sse")))]
pub mod sse2 {
    crate::dispatch::named_kernels!(crate::Backend::Sse2);
}

/// AVX2 kernels, 8 lanes.
#[cfg(all(target_arch = "x86_64", feature = "avx"))]
#[cfg_attr(docsrs, doc(cfg(feature = "avx")))]
pub mod avx2 {
    crate::dispatch::named_kernels!(crate::Backend::Avx2);
}

/// NEON kernels, 4 lanes.
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
#[cfg_attr(docsrs, doc(cfg(feature = "neon")))]
pub mod neon {
    crate::dispatch::named_kernels!(crate::Backend::Neon);
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use crate::Backend;
    use crate::FilterParams;

    #[test]
    fn test_named_kernels_match_scalar() {
        let (width, height) = (21usize, 6usize);
        let src: Vec<u16> = (0..width * height).map(|i| (i * 53 % 4096) as u16).collect();
        let mut params = FilterParams {
            maxval: 4095,
            threshold: 4095,
            matrixsize: 7,
            div: 1. / 64.,
            ..FilterParams::default()
        };
        params.matrix[..7].copy_from_slice(&[1, 6, 15, 20, 15, 6, 1]);
        let mut expected = vec![0u16; src.len()];
        super::scalar::conv_sep_2d_word(&src, width, &mut expected, width, &params, width, height);
        let mut expected_median = vec![0u16; src.len()];
        super::scalar::median_3x3_word(
            &src,
            width,
            &mut expected_median,
            width,
            &params,
            width,
            height,
        );

        #[allow(unused_mut, unused_variables)]
        let mut dst = vec![0u16; src.len()];
        #[allow(unused_mut, unused_variables)]
        let mut median = vec![0u16; src.len()];
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        if Backend::Avx2.is_available() {
            super::avx2::conv_sep_2d_word(&src, width, &mut dst, width, &params, width, height);
            assert_eq!(dst, expected);
            super::avx2::median_3x3_word(&src, width, &mut median, width, &params, width, height);
            assert_eq!(median, expected_median);
        }
        #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
        if Backend::Sse2.is_available() {
            super::sse2::conv_sep_2d_word(&src, width, &mut dst, width, &params, width, height);
            assert_eq!(dst, expected);
            super::sse2::median_3x3_word(&src, width, &mut median, width, &params, width, height);
            assert_eq!(median, expected_median);
        }
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        if Backend::Neon.is_available() {
            super::neon::conv_sep_2d_word(&src, width, &mut dst, width, &params, width, height);
            assert_eq!(dst, expected);
            super::neon::median_3x3_word(&src, width, &mut median, width, &params, width, height);
            assert_eq!(median, expected_median);
        }
    }

    #[test]
    #[should_panic]
    fn test_square_convolution_rejects_other_matrix_size() {
        let params = FilterParams {
            matrixsize: 25,
            ..FilterParams::default()
        };
        let src = [0u8; 16];
        let mut dst = [0u8; 16];
        super::scalar::conv_3x3_byte(&src, 4, &mut dst, 4, &params, 4, 4);
    }

    #[test]
    #[should_panic]
    fn test_unsupported_tap_count_panics() {
        let params = FilterParams {
            matrixsize: 4,
            ..FilterParams::default()
        };
        let src = [0u8; 16];
        let mut dst = [0u8; 16];
        super::scalar::conv_h_1d_byte(&src, 4, &mut dst, 4, &params, 4, 4);
    }
}
