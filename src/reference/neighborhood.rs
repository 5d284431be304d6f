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
use crate::edge_mode::reflect_101;
use crate::filter2d::MEDIAN_NETWORK;
use crate::params::FilterParams;
use crate::sample::{sample_max, sample_min, Sample};

/// Mirrored `D`x`D` neighbourhood of `(x, y)`, `n[row][column]`.
pub(crate) fn neighbourhood<T: Sample, const D: usize>(
    src: &[T],
    src_stride: usize,
    width: usize,
    height: usize,
    x: usize,
    y: usize,
) -> [[T::Work; D]; D] {
    let radius = (D / 2) as isize;
    let mut n = [[T::zero(); D]; D];
    for (r, dst) in n.iter_mut().enumerate() {
        let row = reflect_101(y as isize + r as isize - radius, height);
        for (c, v) in dst.iter_mut().enumerate() {
            let column = reflect_101(x as isize + c as isize - radius, width);
            *v = src[row * src_stride + column].work();
        }
    }
    n
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn for_each_pixel<T: Sample, const D: usize>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    width: usize,
    height: usize,
    op: impl Fn(&[[T::Work; D]; D]) -> T,
) {
    for y in 0..height {
        let dst_row = &mut dst[y * dst_stride..y * dst_stride + width];
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let n = neighbourhood::<T, D>(src, src_stride, width, height, x, y);
            *dst = op(&n);
        }
    }
}

const SOBEL_X: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];
const PREWITT_X: [i32; 9] = [-1, -1, -1, 0, 0, 0, 1, 1, 1];

/// Bottom row taps first, then the top row, matching the gradient summation order.
const GRADIENT_ORDER: [usize; 6] = [6, 7, 8, 0, 1, 2];

fn gradient<T: Sample>(n: &[[T::Work; 3]; 3], taps: &[i32; 9], params: &FilterParams) -> T {
    let flat: [T::Work; 9] = [
        n[0][0], n[0][1], n[0][2], n[1][0], n[1][1], n[1][2], n[2][0], n[2][1], n[2][2],
    ];
    // Same taps transposed for the vertical gradient.
    let flat_t: [T::Work; 9] = [
        n[0][0], n[1][0], n[2][0], n[0][1], n[1][1], n[2][1], n[0][2], n[1][2], n[2][2],
    ];
    let mut gx = T::zero();
    let mut gy = T::zero();
    for &k in GRADIENT_ORDER.iter() {
        gx = T::accumulate(gx, flat[k], T::unit_weight(taps[k]));
        gy = T::accumulate(gy, flat_t[k], T::unit_weight(taps[k]));
    }
    let gx = T::to_f32(gx);
    let gy = T::to_f32(gy);
    T::from_f32((gx * gx + gy * gy).sqrt() * params.scale, params.maxval)
}

macro_rules! reference_kernel {
    ($name:ident, $d:literal, |$params:ident, $n:ident| $body:expr) => {
        #[allow(clippy::too_many_arguments)]
        pub(crate) fn $name<T: Sample>(
            src: &[T],
            src_stride: usize,
            dst: &mut [T],
            dst_stride: usize,
            params: &FilterParams,
            width: usize,
            height: usize,
        ) {
            let $params = params;
            for_each_pixel::<T, $d>(src, src_stride, dst, dst_stride, width, height, |$n| $body);
        }
    };
}

reference_kernel!(prewitt, 3, |params, n| gradient::<T>(n, &PREWITT_X, params));
reference_kernel!(sobel, 3, |params, n| gradient::<T>(n, &SOBEL_X, params));
reference_kernel!(minimum, 3, |params, n| min_max::<T, false>(n, params));
reference_kernel!(maximum, 3, |params, n| min_max::<T, true>(n, params));
reference_kernel!(median, 3, |params, n| median_of::<T>(n, params));
reference_kernel!(deflate, 3, |params, n| mean_of::<T, false>(n, params));
reference_kernel!(inflate, 3, |params, n| mean_of::<T, true>(n, params));

/// Neighbours in stencil bit order.
fn neighbours<W: Copy>(n: &[[W; 3]; 3]) -> [W; 8] {
    [
        n[0][0], n[0][1], n[0][2], n[1][0], n[1][2], n[2][0], n[2][1], n[2][2],
    ]
}

fn min_max<T: Sample, const MAX: bool>(n: &[[T::Work; 3]; 3], params: &FilterParams) -> T {
    let center = n[1][1];
    let threshold = T::threshold(params);
    let selected = neighbours(n)
        .into_iter()
        .enumerate()
        .filter(|&(bit, _)| params.stencil_selects(bit as u32))
        .map(|(_, v)| v);
    let v = if MAX {
        let v = selected.fold(center, sample_max::<T>);
        sample_min::<T>(v, T::raise_limit(center, threshold))
    } else {
        let v = selected.fold(center, sample_min::<T>);
        sample_max::<T>(v, T::lower_limit(center, threshold))
    };
    T::from_work(v, params.maxval)
}

/// Runs the vector comparator network, so NaN samples land where they do in the lanes.
fn median_of<T: Sample>(n: &[[T::Work; 3]; 3], params: &FilterParams) -> T {
    let mut values: [T::Work; 9] = [
        n[0][0], n[0][1], n[0][2], n[1][0], n[1][1], n[1][2], n[2][0], n[2][1], n[2][2],
    ];
    for &(i, j) in MEDIAN_NETWORK.iter() {
        let lo = sample_min::<T>(values[i], values[j]);
        let hi = sample_max::<T>(values[i], values[j]);
        values[i] = lo;
        values[j] = hi;
    }
    T::from_work(values[4], params.maxval)
}

fn mean_of<T: Sample, const INFLATE: bool>(n: &[[T::Work; 3]; 3], params: &FilterParams) -> T {
    let center = n[1][1];
    let threshold = T::threshold(params);
    let mean = T::mean8(neighbours(n).into_iter().fold(T::zero(), T::add));
    let v = if INFLATE {
        sample_min::<T>(
            sample_max::<T>(mean, center),
            T::raise_limit(center, threshold),
        )
    } else {
        sample_max::<T>(
            sample_min::<T>(mean, center),
            T::lower_limit(center, threshold),
        )
    };
    T::from_work(v, params.maxval)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        kernel: fn(&[u8], usize, &mut [u8], usize, &FilterParams, usize, usize),
        src: &[u8],
        width: usize,
        params: &FilterParams,
    ) -> Vec<u8> {
        let height = src.len() / width;
        let mut dst = vec![0u8; src.len()];
        kernel(src, width, &mut dst, width, params, width, height);
        dst
    }

    #[test]
    fn test_single_pixel() {
        let params = FilterParams::default();
        let src = [200u8];
        assert_eq!(run(sobel::<u8>, &src, 1, &params), [0]);
        assert_eq!(run(prewitt::<u8>, &src, 1, &params), [0]);
        assert_eq!(run(median::<u8>, &src, 1, &params), [200]);
        assert_eq!(run(minimum::<u8>, &src, 1, &params), [200]);
        assert_eq!(run(maximum::<u8>, &src, 1, &params), [200]);
        assert_eq!(run(inflate::<u8>, &src, 1, &params), [200]);
    }

    #[test]
    fn test_vertical_step_gradient() {
        let params = FilterParams::default();
        // Rows 0..=1 are 0, rows 2..=3 are 100.
        let mut src = [0u8; 16];
        src[8..].fill(100);
        let dst = run(sobel::<u8>, &src, 4, &params);
        // Row 1: gy = (100 + 200 + 100) - 0 = 400, clamped to 255.
        assert_eq!(&dst[4..8], &[255; 4]);
        assert_eq!(&dst[0..4], &[0; 4]);
        let params = FilterParams {
            scale: 0.25,
            ..FilterParams::default()
        };
        let dst = run(prewitt::<u8>, &src, 4, &params);
        assert_eq!(&dst[4..8], &[75; 4]);
    }

    #[test]
    fn test_threshold_limits_change() {
        let params = FilterParams {
            threshold: 10,
            ..FilterParams::default()
        };
        let src = [50u8, 50, 50, 50, 100, 50, 50, 50, 50];
        let dst = run(minimum::<u8>, &src, 3, &params);
        assert_eq!(dst[4], 90);
        let dst = run(deflate::<u8>, &src, 3, &params);
        assert_eq!(dst[4], 90);
        let dst = run(maximum::<u8>, &src, 3, &FilterParams::default());
        assert_eq!(dst, [100; 9]);
    }

    #[test]
    fn test_stencil_excludes_neighbours() {
        // Only the left and right neighbours.
        let params = FilterParams {
            stencil: 0b0001_1000,
            ..FilterParams::default()
        };
        let src = [0u8, 0, 0, 30, 60, 90, 0, 0, 0];
        let dst = run(minimum::<u8>, &src, 3, &params);
        assert_eq!(dst[4], 30);
        let dst = run(maximum::<u8>, &src, 3, &params);
        assert_eq!(dst[4], 90);
    }

    #[test]
    fn test_median_of_float_window() {
        let params = FilterParams::default();
        let src = [9f32, 1., 8., 2., 7., 3., 6., 4., 5.];
        let mut dst = [0f32; 9];
        median::<f32>(&src, 3, &mut dst, 3, &params, 3, 3);
        assert_eq!(dst[4], 5.);
    }
}
