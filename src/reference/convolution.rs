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
use crate::params::FilterParams;
use crate::reference::neighborhood::for_each_pixel;
use crate::sample::Sample;

/// `sum * div + bias`, absolute when not saturating.
fn finish<T: Sample>(sum: T::Work, params: &FilterParams) -> T {
    let mut y = T::to_f32(sum) * params.div + params.bias;
    if !params.saturate {
        y = y.abs();
    }
    T::from_f32(y, params.maxval)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn convolve_2d<T: Sample, const D: usize>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    params: &FilterParams,
    width: usize,
    height: usize,
) {
    for_each_pixel::<T, D>(src, src_stride, dst, dst_stride, width, height, |n| {
        let mut sum = T::zero();
        for (r, row) in n.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                sum = T::accumulate(sum, v, T::weight(params, r * D + c));
            }
        }
        finish::<T>(sum, params)
    });
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn conv_h<T: Sample>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    params: &FilterParams,
    width: usize,
    height: usize,
) {
    let taps = params.matrixsize as usize;
    let support = params.support() as isize;
    for y in 0..height {
        let row = &src[y * src_stride..y * src_stride + width];
        let dst_row = &mut dst[y * dst_stride..y * dst_stride + width];
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let mut sum = T::zero();
            for k in 0..taps {
                let column = reflect_101(x as isize + k as isize - support, width);
                sum = T::accumulate(sum, row[column].work(), T::weight(params, k));
            }
            *dst = finish::<T>(sum, params);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn conv_v<T: Sample>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    params: &FilterParams,
    width: usize,
    height: usize,
) {
    let taps = params.matrixsize as usize;
    let support = params.support() as isize;
    for y in 0..height {
        for x in 0..width {
            let mut sum = T::zero();
            for k in 0..taps {
                let row = reflect_101(y as isize + k as isize - support, height);
                sum = T::accumulate(sum, src[row * src_stride + x].work(), T::weight(params, k));
            }
            dst[y * dst_stride + x] = finish::<T>(sum, params);
        }
    }
}

/// Vertical pass into a packed intermediate plane, then the horizontal pass.
#[allow(clippy::too_many_arguments)]
pub(crate) fn conv_sep<T: Sample>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    params: &FilterParams,
    width: usize,
    height: usize,
) {
    let mut intermediate = vec![T::default(); width * height];
    conv_v(src, src_stride, &mut intermediate, width, params, width, height);
    conv_h(&intermediate, width, dst, dst_stride, params, width, height);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_dimensional(taps: &[i16]) -> FilterParams {
        let mut params = FilterParams {
            matrixsize: taps.len() as u32,
            ..FilterParams::default()
        };
        for (k, &tap) in taps.iter().enumerate() {
            params.matrix[k] = tap;
            params.matrixf[k] = tap as f32;
        }
        params.div = 1. / taps.iter().map(|&x| x as f32).sum::<f32>();
        params
    }

    #[test]
    fn test_box_blur_keeps_flat_plane() {
        let mut params = FilterParams {
            matrixsize: 9,
            div: 1. / 9.,
            ..FilterParams::default()
        };
        params.matrix[..9].fill(1);
        params.matrixf[..9].fill(1.);
        let src = [10u8; 16];
        let mut dst = [0u8; 16];
        convolve_2d::<u8, 3>(&src, 4, &mut dst, 4, &params, 4, 4);
        assert_eq!(dst, [10; 16]);
    }

    #[test]
    fn test_row_mirror_at_edges() {
        let params = one_dimensional(&[1, 2, 1]);
        let src = [0u8, 40, 80];
        let mut dst = [0u8; 3];
        conv_h::<u8>(&src, 3, &mut dst, 3, &params, 3, 1);
        // x = 0 reads columns 1, 0, 1.
        assert_eq!(dst, [20, 40, 60]);
        let mut dst_v = [0u8; 3];
        conv_v::<u8>(&src, 1, &mut dst_v, 1, &params, 1, 3);
        assert_eq!(dst_v, dst);
    }

    #[test]
    fn test_abs_when_not_saturating() {
        let mut params = one_dimensional(&[-1, 0, 1]);
        params.div = 1.;
        let src = [90u16, 50, 10];
        let mut dst = [0u16; 3];
        conv_h::<u16>(&src, 3, &mut dst, 3, &params, 3, 1);
        assert_eq!(dst[1], 0);
        params.saturate = false;
        conv_h::<u16>(&src, 3, &mut dst, 3, &params, 3, 1);
        assert_eq!(dst[1], 80);
    }

    #[test]
    fn test_separable_equals_two_passes() {
        let params = one_dimensional(&[1, 4, 6, 4, 1]);
        let (width, height) = (7usize, 5usize);
        let src: Vec<f32> = (0..width * height).map(|x| (x * 37 % 101) as f32).collect();
        let mut dst = vec![0f32; width * height];
        conv_sep::<f32>(&src, width, &mut dst, width, &params, width, height);
        let mut vertical = vec![0f32; width * height];
        conv_v::<f32>(&src, width, &mut vertical, width, &params, width, height);
        let mut expected = vec![0f32; width * height];
        conv_h::<f32>(&vertical, width, &mut expected, width, &params, width, height);
        assert_eq!(dst, expected);
    }
}
