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
use crate::edge_mode::fill_reflected;
use crate::filter1d::filter_scan::{
    accumulator, row_single_pass_taps, ConvContext, PADDED_CAPACITY,
};
use crate::lanes::SampleLanes;
use crate::params::FilterParams;
use crate::sample::Sample;

#[inline(always)]
unsafe fn pass_h<
    L: SampleLanes<T>,
    T: Sample,
    const N: usize,
    const K0: usize,
    const K1: usize,
    const FIRST: bool,
    const LAST: bool,
>(
    ctx: &ConvContext<L, T, N>,
    src: *const T,
    dst: *mut T,
    count: usize,
    acc: *mut L::Acc,
) {
    let mut x = 0usize;
    while x < count {
        let mut sum = if FIRST {
            L::vzero()
        } else {
            L::load_acc(acc.add(x))
        };
        for k in K0..K1.min(N) {
            sum = L::vmul_add(sum, L::load(src.add(x + k)), ctx.weights[k]);
        }
        if LAST {
            L::store(dst.add(x), L::finish(sum, &ctx.post));
        } else {
            L::store_acc(acc.add(x), sum);
        }
        x += L::LANES;
    }
}

/// Convolves `count` outputs, `count` is a multiple of `L::LANES`.
///
/// `src` points to the first tap of the first output, so `count + N - 1` samples
/// (rounded up to whole vectors) must be readable.
#[inline(always)]
unsafe fn conv_span_h<L: SampleLanes<T>, T: Sample, const N: usize>(
    ctx: &ConvContext<L, T, N>,
    src: *const T,
    dst: *mut T,
    count: usize,
    acc: *mut L::Acc,
) {
    if T::FORMAT.is_integer() {
        if N <= 13 {
            pass_h::<L, T, N, 0, N, true, true>(ctx, src, dst, count, acc);
        } else {
            pass_h::<L, T, N, 0, 12, true, false>(ctx, src, dst, count, acc);
            pass_h::<L, T, N, 12, N, false, true>(ctx, src, dst, count, acc);
        }
    } else if N <= 9 {
        pass_h::<L, T, N, 0, N, true, true>(ctx, src, dst, count, acc);
    } else if N <= 19 {
        pass_h::<L, T, N, 0, 10, true, false>(ctx, src, dst, count, acc);
        pass_h::<L, T, N, 10, N, false, true>(ctx, src, dst, count, acc);
    } else {
        pass_h::<L, T, N, 0, 10, true, false>(ctx, src, dst, count, acc);
        pass_h::<L, T, N, 10, 20, false, false>(ctx, src, dst, count, acc);
        pass_h::<L, T, N, 20, N, false, true>(ctx, src, dst, count, acc);
    }
}

/// Edge block `start..end` computed from a mirrored copy of the scanline.
#[inline(always)]
unsafe fn conv_padded_h<L: SampleLanes<T>, T: Sample, const N: usize>(
    ctx: &ConvContext<L, T, N>,
    row: &[T],
    start: usize,
    end: usize,
    dst: &mut [T],
    acc: &mut [L::Acc],
) {
    let count = end - start;
    let rounded = count.div_ceil(L::LANES) * L::LANES;
    let mut padded = [T::default(); PADDED_CAPACITY];
    let mut out = [T::default(); PADDED_CAPACITY];
    let padded = &mut padded[..rounded + N - 1];
    fill_reflected(row, start as isize - (N / 2) as isize, padded);
    conv_span_h::<L, T, N>(ctx, padded.as_ptr(), out.as_mut_ptr(), rounded, acc.as_mut_ptr());
    dst[start..end].copy_from_slice(&out[..count]);
}

/// Convolves one scanline: both edges through padded blocks, the interior in place.
#[inline(always)]
pub(crate) unsafe fn conv_row_h<L: SampleLanes<T>, T: Sample, const N: usize>(
    ctx: &ConvContext<L, T, N>,
    row: &[T],
    dst: &mut [T],
    acc: &mut [L::Acc],
) {
    let width = row.len();
    let support = N / 2;
    let lanes = L::LANES;

    let left_end = width.min(support.div_ceil(lanes) * lanes);
    let interior = if width >= support + left_end {
        (width - support - left_end) / lanes * lanes
    } else {
        0
    };
    let right_start = left_end + interior;

    if left_end > 0 {
        conv_padded_h::<L, T, N>(ctx, row, 0, left_end, dst, acc);
    }
    if interior > 0 {
        conv_span_h::<L, T, N>(
            ctx,
            row.as_ptr().add(left_end - support),
            dst.as_mut_ptr().add(left_end),
            interior,
            acc.as_mut_ptr(),
        );
    }
    if right_start < width {
        conv_padded_h::<L, T, N>(ctx, row, right_start, width, dst, acc);
    }
}

/// Returns `true` when rows of `N` taps are summed in more than one pass.
#[inline(always)]
pub(crate) fn row_is_multi_pass<T: Sample, const N: usize>() -> bool {
    N > row_single_pass_taps(T::FORMAT.is_integer())
}

#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub(crate) unsafe fn conv_plane_h<L: SampleLanes<T>, T: Sample, const N: usize>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    params: &FilterParams,
    width: usize,
    height: usize,
) {
    let ctx = ConvContext::<L, T, N>::new(params);
    let mut acc = accumulator::<L::Acc>(width, row_is_multi_pass::<T, N>());
    for y in 0..height {
        let row = &src[y * src_stride..y * src_stride + width];
        let dst_row = &mut dst[y * dst_stride..y * dst_stride + width];
        conv_row_h::<L, T, N>(&ctx, row, dst_row, &mut acc);
    }
}
