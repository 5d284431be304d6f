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
use crate::edge_mode::reflected_rows;
use crate::filter1d::filter_scan::{
    accumulator, ConvContext, COLUMN_SINGLE_PASS_TAPS, MAX_LANES,
};
use crate::lanes::SampleLanes;
use crate::params::{FilterParams, MAX_MATRIX_SIZE};
use crate::sample::Sample;

#[inline(always)]
unsafe fn pass_v<
    L: SampleLanes<T>,
    T: Sample,
    const N: usize,
    const K0: usize,
    const K1: usize,
    const FIRST: bool,
    const LAST: bool,
>(
    ctx: &ConvContext<L, T, N>,
    rows: &[*const T; N],
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
            sum = L::vmul_add(sum, L::load(rows[k].add(x)), ctx.weights[k]);
        }
        if LAST {
            L::store(dst.add(x), L::finish(sum, &ctx.post));
        } else {
            L::store_acc(acc.add(x), sum);
        }
        x += L::LANES;
    }
}

/// Convolves `count` columns, `count` is a multiple of `L::LANES`.
#[inline(always)]
unsafe fn conv_span_v<L: SampleLanes<T>, T: Sample, const N: usize>(
    ctx: &ConvContext<L, T, N>,
    rows: &[*const T; N],
    dst: *mut T,
    count: usize,
    acc: *mut L::Acc,
) {
    if N <= 9 {
        pass_v::<L, T, N, 0, N, true, true>(ctx, rows, dst, count, acc);
    } else if N <= 19 {
        pass_v::<L, T, N, 0, 10, true, false>(ctx, rows, dst, count, acc);
        pass_v::<L, T, N, 10, N, false, true>(ctx, rows, dst, count, acc);
    } else {
        pass_v::<L, T, N, 0, 10, true, false>(ctx, rows, dst, count, acc);
        pass_v::<L, T, N, 10, 20, false, false>(ctx, rows, dst, count, acc);
        pass_v::<L, T, N, 20, N, false, true>(ctx, rows, dst, count, acc);
    }
}

/// Convolves one output row from `N` already mirrored source rows.
///
/// Columns that do not fill a whole vector are gathered into a stack block first.
#[inline(always)]
pub(crate) unsafe fn conv_row_v<L: SampleLanes<T>, T: Sample, const N: usize>(
    ctx: &ConvContext<L, T, N>,
    rows: &[&[T]; N],
    dst: &mut [T],
    acc: &mut [L::Acc],
) {
    let width = dst.len();
    let lanes = L::LANES;
    let body = width / lanes * lanes;

    if body > 0 {
        let ptrs: [*const T; N] = (*rows).map(|row| row.as_ptr());
        conv_span_v::<L, T, N>(ctx, &ptrs, dst.as_mut_ptr(), body, acc.as_mut_ptr());
    }

    if body < width {
        let tail = width - body;
        let mut block = [T::default(); MAX_MATRIX_SIZE * MAX_LANES];
        for (k, row) in rows.iter().enumerate() {
            block[k * lanes..k * lanes + tail].copy_from_slice(&row[body..width]);
        }
        let mut ptrs = [block.as_ptr(); N];
        for (k, ptr) in ptrs.iter_mut().enumerate() {
            *ptr = block.as_ptr().add(k * lanes);
        }
        let mut out = [T::default(); MAX_LANES];
        conv_span_v::<L, T, N>(ctx, &ptrs, out.as_mut_ptr(), lanes, acc.as_mut_ptr());
        dst[body..].copy_from_slice(&out[..tail]);
    }
}

/// Returns `true` when columns of `N` taps are summed in more than one pass.
#[inline(always)]
pub(crate) fn column_is_multi_pass<const N: usize>() -> bool {
    N > COLUMN_SINGLE_PASS_TAPS
}

#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub(crate) unsafe fn conv_plane_v<L: SampleLanes<T>, T: Sample, const N: usize>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    params: &FilterParams,
    width: usize,
    height: usize,
) {
    let ctx = ConvContext::<L, T, N>::new(params);
    let mut acc = accumulator::<L::Acc>(width, column_is_multi_pass::<N>());
    for y in 0..height {
        let rows: [&[T]; N] = reflected_rows::<N>(y, height)
            .map(|row| &src[row * src_stride..row * src_stride + width]);
        let dst_row = &mut dst[y * dst_stride..y * dst_stride + width];
        conv_row_v::<L, T, N>(&ctx, &rows, dst_row, &mut acc);
    }
}
