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
use crate::edge_mode::{reflect_101, reflected_rows};
use crate::lanes::{PostProcess, SampleLanes, ScalarLanes};
use crate::params::{FilterParams, MAX_MATRIX_SIZE};
use crate::sample::Sample;

/// Splatted per plane constants shared by every window operator.
pub(crate) struct WindowContext<L: SampleLanes<T>, T: Sample> {
    pub(crate) threshold: L::V,
    pub(crate) maxval: L::V,
    pub(crate) scale: L::F,
    pub(crate) post: PostProcess<L>,
    pub(crate) weights: [L::V; MAX_MATRIX_SIZE],
    pub(crate) stencil: u8,
}

impl<L: SampleLanes<T>, T: Sample> WindowContext<L, T> {
    #[inline(always)]
    pub(crate) unsafe fn new(params: &FilterParams) -> Self {
        let mut weights = [L::vzero(); MAX_MATRIX_SIZE];
        for (k, weight) in weights.iter_mut().enumerate() {
            *weight = L::splat_weight(params, k);
        }
        WindowContext {
            threshold: L::splat_threshold(params),
            maxval: L::splat_maxval(params),
            scale: L::splat_f(params.scale),
            post: PostProcess::new(params),
            weights,
            stencil: params.stencil,
        }
    }
}

/// Operator over a `D`x`D` window, `n[row][column]` with the output pixel in the middle.
pub(crate) trait WindowOp<T: Sample, const D: usize> {
    unsafe fn apply<L: SampleLanes<T>>(ctx: &WindowContext<L, T>, n: &[[L::V; D]; D]) -> L::V;
}

#[inline(always)]
unsafe fn gather<L: SampleLanes<T>, T: Sample, const D: usize>(
    rows: &[&[T]; D],
    columns: &[usize; D],
) -> [[L::V; D]; D] {
    let mut n = [[L::vzero(); D]; D];
    for (dst, row) in n.iter_mut().zip(rows.iter()) {
        let ptr = row.as_ptr();
        for (v, &column) in dst.iter_mut().zip(columns.iter()) {
            *v = L::load(ptr.add(column));
        }
    }
    n
}

#[inline(always)]
unsafe fn apply_at<L: SampleLanes<T>, T: Sample, O: WindowOp<T, D>, const D: usize>(
    ctx: &WindowContext<L, T>,
    rows: &[&[T]; D],
    columns: &[usize; D],
    dst: *mut T,
) {
    let n = gather::<L, T, D>(rows, columns);
    let v = O::apply::<L>(ctx, &n);
    L::store(dst, L::limit(v, ctx.maxval));
}

/// Runs a window operator over the whole plane.
///
/// Rows are mirrored through a row table, plane edges through reflected column
/// indices on a single lane, the interior is loaded directly `L::LANES` pixels at once.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub(crate) unsafe fn filter_plane_window<L, T, O, const D: usize>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    params: &FilterParams,
    width: usize,
    height: usize,
) where
    T: Sample,
    L: SampleLanes<T>,
    ScalarLanes: SampleLanes<T>,
    O: WindowOp<T, D>,
{
    if width == 0 || height == 0 {
        return;
    }
    let ctx = WindowContext::<L, T>::new(params);
    let edge_ctx = WindowContext::<ScalarLanes, T>::new(params);
    let radius = D / 2;

    let left_end = radius.min(width);
    let right_start = width.saturating_sub(radius).max(left_end);

    for y in 0..height {
        let rows: [&[T]; D] = reflected_rows::<D>(y, height)
            .map(|row| &src[row * src_stride..row * src_stride + width]);
        let dst_row = &mut dst[y * dst_stride..y * dst_stride + width];
        let dst_ptr = dst_row.as_mut_ptr();

        let edge = |x: usize| {
            let mut columns = [0usize; D];
            for (c, column) in columns.iter_mut().enumerate() {
                *column = reflect_101(x as isize + c as isize - radius as isize, width);
            }
            apply_at::<ScalarLanes, T, O, D>(&edge_ctx, &rows, &columns, dst_ptr.add(x));
        };

        for x in 0..left_end {
            edge(x);
        }

        let mut x = left_end;
        while x + L::LANES + radius <= width {
            let mut columns = [0usize; D];
            for (c, column) in columns.iter_mut().enumerate() {
                *column = x + c - radius;
            }
            apply_at::<L, T, O, D>(&ctx, &rows, &columns, dst_ptr.add(x));
            x += L::LANES;
        }

        while x < right_start {
            let mut columns = [0usize; D];
            for (c, column) in columns.iter_mut().enumerate() {
                *column = x + c - radius;
            }
            apply_at::<ScalarLanes, T, O, D>(&edge_ctx, &rows, &columns, dst_ptr.add(x));
            x += 1;
        }

        for x in right_start..width {
            edge(x);
        }
    }
}
