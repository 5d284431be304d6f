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
use crate::filter2d::window::{WindowContext, WindowOp};
use crate::lanes::SampleLanes;
use crate::sample::Sample;

/// Gradient magnitude `sqrt(gx² + gy²) * scale`, Sobel doubles the middle taps.
pub(crate) struct EdgeOp<const SOBEL: bool>;

impl<T: Sample, const SOBEL: bool> WindowOp<T, 3> for EdgeOp<SOBEL> {
    #[inline(always)]
    unsafe fn apply<L: SampleLanes<T>>(ctx: &WindowContext<L, T>, n: &[[L::V; 3]; 3]) -> L::V {
        let [[a00, a01, a02], [a10, _, a12], [a20, a21, a22]] = *n;
        let (a01, a10, a12, a21) = if SOBEL {
            (
                L::vadd(a01, a01),
                L::vadd(a10, a10),
                L::vadd(a12, a12),
                L::vadd(a21, a21),
            )
        } else {
            (a01, a10, a12, a21)
        };

        let gx = L::vsub(
            L::vsub(L::vsub(L::vadd(L::vadd(a20, a21), a22), a00), a01),
            a02,
        );
        let gy = L::vsub(
            L::vsub(L::vsub(L::vadd(L::vadd(a02, a12), a22), a00), a10),
            a20,
        );

        let gx = L::to_f32(gx);
        let gy = L::to_f32(gy);
        let magnitude = L::sqrt_f(L::add_f(L::mul_f(gx, gx), L::mul_f(gy, gy)));
        L::from_f32(L::mul_f(magnitude, ctx.scale), ctx.post.maxval)
    }
}

/// Stencil selected bits in neighbour order, the center is excluded.
const NEIGHBOURS: [(usize, usize); 8] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
];

/// Minimum or maximum over the stencil, no further than `threshold` from the center.
pub(crate) struct MinMaxOp<const MAX: bool>;

impl<T: Sample, const MAX: bool> WindowOp<T, 3> for MinMaxOp<MAX> {
    #[inline(always)]
    unsafe fn apply<L: SampleLanes<T>>(ctx: &WindowContext<L, T>, n: &[[L::V; 3]; 3]) -> L::V {
        let center = n[1][1];
        let mut v = center;
        for (bit, &(r, c)) in NEIGHBOURS.iter().enumerate() {
            if ctx.stencil & (1 << bit) != 0 {
                v = if MAX {
                    L::vmax(v, n[r][c])
                } else {
                    L::vmin(v, n[r][c])
                };
            }
        }
        if MAX {
            L::vmin(v, L::raise_limit(center, ctx.threshold))
        } else {
            L::vmax(v, L::lower_limit(center, ctx.threshold))
        }
    }
}

/// Exact median through a 19 comparator network.
pub(crate) struct MedianOp;

/// Compare exchange pairs, the median ends up at index 4.
pub(crate) const MEDIAN_NETWORK: [(usize, usize); 19] = [
    (0, 1),
    (2, 3),
    (5, 6),
    (7, 8),
    (0, 2),
    (1, 3),
    (5, 7),
    (6, 8),
    (1, 2),
    (6, 7),
    (0, 5),
    (1, 6),
    (2, 7),
    (3, 8),
    (2, 5),
    (3, 6),
    (3, 5),
    (3, 4),
    (4, 5),
];

impl<T: Sample> WindowOp<T, 3> for MedianOp {
    #[inline(always)]
    unsafe fn apply<L: SampleLanes<T>>(_: &WindowContext<L, T>, n: &[[L::V; 3]; 3]) -> L::V {
        let [[a00, a01, a02], [a10, a11, a12], [a20, a21, a22]] = *n;
        let mut a = [a00, a01, a02, a10, a11, a12, a20, a21, a22];
        for &(i, j) in MEDIAN_NETWORK.iter() {
            let lo = L::vmin(a[i], a[j]);
            let hi = L::vmax(a[i], a[j]);
            a[i] = lo;
            a[j] = hi;
        }
        a[4]
    }
}

/// Average of the 8 neighbours, Inflate only raises and Deflate only lowers the center.
pub(crate) struct MeanOp<const INFLATE: bool>;

impl<T: Sample, const INFLATE: bool> WindowOp<T, 3> for MeanOp<INFLATE> {
    #[inline(always)]
    unsafe fn apply<L: SampleLanes<T>>(ctx: &WindowContext<L, T>, n: &[[L::V; 3]; 3]) -> L::V {
        let center = n[1][1];
        let mut sum = n[0][0];
        for &(r, c) in NEIGHBOURS.iter().skip(1) {
            sum = L::vadd(sum, n[r][c]);
        }
        let mean = L::mean8(sum);
        if INFLATE {
            L::vmin(
                L::vmax(mean, center),
                L::raise_limit(center, ctx.threshold),
            )
        } else {
            L::vmax(
                L::vmin(mean, center),
                L::lower_limit(center, ctx.threshold),
            )
        }
    }
}
