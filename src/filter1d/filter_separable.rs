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
use crate::filter1d::filter_column::{column_is_multi_pass, conv_row_v};
use crate::filter1d::filter_row::{conv_row_h, row_is_multi_pass};
use crate::filter1d::filter_scan::{accumulator, ConvContext};
use crate::lanes::SampleLanes;
use crate::params::FilterParams;
use crate::sample::Sample;

/// Vertical pass into an intermediate scanline, then the horizontal pass into the
/// destination. Both passes share coefficients and post processing, the intermediate
/// row is stored in the sample type.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub(crate) unsafe fn conv_plane_sep<L: SampleLanes<T>, T: Sample, const N: usize>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    params: &FilterParams,
    width: usize,
    height: usize,
) {
    let ctx = ConvContext::<L, T, N>::new(params);
    let multi_pass = column_is_multi_pass::<N>() || row_is_multi_pass::<T, N>();
    let mut acc = accumulator::<L::Acc>(width, multi_pass);
    let mut scanline = vec![T::default(); width];
    for y in 0..height {
        let rows: [&[T]; N] = reflected_rows::<N>(y, height)
            .map(|row| &src[row * src_stride..row * src_stride + width]);
        conv_row_v::<L, T, N>(&ctx, &rows, &mut scanline, &mut acc);
        let dst_row = &mut dst[y * dst_stride..y * dst_stride + width];
        conv_row_h::<L, T, N>(&ctx, &scanline, dst_row, &mut acc);
    }
}
