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
use crate::lanes::{PostProcess, SampleLanes};
use crate::params::FilterParams;
use crate::sample::Sample;

/// Stack capacity of padded edge blocks, holds the widest block of 24 outputs plus 24
/// reflected taps.
pub(crate) const PADDED_CAPACITY: usize = 64;

/// Upper bound of `Lanes::LANES` across backends.
pub(crate) const MAX_LANES: usize = 16;

/// Splatted coefficients of a 1D kernel with `N` taps.
pub(crate) struct ConvContext<L: SampleLanes<T>, T: Sample, const N: usize> {
    pub(crate) weights: [L::V; N],
    pub(crate) post: PostProcess<L>,
}

impl<L: SampleLanes<T>, T: Sample, const N: usize> ConvContext<L, T, N> {
    #[inline(always)]
    pub(crate) unsafe fn new(params: &FilterParams) -> Self {
        let mut weights = [L::vzero(); N];
        for (k, weight) in weights.iter_mut().enumerate() {
            *weight = L::splat_weight(params, k);
        }
        ConvContext {
            weights,
            post: PostProcess::new(params),
        }
    }
}

/// Taps summed by a single horizontal pass, wider kernels are split into a 12 tap
/// pass for integers and 10 tap passes for floats.
#[inline(always)]
pub(crate) const fn row_single_pass_taps(integer: bool) -> usize {
    if integer {
        13
    } else {
        9
    }
}

/// Taps summed by a single vertical pass, wider kernels are split into 10 tap passes.
pub(crate) const COLUMN_SINGLE_PASS_TAPS: usize = 9;

/// Partial sum storage for multi pass kernels, empty when a single pass suffices.
pub(crate) fn accumulator<A: Copy + Default>(width: usize, multi_pass: bool) -> Vec<A> {
    if multi_pass {
        vec![A::default(); width + PADDED_CAPACITY]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_is_allocated_only_for_multi_pass() {
        assert!(accumulator::<i32>(1920, false).is_empty());
        assert_eq!(accumulator::<f32>(10, true).len(), 10 + PADDED_CAPACITY);
    }

    #[test]
    fn test_pass_limits() {
        assert_eq!(row_single_pass_taps(true), 13);
        assert_eq!(row_single_pass_taps(false), 9);
        assert_eq!(COLUMN_SINGLE_PASS_TAPS, 9);
    }
}
