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
use crate::params::FilterParams;
use num_traits::AsPrimitive;
use std::fmt::Debug;

/// Storage type of plane samples.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum SampleFormat {
    /// 8 bit unsigned integer samples.
    Byte,
    /// 9..16 bit unsigned integer samples stored in `u16`.
    Word,
    /// 32 bit float samples.
    Float,
}

impl SampleFormat {
    #[inline]
    pub const fn is_integer(&self) -> bool {
        !matches!(self, SampleFormat::Float)
    }
}

/// Scalar arithmetic of a sample type.
///
/// Integer samples work in wrapping `i32`, float samples in `f32`, exactly as the
/// vector lanes do.
pub trait Sample:
    Copy + Default + Debug + PartialOrd + Send + Sync + AsPrimitive<f32> + 'static
{
    const FORMAT: SampleFormat;

    type Work: Copy + PartialOrd + Debug;

    fn work(self) -> Self::Work;

    fn zero() -> Self::Work;

    fn add(a: Self::Work, b: Self::Work) -> Self::Work;

    /// `acc + value * weight` without fused rounding.
    fn accumulate(acc: Self::Work, value: Self::Work, weight: Self::Work) -> Self::Work;

    /// Coefficient `index` of the active matrix.
    fn weight(params: &FilterParams, index: usize) -> Self::Work;

    /// Fixed integer weight, used by the edge masks.
    fn unit_weight(weight: i32) -> Self::Work;

    fn threshold(params: &FilterParams) -> Self::Work;

    /// `center + threshold`.
    fn raise_limit(center: Self::Work, threshold: Self::Work) -> Self::Work;

    /// `center - threshold`, not below zero for integers.
    fn lower_limit(center: Self::Work, threshold: Self::Work) -> Self::Work;

    /// Mean of 8 neighbours, rounded half up for integers.
    fn mean8(sum: Self::Work) -> Self::Work;

    fn to_f32(value: Self::Work) -> f32;

    /// Rounds half to even and clamps into `0..=maxval` for integers; identity for floats.
    fn from_f32(value: f32, maxval: u16) -> Self;

    /// Limits integer results to `maxval`; identity for floats.
    fn from_work(value: Self::Work, maxval: u16) -> Self;
}

/// Keeps `a` when the pair is unordered, as `Lanes::min_f` does.
#[inline(always)]
fn work_min<W: PartialOrd>(a: W, b: W) -> W {
    if b < a {
        b
    } else {
        a
    }
}

#[inline(always)]
fn work_max<W: PartialOrd>(a: W, b: W) -> W {
    if b > a {
        b
    } else {
        a
    }
}

pub(crate) fn sample_min<T: Sample>(a: T::Work, b: T::Work) -> T::Work {
    work_min(a, b)
}

pub(crate) fn sample_max<T: Sample>(a: T::Work, b: T::Work) -> T::Work {
    work_max(a, b)
}

macro_rules! integer_sample {
    ($t:ty, $format:expr) => {
        impl Sample for $t {
            const FORMAT: SampleFormat = $format;

            type Work = i32;

            #[inline(always)]
            fn work(self) -> i32 {
                self as i32
            }

            #[inline(always)]
            fn zero() -> i32 {
                0
            }

            #[inline(always)]
            fn add(a: i32, b: i32) -> i32 {
                a.wrapping_add(b)
            }

            #[inline(always)]
            fn accumulate(acc: i32, value: i32, weight: i32) -> i32 {
                acc.wrapping_add(value.wrapping_mul(weight))
            }

            #[inline(always)]
            fn weight(params: &FilterParams, index: usize) -> i32 {
                params.matrix[index] as i32
            }

            #[inline(always)]
            fn unit_weight(weight: i32) -> i32 {
                weight
            }

            #[inline(always)]
            fn threshold(params: &FilterParams) -> i32 {
                params.threshold as i32
            }

            #[inline(always)]
            fn raise_limit(center: i32, threshold: i32) -> i32 {
                center.wrapping_add(threshold)
            }

            #[inline(always)]
            fn lower_limit(center: i32, threshold: i32) -> i32 {
                center.wrapping_sub(threshold).max(0)
            }

            #[inline(always)]
            fn mean8(sum: i32) -> i32 {
                sum.wrapping_add(4) >> 3
            }

            #[inline(always)]
            fn to_f32(value: i32) -> f32 {
                value as f32
            }

            #[inline(always)]
            fn from_f32(value: f32, maxval: u16) -> $t {
                // `max` first so NaN settles at zero.
                let clamped = value.max(0.).min(maxval as f32);
                clamped.round_ties_even() as $t
            }

            #[inline(always)]
            fn from_work(value: i32, maxval: u16) -> $t {
                value.min(maxval as i32).clamp(0, <$t>::MAX as i32) as $t
            }
        }
    };
}

integer_sample!(u8, SampleFormat::Byte);
integer_sample!(u16, SampleFormat::Word);

impl Sample for f32 {
    const FORMAT: SampleFormat = SampleFormat::Float;

    type Work = f32;

    #[inline(always)]
    fn work(self) -> f32 {
        self
    }

    #[inline(always)]
    fn zero() -> f32 {
        0.
    }

    #[inline(always)]
    fn add(a: f32, b: f32) -> f32 {
        a + b
    }

    #[inline(always)]
    fn accumulate(acc: f32, value: f32, weight: f32) -> f32 {
        acc + value * weight
    }

    #[inline(always)]
    fn weight(params: &FilterParams, index: usize) -> f32 {
        params.matrixf[index]
    }

    #[inline(always)]
    fn unit_weight(weight: i32) -> f32 {
        weight as f32
    }

    #[inline(always)]
    fn threshold(params: &FilterParams) -> f32 {
        params.thresholdf
    }

    #[inline(always)]
    fn raise_limit(center: f32, threshold: f32) -> f32 {
        center + threshold
    }

    #[inline(always)]
    fn lower_limit(center: f32, threshold: f32) -> f32 {
        center - threshold
    }

    #[inline(always)]
    fn mean8(sum: f32) -> f32 {
        sum * 0.125
    }

    #[inline(always)]
    fn to_f32(value: f32) -> f32 {
        value
    }

    #[inline(always)]
    fn from_f32(value: f32, _: u16) -> f32 {
        value
    }

    #[inline(always)]
    fn from_work(value: f32, _: u16) -> f32 {
        value
    }
}
