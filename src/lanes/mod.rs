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
mod scalar;

use crate::params::FilterParams;
use crate::sample::Sample;
pub(crate) use scalar::ScalarLanes;

/// Lane operations of one instruction set.
///
/// `F` holds `LANES` floats and `I` holds `LANES` signed 32 bit integers. Integer
/// arithmetic wraps, float arithmetic is never fused.
///
/// # Safety
///
/// Every method requires the instruction set of the implementor to be available,
/// loads and stores require `LANES` readable or writable elements behind the pointer.
pub(crate) trait Lanes: Copy {
    const LANES: usize;

    type F: Copy;
    type I: Copy;

    unsafe fn splat_f(v: f32) -> Self::F;
    unsafe fn splat_i(v: i32) -> Self::I;

    unsafe fn load_u8(ptr: *const u8) -> Self::I;
    unsafe fn load_u16(ptr: *const u16) -> Self::I;
    unsafe fn load_f32(ptr: *const f32) -> Self::F;
    unsafe fn load_i32(ptr: *const i32) -> Self::I;

    /// Stores with unsigned saturation.
    unsafe fn store_u8(ptr: *mut u8, v: Self::I);
    /// Stores with unsigned saturation.
    unsafe fn store_u16(ptr: *mut u16, v: Self::I);
    unsafe fn store_f32(ptr: *mut f32, v: Self::F);
    unsafe fn store_i32(ptr: *mut i32, v: Self::I);

    unsafe fn add_i(a: Self::I, b: Self::I) -> Self::I;
    unsafe fn sub_i(a: Self::I, b: Self::I) -> Self::I;
    /// Low 32 bits of the product.
    unsafe fn mul_i(a: Self::I, b: Self::I) -> Self::I;
    unsafe fn min_i(a: Self::I, b: Self::I) -> Self::I;
    unsafe fn max_i(a: Self::I, b: Self::I) -> Self::I;
    /// Arithmetic shift right.
    unsafe fn shr_i<const S: i32>(a: Self::I) -> Self::I;

    unsafe fn add_f(a: Self::F, b: Self::F) -> Self::F;
    unsafe fn sub_f(a: Self::F, b: Self::F) -> Self::F;
    unsafe fn mul_f(a: Self::F, b: Self::F) -> Self::F;
    /// `b < a ? b : a`, so `a` is kept when either operand is NaN.
    unsafe fn min_f(a: Self::F, b: Self::F) -> Self::F;
    /// `b > a ? b : a`, so `a` is kept when either operand is NaN.
    unsafe fn max_f(a: Self::F, b: Self::F) -> Self::F;
    unsafe fn sqrt_f(a: Self::F) -> Self::F;
    unsafe fn abs_f(a: Self::F) -> Self::F;

    unsafe fn cvt_i_f(a: Self::I) -> Self::F;
    /// Converts rounding half to even.
    unsafe fn cvt_round_f_i(a: Self::F) -> Self::I;
}

/// Post processing of convolution sums, splatted once per scanline.
#[derive(Copy, Clone)]
pub(crate) struct PostProcess<L: Lanes> {
    pub(crate) div: L::F,
    pub(crate) bias: L::F,
    pub(crate) maxval: L::F,
    pub(crate) saturate: bool,
}

impl<L: Lanes> PostProcess<L> {
    #[inline(always)]
    pub(crate) unsafe fn new(params: &FilterParams) -> Self {
        PostProcess {
            div: L::splat_f(params.div),
            bias: L::splat_f(params.bias),
            maxval: L::splat_f(params.maxval as f32),
            saturate: params.saturate,
        }
    }
}

/// Sample type specific view on lanes: integer samples widen into `I` lanes, floats
/// use `F` lanes.
pub(crate) trait SampleLanes<T: Sample>: Lanes {
    type V: Copy;
    /// Partial sum cell of multi pass convolutions.
    type Acc: Copy + Default;

    unsafe fn load(ptr: *const T) -> Self::V;
    unsafe fn store(ptr: *mut T, v: Self::V);
    unsafe fn load_acc(ptr: *const Self::Acc) -> Self::V;
    unsafe fn store_acc(ptr: *mut Self::Acc, v: Self::V);

    unsafe fn vzero() -> Self::V;
    unsafe fn vadd(a: Self::V, b: Self::V) -> Self::V;
    unsafe fn vsub(a: Self::V, b: Self::V) -> Self::V;
    unsafe fn vmin(a: Self::V, b: Self::V) -> Self::V;
    unsafe fn vmax(a: Self::V, b: Self::V) -> Self::V;
    /// `acc + v * w`.
    unsafe fn vmul_add(acc: Self::V, v: Self::V, w: Self::V) -> Self::V;

    unsafe fn splat_weight(params: &FilterParams, index: usize) -> Self::V;
    unsafe fn splat_threshold(params: &FilterParams) -> Self::V;
    unsafe fn splat_maxval(params: &FilterParams) -> Self::V;

    unsafe fn raise_limit(center: Self::V, threshold: Self::V) -> Self::V;
    /// Integers never go below zero.
    unsafe fn lower_limit(center: Self::V, threshold: Self::V) -> Self::V;
    unsafe fn mean8(sum: Self::V) -> Self::V;
    /// Integers are limited to `maxval`, floats pass through.
    unsafe fn limit(v: Self::V, maxval: Self::V) -> Self::V;

    unsafe fn to_f32(v: Self::V) -> Self::F;
    /// Integers are clamped into `0..=maxval` and rounded half to even.
    unsafe fn from_f32(v: Self::F, maxval: Self::F) -> Self::V;

    /// `acc * div + bias`, absolute when not saturating, then converted back.
    #[inline(always)]
    unsafe fn finish(acc: Self::V, post: &PostProcess<Self>) -> Self::V {
        let mut y = Self::add_f(Self::mul_f(Self::to_f32(acc), post.div), post.bias);
        if !post.saturate {
            y = Self::abs_f(y);
        }
        Self::from_f32(y, post.maxval)
    }
}

macro_rules! integer_sample_lanes {
    ($t:ty, $load:ident, $store:ident) => {
        impl<L: Lanes> SampleLanes<$t> for L {
            type V = L::I;
            type Acc = i32;

            #[inline(always)]
            unsafe fn load(ptr: *const $t) -> L::I {
                L::$load(ptr)
            }

            #[inline(always)]
            unsafe fn store(ptr: *mut $t, v: L::I) {
                L::$store(ptr, v)
            }

            #[inline(always)]
            unsafe fn load_acc(ptr: *const i32) -> L::I {
                L::load_i32(ptr)
            }

            #[inline(always)]
            unsafe fn store_acc(ptr: *mut i32, v: L::I) {
                L::store_i32(ptr, v)
            }

            #[inline(always)]
            unsafe fn vzero() -> L::I {
                L::splat_i(0)
            }

            #[inline(always)]
            unsafe fn vadd(a: L::I, b: L::I) -> L::I {
                L::add_i(a, b)
            }

            #[inline(always)]
            unsafe fn vsub(a: L::I, b: L::I) -> L::I {
                L::sub_i(a, b)
            }

            #[inline(always)]
            unsafe fn vmin(a: L::I, b: L::I) -> L::I {
                L::min_i(a, b)
            }

            #[inline(always)]
            unsafe fn vmax(a: L::I, b: L::I) -> L::I {
                L::max_i(a, b)
            }

            #[inline(always)]
            unsafe fn vmul_add(acc: L::I, v: L::I, w: L::I) -> L::I {
                L::add_i(acc, L::mul_i(v, w))
            }

            #[inline(always)]
            unsafe fn splat_weight(params: &FilterParams, index: usize) -> L::I {
                L::splat_i(params.matrix[index] as i32)
            }

            #[inline(always)]
            unsafe fn splat_threshold(params: &FilterParams) -> L::I {
                L::splat_i(params.threshold as i32)
            }

            #[inline(always)]
            unsafe fn splat_maxval(params: &FilterParams) -> L::I {
                L::splat_i(params.maxval as i32)
            }

            #[inline(always)]
            unsafe fn raise_limit(center: L::I, threshold: L::I) -> L::I {
                L::add_i(center, threshold)
            }

            #[inline(always)]
            unsafe fn lower_limit(center: L::I, threshold: L::I) -> L::I {
                L::max_i(L::sub_i(center, threshold), L::splat_i(0))
            }

            #[inline(always)]
            unsafe fn mean8(sum: L::I) -> L::I {
                L::shr_i::<3>(L::add_i(sum, L::splat_i(4)))
            }

            #[inline(always)]
            unsafe fn limit(v: L::I, maxval: L::I) -> L::I {
                L::min_i(v, maxval)
            }

            #[inline(always)]
            unsafe fn to_f32(v: L::I) -> L::F {
                L::cvt_i_f(v)
            }

            #[inline(always)]
            unsafe fn from_f32(v: L::F, maxval: L::F) -> L::I {
                // Zero first so NaN settles at zero.
                let clamped = L::min_f(L::max_f(L::splat_f(0.), v), maxval);
                L::cvt_round_f_i(clamped)
            }
        }
    };
}

integer_sample_lanes!(u8, load_u8, store_u8);
integer_sample_lanes!(u16, load_u16, store_u16);

impl<L: Lanes> SampleLanes<f32> for L {
    type V = L::F;
    type Acc = f32;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> L::F {
        L::load_f32(ptr)
    }

    #[inline(always)]
    unsafe fn store(ptr: *mut f32, v: L::F) {
        L::store_f32(ptr, v)
    }

    #[inline(always)]
    unsafe fn load_acc(ptr: *const f32) -> L::F {
        L::load_f32(ptr)
    }

    #[inline(always)]
    unsafe fn store_acc(ptr: *mut f32, v: L::F) {
        L::store_f32(ptr, v)
    }

    #[inline(always)]
    unsafe fn vzero() -> L::F {
        L::splat_f(0.)
    }

    #[inline(always)]
    unsafe fn vadd(a: L::F, b: L::F) -> L::F {
        L::add_f(a, b)
    }

    #[inline(always)]
    unsafe fn vsub(a: L::F, b: L::F) -> L::F {
        L::sub_f(a, b)
    }

    #[inline(always)]
    unsafe fn vmin(a: L::F, b: L::F) -> L::F {
        L::min_f(a, b)
    }

    #[inline(always)]
    unsafe fn vmax(a: L::F, b: L::F) -> L::F {
        L::max_f(a, b)
    }

    #[inline(always)]
    unsafe fn vmul_add(acc: L::F, v: L::F, w: L::F) -> L::F {
        L::add_f(acc, L::mul_f(v, w))
    }

    #[inline(always)]
    unsafe fn splat_weight(params: &FilterParams, index: usize) -> L::F {
        L::splat_f(params.matrixf[index])
    }

    #[inline(always)]
    unsafe fn splat_threshold(params: &FilterParams) -> L::F {
        L::splat_f(params.thresholdf)
    }

    #[inline(always)]
    unsafe fn splat_maxval(params: &FilterParams) -> L::F {
        L::splat_f(params.maxval as f32)
    }

    #[inline(always)]
    unsafe fn raise_limit(center: L::F, threshold: L::F) -> L::F {
        L::add_f(center, threshold)
    }

    #[inline(always)]
    unsafe fn lower_limit(center: L::F, threshold: L::F) -> L::F {
        L::sub_f(center, threshold)
    }

    #[inline(always)]
    unsafe fn mean8(sum: L::F) -> L::F {
        L::mul_f(sum, L::splat_f(0.125))
    }

    #[inline(always)]
    unsafe fn limit(v: L::F, _: L::F) -> L::F {
        v
    }

    #[inline(always)]
    unsafe fn to_f32(v: L::F) -> L::F {
        v
    }

    #[inline(always)]
    unsafe fn from_f32(v: L::F, _: L::F) -> L::F {
        v
    }
}
