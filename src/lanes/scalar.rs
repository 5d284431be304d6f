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
use crate::lanes::Lanes;

/// Single lane fallback, also computes plane edges and tails of the vector backends.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct ScalarLanes;

impl Lanes for ScalarLanes {
    const LANES: usize = 1;

    type F = f32;
    type I = i32;

    #[inline(always)]
    unsafe fn splat_f(v: f32) -> f32 {
        v
    }

    #[inline(always)]
    unsafe fn splat_i(v: i32) -> i32 {
        v
    }

    #[inline(always)]
    unsafe fn load_u8(ptr: *const u8) -> i32 {
        ptr.read() as i32
    }

    #[inline(always)]
    unsafe fn load_u16(ptr: *const u16) -> i32 {
        ptr.read_unaligned() as i32
    }

    #[inline(always)]
    unsafe fn load_f32(ptr: *const f32) -> f32 {
        ptr.read_unaligned()
    }

    #[inline(always)]
    unsafe fn load_i32(ptr: *const i32) -> i32 {
        ptr.read_unaligned()
    }

    #[inline(always)]
    unsafe fn store_u8(ptr: *mut u8, v: i32) {
        ptr.write(v.clamp(0, u8::MAX as i32) as u8);
    }

    #[inline(always)]
    unsafe fn store_u16(ptr: *mut u16, v: i32) {
        ptr.write_unaligned(v.clamp(0, u16::MAX as i32) as u16);
    }

    #[inline(always)]
    unsafe fn store_f32(ptr: *mut f32, v: f32) {
        ptr.write_unaligned(v);
    }

    #[inline(always)]
    unsafe fn store_i32(ptr: *mut i32, v: i32) {
        ptr.write_unaligned(v);
    }

    #[inline(always)]
    unsafe fn add_i(a: i32, b: i32) -> i32 {
        a.wrapping_add(b)
    }

    #[inline(always)]
    unsafe fn sub_i(a: i32, b: i32) -> i32 {
        a.wrapping_sub(b)
    }

    #[inline(always)]
    unsafe fn mul_i(a: i32, b: i32) -> i32 {
        a.wrapping_mul(b)
    }

    #[inline(always)]
    unsafe fn min_i(a: i32, b: i32) -> i32 {
        a.min(b)
    }

    #[inline(always)]
    unsafe fn max_i(a: i32, b: i32) -> i32 {
        a.max(b)
    }

    #[inline(always)]
    unsafe fn shr_i<const S: i32>(a: i32) -> i32 {
        a >> S
    }

    #[inline(always)]
    unsafe fn add_f(a: f32, b: f32) -> f32 {
        a + b
    }

    #[inline(always)]
    unsafe fn sub_f(a: f32, b: f32) -> f32 {
        a - b
    }

    #[inline(always)]
    unsafe fn mul_f(a: f32, b: f32) -> f32 {
        a * b
    }

    #[inline(always)]
    unsafe fn min_f(a: f32, b: f32) -> f32 {
        if b < a {
            b
        } else {
            a
        }
    }

    #[inline(always)]
    unsafe fn max_f(a: f32, b: f32) -> f32 {
        if b > a {
            b
        } else {
            a
        }
    }

    #[inline(always)]
    unsafe fn sqrt_f(a: f32) -> f32 {
        a.sqrt()
    }

    #[inline(always)]
    unsafe fn abs_f(a: f32) -> f32 {
        a.abs()
    }

    #[inline(always)]
    unsafe fn cvt_i_f(a: i32) -> f32 {
        a as f32
    }

    #[inline(always)]
    unsafe fn cvt_round_f_i(a: f32) -> i32 {
        a.round_ties_even() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::{PostProcess, SampleLanes};
    use crate::params::FilterParams;

    #[test]
    fn test_min_max_keep_first_operand_on_nan() {
        unsafe {
            assert_eq!(ScalarLanes::max_f(1., f32::NAN), 1.);
            assert_eq!(ScalarLanes::min_f(3., f32::NAN), 3.);
            assert!(ScalarLanes::max_f(f32::NAN, 0.).is_nan());
            assert!(ScalarLanes::min_f(f32::NAN, 3.).is_nan());
            assert_eq!(ScalarLanes::max_f(2., 5.), 5.);
            assert_eq!(ScalarLanes::min_f(2., 5.), 2.);
        }
    }

    #[test]
    fn test_nan_converts_to_zero() {
        let maxval = 255.;
        unsafe {
            let v = <ScalarLanes as SampleLanes<u8>>::from_f32(f32::NAN, maxval);
            assert_eq!(v, 0);
        }
    }

    #[test]
    fn test_finish_applies_abs_when_not_saturating() {
        let params = FilterParams {
            div: 0.5,
            bias: -10.,
            saturate: false,
            ..Default::default()
        };
        unsafe {
            let post = PostProcess::<ScalarLanes>::new(&params);
            let v = <ScalarLanes as SampleLanes<u8>>::finish(4, &post);
            assert_eq!(v, 8);
            let saturated = PostProcess::<ScalarLanes>::new(&FilterParams {
                saturate: true,
                ..params
            });
            let v = <ScalarLanes as SampleLanes<u8>>::finish(4, &saturated);
            assert_eq!(v, 0);
        }
    }
}
