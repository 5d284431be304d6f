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
use std::arch::aarch64::*;

/// 4 lanes of NEON.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct NeonLanes;

impl Lanes for NeonLanes {
    const LANES: usize = 4;

    type F = float32x4_t;
    type I = int32x4_t;

    #[inline(always)]
    unsafe fn splat_f(v: f32) -> float32x4_t {
        vdupq_n_f32(v)
    }

    #[inline(always)]
    unsafe fn splat_i(v: i32) -> int32x4_t {
        vdupq_n_s32(v)
    }

    #[inline(always)]
    unsafe fn load_u8(ptr: *const u8) -> int32x4_t {
        let v8 = vcreate_u8(ptr.cast::<u32>().read_unaligned() as u64);
        let v16 = vget_low_u16(vmovl_u8(v8));
        vreinterpretq_s32_u32(vmovl_u16(v16))
    }

    #[inline(always)]
    unsafe fn load_u16(ptr: *const u16) -> int32x4_t {
        vreinterpretq_s32_u32(vmovl_u16(vld1_u16(ptr)))
    }

    #[inline(always)]
    unsafe fn load_f32(ptr: *const f32) -> float32x4_t {
        vld1q_f32(ptr)
    }

    #[inline(always)]
    unsafe fn load_i32(ptr: *const i32) -> int32x4_t {
        vld1q_s32(ptr)
    }

    #[inline(always)]
    unsafe fn store_u8(ptr: *mut u8, v: int32x4_t) {
        let s16 = vqmovun_s32(v);
        let v8 = vqmovn_u16(vcombine_u16(s16, s16));
        ptr.cast::<u32>()
            .write_unaligned(vget_lane_u32::<0>(vreinterpret_u32_u8(v8)));
    }

    #[inline(always)]
    unsafe fn store_u16(ptr: *mut u16, v: int32x4_t) {
        vst1_u16(ptr, vqmovun_s32(v));
    }

    #[inline(always)]
    unsafe fn store_f32(ptr: *mut f32, v: float32x4_t) {
        vst1q_f32(ptr, v);
    }

    #[inline(always)]
    unsafe fn store_i32(ptr: *mut i32, v: int32x4_t) {
        vst1q_s32(ptr, v);
    }

    #[inline(always)]
    unsafe fn add_i(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vaddq_s32(a, b)
    }

    #[inline(always)]
    unsafe fn sub_i(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vsubq_s32(a, b)
    }

    #[inline(always)]
    unsafe fn mul_i(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vmulq_s32(a, b)
    }

    #[inline(always)]
    unsafe fn min_i(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vminq_s32(a, b)
    }

    #[inline(always)]
    unsafe fn max_i(a: int32x4_t, b: int32x4_t) -> int32x4_t {
        vmaxq_s32(a, b)
    }

    #[inline(always)]
    unsafe fn shr_i<const S: i32>(a: int32x4_t) -> int32x4_t {
        vshrq_n_s32::<S>(a)
    }

    #[inline(always)]
    unsafe fn add_f(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        vaddq_f32(a, b)
    }

    #[inline(always)]
    unsafe fn sub_f(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        vsubq_f32(a, b)
    }

    #[inline(always)]
    unsafe fn mul_f(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        vmulq_f32(a, b)
    }

    #[inline(always)]
    unsafe fn min_f(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        vbslq_f32(vcltq_f32(b, a), b, a)
    }

    #[inline(always)]
    unsafe fn max_f(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        vbslq_f32(vcgtq_f32(b, a), b, a)
    }

    #[inline(always)]
    unsafe fn sqrt_f(a: float32x4_t) -> float32x4_t {
        vsqrtq_f32(a)
    }

    #[inline(always)]
    unsafe fn abs_f(a: float32x4_t) -> float32x4_t {
        vabsq_f32(a)
    }

    #[inline(always)]
    unsafe fn cvt_i_f(a: int32x4_t) -> float32x4_t {
        vcvtq_f32_s32(a)
    }

    #[inline(always)]
    unsafe fn cvt_round_f_i(a: float32x4_t) -> int32x4_t {
        vcvtnq_s32_f32(a)
    }
}
