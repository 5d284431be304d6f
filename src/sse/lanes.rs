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
use crate::sse::utils::_shuffle;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// 4 lanes of SSE2, 32 bit integer min, max and multiply are emulated.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Sse2Lanes;

impl Lanes for Sse2Lanes {
    const LANES: usize = 4;

    type F = __m128;
    type I = __m128i;

    #[inline(always)]
    unsafe fn splat_f(v: f32) -> __m128 {
        _mm_set1_ps(v)
    }

    #[inline(always)]
    unsafe fn splat_i(v: i32) -> __m128i {
        _mm_set1_epi32(v)
    }

    #[inline(always)]
    unsafe fn load_u8(ptr: *const u8) -> __m128i {
        let zeros = _mm_setzero_si128();
        let v = _mm_cvtsi32_si128(ptr.cast::<i32>().read_unaligned());
        _mm_unpacklo_epi16(_mm_unpacklo_epi8(v, zeros), zeros)
    }

    #[inline(always)]
    unsafe fn load_u16(ptr: *const u16) -> __m128i {
        let v = _mm_loadl_epi64(ptr as *const __m128i);
        _mm_unpacklo_epi16(v, _mm_setzero_si128())
    }

    #[inline(always)]
    unsafe fn load_f32(ptr: *const f32) -> __m128 {
        _mm_loadu_ps(ptr)
    }

    #[inline(always)]
    unsafe fn load_i32(ptr: *const i32) -> __m128i {
        _mm_loadu_si128(ptr as *const __m128i)
    }

    #[inline(always)]
    unsafe fn store_u8(ptr: *mut u8, v: __m128i) {
        let s16 = _mm_packs_epi32(v, v);
        let v8 = _mm_packus_epi16(s16, s16);
        ptr.cast::<i32>().write_unaligned(_mm_cvtsi128_si32(v8));
    }

    #[inline(always)]
    unsafe fn store_u16(ptr: *mut u16, v: __m128i) {
        // No unsigned 32 -> 16 pack in SSE2: shift into the signed range, pack, shift back.
        let biased = _mm_sub_epi32(v, _mm_set1_epi32(32768));
        let packed = _mm_packs_epi32(biased, biased);
        let restored = _mm_add_epi16(packed, _mm_set1_epi16(i16::MIN));
        _mm_storel_epi64(ptr as *mut __m128i, restored);
    }

    #[inline(always)]
    unsafe fn store_f32(ptr: *mut f32, v: __m128) {
        _mm_storeu_ps(ptr, v);
    }

    #[inline(always)]
    unsafe fn store_i32(ptr: *mut i32, v: __m128i) {
        _mm_storeu_si128(ptr as *mut __m128i, v);
    }

    #[inline(always)]
    unsafe fn add_i(a: __m128i, b: __m128i) -> __m128i {
        _mm_add_epi32(a, b)
    }

    #[inline(always)]
    unsafe fn sub_i(a: __m128i, b: __m128i) -> __m128i {
        _mm_sub_epi32(a, b)
    }

    #[inline(always)]
    unsafe fn mul_i(a: __m128i, b: __m128i) -> __m128i {
        const LOW_HALVES: i32 = _shuffle(0, 0, 2, 0);
        let even = _mm_mul_epu32(a, b);
        let odd = _mm_mul_epu32(_mm_srli_epi64::<32>(a), _mm_srli_epi64::<32>(b));
        _mm_unpacklo_epi32(
            _mm_shuffle_epi32::<LOW_HALVES>(even),
            _mm_shuffle_epi32::<LOW_HALVES>(odd),
        )
    }

    #[inline(always)]
    unsafe fn min_i(a: __m128i, b: __m128i) -> __m128i {
        let gt = _mm_cmpgt_epi32(a, b);
        _mm_or_si128(_mm_and_si128(gt, b), _mm_andnot_si128(gt, a))
    }

    #[inline(always)]
    unsafe fn max_i(a: __m128i, b: __m128i) -> __m128i {
        let gt = _mm_cmpgt_epi32(a, b);
        _mm_or_si128(_mm_and_si128(gt, a), _mm_andnot_si128(gt, b))
    }

    #[inline(always)]
    unsafe fn shr_i<const S: i32>(a: __m128i) -> __m128i {
        _mm_srai_epi32::<S>(a)
    }

    #[inline(always)]
    unsafe fn add_f(a: __m128, b: __m128) -> __m128 {
        _mm_add_ps(a, b)
    }

    #[inline(always)]
    unsafe fn sub_f(a: __m128, b: __m128) -> __m128 {
        _mm_sub_ps(a, b)
    }

    #[inline(always)]
    unsafe fn mul_f(a: __m128, b: __m128) -> __m128 {
        _mm_mul_ps(a, b)
    }

    #[inline(always)]
    unsafe fn min_f(a: __m128, b: __m128) -> __m128 {
        // The second operand is returned on NaN.
        _mm_min_ps(b, a)
    }

    #[inline(always)]
    unsafe fn max_f(a: __m128, b: __m128) -> __m128 {
        _mm_max_ps(b, a)
    }

    #[inline(always)]
    unsafe fn sqrt_f(a: __m128) -> __m128 {
        _mm_sqrt_ps(a)
    }

    #[inline(always)]
    unsafe fn abs_f(a: __m128) -> __m128 {
        _mm_andnot_ps(_mm_set1_ps(-0.), a)
    }

    #[inline(always)]
    unsafe fn cvt_i_f(a: __m128i) -> __m128 {
        _mm_cvtepi32_ps(a)
    }

    #[inline(always)]
    unsafe fn cvt_round_f_i(a: __m128) -> __m128i {
        _mm_cvtps_epi32(a)
    }
}
