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
use std::arch::x86_64::*;

/// 8 lanes of AVX2.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Avx2Lanes;

impl Lanes for Avx2Lanes {
    const LANES: usize = 8;

    type F = __m256;
    type I = __m256i;

    #[inline(always)]
    unsafe fn splat_f(v: f32) -> __m256 {
        _mm256_set1_ps(v)
    }

    #[inline(always)]
    unsafe fn splat_i(v: i32) -> __m256i {
        _mm256_set1_epi32(v)
    }

    #[inline(always)]
    unsafe fn load_u8(ptr: *const u8) -> __m256i {
        _mm256_cvtepu8_epi32(_mm_loadl_epi64(ptr as *const __m128i))
    }

    #[inline(always)]
    unsafe fn load_u16(ptr: *const u16) -> __m256i {
        _mm256_cvtepu16_epi32(_mm_loadu_si128(ptr as *const __m128i))
    }

    #[inline(always)]
    unsafe fn load_f32(ptr: *const f32) -> __m256 {
        _mm256_loadu_ps(ptr)
    }

    #[inline(always)]
    unsafe fn load_i32(ptr: *const i32) -> __m256i {
        _mm256_loadu_si256(ptr as *const __m256i)
    }

    #[inline(always)]
    unsafe fn store_u8(ptr: *mut u8, v: __m256i) {
        let lo = _mm256_castsi256_si128(v);
        let hi = _mm256_extracti128_si256::<1>(v);
        let s16 = _mm_packs_epi32(lo, hi);
        let v8 = _mm_packus_epi16(s16, s16);
        _mm_storel_epi64(ptr as *mut __m128i, v8);
    }

    #[inline(always)]
    unsafe fn store_u16(ptr: *mut u16, v: __m256i) {
        let lo = _mm256_castsi256_si128(v);
        let hi = _mm256_extracti128_si256::<1>(v);
        _mm_storeu_si128(ptr as *mut __m128i, _mm_packus_epi32(lo, hi));
    }

    #[inline(always)]
    unsafe fn store_f32(ptr: *mut f32, v: __m256) {
        _mm256_storeu_ps(ptr, v);
    }

    #[inline(always)]
    unsafe fn store_i32(ptr: *mut i32, v: __m256i) {
        _mm256_storeu_si256(ptr as *mut __m256i, v);
    }

    #[inline(always)]
    unsafe fn add_i(a: __m256i, b: __m256i) -> __m256i {
        _mm256_add_epi32(a, b)
    }

    #[inline(always)]
    unsafe fn sub_i(a: __m256i, b: __m256i) -> __m256i {
        _mm256_sub_epi32(a, b)
    }

    #[inline(always)]
    unsafe fn mul_i(a: __m256i, b: __m256i) -> __m256i {
        _mm256_mullo_epi32(a, b)
    }

    #[inline(always)]
    unsafe fn min_i(a: __m256i, b: __m256i) -> __m256i {
        _mm256_min_epi32(a, b)
    }

    #[inline(always)]
    unsafe fn max_i(a: __m256i, b: __m256i) -> __m256i {
        _mm256_max_epi32(a, b)
    }

    #[inline(always)]
    unsafe fn shr_i<const S: i32>(a: __m256i) -> __m256i {
        _mm256_srai_epi32::<S>(a)
    }

    #[inline(always)]
    unsafe fn add_f(a: __m256, b: __m256) -> __m256 {
        _mm256_add_ps(a, b)
    }

    #[inline(always)]
    unsafe fn sub_f(a: __m256, b: __m256) -> __m256 {
        _mm256_sub_ps(a, b)
    }

    #[inline(always)]
    unsafe fn mul_f(a: __m256, b: __m256) -> __m256 {
        _mm256_mul_ps(a, b)
    }

    #[inline(always)]
    unsafe fn min_f(a: __m256, b: __m256) -> __m256 {
        // The second operand is returned on NaN.
        _mm256_min_ps(b, a)
    }

    #[inline(always)]
    unsafe fn max_f(a: __m256, b: __m256) -> __m256 {
        _mm256_max_ps(b, a)
    }

    #[inline(always)]
    unsafe fn sqrt_f(a: __m256) -> __m256 {
        _mm256_sqrt_ps(a)
    }

    #[inline(always)]
    unsafe fn abs_f(a: __m256) -> __m256 {
        _mm256_andnot_ps(_mm256_set1_ps(-0.), a)
    }

    #[inline(always)]
    unsafe fn cvt_i_f(a: __m256i) -> __m256 {
        _mm256_cvtepi32_ps(a)
    }

    #[inline(always)]
    unsafe fn cvt_round_f_i(a: __m256) -> __m256i {
        _mm256_cvtps_epi32(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[target_feature(enable = "avx2")]
    unsafe fn pack_roundtrip(values: [i32; 8]) -> ([u8; 8], [u16; 8]) {
        let v = _mm256_loadu_si256(values.as_ptr() as *const __m256i);
        let mut bytes = [0u8; 8];
        let mut words = [0u16; 8];
        Avx2Lanes::store_u8(bytes.as_mut_ptr(), v);
        Avx2Lanes::store_u16(words.as_mut_ptr(), v);
        (bytes, words)
    }

    #[test]
    fn test_stores_keep_lane_order_and_saturate() {
        if !std::arch::is_x86_feature_detected!("avx2") {
            return;
        }
        let (bytes, words) = unsafe { pack_roundtrip([0, 1, 2, 3, 255, 256, -1, 70000]) };
        assert_eq!(bytes, [0, 1, 2, 3, 255, 255, 0, 255]);
        assert_eq!(words, [0, 1, 2, 3, 255, 256, 0, 65535]);
    }
}
