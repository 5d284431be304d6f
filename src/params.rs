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
/// Maximum amount of coefficients a kernel may carry, enough for 5x5 and 25 tap 1D filters.
pub const MAX_MATRIX_SIZE: usize = 25;

/// Stencil that selects all 8 neighbours of the 3x3 window.
pub const FULL_STENCIL: u8 = 0xff;

/// Flat per call configuration shared by every kernel.
///
/// Fields carry the same names and meaning as the host parameter block, but the
/// struct is a Rust value: hosts copy their fields into it rather than passing
/// their memory through.
///
/// Stencil bits select neighbours of the 3x3 window for Minimum and Maximum:
///
/// | bit | neighbour    |
/// |-----|--------------|
/// | 0   | top left     |
/// | 1   | top          |
/// | 2   | top right    |
/// | 3   | left         |
/// | 4   | right        |
/// | 5   | bottom left  |
/// | 6   | bottom       |
/// | 7   | bottom right |
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FilterParams {
    /// Clamp ceiling for integer samples.
    pub maxval: u16,
    /// Prewitt and Sobel magnitude multiplier.
    pub scale: f32,
    /// Integer threshold for Minimum, Maximum, Deflate and Inflate.
    pub threshold: u16,
    /// Float threshold for Minimum, Maximum, Deflate and Inflate.
    pub thresholdf: f32,
    pub stencil: u8,
    /// Active tap count, odd in `3..=25` for 1D filters, 9 or 25 for square ones.
    pub matrixsize: u32,
    pub matrix: [i16; MAX_MATRIX_SIZE],
    pub matrixf: [f32; MAX_MATRIX_SIZE],
    /// Reciprocal of the divisor applied to the convolution sum.
    pub div: f32,
    pub bias: f32,
    /// When `false` convolution results are replaced by their absolute value.
    pub saturate: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams {
            maxval: 255,
            scale: 1.,
            threshold: 255,
            thresholdf: f32::MAX,
            stencil: FULL_STENCIL,
            matrixsize: 0,
            matrix: [0; MAX_MATRIX_SIZE],
            matrixf: [0.; MAX_MATRIX_SIZE],
            div: 1.,
            bias: 0.,
            saturate: true,
        }
    }
}

impl FilterParams {
    /// Support radius of the active kernel.
    #[inline]
    pub fn support(&self) -> usize {
        self.matrixsize as usize / 2
    }

    /// Returns `true` when the stencil selects the given neighbour.
    #[inline]
    pub fn stencil_selects(&self, bit: u32) -> bool {
        self.stencil & (1 << bit) != 0
    }
}
