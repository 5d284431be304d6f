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

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use plane_kernels::{
    filter_plane, Backend, ConvolutionMode, FilterSettings, Plane, PlaneMut, SampleFormat,
};

#[derive(Clone, Debug, Arbitrary)]
pub struct Settings {
    pub bits: u8,
    pub threshold: f32,
    pub coordinates: Vec<bool>,
    pub matrix: Vec<f64>,
    pub mode: u8,
    pub divisor: Option<f64>,
    pub bias: f32,
    pub saturate: bool,
    pub width: u8,
    pub height: u8,
}

fuzz_target!(|data: Settings| {
    let Ok(settings) = FilterSettings::new(SampleFormat::Word, data.bits as u32) else {
        return;
    };
    let settings = match settings.threshold(data.threshold) {
        Ok(settings) => settings,
        Err(_) => settings,
    };
    let settings = match settings.coordinates(&data.coordinates) {
        Ok(settings) => settings,
        Err(_) => settings,
    };
    let mode = match data.mode % 4 {
        0 => ConvolutionMode::Square,
        1 => ConvolutionMode::Horizontal,
        2 => ConvolutionMode::Vertical,
        _ => ConvolutionMode::Separable,
    };
    let Ok((kind, params)) =
        settings.convolution(&data.matrix, mode, data.divisor, data.bias, data.saturate)
    else {
        return;
    };
    let width = data.width as usize % 48;
    let height = data.height as usize % 48;
    if width == 0 || height == 0 {
        return;
    }
    let src_data = vec![params.maxval / 3; width * height];
    let src = Plane::borrow(&src_data, width, height);
    let mut dst = PlaneMut::alloc(width, height);
    filter_plane(kind, &src, &mut dst, &params, Backend::best()).unwrap();
    assert!(dst.data.borrow().iter().all(|&v| v <= params.maxval));
});
