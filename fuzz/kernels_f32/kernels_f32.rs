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
use plane_kernels::{select_kernel, Backend, FilterParams, KernelKind};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcPlane {
    pub width: u8,
    pub height: u8,
    pub kind: u8,
    pub matrix_size: u8,
    pub coefficients: [i8; 25],
    pub threshold: u8,
    pub stencil: u8,
    pub scale: u8,
    pub saturate: bool,
    pub value: u16,
}

fuzz_target!(|data: SrcPlane| {
    let width = data.width as usize % 70;
    let height = data.height as usize % 40;
    if width == 0 || height == 0 {
        return;
    }
    let kind = KernelKind::ALL[data.kind as usize % KernelKind::ALL.len()];
    let matrixsize = match kind {
        KernelKind::Convolution3x3 => 9,
        KernelKind::Convolution5x5 => 25,
        KernelKind::ConvolutionH | KernelKind::ConvolutionV | KernelKind::ConvolutionSeparable => {
            3 + 2 * (data.matrix_size as u32 % 12)
        }
        _ => 0,
    };
    let mut params = FilterParams {
        maxval: u16::MAX,
        thresholdf: data.threshold as f32 * 0.5,
        stencil: data.stencil,
        scale: data.scale as f32 / 64.,
        matrixsize,
        div: 1. / 16.,
        saturate: data.saturate,
        ..FilterParams::default()
    };
    for (k, &c) in data.coefficients.iter().enumerate() {
        params.matrix[k] = c as i16;
        params.matrixf[k] = c as f32 * 0.125;
    }

    let src: Vec<f32> = (0..width * height)
        .map(|i| {
            let bits = (i as u32).wrapping_mul(2654435761).wrapping_add(data.value as u32);
            (bits % 20000) as f32 * 0.05 - 100.
        })
        .collect();
    let reference = select_kernel::<f32>(kind, Backend::Scalar, matrixsize).unwrap();
    let mut expected = vec![0f32; src.len()];
    reference(&src, width, &mut expected, width, &params, width, height);

    for backend in Backend::available() {
        let kernel = select_kernel::<f32>(kind, backend, matrixsize).unwrap();
        let mut dst = vec![0f32; src.len()];
        kernel(&src, width, &mut dst, width, &params, width, height);
        for (a, b) in dst.iter().zip(expected.iter()) {
            assert!(
                (a - b).abs() <= 1e-4 * b.abs().max(1.),
                "{kind:?} {matrixsize} on {backend:?}: {a} != {b}"
            );
        }
    }
});
