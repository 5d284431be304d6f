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
use criterion::{criterion_group, criterion_main, Criterion};
use plane_kernels::{select_kernel, Backend, FilterParams, KernelKind};
use rand::prelude::*;

const WIDTH: usize = 1920;
const HEIGHT: usize = 1080;

fn gaussian_params(taps: usize) -> FilterParams {
    let mut params = FilterParams {
        matrixsize: taps as u32,
        ..FilterParams::default()
    };
    let sigma = taps as f32 / 6.;
    let mut sum = 0.;
    for k in 0..taps {
        let x = k as f32 - (taps / 2) as f32;
        let w = (-(x * x) / (2. * sigma * sigma)).exp();
        params.matrix[k] = (w * 64.).round() as i16;
        params.matrixf[k] = w;
        sum += w;
    }
    params.div = 1. / sum;
    params
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let bytes: Vec<u8> = (0..WIDTH * HEIGHT).map(|_| rng.random()).collect();
    let floats: Vec<f32> = bytes.iter().map(|&v| v as f32 / 255.).collect();
    let defaults = FilterParams::default();

    for backend in Backend::available() {
        for kind in [KernelKind::Sobel, KernelKind::Median, KernelKind::Inflate] {
            let kernel = select_kernel::<u8>(kind, backend, 0).unwrap();
            let mut dst = vec![0u8; bytes.len()];
            c.bench_function(&format!("{backend:?}: {kind:?} u8 1080p"), |b| {
                b.iter(|| kernel(&bytes, WIDTH, &mut dst, WIDTH, &defaults, WIDTH, HEIGHT))
            });
        }

        for taps in [5usize, 13, 25] {
            let params = gaussian_params(taps);
            let mut params_u8 = params;
            params_u8.div = 1. / params.matrix[..taps].iter().map(|&x| x as f32).sum::<f32>();

            let kernel =
                select_kernel::<u8>(KernelKind::ConvolutionSeparable, backend, taps as u32)
                    .unwrap();
            let mut dst = vec![0u8; bytes.len()];
            c.bench_function(&format!("{backend:?}: separable {taps} taps u8 1080p"), |b| {
                b.iter(|| kernel(&bytes, WIDTH, &mut dst, WIDTH, &params_u8, WIDTH, HEIGHT))
            });

            let kernel =
                select_kernel::<f32>(KernelKind::ConvolutionSeparable, backend, taps as u32)
                    .unwrap();
            let mut dst = vec![0f32; floats.len()];
            c.bench_function(&format!("{backend:?}: separable {taps} taps f32 1080p"), |b| {
                b.iter(|| kernel(&floats, WIDTH, &mut dst, WIDTH, &params, WIDTH, HEIGHT))
            });
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
