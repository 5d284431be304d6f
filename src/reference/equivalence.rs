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
//! Vector kernels against the per pixel reference.
use crate::dispatch::{select_kernel, Backend, KernelKind, KernelSample, PlaneKernel};
use crate::edge_mode::reflect_101;
use crate::lanes::{SampleLanes, ScalarLanes};
use crate::params::FilterParams;
use rand::prelude::*;

/// The vector drivers on single lanes, exercised on every host.
mod portable {
    crate::dispatch::backend_kernels!(crate::lanes::ScalarLanes);
}

trait TestSample: KernelSample {
    fn random(rng: &mut StdRng, maxval: u16) -> Self;

    fn random_maxval(rng: &mut StdRng) -> u16;

    fn random_weight(rng: &mut StdRng) -> (i16, f32);

    fn close(a: Self, b: Self) -> bool;
}

impl TestSample for u8 {
    fn random(rng: &mut StdRng, _: u16) -> u8 {
        rng.random()
    }

    fn random_maxval(_: &mut StdRng) -> u16 {
        255
    }

    fn random_weight(rng: &mut StdRng) -> (i16, f32) {
        let w = rng.random_range(-16..=16);
        (w, w as f32)
    }

    fn close(a: u8, b: u8) -> bool {
        a == b
    }
}

impl TestSample for u16 {
    fn random(rng: &mut StdRng, maxval: u16) -> u16 {
        rng.random_range(0..=maxval)
    }

    fn random_maxval(rng: &mut StdRng) -> u16 {
        [511, 1023, 4095, 65535][rng.random_range(0..4)]
    }

    fn random_weight(rng: &mut StdRng) -> (i16, f32) {
        let w = rng.random_range(-16..=16);
        (w, w as f32)
    }

    fn close(a: u16, b: u16) -> bool {
        a == b
    }
}

impl TestSample for f32 {
    fn random(rng: &mut StdRng, _: u16) -> f32 {
        rng.random_range(-100f32..1000.)
    }

    fn random_maxval(_: &mut StdRng) -> u16 {
        u16::MAX
    }

    fn random_weight(rng: &mut StdRng) -> (i16, f32) {
        let w = rng.random_range(-4f32..4.);
        (w.round() as i16, w)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-4 * b.abs().max(1.)
    }
}

fn random_params<T: TestSample>(rng: &mut StdRng, matrixsize: u32) -> FilterParams
where
    ScalarLanes: SampleLanes<T>,
{
    let maxval = T::random_maxval(rng);
    let mut params = FilterParams {
        maxval,
        scale: rng.random_range(0.1f32..2.),
        threshold: rng.random_range(0..=maxval),
        thresholdf: if rng.random_bool(0.3) {
            f32::MAX
        } else {
            rng.random_range(0f32..300.)
        },
        stencil: rng.random(),
        matrixsize,
        div: 1. / rng.random_range(1f32..48.),
        bias: rng.random_range(-20f32..20.),
        saturate: rng.random_bool(0.5),
        ..FilterParams::default()
    };
    for k in 0..matrixsize as usize {
        let (w, wf) = T::random_weight(rng);
        params.matrix[k] = w;
        params.matrixf[k] = wf;
    }
    params
}

fn random_plane<T: TestSample>(rng: &mut StdRng, len: usize, maxval: u16) -> Vec<T>
where
    ScalarLanes: SampleLanes<T>,
{
    (0..len).map(|_| T::random(rng, maxval)).collect()
}

fn matrix_sizes(kind: KernelKind) -> Vec<u32> {
    match kind {
        KernelKind::Convolution3x3 => vec![9],
        KernelKind::Convolution5x5 => vec![25],
        KernelKind::ConvolutionH
        | KernelKind::ConvolutionV
        | KernelKind::ConvolutionSeparable => (3..=25).step_by(2).collect(),
        _ => vec![0],
    }
}

/// Every non reference implementation usable on this host.
fn candidates<T: TestSample>(kind: KernelKind, matrixsize: u32) -> Vec<(String, PlaneKernel<T>)>
where
    ScalarLanes: SampleLanes<T>,
{
    let mut kernels = vec![(
        "portable".to_string(),
        portable::select::<T>(kind, matrixsize).unwrap(),
    )];
    for backend in Backend::available() {
        if backend == Backend::Scalar {
            continue;
        }
        kernels.push((
            format!("{backend:?}"),
            select_kernel::<T>(kind, backend, matrixsize).unwrap(),
        ));
    }
    kernels
}

const SIZES: [(usize, usize); 14] = [
    (1, 1),
    (2, 1),
    (1, 5),
    (3, 2),
    (4, 4),
    (5, 3),
    (7, 13),
    (8, 2),
    (9, 9),
    (13, 4),
    (16, 3),
    (17, 26),
    (31, 5),
    (40, 7),
];

fn check_against_reference<T: TestSample>(seed: u64)
where
    ScalarLanes: SampleLanes<T>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    for kind in KernelKind::ALL {
        for matrixsize in matrix_sizes(kind) {
            let reference = select_kernel::<T>(kind, Backend::Scalar, matrixsize).unwrap();
            let candidates = candidates::<T>(kind, matrixsize);
            for &(width, height) in SIZES.iter() {
                let params = random_params::<T>(&mut rng, matrixsize);
                let src_stride = width + rng.random_range(0..4);
                let dst_stride = width + rng.random_range(0..4);
                let src = random_plane::<T>(&mut rng, src_stride * height, params.maxval);
                let sentinel = T::random(&mut rng, params.maxval);

                let mut expected = vec![sentinel; dst_stride * height];
                reference(&src, src_stride, &mut expected, dst_stride, &params, width, height);

                for (name, kernel) in candidates.iter() {
                    let mut dst = vec![sentinel; dst_stride * height];
                    kernel(&src, src_stride, &mut dst, dst_stride, &params, width, height);
                    for (i, (&a, &b)) in dst.iter().zip(expected.iter()).enumerate() {
                        assert!(
                            T::close(a, b),
                            "{name} {kind:?} {:?} matrixsize {matrixsize} {width}x{height} \
                             at ({}, {}): {a:?} != {b:?}",
                            T::FORMAT,
                            i % dst_stride,
                            i / dst_stride,
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_byte_kernels_match_reference() {
    check_against_reference::<u8>(0x5eed);
}

#[test]
fn test_word_kernels_match_reference() {
    check_against_reference::<u16>(0xbeef);
}

#[test]
fn test_float_kernels_match_reference() {
    check_against_reference::<f32>(0xf10a7);
}

/// Mirrors `src` into a plane extended by `pad` on every side.
fn mirrored<T: Copy>(src: &[T], width: usize, height: usize, pad: usize) -> Vec<T> {
    let padded_width = width + 2 * pad;
    let mut out = Vec::with_capacity(padded_width * (height + 2 * pad));
    for y in 0..height + 2 * pad {
        let row = reflect_101(y as isize - pad as isize, height);
        for x in 0..padded_width {
            let column = reflect_101(x as isize - pad as isize, width);
            out.push(src[row * width + column]);
        }
    }
    out
}

#[test]
fn test_borders_match_mirrored_plane() {
    let mut rng = StdRng::seed_from_u64(7);
    let (width, height) = (23usize, 17usize);
    for kind in KernelKind::ALL {
        for matrixsize in matrix_sizes(kind) {
            let params = random_params::<u16>(&mut rng, matrixsize);
            let pad = if kind.is_one_dimensional() {
                matrixsize as usize / 2
            } else if kind == KernelKind::Convolution5x5 {
                2
            } else {
                1
            };
            let src = random_plane::<u16>(&mut rng, width * height, params.maxval);
            let padded = mirrored(&src, width, height, pad);
            let padded_width = width + 2 * pad;
            let padded_height = height + 2 * pad;

            for backend in Backend::available() {
                let kernel = select_kernel::<u16>(kind, backend, matrixsize).unwrap();
                let mut dst = vec![0u16; width * height];
                kernel(&src, width, &mut dst, width, &params, width, height);
                let mut padded_dst = vec![0u16; padded.len()];
                kernel(
                    &padded,
                    padded_width,
                    &mut padded_dst,
                    padded_width,
                    &params,
                    padded_width,
                    padded_height,
                );
                for y in 0..height {
                    let interior = &padded_dst[(y + pad) * padded_width + pad..][..width];
                    assert_eq!(
                        interior,
                        &dst[y * width..(y + 1) * width],
                        "{kind:?} matrixsize {matrixsize} on {backend:?}, row {y}"
                    );
                }
            }
        }
    }
}

fn identity(matrixsize: u32) -> FilterParams {
    let mut params = FilterParams {
        matrixsize,
        maxval: 65535,
        ..FilterParams::default()
    };
    let center = matrixsize as usize / 2;
    params.matrix[center] = 1;
    params.matrixf[center] = 1.;
    params
}

#[test]
fn test_identity_convolution() {
    let mut rng = StdRng::seed_from_u64(11);
    let (width, height) = (29usize, 11usize);
    let words = random_plane::<u16>(&mut rng, width * height, 65535);
    let floats = random_plane::<f32>(&mut rng, width * height, 65535);
    for kind in [
        KernelKind::Convolution3x3,
        KernelKind::Convolution5x5,
        KernelKind::ConvolutionH,
        KernelKind::ConvolutionV,
        KernelKind::ConvolutionSeparable,
    ] {
        for matrixsize in matrix_sizes(kind) {
            let params = identity(matrixsize);
            for backend in Backend::available() {
                let kernel = select_kernel::<u16>(kind, backend, matrixsize).unwrap();
                let mut dst = vec![0u16; words.len()];
                kernel(&words, width, &mut dst, width, &params, width, height);
                assert_eq!(dst, words, "{kind:?} {matrixsize} on {backend:?}");

                let kernel = select_kernel::<f32>(kind, backend, matrixsize).unwrap();
                let mut dst = vec![0f32; floats.len()];
                kernel(&floats, width, &mut dst, width, &params, width, height);
                assert_eq!(dst, floats, "{kind:?} {matrixsize} on {backend:?}");
            }
        }
    }
}

#[test]
fn test_clamp_laws() {
    let mut rng = StdRng::seed_from_u64(13);
    let (width, height) = (37usize, 9usize);
    for backend in Backend::available() {
        for _ in 0..8 {
            let params = random_params::<u8>(&mut rng, 0);
            let src = random_plane::<u8>(&mut rng, width * height, 255);
            let threshold = params.threshold as i32;
            let run = |kind: KernelKind| {
                let kernel = select_kernel::<u8>(kind, backend, 0).unwrap();
                let mut dst = vec![0u8; src.len()];
                kernel(&src, width, &mut dst, width, &params, width, height);
                dst
            };
            let minimum = run(KernelKind::Minimum);
            let maximum = run(KernelKind::Maximum);
            let deflate = run(KernelKind::Deflate);
            let inflate = run(KernelKind::Inflate);
            for (i, &center) in src.iter().enumerate() {
                let center = center as i32;
                assert!((minimum[i] as i32) <= center);
                assert!(minimum[i] as i32 >= (center - threshold).max(0));
                assert!(maximum[i] as i32 >= center);
                assert!(maximum[i] as i32 <= center + threshold);
                assert!((deflate[i] as i32) <= center);
                assert!(deflate[i] as i32 >= (center - threshold).max(0));
                assert!(inflate[i] as i32 >= center);
                assert!(inflate[i] as i32 <= center + threshold);
            }
        }
    }
}

#[test]
fn test_median_is_sorted_middle() {
    let mut rng = StdRng::seed_from_u64(17);
    let (width, height) = (26usize, 8usize);
    let src = random_plane::<f32>(&mut rng, width * height, 0);
    for backend in Backend::available() {
        let kernel = select_kernel::<f32>(KernelKind::Median, backend, 0).unwrap();
        let mut dst = vec![0f32; src.len()];
        kernel(&src, width, &mut dst, width, &FilterParams::default(), width, height);
        for y in 0..height {
            for x in 0..width {
                let mut window = Vec::with_capacity(9);
                for dy in -1..=1isize {
                    for dx in -1..=1isize {
                        let row = reflect_101(y as isize + dy, height);
                        let column = reflect_101(x as isize + dx, width);
                        window.push(src[row * width + column]);
                    }
                }
                window.sort_by(f32::total_cmp);
                assert_eq!(dst[y * width + x], window[4], "{backend:?} at ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_float_nan_agrees_across_backends() {
    let (width, height) = (16usize, 4usize);
    let mut src = vec![1f32; width * height];
    src[20] = f32::NAN;
    let params = FilterParams::default();
    let same = |a: f32, b: f32| (a.is_nan() && b.is_nan()) || a == b;
    for kind in [
        KernelKind::Minimum,
        KernelKind::Maximum,
        KernelKind::Median,
        KernelKind::Deflate,
        KernelKind::Inflate,
    ] {
        let reference = select_kernel::<f32>(kind, Backend::Scalar, 0).unwrap();
        let mut expected = vec![0f32; src.len()];
        reference(&src, width, &mut expected, width, &params, width, height);
        if matches!(kind, KernelKind::Minimum | KernelKind::Maximum) {
            // A NaN neighbour is skipped, a NaN center stays.
            assert_eq!(expected[3], 1., "{kind:?}");
            assert!(expected[20].is_nan(), "{kind:?}");
        }
        for (name, kernel) in candidates::<f32>(kind, 0) {
            let mut dst = vec![0f32; src.len()];
            kernel(&src, width, &mut dst, width, &params, width, height);
            for (i, (&a, &b)) in dst.iter().zip(expected.iter()).enumerate() {
                assert!(same(a, b), "{name} {kind:?} at {i}: {a:?} != {b:?}");
            }
        }
    }
}

#[test]
fn test_saturation() {
    let width = 20usize;
    // Falling ramp, the derivative is negative everywhere inside.
    let src: Vec<u8> = (0..width).map(|x| (200 - 10 * x) as u8).collect();
    let mut params = FilterParams {
        matrixsize: 3,
        ..FilterParams::default()
    };
    params.matrix[..3].copy_from_slice(&[-1, 0, 1]);
    for backend in Backend::available() {
        let kernel = select_kernel::<u8>(KernelKind::ConvolutionH, backend, 3).unwrap();
        let mut dst = vec![0u8; width];
        kernel(&src, width, &mut dst, width, &params, width, 1);
        assert!(dst[1..width - 1].iter().all(|&v| v == 0), "{backend:?}");
        let params = FilterParams {
            saturate: false,
            ..params
        };
        kernel(&src, width, &mut dst, width, &params, width, 1);
        assert!(dst[1..width - 1].iter().all(|&v| v == 20), "{backend:?}");
    }
}

#[test]
fn test_flat_box_blur() {
    let mut params = FilterParams {
        matrixsize: 9,
        div: 1. / 9.,
        ..FilterParams::default()
    };
    params.matrix[..9].fill(1);
    params.matrixf[..9].fill(1.);
    for backend in Backend::available() {
        let kernel = select_kernel::<u8>(KernelKind::Convolution3x3, backend, 9).unwrap();
        let src = [10u8; 16];
        let mut dst = [0u8; 16];
        kernel(&src, 4, &mut dst, 4, &params, 4, 4);
        assert_eq!(dst, [10; 16], "{backend:?}");
    }
}

#[test]
fn test_single_pixel_operators() {
    let params = FilterParams::default();
    let expected = [
        (KernelKind::Prewitt, 0u8),
        (KernelKind::Sobel, 0),
        (KernelKind::Median, 200),
        (KernelKind::Minimum, 200),
        (KernelKind::Maximum, 200),
        (KernelKind::Deflate, 200),
        (KernelKind::Inflate, 200),
    ];
    for backend in Backend::available() {
        for (kind, value) in expected {
            let kernel = select_kernel::<u8>(kind, backend, 0).unwrap();
            let mut dst = [0u8];
            kernel(&[200u8], 1, &mut dst, 1, &params, 1, 1);
            assert_eq!(dst[0], value, "{kind:?} on {backend:?}");
        }
    }
}
