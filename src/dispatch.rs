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
use crate::params::FilterParams;
use crate::sample::Sample;
use log::{debug, trace};

/// Uniform kernel entry point.
///
/// Arguments are `(src, src_stride, dst, dst_stride, params, width, height)`, strides
/// are counted in samples. Rows outside of `width` are never written.
///
/// # Panics
///
/// When either slice is shorter than `stride * (height - 1) + width`.
pub type PlaneKernel<T> = fn(&[T], usize, &mut [T], usize, &FilterParams, usize, usize);

/// Filter families.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum KernelKind {
    Prewitt,
    Sobel,
    Minimum,
    Maximum,
    Median,
    Deflate,
    Inflate,
    /// 3x3 convolution, 9 coefficients.
    Convolution3x3,
    /// 5x5 convolution, 25 coefficients.
    Convolution5x5,
    /// 1D convolution along rows.
    ConvolutionH,
    /// 1D convolution along columns.
    ConvolutionV,
    /// Vertical then horizontal 1D convolution with the same coefficients.
    ConvolutionSeparable,
}

impl KernelKind {
    pub const ALL: [KernelKind; 12] = [
        KernelKind::Prewitt,
        KernelKind::Sobel,
        KernelKind::Minimum,
        KernelKind::Maximum,
        KernelKind::Median,
        KernelKind::Deflate,
        KernelKind::Inflate,
        KernelKind::Convolution3x3,
        KernelKind::Convolution5x5,
        KernelKind::ConvolutionH,
        KernelKind::ConvolutionV,
        KernelKind::ConvolutionSeparable,
    ];

    /// Returns `true` for 1D kinds whose variant depends on the tap count.
    #[inline]
    pub fn is_one_dimensional(&self) -> bool {
        matches!(
            self,
            KernelKind::ConvolutionH | KernelKind::ConvolutionV | KernelKind::ConvolutionSeparable
        )
    }

    /// Checks `FilterParams::matrixsize` against the kind.
    ///
    /// Neighbourhood operators ignore the matrix entirely.
    pub fn supports_matrix_size(&self, matrixsize: u32) -> bool {
        match self {
            KernelKind::Convolution3x3 => matrixsize == 9,
            KernelKind::Convolution5x5 => matrixsize == 25,
            KernelKind::ConvolutionH
            | KernelKind::ConvolutionV
            | KernelKind::ConvolutionSeparable => {
                matrixsize % 2 == 1 && (3..=25).contains(&matrixsize)
            }
            _ => true,
        }
    }
}

/// Instruction set a kernel is built for.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Backend {
    /// Portable reference implementation.
    Scalar,
    Sse2,
    Avx2,
    Neon,
}

#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
fn has_sse2() -> bool {
    std::arch::is_x86_feature_detected!("sse2")
}

#[cfg(not(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse")))]
fn has_sse2() -> bool {
    false
}

#[cfg(all(target_arch = "x86_64", feature = "avx"))]
fn has_avx2() -> bool {
    std::arch::is_x86_feature_detected!("avx2")
}

#[cfg(not(all(target_arch = "x86_64", feature = "avx")))]
fn has_avx2() -> bool {
    false
}

#[cfg(all(target_arch = "aarch64", feature = "neon"))]
fn has_neon() -> bool {
    std::arch::is_aarch64_feature_detected!("neon")
}

#[cfg(not(all(target_arch = "aarch64", feature = "neon")))]
fn has_neon() -> bool {
    false
}

impl Backend {
    pub const ALL: [Backend; 4] = [Backend::Scalar, Backend::Sse2, Backend::Avx2, Backend::Neon];

    /// Returns `true` when the backend is compiled in and supported by the running CPU.
    pub fn is_available(&self) -> bool {
        match self {
            Backend::Scalar => true,
            Backend::Sse2 => has_sse2(),
            Backend::Avx2 => has_avx2(),
            Backend::Neon => has_neon(),
        }
    }

    /// Widest backend available on this machine.
    pub fn best() -> Backend {
        let backend = [Backend::Avx2, Backend::Neon, Backend::Sse2]
            .into_iter()
            .find(|backend| backend.is_available())
            .unwrap_or(Backend::Scalar);
        debug!("Selected {backend:?} kernels");
        backend
    }

    /// Every backend usable on this machine, the scalar one first.
    pub fn available() -> Vec<Backend> {
        Backend::ALL
            .into_iter()
            .filter(|backend| backend.is_available())
            .collect()
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for f32 {}
}

/// Sample types that have kernels: `u8`, `u16` and `f32`.
pub trait KernelSample: Sample + private::Sealed {
    /// Looks up the kernel variant, `None` when the backend is unavailable or the
    /// matrix size has no variant.
    fn select(kind: KernelKind, backend: Backend, matrixsize: u32) -> Option<PlaneKernel<Self>>;
}

macro_rules! kernel_sample {
    ($t:ty) => {
        impl KernelSample for $t {
            fn select(
                kind: KernelKind,
                backend: Backend,
                matrixsize: u32,
            ) -> Option<PlaneKernel<$t>> {
                if !backend.is_available() {
                    return None;
                }
                match backend {
                    Backend::Scalar => crate::reference::select::<$t>(kind, matrixsize),
                    Backend::Sse2 => {
                        #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
                        {
                            return crate::sse::select::<$t>(kind, matrixsize);
                        }
                        #[allow(unreachable_code)]
                        None
                    }
                    Backend::Avx2 => {
                        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
                        {
                            return crate::avx::select::<$t>(kind, matrixsize);
                        }
                        #[allow(unreachable_code)]
                        None
                    }
                    Backend::Neon => {
                        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
                        {
                            return crate::neon::select::<$t>(kind, matrixsize);
                        }
                        #[allow(unreachable_code)]
                        None
                    }
                }
            }
        }
    };
}

kernel_sample!(u8);
kernel_sample!(u16);
kernel_sample!(f32);

/// Resolves the kernel for `(kind, sample type, matrixsize)` on the given backend.
pub fn select_kernel<T: KernelSample>(
    kind: KernelKind,
    backend: Backend,
    matrixsize: u32,
) -> Option<PlaneKernel<T>> {
    let kernel = T::select(kind, backend, matrixsize);
    trace!(
        "{kind:?} {:?} matrixsize={matrixsize} on {backend:?}: {}",
        T::FORMAT,
        if kernel.is_some() {
            "resolved"
        } else {
            "unsupported"
        }
    );
    kernel
}

/// Runs a kernel by name, panics when the variant does not exist.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_named<T: KernelSample>(
    kind: KernelKind,
    backend: Backend,
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    params: &FilterParams,
    width: usize,
    height: usize,
) {
    match T::select(kind, backend, params.matrixsize) {
        Some(kernel) => kernel(src, src_stride, dst, dst_stride, params, width, height),
        None => panic!(
            "{kind:?} with matrix size {} is not available on {backend:?}",
            params.matrixsize
        ),
    }
}

/// Tap count specialized variants of a 1D kernel, odd sizes `3..=25`.
macro_rules! tap_table {
    ($f:ident, $t:ty, $size:expr) => {
        match $size {
            3 => Some($f::<$t, 3> as $crate::PlaneKernel<$t>),
            5 => Some($f::<$t, 5> as $crate::PlaneKernel<$t>),
            7 => Some($f::<$t, 7> as $crate::PlaneKernel<$t>),
            9 => Some($f::<$t, 9> as $crate::PlaneKernel<$t>),
            11 => Some($f::<$t, 11> as $crate::PlaneKernel<$t>),
            13 => Some($f::<$t, 13> as $crate::PlaneKernel<$t>),
            15 => Some($f::<$t, 15> as $crate::PlaneKernel<$t>),
            17 => Some($f::<$t, 17> as $crate::PlaneKernel<$t>),
            19 => Some($f::<$t, 19> as $crate::PlaneKernel<$t>),
            21 => Some($f::<$t, 21> as $crate::PlaneKernel<$t>),
            23 => Some($f::<$t, 23> as $crate::PlaneKernel<$t>),
            25 => Some($f::<$t, 25> as $crate::PlaneKernel<$t>),
            _ => None,
        }
    };
}

pub(crate) use tap_table;

/// Declares the vector kernels of one lane type.
///
/// Generates `#[target_feature]` entry points, safe trampolines for them and a
/// `select` lookup. Trampolines are only handed out by `KernelSample::select`, which
/// checks the running CPU first. Without a feature the kernels run on the baseline
/// instruction set.
macro_rules! backend_kernels {
    (@conv $lanes:ty, $run:ident, $entry:ident, $plane:ident $(, $feature:literal)?) => {
        $(#[target_feature(enable = $feature)])?
        #[allow(clippy::too_many_arguments)]
        unsafe fn $run<T, const N: usize>(
            src: &[T],
            src_stride: usize,
            dst: &mut [T],
            dst_stride: usize,
            params: &$crate::FilterParams,
            width: usize,
            height: usize,
        ) where
            T: $crate::Sample,
            $lanes: $crate::lanes::SampleLanes<T>,
        {
            $crate::filter1d::$plane::<$lanes, T, N>(
                src, src_stride, dst, dst_stride, params, width, height,
            );
        }

        #[allow(clippy::too_many_arguments)]
        fn $entry<T, const N: usize>(
            src: &[T],
            src_stride: usize,
            dst: &mut [T],
            dst_stride: usize,
            params: &$crate::FilterParams,
            width: usize,
            height: usize,
        ) where
            T: $crate::Sample,
            $lanes: $crate::lanes::SampleLanes<T>,
        {
            unsafe {
                $run::<T, N>(src, src_stride, dst, dst_stride, params, width, height);
            }
        }
    };
    ($lanes:ty $(, $feature:literal)?) => {
        $(#[target_feature(enable = $feature)])?
        #[allow(clippy::too_many_arguments)]
        unsafe fn run_window<T, O, const D: usize>(
            src: &[T],
            src_stride: usize,
            dst: &mut [T],
            dst_stride: usize,
            params: &$crate::FilterParams,
            width: usize,
            height: usize,
        ) where
            T: $crate::Sample,
            $lanes: $crate::lanes::SampleLanes<T>,
            $crate::lanes::ScalarLanes: $crate::lanes::SampleLanes<T>,
            O: $crate::filter2d::WindowOp<T, D>,
        {
            $crate::filter2d::filter_plane_window::<$lanes, T, O, D>(
                src, src_stride, dst, dst_stride, params, width, height,
            );
        }

        #[allow(clippy::too_many_arguments)]
        fn window<T, O, const D: usize>(
            src: &[T],
            src_stride: usize,
            dst: &mut [T],
            dst_stride: usize,
            params: &$crate::FilterParams,
            width: usize,
            height: usize,
        ) where
            T: $crate::Sample,
            $lanes: $crate::lanes::SampleLanes<T>,
            $crate::lanes::ScalarLanes: $crate::lanes::SampleLanes<T>,
            O: $crate::filter2d::WindowOp<T, D>,
        {
            unsafe {
                run_window::<T, O, D>(src, src_stride, dst, dst_stride, params, width, height);
            }
        }

        $crate::dispatch::backend_kernels!(@conv $lanes, run_conv_h, conv_h, conv_plane_h $(, $feature)?);
        $crate::dispatch::backend_kernels!(@conv $lanes, run_conv_v, conv_v, conv_plane_v $(, $feature)?);
        $crate::dispatch::backend_kernels!(@conv $lanes, run_conv_sep, conv_sep, conv_plane_sep $(, $feature)?);

        pub(crate) fn select<T>(
            kind: $crate::KernelKind,
            matrixsize: u32,
        ) -> Option<$crate::PlaneKernel<T>>
        where
            T: $crate::Sample,
            $lanes: $crate::lanes::SampleLanes<T>,
            $crate::lanes::ScalarLanes: $crate::lanes::SampleLanes<T>,
        {
            use $crate::filter2d::{ConvolveOp, EdgeOp, MeanOp, MedianOp, MinMaxOp};
            use $crate::KernelKind;
            if !kind.supports_matrix_size(matrixsize) {
                return None;
            }
            match kind {
                KernelKind::Prewitt => Some(window::<T, EdgeOp<false>, 3> as $crate::PlaneKernel<T>),
                KernelKind::Sobel => Some(window::<T, EdgeOp<true>, 3> as $crate::PlaneKernel<T>),
                KernelKind::Minimum => Some(window::<T, MinMaxOp<false>, 3> as $crate::PlaneKernel<T>),
                KernelKind::Maximum => Some(window::<T, MinMaxOp<true>, 3> as $crate::PlaneKernel<T>),
                KernelKind::Median => Some(window::<T, MedianOp, 3> as $crate::PlaneKernel<T>),
                KernelKind::Deflate => Some(window::<T, MeanOp<false>, 3> as $crate::PlaneKernel<T>),
                KernelKind::Inflate => Some(window::<T, MeanOp<true>, 3> as $crate::PlaneKernel<T>),
                KernelKind::Convolution3x3 => Some(window::<T, ConvolveOp, 3> as $crate::PlaneKernel<T>),
                KernelKind::Convolution5x5 => Some(window::<T, ConvolveOp, 5> as $crate::PlaneKernel<T>),
                KernelKind::ConvolutionH => $crate::dispatch::tap_table!(conv_h, T, matrixsize),
                KernelKind::ConvolutionV => $crate::dispatch::tap_table!(conv_v, T, matrixsize),
                KernelKind::ConvolutionSeparable => {
                    $crate::dispatch::tap_table!(conv_sep, T, matrixsize)
                }
            }
        }
    };
}

pub(crate) use backend_kernels;

/// Declares the named entry points of one backend, `<family>_<byte|word|float>`.
macro_rules! named_kernels {
    (@family $backend:expr, $kind:ident, $byte:ident, $word:ident, $float:ident) => {
        $crate::dispatch::named_kernels!(@one $backend, $kind, $byte, u8);
        $crate::dispatch::named_kernels!(@one $backend, $kind, $word, u16);
        $crate::dispatch::named_kernels!(@one $backend, $kind, $float, f32);
    };
    (@one $backend:expr, $kind:ident, $name:ident, $t:ty) => {
        #[allow(clippy::too_many_arguments)]
        #[doc = concat!("`", stringify!($kind), "` over `", stringify!($t), "` planes.")]
        pub fn $name(
            src: &[$t],
            src_stride: usize,
            dst: &mut [$t],
            dst_stride: usize,
            params: &$crate::FilterParams,
            width: usize,
            height: usize,
        ) {
            $crate::dispatch::run_named::<$t>(
                $crate::KernelKind::$kind,
                $backend,
                src,
                src_stride,
                dst,
                dst_stride,
                params,
                width,
                height,
            );
        }
    };
    ($backend:expr) => {
        $crate::dispatch::named_kernels!(@family $backend, Prewitt,
            prewitt_3x3_byte, prewitt_3x3_word, prewitt_3x3_float);
        $crate::dispatch::named_kernels!(@family $backend, Sobel,
            sobel_3x3_byte, sobel_3x3_word, sobel_3x3_float);
        $crate::dispatch::named_kernels!(@family $backend, Minimum,
            min_3x3_byte, min_3x3_word, min_3x3_float);
        $crate::dispatch::named_kernels!(@family $backend, Maximum,
            max_3x3_byte, max_3x3_word, max_3x3_float);
        $crate::dispatch::named_kernels!(@family $backend, Median,
            median_3x3_byte, median_3x3_word, median_3x3_float);
        $crate::dispatch::named_kernels!(@family $backend, Deflate,
            deflate_3x3_byte, deflate_3x3_word, deflate_3x3_float);
        $crate::dispatch::named_kernels!(@family $backend, Inflate,
            inflate_3x3_byte, inflate_3x3_word, inflate_3x3_float);
        $crate::dispatch::named_kernels!(@family $backend, Convolution3x3,
            conv_3x3_byte, conv_3x3_word, conv_3x3_float);
        $crate::dispatch::named_kernels!(@family $backend, Convolution5x5,
            conv_5x5_byte, conv_5x5_word, conv_5x5_float);
        $crate::dispatch::named_kernels!(@family $backend, ConvolutionH,
            conv_h_1d_byte, conv_h_1d_word, conv_h_1d_float);
        $crate::dispatch::named_kernels!(@family $backend, ConvolutionV,
            conv_v_1d_byte, conv_v_1d_word, conv_v_1d_float);
        $crate::dispatch::named_kernels!(@family $backend, ConvolutionSeparable,
            conv_sep_2d_byte, conv_sep_2d_word, conv_sep_2d_float);
    };
}

pub(crate) use named_kernels;
