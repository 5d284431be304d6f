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
use crate::dispatch::{select_kernel, Backend, KernelKind, KernelSample, PlaneKernel};
use crate::params::FilterParams;
use crate::plane::{Plane, PlaneMut};
use crate::KernelError;
use log::{trace, warn};

/// Resolves the kernel after checking the matrix size and the backend.
pub(crate) fn resolve_kernel<T: KernelSample>(
    kind: KernelKind,
    params: &FilterParams,
    backend: Backend,
) -> Result<PlaneKernel<T>, KernelError> {
    if !kind.supports_matrix_size(params.matrixsize) {
        return Err(KernelError::UnsupportedMatrixSize(kind, params.matrixsize));
    }
    if !backend.is_available() {
        warn!("{backend:?} is not available on this machine, rejecting {kind:?}");
        return Err(KernelError::BackendUnavailable(backend));
    }
    select_kernel::<T>(kind, backend, params.matrixsize)
        .ok_or(KernelError::UnsupportedMatrixSize(kind, params.matrixsize))
}

/// Filters one plane.
///
/// Both planes must be the same size. An owned destination is reshaped to the
/// source, a borrowed one must already be large enough for its stride.
///
/// # Errors
///
/// On empty or undersized planes, mismatched sizes, a matrix size the kind does not
/// support or a backend the running CPU lacks.
///
/// # Example
///
/// ```
/// use plane_kernels::{filter_plane, Backend, FilterParams, KernelKind, Plane, PlaneMut};
///
/// let src = Plane::borrow(&[10u8, 20, 30, 40], 2, 2);
/// let mut dst = PlaneMut::alloc(2, 2);
/// filter_plane(KernelKind::Maximum, &src, &mut dst, &FilterParams::default(), Backend::best())
///     .unwrap();
/// assert_eq!(dst.data.borrow(), &[40, 40, 40, 40]);
/// ```
pub fn filter_plane<T: KernelSample>(
    kind: KernelKind,
    src: &Plane<'_, T>,
    dst: &mut PlaneMut<'_, T>,
    params: &FilterParams,
    backend: Backend,
) -> Result<(), KernelError> {
    let kernel = resolve_kernel::<T>(kind, params, backend)?;
    src.check_layout()?;
    dst.check_layout(Some(src))?;
    src.size_matches_mut(dst)?;
    trace!(
        "{kind:?} on {}x{} {:?} plane with {backend:?}",
        src.width,
        src.height,
        T::FORMAT
    );
    kernel(
        src.data.as_ref(),
        src.stride,
        dst.data.borrow_mut(),
        dst.stride,
        params,
        src.width,
        src.height,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MismatchedSize;

    #[test]
    fn test_rejects_bad_layouts() {
        let params = FilterParams::default();
        let data = [0u8; 8];
        let src = Plane::borrow(&data, 4, 2);
        let mut small = [0u8; 4];
        let mut dst = PlaneMut::borrow(&mut small, 2, 2);
        assert_eq!(
            filter_plane(KernelKind::Median, &src, &mut dst, &params, Backend::Scalar),
            Err(KernelError::ImagesMustMatch)
        );

        let src = Plane::borrow_strided(&data, 4, 2, 5);
        let mut dst = PlaneMut::alloc(4, 2);
        assert_eq!(
            filter_plane(KernelKind::Median, &src, &mut dst, &params, Backend::Scalar),
            Err(KernelError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: 9,
                received: 8,
            }))
        );

        let src = Plane::borrow(&data, 0, 2);
        assert_eq!(
            filter_plane(KernelKind::Median, &src, &mut dst, &params, Backend::Scalar),
            Err(KernelError::ZeroBaseSize)
        );
    }

    #[test]
    fn test_rejects_matrix_sizes_and_backends() {
        let data = [0u16; 9];
        let src = Plane::borrow(&data, 3, 3);
        let mut dst = PlaneMut::alloc(3, 3);
        let params = FilterParams {
            matrixsize: 9,
            ..FilterParams::default()
        };
        assert_eq!(
            filter_plane(KernelKind::Convolution5x5, &src, &mut dst, &params, Backend::Scalar),
            Err(KernelError::UnsupportedMatrixSize(KernelKind::Convolution5x5, 9))
        );
        assert!(
            filter_plane(KernelKind::ConvolutionH, &src, &mut dst, &params, Backend::Scalar)
                .is_ok()
        );
        for backend in Backend::ALL {
            let result = filter_plane(KernelKind::Convolution3x3, &src, &mut dst, &params, backend);
            if backend.is_available() {
                assert!(result.is_ok());
            } else {
                assert_eq!(result, Err(KernelError::BackendUnavailable(backend)));
            }
        }
    }

    #[test]
    fn test_owned_destination_is_reshaped() {
        let data = [7f32; 12];
        let src = Plane::borrow(&data, 4, 3);
        let mut dst = PlaneMut::alloc(1, 1);
        filter_plane(
            KernelKind::Median,
            &src,
            &mut dst,
            &FilterParams::default(),
            Backend::best(),
        )
        .unwrap();
        assert_eq!((dst.width, dst.height, dst.stride), (4, 3, 4));
        assert_eq!(dst.data.borrow(), &[7f32; 12]);
    }
}
