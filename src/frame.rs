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
use crate::dispatch::{Backend, KernelKind, KernelSample};
use crate::params::FilterParams;
use crate::plane::{Plane, PlaneMut};
use crate::plane_filter::resolve_kernel;
use crate::threading_policy::ThreadingPolicy;
use crate::{KernelError, MismatchedSize};
use log::trace;

/// Filters the planes of a frame, one task per plane.
///
/// Planes with a cleared `process` flag are copied unchanged. Every plane is
/// validated before any of them is written.
///
/// # Errors
///
/// When the plane or flag counts differ, on any layout error of [crate::filter_plane]
/// or when the thread pool cannot be created.
pub fn filter_planes<T: KernelSample>(
    kind: KernelKind,
    sources: &[Plane<'_, T>],
    destinations: &mut [PlaneMut<'_, T>],
    params: &FilterParams,
    process: &[bool],
    backend: Backend,
    threading_policy: ThreadingPolicy,
) -> Result<(), KernelError> {
    if destinations.len() != sources.len() {
        return Err(KernelError::PlaneCountMismatch(MismatchedSize {
            expected: sources.len(),
            received: destinations.len(),
        }));
    }
    if process.len() != sources.len() {
        return Err(KernelError::PlaneCountMismatch(MismatchedSize {
            expected: sources.len(),
            received: process.len(),
        }));
    }

    let kernel = resolve_kernel::<T>(kind, params, backend)?;
    for (src, dst) in sources.iter().zip(destinations.iter()) {
        src.check_layout()?;
        dst.check_writable_from(src)?;
    }
    for (src, dst) in sources.iter().zip(destinations.iter_mut()) {
        dst.check_layout(Some(src))?;
    }

    let mut jobs = Vec::with_capacity(sources.len());
    for ((src, dst), &selected) in sources.iter().zip(destinations.iter_mut()).zip(process) {
        if selected {
            jobs.push((src, dst));
        } else {
            src.copy_to_mut(dst)?;
        }
    }
    if jobs.is_empty() {
        return Ok(());
    }

    let (width, height) = jobs
        .iter()
        .fold((0, 0), |(w, h), (src, _)| (w.max(src.width), h.max(src.height)));
    let thread_count = threading_policy.thread_count(width, height, jobs.len());
    trace!(
        "{kind:?} on {} of {} planes with {thread_count} threads",
        jobs.len(),
        sources.len()
    );

    let run = |src: &Plane<'_, T>, dst: &mut PlaneMut<'_, T>| {
        kernel(
            src.data.as_ref(),
            src.stride,
            dst.data.borrow_mut(),
            dst.stride,
            params,
            src.width,
            src.height,
        );
    };

    if thread_count == 1 {
        for (src, dst) in jobs {
            run(src, dst);
        }
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|_| KernelError::ThreadPoolCreation)?;
    pool.scope(|scope| {
        for (src, dst) in jobs {
            let run = &run;
            scope.spawn(move |_| run(src, dst));
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn frame(width: usize, height: usize) -> Vec<Vec<u16>> {
        (0..3)
            .map(|p| {
                (0..width * height)
                    .map(|i| ((i * 131 + p * 977) % 1024) as u16)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_unprocessed_planes_are_copied() {
        let (width, height) = (19, 7);
        let data = frame(width, height);
        let sources: Vec<Plane<u16>> = data
            .iter()
            .map(|p| Plane::borrow(p, width, height))
            .collect();
        let params = FilterParams {
            maxval: 1023,
            threshold: 1023,
            ..FilterParams::default()
        };
        let policies = [
            ThreadingPolicy::Single,
            ThreadingPolicy::Fixed(NonZeroUsize::new(3).unwrap()),
        ];
        for policy in policies {
            let mut destinations: Vec<PlaneMut<u16>> =
                (0..3).map(|_| PlaneMut::alloc(width, height)).collect();
            filter_planes(
                KernelKind::Median,
                &sources,
                &mut destinations,
                &params,
                &[true, false, true],
                Backend::best(),
                policy,
            )
            .unwrap();
            assert_eq!(destinations[1].data.borrow(), data[1].as_slice());
            for p in [0, 2] {
                let mut expected = PlaneMut::alloc(width, height);
                crate::filter_plane(
                    KernelKind::Median,
                    &sources[p],
                    &mut expected,
                    &params,
                    Backend::Scalar,
                )
                .unwrap();
                assert_eq!(destinations[p].data.borrow(), expected.data.borrow());
            }
        }
    }

    #[test]
    fn test_failed_validation_leaves_destinations_untouched() {
        let data = [7u8; 16];
        let sources = [Plane::borrow(&data, 4, 4), Plane::borrow(&data, 4, 4)];
        let mut short = [0u8; 8];
        let mut destinations = [PlaneMut::alloc(1, 1), PlaneMut::borrow(&mut short, 4, 2)];
        assert_eq!(
            filter_planes(
                KernelKind::Maximum,
                &sources,
                &mut destinations,
                &FilterParams::default(),
                &[true, true],
                Backend::Scalar,
                ThreadingPolicy::Single,
            ),
            Err(KernelError::ImagesMustMatch)
        );
        assert_eq!((destinations[0].width, destinations[0].height), (1, 1));
        assert_eq!(destinations[0].data.borrow().len(), 1);
        assert_eq!(destinations[1].data.borrow(), &[0u8; 8]);
    }

    #[test]
    fn test_plane_counts_must_match() {
        let data = [0u8; 4];
        let sources = [Plane::borrow(&data, 2, 2), Plane::borrow(&data, 2, 2)];
        let mut destinations = [PlaneMut::alloc(2, 2)];
        assert_eq!(
            filter_planes(
                KernelKind::Sobel,
                &sources,
                &mut destinations,
                &FilterParams::default(),
                &[true, true],
                Backend::Scalar,
                ThreadingPolicy::Single,
            ),
            Err(KernelError::PlaneCountMismatch(MismatchedSize {
                expected: 2,
                received: 1,
            }))
        );
        let mut destinations = [PlaneMut::alloc(2, 2), PlaneMut::alloc(2, 2)];
        assert!(matches!(
            filter_planes(
                KernelKind::Sobel,
                &sources,
                &mut destinations,
                &FilterParams::default(),
                &[true],
                Backend::Scalar,
                ThreadingPolicy::Single,
            ),
            Err(KernelError::PlaneCountMismatch(_))
        ));
    }
}
