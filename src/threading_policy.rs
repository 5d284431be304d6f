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
use std::{num::NonZeroUsize, thread::available_parallelism};

#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
/// Set threading policy for multi plane processing.
pub enum ThreadingPolicy {
    /// Use only one thread, current is preferred.
    Single,
    /// Compute adaptive thread count between 1..available CPUs.
    #[default]
    Adaptive,
    /// Like `Adaptive`, but reserve given amount of threads (i.e. those will not be
    /// used).
    AdaptiveReserve(NonZeroUsize),
    /// Use specified number of threads.
    Fixed(NonZeroUsize),
}

impl ThreadingPolicy {
    /// Returns the number of threads to use for `jobs` planes of the given dimensions.
    ///
    /// Always at least 1 and never more than `jobs`.
    pub fn thread_count(&self, width: usize, height: usize, jobs: usize) -> usize {
        let jobs = jobs.max(1);
        let count = match self {
            ThreadingPolicy::Single => 1,
            ThreadingPolicy::Adaptive => {
                (width * height * jobs / (256 * 256)).clamp(1, Self::available_parallelism(2))
            }
            ThreadingPolicy::AdaptiveReserve(reserve) => {
                let reserve = reserve.get();

                let max_threads = Self::available_parallelism(1);
                let max_threads = if max_threads <= reserve {
                    1
                } else {
                    max_threads - reserve
                };

                (width * height * jobs / (256 * 256)).clamp(1, max_threads)
            }
            ThreadingPolicy::Fixed(fixed) => fixed.get(),
        };
        count.min(jobs)
    }

    // Always return some minimal amount of threads when multi-threading were requested
    fn available_parallelism(min: usize) -> usize {
        available_parallelism()
            .map(|x| x.get())
            .unwrap_or(1)
            .max(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_count_is_bounded_by_jobs() {
        let fixed = ThreadingPolicy::Fixed(NonZeroUsize::new(8).unwrap());
        assert_eq!(fixed.thread_count(1920, 1080, 3), 3);
        assert_eq!(ThreadingPolicy::Single.thread_count(1920, 1080, 3), 1);
        assert_eq!(ThreadingPolicy::Adaptive.thread_count(16, 16, 3), 1);
        assert!(ThreadingPolicy::Adaptive.thread_count(4096, 4096, 3) >= 1);
        assert_eq!(ThreadingPolicy::Adaptive.thread_count(4096, 4096, 0), 1);
    }
}
