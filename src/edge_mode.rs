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
/// Mirrors an index across the nearest edge without repeating the edge sample,
/// row `abcdefgh` extends as `dcb|abcdefgh|gfe`.
///
/// Distances beyond one reflection are clamped to the opposite edge, so planes smaller
/// than the filter support stay in bounds.
#[inline(always)]
pub(crate) fn reflect_101(i: isize, n: usize) -> usize {
    let last = n as isize - 1;
    if i < 0 {
        (-i).min(last) as usize
    } else if i > last {
        (2 * last - i).max(0) as usize
    } else {
        i as usize
    }
}

/// Row indices feeding a vertical window of `N` taps centered at `y`.
#[inline(always)]
pub(crate) fn reflected_rows<const N: usize>(y: usize, height: usize) -> [usize; N] {
    let start = y as isize - (N / 2) as isize;
    let mut rows = [0usize; N];
    for (k, row) in rows.iter_mut().enumerate() {
        *row = reflect_101(start + k as isize, height);
    }
    rows
}

/// Copies `row[start..start + dst.len()]` into `dst` reflecting every out of range position.
#[inline]
pub(crate) fn fill_reflected<T: Copy>(row: &[T], start: isize, dst: &mut [T]) {
    let n = row.len();
    for (j, dst) in dst.iter_mut().enumerate() {
        *dst = row[reflect_101(start + j as isize, n)];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_does_not_repeat_edges() {
        assert_eq!(reflect_101(-1, 8), 1);
        assert_eq!(reflect_101(-3, 8), 3);
        assert_eq!(reflect_101(8, 8), 6);
        assert_eq!(reflect_101(10, 8), 4);
        assert_eq!(reflect_101(5, 8), 5);
    }

    #[test]
    fn test_reflect_tiny_planes() {
        assert_eq!(reflect_101(-1, 1), 0);
        assert_eq!(reflect_101(1, 1), 0);
        assert_eq!(reflect_101(-5, 2), 1);
        assert_eq!(reflect_101(6, 2), 0);
        for i in -12..15 {
            assert!(reflect_101(i, 3) < 3);
        }
    }

    #[test]
    fn test_reflected_rows() {
        assert_eq!(reflected_rows::<5>(0, 10), [2, 1, 0, 1, 2]);
        assert_eq!(reflected_rows::<5>(8, 10), [6, 7, 8, 9, 8]);
        assert_eq!(reflected_rows::<3>(0, 1), [0, 0, 0]);
    }

    #[test]
    fn test_fill_reflected() {
        let row = [1u8, 2, 3, 4];
        let mut padded = [0u8; 10];
        fill_reflected(&row, -3, &mut padded);
        assert_eq!(padded, [4, 3, 2, 1, 2, 3, 4, 3, 2, 1]);
    }
}
