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
use crate::util::check_slice_size;
use crate::KernelError;
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStore<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStore<'_, T> {
    #[allow(clippy::should_implement_trait)]
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

/// Immutable single channel plane, stride is counted in samples.
#[derive(Debug, Clone)]
pub struct Plane<'a, T: Clone + Copy + Default + Debug> {
    pub data: std::borrow::Cow<'a, [T]>,
    pub width: usize,
    pub height: usize,
    /// Samples per row, may exceed width
    pub stride: usize,
}

/// Mutable single channel plane.
#[derive(Debug)]
pub struct PlaneMut<'a, T: Clone + Copy + Default + Debug> {
    pub data: BufferStore<'a, T>,
    pub width: usize,
    pub height: usize,
    /// Samples per row, may exceed width
    pub stride: usize,
}

impl<'a, T: Clone + Copy + Default + Debug> Plane<'a, T> {
    /// Allocates tightly packed plane
    pub fn alloc(width: usize, height: usize) -> Self {
        Self {
            data: std::borrow::Cow::Owned(vec![T::default(); width * height]),
            width,
            height,
            stride: width,
        }
    }

    /// Borrows existing data with stride equal to width
    pub fn borrow(arr: &'a [T], width: usize, height: usize) -> Self {
        Self {
            data: std::borrow::Cow::Borrowed(arr),
            width,
            height,
            stride: width,
        }
    }

    /// Borrows existing data with explicit row stride
    pub fn borrow_strided(arr: &'a [T], width: usize, height: usize, stride: usize) -> Self {
        Self {
            data: std::borrow::Cow::Borrowed(arr),
            width,
            height,
            stride,
        }
    }

    #[inline]
    pub fn check_layout(&self) -> Result<(), KernelError> {
        check_slice_size(self.data.as_ref(), self.stride, self.width, self.height)
    }

    /// Checks if it is matches the size of the other plane
    #[inline]
    pub fn size_matches_mut(&self, other: &PlaneMut<'_, T>) -> Result<(), KernelError> {
        if self.width == other.width && self.height == other.height {
            return Ok(());
        }
        Err(KernelError::ImagesMustMatch)
    }

    /// Deep copy into a mutable plane of the same size
    pub fn copy_to_mut(&self, dst: &mut PlaneMut<T>) -> Result<(), KernelError> {
        self.check_layout()?;
        dst.check_layout(Some(self))?;
        self.size_matches_mut(dst)?;
        let width = self.width;
        let dst_stride = dst.stride;
        for (src, dst) in self
            .data
            .as_ref()
            .chunks(self.stride)
            .zip(dst.data.borrow_mut().chunks_mut(dst_stride))
            .take(self.height)
        {
            dst[..width].copy_from_slice(&src[..width]);
        }
        Ok(())
    }

    /// Deep clone as mutable plane
    pub fn clone_as_mut<'f>(&self) -> PlaneMut<'f, T> {
        PlaneMut {
            data: BufferStore::Owned(self.data.to_vec()),
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }
}

impl<'a, T: Clone + Copy + Default + Debug> PlaneMut<'a, T> {
    /// Allocates tightly packed plane
    pub fn alloc(width: usize, height: usize) -> Self {
        Self {
            data: BufferStore::Owned(vec![T::default(); width * height]),
            width,
            height,
            stride: width,
        }
    }

    /// Mutable borrows existing data with stride equal to width
    pub fn borrow(arr: &'a mut [T], width: usize, height: usize) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
            stride: width,
        }
    }

    /// Mutable borrows existing data with explicit row stride
    pub fn borrow_strided(arr: &'a mut [T], width: usize, height: usize, stride: usize) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
            stride,
        }
    }

    /// Checks if layout matches necessary requirements.
    /// Owned storage is reshaped to the other plane instead.
    #[inline]
    pub fn check_layout(&mut self, other: Option<&Plane<'_, T>>) -> Result<(), KernelError> {
        if let Some(other) = other {
            if let BufferStore::Owned(vec) = &mut self.data {
                vec.resize(other.width * other.height, T::default());
                self.width = other.width;
                self.height = other.height;
                self.stride = other.width;
                return Ok(());
            }
        }
        check_slice_size(self.data.borrow(), self.stride, self.width, self.height)
    }

    /// Same outcome as [PlaneMut::check_layout] against `other` without reshaping
    /// owned storage.
    pub(crate) fn check_writable_from(&self, other: &Plane<'_, T>) -> Result<(), KernelError> {
        if let BufferStore::Owned(_) = &self.data {
            return Ok(());
        }
        check_slice_size(self.data.borrow(), self.stride, self.width, self.height)?;
        other.size_matches_mut(self)
    }

    #[inline]
    pub fn to_immutable_ref(&self) -> Plane<'_, T> {
        Plane {
            data: std::borrow::Cow::Borrowed(self.data.borrow()),
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MismatchedSize;

    #[test]
    fn test_copy_honours_strides() {
        let src_data: Vec<u8> = (0..12).collect();
        let src = Plane::borrow_strided(&src_data, 3, 3, 4);
        let mut dst_data = vec![0u8; 15];
        let mut dst = PlaneMut::borrow_strided(&mut dst_data, 3, 3, 5);
        src.copy_to_mut(&mut dst).unwrap();
        assert_eq!(
            dst_data,
            vec![0, 1, 2, 0, 0, 4, 5, 6, 0, 0, 8, 9, 10, 0, 0]
        );
    }

    #[test]
    fn test_owned_destination_is_reshaped() {
        let src = Plane::<u16>::alloc(7, 5);
        let mut dst = PlaneMut::<u16>::alloc(0, 0);
        dst.check_layout(Some(&src)).unwrap();
        assert_eq!((dst.width, dst.height, dst.stride), (7, 5, 7));
        assert_eq!(dst.data.borrow().len(), 35);
    }

    #[test]
    fn test_borrowed_destination_is_validated() {
        let mut data = vec![0f32; 8];
        let mut dst = PlaneMut::borrow(&mut data, 3, 3);
        assert_eq!(
            dst.check_layout(None),
            Err(KernelError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: 9,
                received: 8
            }))
        );
    }
}
