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
use crate::dispatch::KernelKind;
use crate::params::{FilterParams, FULL_STENCIL, MAX_MATRIX_SIZE};
use crate::sample::SampleFormat;
use crate::KernelError;

/// Largest magnitude of an integer convolution coefficient.
pub const MAX_COEFFICIENT: i16 = 1023;

/// Layout of the convolution matrix.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum ConvolutionMode {
    /// 3x3 or 5x5 matrix, row major.
    #[default]
    Square,
    /// 1D kernel applied along rows.
    Horizontal,
    /// 1D kernel applied along columns.
    Vertical,
    /// 1D kernel applied along columns, then along rows.
    Separable,
}

/// Builds validated [FilterParams] for planes of one sample format.
///
/// # Example
///
/// ```
/// use plane_kernels::{ConvolutionMode, FilterSettings, KernelKind, SampleFormat};
///
/// let settings = FilterSettings::new(SampleFormat::Word, 10).unwrap();
/// let (kind, params) = settings
///     .convolution(&[1., 2., 1.], ConvolutionMode::Separable, None, 0., true)
///     .unwrap();
/// assert_eq!(kind, KernelKind::ConvolutionSeparable);
/// assert_eq!(params.maxval, 1023);
/// assert_eq!(params.div, 0.25);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FilterSettings {
    format: SampleFormat,
    params: FilterParams,
}

impl FilterSettings {
    /// Byte planes hold 8 bits, word planes 9 to 16 and float planes 32.
    pub fn new(format: SampleFormat, bits_per_sample: u32) -> Result<FilterSettings, KernelError> {
        let supported = match format {
            SampleFormat::Byte => bits_per_sample == 8,
            SampleFormat::Word => (9..=16).contains(&bits_per_sample),
            SampleFormat::Float => bits_per_sample == 32,
        };
        if !supported {
            return Err(KernelError::UnsupportedBitDepth(bits_per_sample));
        }
        let maxval = if format.is_integer() {
            ((1u32 << bits_per_sample) - 1) as u16
        } else {
            u16::MAX
        };
        Ok(FilterSettings {
            format,
            params: FilterParams {
                maxval,
                threshold: maxval,
                thresholdf: f32::MAX,
                ..FilterParams::default()
            },
        })
    }

    #[inline]
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Current parameters, for the neighbourhood operators.
    #[inline]
    pub fn params(&self) -> FilterParams {
        self.params
    }

    /// Largest change Minimum, Maximum, Deflate and Inflate may apply to a pixel.
    ///
    /// Integer thresholds are rounded and must fit the sample range, float
    /// thresholds must not be negative.
    pub fn threshold(mut self, threshold: f32) -> Result<FilterSettings, KernelError> {
        if self.format.is_integer() {
            let rounded = threshold.round();
            if !(0. ..=self.params.maxval as f32).contains(&rounded) {
                return Err(KernelError::InvalidThreshold(threshold));
            }
            self.params.threshold = rounded as u16;
            self.params.thresholdf = rounded;
        } else {
            if threshold.is_nan() || threshold < 0. {
                return Err(KernelError::InvalidThreshold(threshold));
            }
            self.params.thresholdf = threshold;
        }
        Ok(self)
    }

    /// Neighbours Minimum and Maximum look at, top left to bottom right without the
    /// center.
    pub fn coordinates(mut self, coordinates: &[bool]) -> Result<FilterSettings, KernelError> {
        if coordinates.len() != 8 {
            return Err(KernelError::InvalidCoordinates(coordinates.len()));
        }
        self.params.stencil = coordinates
            .iter()
            .enumerate()
            .fold(0u8, |stencil, (bit, &enabled)| {
                stencil | ((enabled as u8) << bit)
            });
        Ok(self)
    }

    /// Gradient multiplier of Prewitt and Sobel.
    pub fn scale(mut self, scale: f32) -> FilterSettings {
        self.params.scale = scale;
        self
    }

    /// Convolution parameters and the kernel kind to run them with.
    ///
    /// Without a divisor, or with a zero one, the coefficient sum is used, and 1 when
    /// the coefficients cancel out.
    pub fn convolution(
        &self,
        matrix: &[f64],
        mode: ConvolutionMode,
        divisor: Option<f64>,
        bias: f32,
        saturate: bool,
    ) -> Result<(KernelKind, FilterParams), KernelError> {
        let taps = matrix.len();
        let kind = match mode {
            ConvolutionMode::Square => match taps {
                9 => KernelKind::Convolution3x3,
                25 => KernelKind::Convolution5x5,
                _ => return Err(KernelError::InvalidMatrix(taps)),
            },
            ConvolutionMode::Horizontal => KernelKind::ConvolutionH,
            ConvolutionMode::Vertical => KernelKind::ConvolutionV,
            ConvolutionMode::Separable => KernelKind::ConvolutionSeparable,
        };
        if taps > MAX_MATRIX_SIZE || !kind.supports_matrix_size(taps as u32) {
            return Err(KernelError::InvalidMatrix(taps));
        }

        let mut params = FilterParams {
            matrixsize: taps as u32,
            bias,
            saturate,
            ..self.params
        };
        params.matrix = [0; MAX_MATRIX_SIZE];
        params.matrixf = [0.; MAX_MATRIX_SIZE];
        params.stencil = FULL_STENCIL;

        let mut sum = 0f32;
        for (k, &coefficient) in matrix.iter().enumerate() {
            let rounded = coefficient.round();
            if self.format.is_integer() {
                if rounded.is_nan() || rounded.abs() > MAX_COEFFICIENT as f64 {
                    return Err(KernelError::CoefficientOutOfRange(coefficient));
                }
                params.matrix[k] = rounded as i16;
                params.matrixf[k] = rounded as f32;
            } else {
                params.matrix[k] = rounded.clamp(i16::MIN as f64, i16::MAX as f64) as i16;
                params.matrixf[k] = coefficient as f32;
            }
            sum += params.matrixf[k];
        }
        if sum.abs() < f32::EPSILON {
            sum = 1.;
        }
        let divisor = match divisor {
            Some(divisor) if divisor != 0. => divisor as f32,
            _ => sum,
        };
        params.div = 1. / divisor;
        Ok((kind, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_depths() {
        assert_eq!(FilterSettings::new(SampleFormat::Byte, 8).unwrap().params().maxval, 255);
        assert_eq!(
            FilterSettings::new(SampleFormat::Word, 16).unwrap().params().maxval,
            65535
        );
        assert_eq!(
            FilterSettings::new(SampleFormat::Word, 8),
            Err(KernelError::UnsupportedBitDepth(8))
        );
        assert_eq!(
            FilterSettings::new(SampleFormat::Float, 16),
            Err(KernelError::UnsupportedBitDepth(16))
        );
        let float = FilterSettings::new(SampleFormat::Float, 32).unwrap().params();
        assert_eq!(float.thresholdf, f32::MAX);
    }

    #[test]
    fn test_threshold_range() {
        let settings = FilterSettings::new(SampleFormat::Word, 10).unwrap();
        assert_eq!(settings.threshold(12.4).unwrap().params().threshold, 12);
        assert_eq!(settings.threshold(1023.).unwrap().params().threshold, 1023);
        assert_eq!(
            settings.threshold(1024.),
            Err(KernelError::InvalidThreshold(1024.))
        );
        assert!(settings.threshold(-1.).is_err());
        let float = FilterSettings::new(SampleFormat::Float, 32).unwrap();
        assert_eq!(float.threshold(0.25).unwrap().params().thresholdf, 0.25);
        assert!(float.threshold(-0.25).is_err());
        assert!(float.threshold(f32::NAN).is_err());
    }

    #[test]
    fn test_coordinates_build_stencil() {
        let settings = FilterSettings::new(SampleFormat::Byte, 8).unwrap();
        let plus = [false, true, false, true, true, false, true, false];
        assert_eq!(
            settings.coordinates(&plus).unwrap().params().stencil,
            0b0101_1010
        );
        assert_eq!(
            settings.coordinates(&[true; 7]),
            Err(KernelError::InvalidCoordinates(7))
        );
    }

    #[test]
    fn test_convolution_shapes() {
        let settings = FilterSettings::new(SampleFormat::Byte, 8).unwrap();
        let (kind, params) = settings
            .convolution(&[1.; 25], ConvolutionMode::Square, None, 0., true)
            .unwrap();
        assert_eq!(kind, KernelKind::Convolution5x5);
        assert_eq!(params.div, 1. / 25.);
        assert_eq!(
            settings.convolution(&[1.; 16], ConvolutionMode::Square, None, 0., true),
            Err(KernelError::InvalidMatrix(16))
        );
        assert_eq!(
            settings.convolution(&[1.; 4], ConvolutionMode::Horizontal, None, 0., true),
            Err(KernelError::InvalidMatrix(4))
        );
        assert_eq!(
            settings.convolution(&[1.; 27], ConvolutionMode::Vertical, None, 0., true),
            Err(KernelError::InvalidMatrix(27))
        );
        let (kind, params) = settings
            .convolution(&[1.; 25], ConvolutionMode::Vertical, Some(5.), 2., false)
            .unwrap();
        assert_eq!(kind, KernelKind::ConvolutionV);
        assert_eq!(params.div, 0.2);
        assert_eq!(params.bias, 2.);
        assert!(!params.saturate);
    }

    #[test]
    fn test_coefficients() {
        let settings = FilterSettings::new(SampleFormat::Byte, 8).unwrap();
        let (_, params) = settings
            .convolution(&[-1.4, 0., 1.6], ConvolutionMode::Horizontal, None, 0., true)
            .unwrap();
        assert_eq!(&params.matrix[..3], &[-1, 0, 2]);
        assert_eq!(params.div, 1.);
        assert_eq!(
            settings.convolution(&[1024., 1., 1.], ConvolutionMode::Horizontal, None, 0., true),
            Err(KernelError::CoefficientOutOfRange(1024.))
        );
        // Cancelling coefficients divide by one.
        let (_, params) = settings
            .convolution(&[-1., 0., 1.], ConvolutionMode::Horizontal, Some(0.), 0., true)
            .unwrap();
        assert_eq!(params.div, 1.);

        let float = FilterSettings::new(SampleFormat::Float, 32).unwrap();
        let (_, params) = float
            .convolution(&[0.25, 0.5, 0.25], ConvolutionMode::Separable, None, 0., true)
            .unwrap();
        assert_eq!(&params.matrixf[..3], &[0.25, 0.5, 0.25]);
        assert_eq!(params.div, 1.);
    }
}
