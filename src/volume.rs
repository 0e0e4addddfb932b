use crate::{metadata::Metadata, sample::Sample};

use image::{GrayImage, ImageBuffer};
use ndarray::{ArrayD, ArrayViewD, Axis};
use rayon::prelude::*;

/// A stacked series: pixel intensities plus the metadata every slice agreed on.
///
/// Slices are stacked along the trailing axis, so a single-frame series has
/// shape `(rows, columns, slices)`.
#[derive(Debug, Clone)]
pub struct ImageVolume<T = f64> {
    data: ArrayD<T>,
    metadata: Metadata,
}

impl<T: Sample> ImageVolume<T> {
    pub fn new(data: ArrayD<T>, metadata: Metadata) -> Self {
        Self { data, metadata }
    }

    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Shape of the volume, stacking axis last.
    pub fn dim(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn num_slices(&self) -> usize {
        self.data.shape().last().copied().unwrap_or(0)
    }

    pub fn into_parts(self) -> (ArrayD<T>, Metadata) {
        (self.data, self.metadata)
    }

    /// View of the slice at `index` along the stacking axis.
    pub fn slice(&self, index: usize) -> Option<ArrayViewD<'_, T>> {
        if index >= self.num_slices() {
            return None;
        }
        let axis = Axis(self.data.ndim() - 1);
        Some(self.data.index_axis(axis, index))
    }

    /// Render a 2D slice as an 8-bit image, stretched between its minimum and
    /// maximum intensity.
    pub fn slice_image(&self, index: usize) -> Option<GrayImage> {
        let slice = self.slice(index)?;
        let &[height, width] = slice.shape() else {
            return None;
        };

        let (min, max) = slice.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            let v = v.to_f64();
            (lo.min(v), hi.max(v))
        });
        let range = max - min;

        let pixel_data: Vec<u8> = slice
            .into_par_iter()
            .map(|&v| Self::normalize_to_u8(v.to_f64(), min, range))
            .collect();
        ImageBuffer::from_raw(width as u32, height as u32, pixel_data)
    }

    #[inline]
    fn normalize_to_u8(value: f64, min: f64, range: f64) -> u8 {
        if range > 0.0 {
            ((value - min) / range * 255.0).round().clamp(0.0, 255.0) as u8
        } else {
            0
        }
    }
}
