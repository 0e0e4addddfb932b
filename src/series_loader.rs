use crate::{
    options::LoadOptions,
    sample::Sample,
    slice::{SliceRecord, decode_slice},
    volume::ImageVolume,
};

use log::{info, warn};
use ndarray::{ArrayD, ArrayViewD, Axis};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesLoaderError {
    #[error("Metadata disagreement between slices: {field} differs in {}", path.display())]
    MetadataConflict { path: PathBuf, field: &'static str },

    #[error("Multi-slice volume has gaps between slices (spacing {spacing} mm, thickness {thickness} mm)")]
    GappedAcquisition { spacing: f64, thickness: f64 },

    #[error("No files matching {pattern:?} in {}", dir.display())]
    NoMatchingFiles { dir: PathBuf, pattern: String },

    #[error("No slice files given")]
    NoSlices,

    #[error("Cannot determine the stack position of {}", path.display())]
    UnresolvedSliceIndex { path: PathBuf },

    #[error("Missing {field}")]
    MissingField { field: &'static str },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Inconsistent image dimensions")]
    InconsistentDimensions,

    #[error("Pixel data error: {0}")]
    PixelData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DICOM error: {0}")]
    Dicom(#[from] dicom::object::ReadError),
}

pub struct SeriesLoader;

impl SeriesLoader {
    /// Load a series from its slice files, in any order, as `f64` samples.
    ///
    /// # Errors
    ///
    /// Returns error if any slice cannot be decoded, if slices disagree on
    /// metadata or image dimensions, or if a 2D series has gaps.
    pub fn load<P>(paths: &[P]) -> Result<ImageVolume, SeriesLoaderError>
    where
        P: AsRef<Path> + Sync,
    {
        Self::load_with_options(paths, &LoadOptions::default())
    }

    /// Load a series with explicit options and output precision.
    pub fn load_with_options<T, P>(
        paths: &[P],
        options: &LoadOptions,
    ) -> Result<ImageVolume<T>, SeriesLoaderError>
    where
        T: Sample,
        P: AsRef<Path> + Sync,
    {
        if paths.is_empty() {
            return Err(SeriesLoaderError::NoSlices);
        }

        let decode = |path: &P| decode_slice(path.as_ref(), options);
        let records: Vec<SliceRecord> = if options.parallel {
            paths.par_iter().map(decode).collect::<Result<_, _>>()?
        } else {
            paths.iter().map(decode).collect::<Result<_, _>>()?
        };

        Self::assemble(records)
    }

    /// Load the series stored in a directory
    pub fn load_from_directory(path: impl AsRef<Path>) -> Result<ImageVolume, SeriesLoaderError> {
        Self::load_from_directory_with_options(path, &LoadOptions::default())
    }

    pub fn load_from_directory_with_options<T: Sample>(
        path: impl AsRef<Path>,
        options: &LoadOptions,
    ) -> Result<ImageVolume<T>, SeriesLoaderError> {
        let paths = Self::find_series_files(path.as_ref(), &options.file_pattern)?;
        Self::load_with_options(&paths, options)
    }

    /// Files in `dir` whose name contains `pattern`, sorted by path.
    pub fn find_series_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, SeriesLoaderError> {
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.contains(pattern))
            })
            .collect();

        if paths.is_empty() {
            return Err(SeriesLoaderError::NoMatchingFiles {
                dir: dir.to_path_buf(),
                pattern: pattern.to_string(),
            });
        }

        paths.sort();
        Ok(paths)
    }

    /// Merge decoded slices into a volume.
    ///
    /// The first record's metadata is adopted and every later record must
    /// match it exactly. Slices are ordered by ascending index; equal
    /// indices keep their input order.
    pub fn assemble<T: Sample>(records: Vec<SliceRecord>) -> Result<ImageVolume<T>, SeriesLoaderError> {
        let mut records = records.into_iter();
        let first = records.next().ok_or(SeriesLoaderError::NoSlices)?;
        let metadata = first.metadata;
        let mut slices = vec![(first.index, first.pixels)];

        for record in records {
            if let Some(field) = metadata.first_difference(&record.metadata) {
                return Err(SeriesLoaderError::MetadataConflict {
                    path: record.path,
                    field,
                });
            }
            slices.push((record.index, record.pixels));
        }

        slices.sort_by_key(|(index, _)| *index);
        if slices.windows(2).any(|pair| pair[0].0 == pair[1].0) {
            warn!("Series {:?} has slices sharing a stack position", metadata.series_name);
        }

        let views: Vec<_> = slices.iter().map(|(_, pixels)| pixels.view()).collect();
        let data = Self::stack_slices(&views)?.mapv(T::from_f64);

        info!(
            "Loaded {} slices of series {:?} into volume {:?}",
            slices.len(),
            metadata.series_name,
            data.shape()
        );

        Ok(ImageVolume::new(data, metadata))
    }

    fn stack_slices(views: &[ArrayViewD<'_, f64>]) -> Result<ArrayD<f64>, SeriesLoaderError> {
        let first_dim = views[0].shape();
        if views.iter().any(|view| view.shape() != first_dim) {
            return Err(SeriesLoaderError::InconsistentDimensions);
        }
        ndarray::stack(Axis(first_dim.len()), views)
            .map_err(|_| SeriesLoaderError::InconsistentDimensions)
    }
}
