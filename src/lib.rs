//! # phantom-series
//!
//! Loads MRI phantom scans exported as one DICOM file per slice into a single
//! ordered volume with verified acquisition metadata.
//!
//! Built on the dicom-rs ecosystem. A series is read from a list of files or
//! from a directory, where every file whose name contains `IMA` (the Siemens
//! export convention) is taken as a slice. Files are decoded in parallel
//! using rayon unless disabled in [`LoadOptions`].
//!
//! Each slice contributes:
//!  - its stored pixel values (no modality rescale, no windowing)
//!  - a [`Metadata`] record, including the Siemens private pulse sequence
//!    name and scan duration
//!  - a stack position, taken from InStackPositionNumber or, failing that,
//!    from the fifth dot-delimited segment of its file name
//!
//! Loading fails rather than guessing when:
//!  - two slices disagree on any metadata field
//!  - a 2D series reports a slice spacing different from its thickness
//!  - a directory holds no matching files
//!
//! # Examples
//!
//! ## Reading a phantom series from a directory
//!
//! ```no_run
//! # use phantom_series::SeriesLoader;
//! let volume = SeriesLoader::load_from_directory("scans/UM-FSE")
//!     .expect("should have loaded the series");
//! let metadata = volume.metadata();
//! println!(
//!     "{}: {:?} at {:?} mm, metal: {}",
//!     metadata.series_name,
//!     volume.dim(),
//!     metadata.resolution_mm,
//!     metadata.contains_metal
//! );
//! ```
//!
//! ## Single precision with strict slice positions
//!
//! ```no_run
//! # use phantom_series::{IndexFallback, ImageVolume, LoadOptions, SeriesLoader};
//! let options = LoadOptions::default().with_index_fallback(IndexFallback::Strict);
//! let volume: ImageVolume<f32> =
//!     SeriesLoader::load_from_directory_with_options("scans/UP-FSE-PLA", &options)
//!         .expect("should have loaded the series");
//! ```

pub mod enums;
pub mod metadata;
pub mod options;
pub mod sample;
pub mod series_loader;
pub mod slice;
pub mod tag_access;
pub mod volume;

pub use enums::{Dimensionality, IndexFallback, ReadoutDirection};
pub use metadata::Metadata;
pub use options::LoadOptions;
pub use sample::Sample;
pub use series_loader::{SeriesLoader, SeriesLoaderError};
pub use slice::SliceRecord;
pub use volume::ImageVolume;
