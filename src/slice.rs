use crate::{
    enums::IndexFallback,
    metadata::Metadata,
    options::LoadOptions,
    series_loader::SeriesLoaderError,
    tag_access::TagAccess,
};

use dicom::{
    object::{FileDicomObject, InMemDicomObject, open_file},
    pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder, VoiLutOption},
};
use dicom_dictionary_std::tags;
use log::debug;
use ndarray::{ArrayD, Axis, s};
use std::path::{Path, PathBuf};

/// One decoded slice file.
#[derive(Debug, Clone)]
pub struct SliceRecord {
    pub path: PathBuf,
    /// Position of the slice within its stack.
    pub index: i64,
    pub metadata: Metadata,
    /// `(rows, columns)`, or `(frames, rows, columns)` for multi-frame files.
    pub pixels: ArrayD<f64>,
}

/// Read pixels, metadata and stack position from a single slice file.
pub fn decode_slice(path: &Path, options: &LoadOptions) -> Result<SliceRecord, SeriesLoaderError> {
    let object = open_file(path)?;
    let pixels = read_pixels(&object)?;
    let metadata = Metadata::from_dicom(&*object, options)?;
    let index = resolve_slice_index(&*object, path, options.index_fallback)?;

    debug!(
        "Decoded slice {index} from {} with shape {:?}",
        path.display(),
        pixels.shape()
    );

    Ok(SliceRecord {
        path: path.to_path_buf(),
        index,
        metadata,
        pixels,
    })
}

/// Decode the stored pixel values of the first sample channel, without
/// modality rescale or windowing.
pub fn read_pixels(
    object: &FileDicomObject<InMemDicomObject>,
) -> Result<ArrayD<f64>, SeriesLoaderError> {
    let pixel_data = object
        .decode_pixel_data()
        .map_err(|err| SeriesLoaderError::PixelData(err.to_string()))?;
    let options = ConvertOptions::new()
        .with_modality_lut(ModalityLutOption::None)
        .with_voi_lut(VoiLutOption::Identity);
    let frames = pixel_data
        .to_ndarray_with_options::<f64>(&options)
        .map_err(|err| SeriesLoaderError::PixelData(err.to_string()))?
        .slice_move(s![.., .., .., 0]);

    if frames.len_of(Axis(0)) == 1 {
        Ok(frames.index_axis_move(Axis(0), 0).into_dyn())
    } else {
        Ok(frames.into_dyn())
    }
}

/// Position of a slice in its stack.
///
/// Prefers the scanner's InStackPositionNumber. Without it, `fallback`
/// decides whether the file name is consulted.
pub fn resolve_slice_index<A>(
    object: &A,
    path: &Path,
    fallback: IndexFallback,
) -> Result<i64, SeriesLoaderError>
where
    A: TagAccess + ?Sized,
{
    let reported = object
        .int(tags::IN_STACK_POSITION_NUMBER)
        .map_err(|err| SeriesLoaderError::InvalidField {
            field: "InStackPositionNumber",
            reason: err.to_string(),
        })?;
    if let Some(index) = reported {
        return Ok(index);
    }

    let unresolved = || SeriesLoaderError::UnresolvedSliceIndex {
        path: path.to_path_buf(),
    };
    match fallback {
        IndexFallback::FilenameSegment => {
            let index = filename_slice_index(path).ok_or_else(unresolved)?;
            debug!(
                "No InStackPositionNumber in {}, using file name index {index}",
                path.display()
            );
            Ok(index)
        }
        IndexFallback::Strict => Err(unresolved()),
    }
}

/// Slice index encoded as the fifth dot-delimited segment of a file name,
/// as in Siemens exports (`PHANTOM.MR.STUDY.0003.0007.2023.04.12.IMA`).
pub fn filename_slice_index(path: &Path) -> Option<i64> {
    path.file_name()?
        .to_str()?
        .split('.')
        .nth(4)?
        .parse()
        .ok()
}
