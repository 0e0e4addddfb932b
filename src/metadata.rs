use crate::{
    enums::{Dimensionality, ReadoutDirection},
    options::LoadOptions,
    series_loader::SeriesLoaderError,
    tag_access::{TagAccess, TagError},
};

use dicom::core::Tag;
use dicom_dictionary_std::tags;

/// Siemens private attribute holding the pulse sequence name.
pub const PULSE_SEQUENCE_NAME: Tag = Tag(0x0019, 0x109C);

/// Siemens private attribute holding the scan duration in microseconds.
pub const SCAN_DURATION_US: Tag = Tag(0x0019, 0x105A);

pub const UNKNOWN_SEQUENCE: &str = "Unknown";

/// Acquisition parameters shared by every slice of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub date_yyyymmdd: String,
    pub scanner: String,
    pub static_field_strength_t: f64,
    pub series_name: String,
    pub dimensionality: Dimensionality,
    pub pulse_sequence_name: String,
    pub duration_s: f64,
    /// Non-zero acquisition matrix entries followed by images in acquisition.
    pub acq_matrix_shape: Vec<u32>,
    /// (row spacing, column spacing, slice thickness)
    pub resolution_mm: (f64, f64, f64),
    pub refocus_flip_angle_deg: f64,
    pub echo_train_length: i32,
    pub echo_time_ms: f64,
    pub repetition_time_ms: f64,
    pub center_frequency_hz: f64,
    pub pixel_bandwidth_hz: f64,
    pub readout_direction: ReadoutDirection,
    /// Derived from the series name: only plastic phantoms carry the marker.
    pub contains_metal: bool,
}

impl Metadata {
    /// Extract the metadata of one slice.
    ///
    /// # Errors
    ///
    /// Fails when a required attribute is missing or unreadable, and with
    /// [`SeriesLoaderError::GappedAcquisition`] when a 2D series reports a
    /// slice spacing different from its slice thickness. The two private
    /// attributes and ImagesInAcquisition are optional.
    pub fn from_dicom<A>(object: &A, options: &LoadOptions) -> Result<Self, SeriesLoaderError>
    where
        A: TagAccess + ?Sized,
    {
        let series_name = required(object.text(tags::SERIES_DESCRIPTION), "SeriesDescription")?;

        let acquisition_type = required(object.text(tags::MR_ACQUISITION_TYPE), "MRAcquisitionType")?;
        let dimensionality = Dimensionality::parse(&acquisition_type).ok_or_else(|| {
            SeriesLoaderError::InvalidField {
                field: "MRAcquisitionType",
                reason: format!("unsupported acquisition type {acquisition_type:?}"),
            }
        })?;

        let pixel_spacing = required(object.floats(tags::PIXEL_SPACING), "PixelSpacing")?;
        let &[row_spacing, column_spacing, ..] = pixel_spacing.as_slice() else {
            return Err(SeriesLoaderError::InvalidField {
                field: "PixelSpacing",
                reason: format!("expected two values, found {}", pixel_spacing.len()),
            });
        };
        let slice_thickness = required(object.float(tags::SLICE_THICKNESS), "SliceThickness")?;

        if dimensionality == Dimensionality::TwoD {
            let spacing = required(
                object.float(tags::SPACING_BETWEEN_SLICES),
                "SpacingBetweenSlices",
            )?;
            if spacing != slice_thickness {
                return Err(SeriesLoaderError::GappedAcquisition {
                    spacing,
                    thickness: slice_thickness,
                });
            }
        }

        let phase_encoding = required(
            object.text(tags::IN_PLANE_PHASE_ENCODING_DIRECTION),
            "InPlanePhaseEncodingDirection",
        )?;

        Ok(Self {
            date_yyyymmdd: required(object.text(tags::STUDY_DATE), "StudyDate")?,
            scanner: required(object.text(tags::MANUFACTURER_MODEL_NAME), "ManufacturerModelName")?,
            static_field_strength_t: required(
                object.float(tags::MAGNETIC_FIELD_STRENGTH),
                "MagneticFieldStrength",
            )?,
            contains_metal: !series_name.contains(options.plastic_marker.as_str()),
            series_name,
            dimensionality,
            pulse_sequence_name: optional(object.text(PULSE_SEQUENCE_NAME), "PulseSequenceName")?
                .unwrap_or_else(|| UNKNOWN_SEQUENCE.to_string()),
            duration_s: optional(object.float(SCAN_DURATION_US), "ScanDuration")?
                .map_or(0.0, |micros| (micros * 1e-6).round_ties_even()),
            acq_matrix_shape: acquisition_matrix_shape(object)?,
            resolution_mm: (row_spacing, column_spacing, slice_thickness),
            refocus_flip_angle_deg: required(object.float(tags::FLIP_ANGLE), "FlipAngle")?,
            echo_train_length: narrow(
                required(object.int(tags::ECHO_TRAIN_LENGTH), "EchoTrainLength")?,
                "EchoTrainLength",
            )?,
            echo_time_ms: required(object.float(tags::ECHO_TIME), "EchoTime")?,
            repetition_time_ms: required(object.float(tags::REPETITION_TIME), "RepetitionTime")?,
            center_frequency_hz: required(object.float(tags::IMAGING_FREQUENCY), "ImagingFrequency")?
                * 1e6,
            pixel_bandwidth_hz: required(object.float(tags::PIXEL_BANDWIDTH), "PixelBandwidth")?,
            readout_direction: ReadoutDirection::from_phase_encoding(&phase_encoding),
        })
    }

    /// Name of the first field that differs between `self` and `other`.
    pub fn first_difference(&self, other: &Metadata) -> Option<&'static str> {
        macro_rules! compare {
            ($($field:ident),+ $(,)?) => {
                $(
                    if self.$field != other.$field {
                        return Some(stringify!($field));
                    }
                )+
            };
        }
        compare!(
            date_yyyymmdd,
            scanner,
            static_field_strength_t,
            series_name,
            dimensionality,
            pulse_sequence_name,
            duration_s,
            acq_matrix_shape,
            resolution_mm,
            refocus_flip_angle_deg,
            echo_train_length,
            echo_time_ms,
            repetition_time_ms,
            center_frequency_hz,
            pixel_bandwidth_hz,
            readout_direction,
            contains_metal,
        );
        None
    }
}

fn acquisition_matrix_shape<A>(object: &A) -> Result<Vec<u32>, SeriesLoaderError>
where
    A: TagAccess + ?Sized,
{
    let matrix = required(object.ints(tags::ACQUISITION_MATRIX), "AcquisitionMatrix")?;
    let images_in_acquisition =
        optional(object.int(tags::IMAGES_IN_ACQUISITION), "ImagesInAcquisition")?.unwrap_or(1);

    matrix
        .into_iter()
        .filter(|&size| size != 0)
        .chain(std::iter::once(images_in_acquisition))
        .map(|size| narrow(size, "AcquisitionMatrix"))
        .collect()
}

fn required<T>(
    value: Result<Option<T>, TagError>,
    field: &'static str,
) -> Result<T, SeriesLoaderError> {
    optional(value, field)?.ok_or(SeriesLoaderError::MissingField { field })
}

fn optional<T>(
    value: Result<Option<T>, TagError>,
    field: &'static str,
) -> Result<Option<T>, SeriesLoaderError> {
    value.map_err(|err| SeriesLoaderError::InvalidField {
        field,
        reason: err.to_string(),
    })
}

fn narrow<T: TryFrom<i64>>(value: i64, field: &'static str) -> Result<T, SeriesLoaderError> {
    T::try_from(value).map_err(|_| SeriesLoaderError::InvalidField {
        field,
        reason: format!("{value} is out of range"),
    })
}
