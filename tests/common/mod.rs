//! Synthetic single-slice phantom files for integration tests

#![allow(dead_code)]

use dicom::core::{DataElement, PrimitiveValue, Tag, VR, dicom_value};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use dicom_dictionary_std::{tags, uids};
use std::path::{Path, PathBuf};

pub const ROWS: u16 = 4;
pub const COLUMNS: u16 = 3;

/// Header and pixel values of one synthetic slice.
#[derive(Debug, Clone)]
pub struct SliceSpec {
    pub series: String,
    pub in_stack_position: Option<u32>,
    pub acquisition_type: &'static str,
    pub slice_thickness: &'static str,
    pub spacing_between_slices: &'static str,
    pub echo_time: &'static str,
    pub pulse_sequence: Option<&'static str>,
    pub duration_us: Option<f64>,
    /// Every pixel of the slice holds this value.
    pub fill: u16,
}

impl SliceSpec {
    pub fn new(series: &str, position: u32) -> Self {
        Self {
            series: series.to_string(),
            in_stack_position: Some(position),
            acquisition_type: "2D",
            slice_thickness: "3",
            spacing_between_slices: "3",
            echo_time: "7.9",
            pulse_sequence: Some("tse2d1_20"),
            duration_us: Some(94_000_000.0),
            fill: 100 + position as u16,
        }
    }

    pub fn without_position(mut self) -> Self {
        self.in_stack_position = None;
        self
    }
}

fn put(object: &mut InMemDicomObject, tag: Tag, vr: VR, value: PrimitiveValue) {
    object.put(DataElement::new(tag, vr, value));
}

pub fn slice_object(spec: &SliceSpec) -> InMemDicomObject {
    let mut object = InMemDicomObject::new_empty();
    put(&mut object, tags::SOP_CLASS_UID, VR::UI, uids::MR_IMAGE_STORAGE.into());
    put(&mut object, tags::MODALITY, VR::CS, "MR".into());
    put(&mut object, tags::STUDY_DATE, VR::DA, "20230412".into());
    put(&mut object, tags::MANUFACTURER_MODEL_NAME, VR::LO, "Premier".into());
    put(&mut object, tags::MAGNETIC_FIELD_STRENGTH, VR::DS, "3".into());
    put(&mut object, tags::SERIES_DESCRIPTION, VR::LO, spec.series.as_str().into());
    put(&mut object, tags::MR_ACQUISITION_TYPE, VR::CS, spec.acquisition_type.into());
    put(&mut object, tags::ACQUISITION_MATRIX, VR::US, dicom_value!(U16, [4, 0, 0, 3]));
    put(&mut object, tags::PIXEL_SPACING, VR::DS, dicom_value!(Strs, ["1.2", "1.2"]));
    put(&mut object, tags::SLICE_THICKNESS, VR::DS, spec.slice_thickness.into());
    put(
        &mut object,
        tags::SPACING_BETWEEN_SLICES,
        VR::DS,
        spec.spacing_between_slices.into(),
    );
    put(&mut object, tags::FLIP_ANGLE, VR::DS, "180".into());
    put(&mut object, tags::ECHO_TRAIN_LENGTH, VR::IS, "20".into());
    put(&mut object, tags::ECHO_TIME, VR::DS, spec.echo_time.into());
    put(&mut object, tags::REPETITION_TIME, VR::DS, "2000".into());
    put(&mut object, tags::IMAGING_FREQUENCY, VR::DS, "127.7".into());
    put(&mut object, tags::PIXEL_BANDWIDTH, VR::DS, "244".into());
    put(&mut object, tags::IN_PLANE_PHASE_ENCODING_DIRECTION, VR::CS, "COL".into());

    if let Some(position) = spec.in_stack_position {
        put(&mut object, tags::IN_STACK_POSITION_NUMBER, VR::UL, PrimitiveValue::from(position));
    }

    if spec.pulse_sequence.is_some() || spec.duration_us.is_some() {
        put(&mut object, Tag(0x0019, 0x0010), VR::LO, "SIEMENS MR HEADER".into());
    }
    if let Some(sequence) = spec.pulse_sequence {
        put(&mut object, Tag(0x0019, 0x109C), VR::LO, sequence.into());
    }
    if let Some(duration) = spec.duration_us {
        put(&mut object, Tag(0x0019, 0x105A), VR::FD, PrimitiveValue::from(duration));
    }

    put(&mut object, tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16));
    put(&mut object, tags::PHOTOMETRIC_INTERPRETATION, VR::CS, "MONOCHROME2".into());
    put(&mut object, tags::ROWS, VR::US, PrimitiveValue::from(ROWS));
    put(&mut object, tags::COLUMNS, VR::US, PrimitiveValue::from(COLUMNS));
    put(&mut object, tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16));
    put(&mut object, tags::BITS_STORED, VR::US, PrimitiveValue::from(16_u16));
    put(&mut object, tags::HIGH_BIT, VR::US, PrimitiveValue::from(15_u16));
    put(&mut object, tags::PIXEL_REPRESENTATION, VR::US, PrimitiveValue::from(0_u16));
    let pixels = vec![spec.fill; ROWS as usize * COLUMNS as usize];
    put(&mut object, tags::PIXEL_DATA, VR::OW, PrimitiveValue::U16(pixels.into()));

    object
}

/// Write `spec` as a DICOM file named `name` inside `dir`.
pub fn write_slice(dir: &Path, name: &str, spec: &SliceSpec) -> PathBuf {
    let instance_uid = format!("1.2.826.0.1.3680043.10.1.{}", spec.fill);
    let file = slice_object(spec)
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(uids::MR_IMAGE_STORAGE)
                .media_storage_sop_instance_uid(instance_uid)
                .implementation_class_uid("1.2.826.0.1.3680043.10.1"),
        )
        .expect("should have built file meta group");

    let path = dir.join(name);
    file.write_to_file(&path).expect("should have written slice file");
    path
}

/// Siemens-style export name whose fifth segment is the slice number.
pub fn siemens_name(series: u32, slice: u32) -> String {
    format!("PHANTOM.MR.TONIQ.{series:04}.{slice:05}.2023.04.12.10.30.IMA")
}
