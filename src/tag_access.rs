//! Attribute lookup that keeps "absent" apart from "present but empty".
//!
//! Every accessor returns `Ok(None)` when the data set has no element with
//! the given tag. A present element is always converted, so an empty string
//! comes back as `Some("")` and an empty numeric element is a conversion
//! error rather than a silent default.

use dicom::core::{Tag, VR, value::ConvertValueError};
use dicom::object::InMemDicomObject;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error(transparent)]
    Convert(#[from] ConvertValueError),

    #[error("cannot read {text:?} as a number")]
    Unparseable { text: String },
}

pub trait TagAccess {
    fn text(&self, tag: Tag) -> Result<Option<String>, TagError>;

    fn float(&self, tag: Tag) -> Result<Option<f64>, TagError>;

    fn floats(&self, tag: Tag) -> Result<Option<Vec<f64>>, TagError>;

    fn int(&self, tag: Tag) -> Result<Option<i64>, TagError>;

    fn ints(&self, tag: Tag) -> Result<Option<Vec<i64>>, TagError>;

    fn contains(&self, tag: Tag) -> bool;
}

impl TagAccess for InMemDicomObject {
    fn text(&self, tag: Tag) -> Result<Option<String>, TagError> {
        let Some(element) = self.get(tag) else {
            return Ok(None);
        };
        // Private attributes of implicit-VR exports arrive as raw bytes.
        let text = if element.vr() == VR::UN {
            String::from_utf8_lossy(&element.to_bytes()?).into_owned()
        } else {
            element.to_str()?.into_owned()
        };
        Ok(Some(trim_padding(&text).to_string()))
    }

    fn float(&self, tag: Tag) -> Result<Option<f64>, TagError> {
        let Some(element) = self.get(tag) else {
            return Ok(None);
        };
        if element.vr() != VR::UN {
            return Ok(Some(element.to_float64()?));
        }
        let bytes = element.to_bytes()?;
        let value = match bytes.len() {
            4 => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
            8 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&bytes);
                f64::from_le_bytes(raw)
            }
            _ => {
                let text = String::from_utf8_lossy(&bytes);
                let text = trim_padding(&text).trim();
                text.parse().map_err(|_| TagError::Unparseable {
                    text: text.to_string(),
                })?
            }
        };
        Ok(Some(value))
    }

    fn floats(&self, tag: Tag) -> Result<Option<Vec<f64>>, TagError> {
        self.get(tag)
            .map(|element| element.to_multi_float64())
            .transpose()
            .map_err(TagError::from)
    }

    fn int(&self, tag: Tag) -> Result<Option<i64>, TagError> {
        self.get(tag)
            .map(|element| element.to_int::<i64>())
            .transpose()
            .map_err(TagError::from)
    }

    fn ints(&self, tag: Tag) -> Result<Option<Vec<i64>>, TagError> {
        self.get(tag)
            .map(|element| element.to_multi_int::<i64>())
            .transpose()
            .map_err(TagError::from)
    }

    fn contains(&self, tag: Tag) -> bool {
        self.get(tag).is_some()
    }
}

fn trim_padding(text: &str) -> &str {
    text.trim_end_matches([' ', '\0'])
}
