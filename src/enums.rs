/// MR acquisition type as reported by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimensionality {
    /// Multi-slice 2D acquisition.
    TwoD,
    /// Volumetric 3D acquisition.
    ThreeD,
}

impl Dimensionality {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "2D" => Some(Self::TwoD),
            "3D" => Some(Self::ThreeD),
            _ => None,
        }
    }
}

/// Phase encoding direction in the image plane.
///
/// The numeric code follows the analysis convention: rows read out as `0`,
/// columns as `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadoutDirection {
    Row,
    Column,
}

impl ReadoutDirection {
    pub fn from_phase_encoding(value: &str) -> Self {
        if value.trim() == "ROW" {
            Self::Row
        } else {
            Self::Column
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Row => 0,
            Self::Column => 1,
        }
    }
}

/// What to do when a slice has no InStackPositionNumber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexFallback {
    /// Parse the fifth dot-delimited segment of the file name
    /// (`NAME.MR.STUDY.SERIES.00007.….IMA` -> 7).
    #[default]
    FilenameSegment,
    /// Refuse slices without a scanner-reported position.
    Strict,
}
