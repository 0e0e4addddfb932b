use half::f16;

/// Numeric precision of a loaded volume.
///
/// Slices are decoded to `f64` and cast once the volume is stacked. Casts
/// to integer types truncate toward zero and saturate at the type's bounds.
pub trait Sample: Copy + Send + Sync + 'static {
    fn from_f64(value: f64) -> Self;

    fn to_f64(self) -> f64;
}

macro_rules! impl_sample {
    ($($ty:ty),+) => {
        $(
            impl Sample for $ty {
                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )+
    };
}

impl_sample!(f64, f32, u16, i16, i32);

impl Sample for f16 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        f16::from_f64(value)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }
}
