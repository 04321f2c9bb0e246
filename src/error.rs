use thiserror::Error;

/// Rejected torus or scene parameters.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("{parameter} must be positive and finite, got {value}")]
    NotPositive {
        parameter: &'static str,
        value: f64,
    },

    #[error("{parameter} must be non-zero")]
    EmptyDimension { parameter: &'static str },

    #[error("camera distance {k2} puts the camera inside the torus (outer radius {outer})")]
    CameraInside { k2: f64, outer: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn positive(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::NotPositive { parameter, value })
    }
}

pub(crate) fn non_zero(parameter: &'static str, value: usize) -> Result<usize> {
    if value > 0 {
        Ok(value)
    } else {
        Err(Error::EmptyDimension { parameter })
    }
}
