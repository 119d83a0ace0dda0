use serde::{Deserialize, Serialize};

/// Upper bound on the serialized size of one sample inside a JSON array,
/// trailing comma included.  Each `f64` takes at most 24 characters.
pub const MAX_SAMPLE_JSON_BYTES: usize = 104;

/// A single IQ data point: one complex value tagged with its time.
///
/// Wire shape is `{"time": f64, "real": f64, "imaginary": f64}`.  All three
/// fields are required on input; unknown extra fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time:      f64,
    pub real:      f64,
    pub imaginary: f64,
}

impl Sample {
    #[must_use]
    pub const fn new(time: f64, real: f64, imaginary: f64) -> Self {
        Self { time, real, imaginary }
    }
}
