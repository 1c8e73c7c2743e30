use serde::Serialize;

/// One WPM reading, taken on a clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WpmSample {
    pub elapsed_seconds: u32,
    pub wpm: u32,
    pub chars_typed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub t: f64,
    pub wpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<&WpmSample> for TimeSeriesPoint {
    fn from(s: &WpmSample) -> Self {
        TimeSeriesPoint::new(s.elapsed_seconds as f64, s.wpm as f64)
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.wpm)
    }
}
