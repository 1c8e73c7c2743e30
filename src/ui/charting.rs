use typewriter::time_series::TimeSeriesPoint;

/// Compute X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(points: &[TimeSeriesPoint], elapsed_secs: u32) -> (f64, f64) {
    let highest_wpm = points.iter().map(|p| p.wpm).fold(0.0, f64::max);

    let overall_duration = match points.last() {
        Some(p) => p.t,
        None => elapsed_secs as f64,
    }
    .max(1.0);

    (overall_duration, highest_wpm.round())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_chart_params_empty() {
        let (x, y) = compute_chart_params(&[], 5);
        assert_eq!(x, 5.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_compute_chart_params_uses_last_point_and_peak() {
        let points = [
            TimeSeriesPoint::new(1.0, 30.0),
            TimeSeriesPoint::new(2.0, 52.4),
            TimeSeriesPoint::new(3.0, 48.0),
        ];
        assert_eq!(compute_chart_params(&points, 3), (3.0, 52.0));
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
