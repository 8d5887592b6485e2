/// A labelled position on the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeTick {
    /// Fractional sample index of the tick
    pub index: f64,
    pub seconds: f64,
    pub label: String,
}

/// Round `raw` up to the next 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> Option<f64> {
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    Some(nice * magnitude)
}

fn format_seconds(seconds: f64, step: f64) -> String {
    let decimals = (-step.log10()).ceil().max(0.0) as usize;
    format!("{:.*}s", decimals, seconds)
}

/// Ticks at round times between sample indices `left` and `right`, about
/// `target` of them. Empty without a sample rate.
pub fn time_ticks(left: f64, right: f64, sample_rate: u32, target: usize) -> Vec<TimeTick> {
    if sample_rate == 0 || target == 0 || !(right > left) {
        return Vec::new();
    }
    let rate = sample_rate as f64;
    let (start, end) = (left / rate, right / rate);
    let Some(step) = nice_step((end - start) / target as f64) else {
        return Vec::new();
    };

    // tolerate rounding so a tick exactly on an edge is kept
    let first = (start / step - 1e-9).ceil() as i64;
    let last = (end / step + 1e-9).floor() as i64;
    (first..=last)
        .take(target * 3)
        .map(|k| {
            let seconds = k as f64 * step;
            TimeTick {
                index: seconds * rate,
                seconds,
                label: format_seconds(seconds, step),
            }
        })
        .collect()
}
