use serde::{Deserialize, Serialize};

/// How one sample is chosen to stand for a pixel column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimationMode {
    /// First sample of each column.
    Nearest,
    /// Sample with the largest magnitude in each column, so transients survive.
    #[default]
    Extremum,
}

/// Integer stride so that `visible` samples produce at most `columns` points.
pub fn stride_for(visible: usize, columns: usize) -> usize {
    if columns == 0 {
        return visible.max(1);
    }
    if visible <= columns {
        1
    } else {
        visible.div_ceil(columns)
    }
}

/// Integer sample indices inside the fractional window `[left, right]`.
pub fn visible_indices(left: f64, right: f64, sample_count: usize) -> Option<(usize, usize)> {
    if sample_count == 0 || !(left.is_finite() && right.is_finite()) || right < left {
        return None;
    }
    let first = left.max(0.0).ceil() as usize;
    let last = (right.max(0.0).floor() as usize).min(sample_count - 1);
    (first <= last).then_some((first, last))
}

/// Pick the `(index, value)` pairs to plot for samples `first..=last`,
/// never more than `columns` of them.
pub fn decimate(
    samples: &[f32],
    first: usize,
    last: usize,
    columns: usize,
    mode: DecimationMode,
) -> Vec<(usize, f32)> {
    if samples.is_empty() || first > last || first >= samples.len() || columns == 0 {
        return Vec::new();
    }
    let last = last.min(samples.len() - 1);
    let visible = &samples[first..=last];
    let stride = stride_for(visible.len(), columns);

    if stride == 1 {
        return visible
            .iter()
            .enumerate()
            .map(|(i, &v)| (first + i, v))
            .collect();
    }

    visible
        .chunks(stride)
        .enumerate()
        .map(|(chunk_idx, chunk)| {
            let base = first + chunk_idx * stride;
            match mode {
                DecimationMode::Nearest => (base, chunk[0]),
                DecimationMode::Extremum => {
                    let (offset, &value) = chunk
                        .iter()
                        .enumerate()
                        .fold((0, &chunk[0]), |best, cur| {
                            if cur.1.abs() > best.1.abs() { cur } else { best }
                        });
                    (base + offset, value)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_stride() {
        assert_eq!(stride_for(500, 1000), 1);
        assert_eq!(stride_for(1000, 1000), 1);
        assert_eq!(stride_for(1001, 1000), 2);
        assert_eq!(stride_for(44100, 800), 56);
        assert_eq!(stride_for(10, 0), 10);
    }

    #[test]
    fn test_visible_indices() {
        assert_eq!(visible_indices(300.5, 900.2, 44100), Some((301, 900)));
        assert_eq!(visible_indices(0.0, 1200.0, 1200), Some((0, 1199)));
        assert_eq!(visible_indices(3.2, 3.8, 100), None);
        assert_eq!(visible_indices(0.0, 10.0, 0), None);
    }

    #[test]
    fn test_few_samples_are_all_plotted() {
        let samples: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let pts = decimate(&samples, 10, 19, 800, DecimationMode::Extremum);
        assert_eq!(pts.len(), 10);
        assert_eq!(pts[0], (10, 10.0));
        assert_eq!(pts[9], (19, 19.0));
    }

    #[test]
    fn test_nearest_uses_stride_starts() {
        let samples: Vec<f32> = (0..1000).map(|i| i as f32).collect();
        let pts = decimate(&samples, 0, 999, 100, DecimationMode::Nearest);
        assert_eq!(pts.len(), 100);
        assert!(pts.iter().enumerate().all(|(k, &(i, _))| i == k * 10));
    }

    #[test]
    fn test_extremum_keeps_spikes() {
        let mut samples = vec![0.01f32; 10_000];
        samples[4321] = -0.9;
        let pts = decimate(&samples, 0, 9_999, 200, DecimationMode::Extremum);
        assert!(pts.contains(&(4321, -0.9)));

        let nearest = decimate(&samples, 0, 9_999, 200, DecimationMode::Nearest);
        assert!(!nearest.iter().any(|&(_, v)| v == -0.9));
    }

    #[test]
    fn test_points_never_exceed_columns() {
        let mut rng = rand::rng();
        let samples: Vec<f32> = (0..200_000).map(|_| rng.random_range(-1.0..1.0)).collect();
        for _ in 0..300 {
            let first = rng.random_range(0..150_000);
            let last = rng.random_range(first..200_000);
            let columns = rng.random_range(1..4000);
            for mode in [DecimationMode::Nearest, DecimationMode::Extremum] {
                let pts = decimate(&samples, first, last, columns, mode);
                assert!(pts.len() <= columns, "{} points for {} columns", pts.len(), columns);
                assert!(pts.windows(2).all(|w| w[0].0 < w[1].0));
                assert!(pts.iter().all(|&(i, _)| i >= first && i <= last));
            }
        }
    }
}
