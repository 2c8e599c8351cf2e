/// Returns `samples` evenly spaced points from `start` to `end` inclusive.
///
/// One sample yields just `start`; zero samples yield an empty domain. The
/// last point is exactly `end`, not an accumulated approximation of it.
///
/// # Example
/// ```
/// use plotcalc::util::sampling::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let steps = (samples - 1) as f64;
            let step = (end - start) / steps;
            (0..samples).map(|i| {
                            if i == samples - 1 {
                                end
                            } else {
                                start + step * i as f64
                            }
                        })
                        .collect()
        },
    }
}
