use crate::scale::LinearScale;

/// Evenly spaced positions for `count` nodes between `start` and `end`.
pub fn axis_positions(count: usize, start: f64, end: f64) -> Vec<f64> {
    let last = count.saturating_sub(1) as f64;
    let scale = LinearScale::new((0.0, last), (start, end));
    (0..count).map(|idx| scale.apply(idx as f64)).collect()
}
