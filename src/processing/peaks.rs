//! Spectral peak extraction

use std::cmp::Ordering;

use crate::types::{PeakRecord, TopPeaks};

/// Amplitude → RMS-equivalent display factor (≈ 1/√2).
pub const RMS_EQUIVALENT_FACTOR: f64 = 0.707;

/// Highlight colors assigned to peaks by rank. Cycled when k exceeds the palette.
pub const PEAK_COLORS: [&str; 5] = ["#f5222d", "#fa8c16", "#fadb14", "#52c41a", "#1890ff"];

/// Find the top `k` local maxima of a magnitude spectrum.
///
/// A candidate is an interior point strictly greater than both neighbours;
/// the first and last index are never candidates. Candidates are ranked by
/// magnitude, descending, with a stable sort. Only indices present in both
/// `magnitude` and `frequency` are scanned.
///
/// # Returns
/// Up to `k` [`PeakRecord`]s in rank order, and one color tag per peak.
pub fn find_top_peaks(magnitude: &[f64], frequency: &[f64], k: usize) -> TopPeaks {
    let len = magnitude.len().min(frequency.len());
    if len < 3 || k == 0 {
        return TopPeaks::default();
    }

    let mut candidates: Vec<(usize, f64)> = Vec::new();
    for i in 1..len - 1 {
        let prev = magnitude[i - 1];
        let curr = magnitude[i];
        let next = magnitude[i + 1];

        if curr > prev && curr > next {
            candidates.push((i, curr));
        }
    }

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    candidates.truncate(k);

    let peaks: Vec<PeakRecord> = candidates
        .into_iter()
        .map(|(index, value)| PeakRecord {
            magnitude: value,
            frequency: format!("{:.2}", frequency[index]),
            index,
            rms: format!("{:.2}", value * RMS_EQUIVALENT_FACTOR),
        })
        .collect();

    let colors = (0..peaks.len())
        .map(|rank| PEAK_COLORS[rank % PEAK_COLORS.len()])
        .collect();

    TopPeaks { peaks, colors }
}
