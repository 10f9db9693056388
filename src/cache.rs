//! Bounded memoization of axis analyses
//!
//! Reports are keyed by an MD5 digest over everything that affects the
//! result: axis, buffer contents, acquisition parameters, display unit,
//! peak count and thresholds. Identical requests return the stored report
//! (including its original `analyzed_at`). When full, the oldest entry is
//! evicted. Nothing is persisted.

use std::collections::{HashMap, VecDeque};

use crate::processing::{analyze_axis, AnalysisRequest};
use crate::types::AxisReport;

/// 128-bit request fingerprint.
pub type CacheKey = [u8; 16];

/// In-memory analysis cache owned by a single caller.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    capacity: usize,
    entries: HashMap<CacheKey, AxisReport>,
    /// Insertion order, oldest first
    order: VecDeque<CacheKey>,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    /// Create a cache holding at most `capacity` reports. 0 disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached report for `request`, computing and storing it on a miss.
    pub fn get_or_compute(&mut self, request: &AnalysisRequest<'_>) -> AxisReport {
        if self.capacity == 0 {
            return analyze_axis(request);
        }

        let key = request_key(request);
        if let Some(report) = self.entries.get(&key) {
            self.hits += 1;
            tracing::trace!(axis = %request.axis, "Analysis cache hit");
            return report.clone();
        }

        self.misses += 1;
        let report = analyze_axis(request);
        self.insert(key, report.clone());
        report
    }

    fn insert(&mut self, key: CacheKey, report: AxisReport) {
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::trace!("Analysis cache evicted oldest entry");
        }
        self.entries.insert(key, report);
        self.order.push_back(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// (hits, misses) since creation or the last `clear()`.
    pub const fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Fingerprint every input that changes the analysis result.
pub fn request_key(request: &AnalysisRequest<'_>) -> CacheKey {
    let mut ctx = md5::Context::new();

    ctx.consume(request.axis.label().as_bytes());
    ctx.consume((request.samples.len() as u64).to_le_bytes());
    for sample in request.samples {
        ctx.consume(sample.to_le_bytes());
    }

    let acq = &request.acquisition;
    ctx.consume(acq.fmax.to_bits().to_le_bytes());
    ctx.consume(acq.lor.to_le_bytes());
    ctx.consume(acq.g_scale.to_le_bytes());

    ctx.consume(request.unit.suffix().as_bytes());
    ctx.consume((request.max_peaks as u64).to_le_bytes());

    match request.thresholds {
        Some(t) => {
            ctx.consume([1u8]);
            ctx.consume(t.min.to_bits().to_le_bytes());
            ctx.consume(t.medium().to_bits().to_le_bytes());
            ctx.consume(t.max.to_bits().to_le_bytes());
        }
        None => ctx.consume([0u8]),
    }

    ctx.compute().0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AcquisitionConfig, Axis, DisplayUnit, ThresholdConfig};

    fn request(samples: &[i32]) -> AnalysisRequest<'_> {
        AnalysisRequest {
            axis: Axis::H,
            samples,
            acquisition: AcquisitionConfig::default(),
            thresholds: None,
            unit: DisplayUnit::Velocity,
            max_peaks: 5,
        }
    }

    #[test]
    fn test_hit_returns_stored_report() {
        let samples: Vec<i32> = (0..256).map(|i| (i % 16) * 100).collect();
        let mut cache = AnalysisCache::new(4);

        let first = cache.get_or_compute(&request(&samples));
        let second = cache.get_or_compute(&request(&samples));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), (1, 1));
        // Same stored report, including the timestamp
        assert_eq!(first.analyzed_at, second.analyzed_at);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_key_covers_every_input() {
        let samples = vec![1, 2, 3, 4];
        let base = request(&samples);
        let key = request_key(&base);

        let other_samples = vec![1, 2, 3, 5];
        assert_ne!(key, request_key(&request(&other_samples)));
        assert_ne!(key, request_key(&AnalysisRequest { axis: Axis::V, ..base }));
        assert_ne!(
            key,
            request_key(&AnalysisRequest {
                unit: DisplayUnit::AccelerationG,
                ..base
            })
        );
        assert_ne!(key, request_key(&AnalysisRequest { max_peaks: 3, ..base }));
        assert_ne!(
            key,
            request_key(&AnalysisRequest {
                thresholds: Some(ThresholdConfig::default()),
                ..base
            })
        );
        let acquisition = AcquisitionConfig {
            fmax: 2000.0,
            ..base.acquisition
        };
        assert_ne!(key, request_key(&AnalysisRequest { acquisition, ..base }));

        assert_eq!(key, request_key(&request(&samples)));
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let buffers: Vec<Vec<i32>> = (0..3).map(|i| vec![i; 8]).collect();
        let mut cache = AnalysisCache::new(2);

        for b in &buffers {
            cache.get_or_compute(&request(b));
        }
        assert_eq!(cache.len(), 2);

        // Newest two are still cached, the first was evicted
        cache.get_or_compute(&request(&buffers[2]));
        cache.get_or_compute(&request(&buffers[1]));
        assert_eq!(cache.stats(), (2, 3));
        cache.get_or_compute(&request(&buffers[0]));
        assert_eq!(cache.stats(), (2, 4));
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let samples = vec![0; 16];
        let mut cache = AnalysisCache::new(0);
        cache.get_or_compute(&request(&samples));
        cache.get_or_compute(&request(&samples));
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), (0, 0));
    }

    #[test]
    fn test_clear() {
        let samples = vec![0; 16];
        let mut cache = AnalysisCache::new(2);
        cache.get_or_compute(&request(&samples));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), (0, 0));
    }
}
