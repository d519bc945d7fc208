use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::dispatch::Dispatcher;
use crate::sample::Sample;

pub const DEFAULT_MOCK_INTERVAL: Duration = Duration::from_millis(1000);

/// Synthetic source: one uniformly random sample in `[0.0, 1.0)` per interval.
///
/// The first sample arrives one full interval after [`MockGenerator::run`] starts.
pub struct MockGenerator {
    interval: Duration,
    rng: StdRng,
}

impl MockGenerator {
    pub fn new(interval: Duration) -> Self {
        Self::with_rng(interval, StdRng::from_entropy())
    }

    /// Deterministic generator for tests.
    pub fn with_seed(interval: Duration, seed: u64) -> Self {
        Self::with_rng(interval, StdRng::seed_from_u64(seed))
    }

    fn with_rng(interval: Duration, rng: StdRng) -> Self {
        Self {
            // tokio intervals panic on a zero period.
            interval: interval.max(Duration::from_millis(1)),
            rng,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_sample(&mut self) -> Sample {
        Sample::now(self.rng.gen_range(0.0..1.0))
    }

    /// Delivers samples until `limit` is reached, or forever when `limit` is `None`.
    pub async fn run(mut self, dispatcher: &mut Dispatcher, limit: Option<u64>) {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        log::info!("mock source started, one sample every {:?}", self.interval);

        let mut produced = 0u64;
        while limit.is_none_or(|n| produced < n) {
            ticker.tick().await;
            let sample = self.next_sample();
            dispatcher.deliver(&sample.to_payload());
            produced += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::dispatch::tests::RecordingSink;

    fn recording(
        times: Arc<Mutex<Vec<(Instant, f64)>>>,
    ) -> (Arc<RecordingSink>, Dispatcher) {
        let sink = Arc::new(RecordingSink::default());
        let d = Dispatcher::new(
            sink.clone(),
            Box::new(move |p| {
                let v = p.number("value").unwrap();
                times.lock().unwrap().push((Instant::now(), v));
            }),
        );
        (sink, d)
    }

    #[tokio::test(start_paused = true)]
    async fn n_intervals_produce_n_deliveries() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (sink, mut d) = recording(seen.clone());

        let start = Instant::now();
        MockGenerator::with_seed(Duration::from_millis(1000), 7)
            .run(&mut d, Some(5))
            .await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 5);
        assert_eq!(d.delivered(), 5);
        // One status payload per delivery, and no connection status in mock mode.
        assert_eq!(sink.calls().len(), 5);
        assert!(sink.calls().iter().all(|c| c.starts_with("payload:")));

        // First delivery one interval in, then at least one interval apart.
        assert!(seen[0].0 - start >= Duration::from_millis(1000));
        for pair in seen.windows(2) {
            assert!(pair[1].0 - pair[0].0 >= Duration::from_millis(1000));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn values_stay_in_unit_range() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (_, mut d) = recording(seen.clone());

        MockGenerator::with_seed(Duration::from_millis(10), 42)
            .run(&mut d, Some(200))
            .await;

        assert!(
            seen.lock()
                .unwrap()
                .iter()
                .all(|&(_, v)| (0.0..1.0).contains(&v))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_before_the_first_interval() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (_, mut d) = recording(seen.clone());

        let gen_task = MockGenerator::with_seed(Duration::from_millis(1000), 1);
        let run = gen_task.run(&mut d, None);
        let _ = time::timeout(Duration::from_millis(999), run).await;

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn zero_interval_is_clamped() {
        let g = MockGenerator::with_seed(Duration::ZERO, 0);
        assert_eq!(g.interval(), Duration::from_millis(1));
    }

    #[test]
    fn samples_are_timestamped() {
        let mut g = MockGenerator::with_seed(DEFAULT_MOCK_INTERVAL, 3);
        let s = g.next_sample();
        assert!(s.timestamp > 0);
        assert!((0.0..1.0).contains(&s.value));
    }
}
