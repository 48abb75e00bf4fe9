//! Acquiring the device position.

use async_trait::async_trait;
use std::{
    fmt::Debug,
    time::{Duration, Instant},
};

use crate::{error::LocationError, model::Coordinate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// How long to wait for a fix.
    pub timeout: Duration,
    /// How old a previously obtained fix may be and still be reused.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_position(&self, high_accuracy: bool) -> Result<Coordinate, LocationError>;
}

/// A position known up front (command line or config). `None` behaves like a
/// denied permission prompt; a coordinate off the globe makes the position
/// unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Option<Coordinate>);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_position(&self, _high_accuracy: bool) -> Result<Coordinate, LocationError> {
        let at = self.0.ok_or(LocationError::PermissionDenied)?;
        if !(-90.0..=90.0).contains(&at.latitude) || !(-180.0..=180.0).contains(&at.longitude) {
            return Err(LocationError::Unavailable(format!(
                "coordinate out of range: {}, {}",
                at.latitude, at.longitude
            )));
        }
        Ok(at)
    }
}

/// Applies [`PositionOptions`] on top of a [`LocationSource`].
#[derive(Debug)]
pub struct Locator {
    source: Box<dyn LocationSource>,
    options: PositionOptions,
    last_fix: Option<(Instant, Coordinate)>,
}

impl Locator {
    pub fn new(source: Box<dyn LocationSource>) -> Self {
        Self::with_options(source, PositionOptions::default())
    }

    pub fn with_options(source: Box<dyn LocationSource>, options: PositionOptions) -> Self {
        Self { source, options, last_fix: None }
    }

    pub async fn acquire(&mut self) -> Result<Coordinate, LocationError> {
        let max_age = self.options.maximum_age;
        if let Some((_, coordinate)) = self.last_fix.filter(|(at, _)| at.elapsed() <= max_age) {
            tracing::debug!("Reusing cached position");
            return Ok(coordinate);
        }

        let coordinate = tokio::time::timeout(
            self.options.timeout,
            self.source.current_position(self.options.high_accuracy),
        )
        .await
        .map_err(|_| LocationError::Timeout)??;

        self.last_fix = Some((Instant::now(), coordinate));
        Ok(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Default)]
    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LocationSource for CountingSource {
        async fn current_position(&self, _high: bool) -> Result<Coordinate, LocationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Coordinate::new(n as f64, 0.0))
        }
    }

    #[derive(Debug)]
    struct SlowSource;

    #[async_trait]
    impl LocationSource for SlowSource {
        async fn current_position(&self, _high: bool) -> Result<Coordinate, LocationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Coordinate::new(0.0, 0.0))
        }
    }

    #[tokio::test]
    async fn fixed_location_without_coordinate_is_denied() {
        let mut locator = Locator::new(Box::new(FixedLocation(None)));
        assert_eq!(locator.acquire().await, Err(LocationError::PermissionDenied));
    }

    #[tokio::test]
    async fn fixed_location_off_the_globe_is_unavailable() {
        let mut locator = Locator::new(Box::new(FixedLocation(Some(Coordinate::new(91.0, 0.0)))));
        assert!(matches!(locator.acquire().await, Err(LocationError::Unavailable(_))));

        let mut locator = Locator::new(Box::new(FixedLocation(Some(Coordinate::new(0.0, f64::NAN)))));
        assert!(matches!(locator.acquire().await, Err(LocationError::Unavailable(_))));

        let mut locator = Locator::new(Box::new(FixedLocation(Some(Coordinate::new(-90.0, 180.0)))));
        assert_eq!(locator.acquire().await, Ok(Coordinate::new(-90.0, 180.0)));
    }

    #[tokio::test]
    async fn fresh_fix_is_reused() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut locator = Locator::new(Box::new(CountingSource { calls: calls.clone() }));

        let first = locator.acquire().await.expect("fix");
        let second = locator.acquire().await.expect("fix");
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_fix_is_refreshed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let options = PositionOptions { maximum_age: Duration::ZERO, ..Default::default() };
        let mut locator =
            Locator::with_options(Box::new(CountingSource { calls: calls.clone() }), options);

        locator.acquire().await.expect("fix");
        std::thread::sleep(Duration::from_millis(2));
        let second = locator.acquire().await.expect("fix");
        assert_eq!(second.latitude, 1.0);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn slow_source_times_out() {
        let options = PositionOptions { timeout: Duration::from_millis(20), ..Default::default() };
        let mut locator = Locator::with_options(Box::new(SlowSource), options);
        assert_eq!(locator.acquire().await, Err(LocationError::Timeout));
    }

    #[test]
    fn default_options() {
        let opts = PositionOptions::default();
        assert!(opts.high_accuracy);
        assert_eq!(opts.timeout, Duration::from_secs(10));
        assert_eq!(opts.maximum_age, Duration::from_secs(60));
    }
}
