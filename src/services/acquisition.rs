use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};

use crate::models::Location;

/// Why a location source could not produce a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    NotProvided,
    Denied,
    Unsupported,
    TimedOut,
}

/// Outcome of asking a location source for a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Acquired {
    Located(Location),
    Unavailable(UnavailableReason),
}

/// A pluggable source of the user's position for one search.
///
/// Implementations never fail: every problem is reported as
/// `Acquired::Unavailable`.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn acquire(&self) -> Acquired;
}

/// Coordinates supplied directly by the client, either a browser fix or a
/// point picked on the map
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvidedLocation(pub Option<Location>);

#[async_trait]
impl LocationSource for ProvidedLocation {
    async fn acquire(&self) -> Acquired {
        match self.0 {
            Some(location) => Acquired::Located(location),
            None => Acquired::Unavailable(UnavailableReason::NotProvided),
        }
    }
}

/// Used when the client has no geolocation capability at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationSource for NoLocation {
    async fn acquire(&self) -> Acquired {
        Acquired::Unavailable(UnavailableReason::Unsupported)
    }
}

/// Sending half of a pending device fix
#[derive(Debug)]
pub struct FixReporter {
    tx: oneshot::Sender<Location>,
}

impl FixReporter {
    /// Deliver the device position. Returns false if nobody is waiting anymore.
    pub fn report(self, location: Location) -> bool {
        self.tx.send(location).is_ok()
    }

    /// The user refused to share their position
    pub fn deny(self) {
        drop(self.tx);
    }
}

/// A device fix that arrives asynchronously, e.g. from a geolocation callback
#[derive(Debug)]
pub struct PendingFix {
    rx: Mutex<Option<oneshot::Receiver<Location>>>,
}

impl PendingFix {
    pub fn channel() -> (FixReporter, PendingFix) {
        let (tx, rx) = oneshot::channel();
        (
            FixReporter { tx },
            PendingFix {
                rx: Mutex::new(Some(rx)),
            },
        )
    }
}

#[async_trait]
impl LocationSource for PendingFix {
    async fn acquire(&self) -> Acquired {
        let mut slot = self.rx.lock().await;

        // A fix is delivered once; later calls have nothing to wait on
        let Some(rx) = slot.as_mut() else {
            return Acquired::Unavailable(UnavailableReason::NotProvided);
        };

        let outcome = match rx.await {
            Ok(location) => Acquired::Located(location),
            Err(_) => Acquired::Unavailable(UnavailableReason::Denied),
        };
        *slot = None;
        outcome
    }
}

/// Ask `source` for a position, giving up after `timeout`.
///
/// Never retries. A timeout is reported as `UnavailableReason::TimedOut`.
pub async fn acquire_within<S>(source: &S, timeout: Duration) -> Acquired
where
    S: LocationSource + ?Sized,
{
    match tokio::time::timeout(timeout, source.acquire()).await {
        Ok(acquired) => {
            debug!("Location source answered: {:?}", acquired);
            acquired
        }
        Err(_) => {
            warn!("Location source did not answer within {:?}", timeout);
            Acquired::Unavailable(UnavailableReason::TimedOut)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn test_provided_location() {
        let location = Location::new(44.6166, 33.5254);
        let acquired = acquire_within(&ProvidedLocation(Some(location)), TIMEOUT).await;
        assert_eq!(acquired, Acquired::Located(location));

        let acquired = acquire_within(&ProvidedLocation(None), TIMEOUT).await;
        assert_eq!(
            acquired,
            Acquired::Unavailable(UnavailableReason::NotProvided)
        );
    }

    #[tokio::test]
    async fn test_no_location_is_unsupported() {
        let acquired = acquire_within(&NoLocation, TIMEOUT).await;
        assert_eq!(
            acquired,
            Acquired::Unavailable(UnavailableReason::Unsupported)
        );
    }

    #[tokio::test]
    async fn test_pending_fix_delivers_report() {
        let (reporter, pending) = PendingFix::channel();
        let location = Location::with_accuracy(44.60, 33.52, 15.0);

        let waiter = tokio::spawn(async move { acquire_within(&pending, TIMEOUT).await });
        assert!(reporter.report(location));

        assert_eq!(waiter.await.unwrap(), Acquired::Located(location));
    }

    #[tokio::test]
    async fn test_pending_fix_denied() {
        let (reporter, pending) = PendingFix::channel();
        reporter.deny();

        assert_eq!(
            acquire_within(&pending, TIMEOUT).await,
            Acquired::Unavailable(UnavailableReason::Denied)
        );
        // Consumed: a second acquire does not wait
        assert_eq!(
            acquire_within(&pending, TIMEOUT).await,
            Acquired::Unavailable(UnavailableReason::NotProvided)
        );
    }

    #[tokio::test]
    async fn test_silent_source_times_out() {
        let (_reporter, pending) = PendingFix::channel();

        let acquired = acquire_within(&pending, Duration::from_millis(50)).await;
        assert_eq!(acquired, Acquired::Unavailable(UnavailableReason::TimedOut));
    }
}
