use std::future::Future;

use servizo_catalog::Coordinates;
use thiserror::Error;
use tokio::sync::oneshot;

/// Why a position could not be obtained.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Position unavailable")]
    PositionUnavailable,
    #[error("Timed out waiting for a position")]
    Timeout,
}

pub type LocationResult = Result<Coordinates, GeolocationError>;

/// Something that can produce a single position reading.
pub trait GeolocationProvider {
    fn locate(&self) -> impl Future<Output = LocationResult> + Send;
}

/// Provider that always answers with the same reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub LocationResult);

impl GeolocationProvider for FixedLocation {
    async fn locate(&self) -> LocationResult {
        self.0
    }
}

/// Handle for answering one outstanding location request.
///
/// Consumed on use, so a request resolves at most once. Resolving after the
/// owning session is gone is harmless and reports `false`. Dropping the handle
/// unresolved counts as [`GeolocationError::PositionUnavailable`].
#[derive(Debug)]
pub struct LocationRequest {
    tx: oneshot::Sender<LocationResult>,
}

impl LocationRequest {
    pub(super) fn channel() -> (Self, oneshot::Receiver<LocationResult>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Deliver the outcome. Returns whether a live session received it.
    pub fn resolve(self, result: LocationResult) -> bool {
        self.tx.send(result).is_ok()
    }

    pub fn succeed(self, coordinates: Coordinates) -> bool {
        self.resolve(Ok(coordinates))
    }

    pub fn fail(self, error: GeolocationError) -> bool {
        self.resolve(Err(error))
    }

    /// The requesting session has been torn down.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}
