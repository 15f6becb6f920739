//! Remote-data slice state.
//!
//! Every fetched resource holds its slice of application state as a
//! [`RemoteData`]: a status flag plus the last received value and the last
//! error. Exactly one of `data`/`error` is meaningful for a given status.

use serde::{Deserialize, Serialize};

/// Status of a fetched resource slice.
///
/// Transitions only via dispatched actions:
/// - a request action moves the slice to `Loading` and clears the error
/// - the success action moves it to `Success`, replacing the data
/// - the error action moves it to `Error`, storing the error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStatus {
    /// A fetch is in flight (also the initial state of every slice)
    Loading,

    /// The last fetch resolved and `data` holds the result
    Success,

    /// The last fetch failed and `error` holds the reason
    Error,
}

/// Slice state for a fetched resource.
///
/// The retention policy is uniform across resources: an error keeps the
/// last successfully fetched data so the UI can keep rendering it behind
/// the error banner. Clearing data is an explicit action (e.g. the orders
/// cleanup on logout), never an error side effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteData<T> {
    /// Current status of the slice
    pub status: FetchStatus,

    /// Last successfully fetched value, if any
    pub data: Option<T>,

    /// Last error, if the slice is in the `Error` status
    pub error: Option<String>,
}

impl<T> RemoteData<T> {
    /// Create a slice in its initial state: loading, no data, no error.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: FetchStatus::Loading,
            data: None,
            error: None,
        }
    }

    /// A request was dispatched: back to `Loading`, prior error cleared.
    pub fn begin(&mut self) {
        self.status = FetchStatus::Loading;
        self.error = None;
    }

    /// The fetch resolved: `Success`, data replaced.
    pub fn resolve(&mut self, data: T) {
        self.status = FetchStatus::Success;
        self.data = Some(data);
        self.error = None;
    }

    /// The fetch failed: `Error`, error stored, last-good data preserved.
    pub fn reject(&mut self, error: impl Into<String>) {
        self.status = FetchStatus::Error;
        self.error = Some(error.into());
    }

    /// Check whether the slice is currently loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Check whether the slice holds a successful result.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }

    /// Check whether the slice is in the error state.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == FetchStatus::Error
    }
}

impl<T> Default for RemoteData<T> {
    fn default() -> Self {
        Self::new()
    }
}
