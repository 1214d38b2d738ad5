use crate::data::ApiError;

/// Counts the unsettled calls of one unit of UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Waiting {
    in_flight: usize,
}

impl Waiting {
    pub fn is_waiting(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub(crate) fn begin(&mut self) {
        self.in_flight += 1;
    }

    pub(crate) fn settle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveError {
    pub status: u16,
    pub message: String,
    pub extra: String,
    pub recoverable: bool,
}

/// The latest error of one unit of UI.  Only recoverable errors can be
/// dismissed; a fatal one stays until the view goes away.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorSurface {
    current: Option<ActiveError>,
}

impl ErrorSurface {
    pub fn set(&mut self, status: u16, error: ApiError) {
        if error.message.is_empty() {
            log::warn!("ignoring error without a message (status {})", status);
            return;
        }
        self.current = Some(ActiveError {
            status,
            message: error.message,
            extra: error.extra,
            recoverable: error.recoverable,
        });
    }

    /// User dismissal, a no-op unless the error is recoverable.
    pub fn clear(&mut self) {
        if self.is_recoverable() {
            self.current = None;
        }
    }

    /// Drops any error, fatal or not.  Used when the owning view is torn
    /// down.
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ActiveError> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(&self.current, Some(err) if err.recoverable)
    }

    pub fn is_fatal(&self) -> bool {
        matches!(&self.current, Some(err) if !err.recoverable)
    }
}
