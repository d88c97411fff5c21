//! Cooperative cancellation for long running stages.
//!
//! Stages poll a [`CancellationToken`] between records and bail out with
//! [`RegionSetError::Cancelled`] once it fires. The token fires either when
//! [`CancellationToken::cancel`] is called from any clone, or once its
//! optional deadline has passed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::errors::{RegionSetError, Result};

/// How many records a stage processes between two polls of the token.
pub const CANCEL_CHECK_INTERVAL: usize = 4096;

#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// A clone that also fires once `timeout` has elapsed from now. An earlier
    /// deadline already carried by `self` is kept.
    ///
    pub fn with_deadline_from_now(&self, timeout: Duration) -> Self {
        let deadline = match (self.deadline, Instant::now().checked_add(timeout)) {
            (Some(current), Some(new)) => Some(current.min(new)),
            (current, new) => current.or(new),
        };
        CancellationToken {
            flag: Arc::clone(&self.flag),
            deadline,
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    ///
    /// Return `Err(Cancelled)` if the token has fired.
    ///
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(RegionSetError::Cancelled)
        } else {
            Ok(())
        }
    }

    ///
    /// Poll the token every [`CANCEL_CHECK_INTERVAL`] records. `idx` is the
    /// position of the record about to be processed.
    ///
    #[inline]
    pub fn check_every(&self, idx: usize) -> Result<()> {
        if idx % CANCEL_CHECK_INTERVAL == 0 {
            self.check()
        } else {
            Ok(())
        }
    }
}
