//! Single in-flight submission per wizard instance.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

/// Tracks wizard ids whose submission is still running.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

impl SubmissionGuard {
    /// Claim `wizard_id`, or `None` when a submission for it is running.
    ///
    /// The claim is released when the returned ticket drops.
    ///
    /// # Examples
    /// ```
    /// use shule::domain::SubmissionGuard;
    /// use uuid::Uuid;
    ///
    /// let guard = SubmissionGuard::default();
    /// let id = Uuid::new_v4();
    /// let ticket = guard.try_acquire(id).expect("first claim");
    /// assert!(guard.try_acquire(id).is_none());
    /// drop(ticket);
    /// assert!(guard.try_acquire(id).is_some());
    /// ```
    #[must_use]
    pub fn try_acquire(&self, wizard_id: Uuid) -> Option<SubmissionTicket> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.insert(wizard_id).then(|| SubmissionTicket {
            wizard_id,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    /// Whether a submission for `wizard_id` is running.
    #[must_use]
    pub fn is_in_flight(&self, wizard_id: Uuid) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&wizard_id)
    }
}

/// Claim on a wizard id held for the duration of one submission.
#[derive(Debug)]
pub struct SubmissionTicket {
    wizard_id: Uuid,
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

impl SubmissionTicket {
    /// Wizard instance this ticket belongs to.
    #[must_use]
    pub fn wizard_id(&self) -> Uuid {
        self.wizard_id
    }
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.wizard_id);
    }
}
