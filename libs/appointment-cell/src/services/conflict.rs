// libs/appointment-cell/src/services/conflict.rs
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::AppointmentError;
use crate::store::AppointmentStore;

/// Pre-save gate over the store's slot existence check. The check and the
/// following insert are separate store operations; the unique slot index in
/// the store closes the remaining race window.
pub struct ConflictDetectionService {
    store: Arc<dyn AppointmentStore>,
}

impl ConflictDetectionService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    pub async fn has_conflict(
        &self,
        doctor_id: i64,
        appointment_time: NaiveTime,
        date: NaiveDate,
    ) -> Result<bool, AppointmentError> {
        debug!(
            "Checking slot for doctor {} on {} at {}",
            doctor_id, date, appointment_time
        );

        let exists = self.store.exists_slot(doctor_id, appointment_time, date).await?;
        if exists {
            warn!(
                "Slot conflict for doctor {} on {} at {}",
                doctor_id, date, appointment_time
            );
        }

        Ok(exists)
    }
}
