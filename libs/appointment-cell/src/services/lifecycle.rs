// libs/appointment-cell/src/services/lifecycle.rs
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::{Appointment, AppointmentError, AppointmentStatus, UpdateAppointmentRequest};
use crate::services::notify::NotificationService;
use crate::store::AppointmentStore;

/// Id-keyed mutation of existing appointments. Absence of the record is the
/// only failure these operations introduce themselves; it is always reported
/// as `NotFound`, never folded into infrastructure errors.
pub struct AppointmentLifecycleService {
    store: Arc<dyn AppointmentStore>,
    notifications: Arc<NotificationService>,
}

impl AppointmentLifecycleService {
    pub fn new(store: Arc<dyn AppointmentStore>, notifications: Arc<NotificationService>) -> Self {
        Self { store, notifications }
    }

    /// Overwrite the status unconditionally. The entity model intends
    /// NotAccepted -> Accepted/Rejected only, but this operation does not
    /// enforce the transition graph; leaving a terminal status is logged.
    pub async fn update_status(
        &self,
        id: i64,
        new_status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Updating appointment {} status to {}", id, new_status);

        let mut appointment = self.require(id).await?;
        if appointment.status.is_terminal() && appointment.status != new_status {
            warn!(
                "Appointment {} leaving terminal status {} for {}",
                id, appointment.status, new_status
            );
        }

        appointment.status = new_status;
        self.store.update(&appointment).await?;
        Ok(())
    }

    /// Move an appointment to a new slot. No conflict pre-check runs here;
    /// the store's unique slot index rejects a move onto an occupied slot.
    pub async fn update_date_time(
        &self,
        id: i64,
        new_date: NaiveDate,
        new_time: NaiveTime,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Rescheduling appointment {} to {} {}", id, new_date, new_time);

        let mut appointment = self.require(id).await?;
        appointment.date = new_date;
        appointment.appointment_time = new_time;

        Ok(self.store.update(&appointment).await?)
    }

    /// Full-field update. Identifier, doctor, patient and status stay as
    /// stored.
    pub async fn update_details(
        &self,
        id: i64,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment {}", id);

        let mut appointment = self.require(id).await?;
        appointment.patient_name = request.patient_name;
        appointment.doctor_name = request.doctor_name;
        appointment.age = request.age;
        appointment.gender = request.gender;
        appointment.description = request.description;
        appointment.date = request.date;
        appointment.appointment_time = request.appointment_time;
        appointment.appointment_type = request.appointment_type;
        appointment.payment_mode = request.payment_mode;
        appointment.transaction_id = request.transaction_id;
        appointment.amount_paid = request.amount_paid;
        appointment.address = request.address;

        Ok(self.store.update(&appointment).await?)
    }

    /// Physical removal. The deletion notice goes out as a detached task
    /// before the row is removed; its outcome is not observed.
    pub async fn delete(&self, id: i64) -> Result<(), AppointmentError> {
        let appointment = self.require(id).await?;

        self.notifications.dispatch_deleted(&appointment);
        self.store.delete(id).await?;

        info!("Appointment {} deleted", id);
        Ok(())
    }

    async fn require(&self, id: i64) -> Result<Appointment, AppointmentError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AppointmentError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockAppointmentStore;
    use assert_matches::assert_matches;
    use shared_config::AppConfig;

    fn test_notifier() -> Arc<NotificationService> {
        // Port 9 is unroutable locally; dispatches fail fast and are logged.
        Arc::new(NotificationService::new(&AppConfig {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            api_gateway_url: "http://127.0.0.1:9".to_string(),
            collaborator_timeout_secs: 1,
        }))
    }

    fn sample_appointment() -> Appointment {
        Appointment {
            id: 42,
            doctor_id: 7,
            patient_id: 3,
            patient_name: "Asha Rao".to_string(),
            age: 34,
            gender: "F".to_string(),
            description: "Persistent cough".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            appointment_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            status: AppointmentStatus::NotAccepted,
            appointment_type: "checkup".to_string(),
            payment_mode: "UPI".to_string(),
            transaction_id: "TXN-1".to_string(),
            address: "12 Lake Road".to_string(),
            amount_paid: 500,
            doctor_name: "Dr. Mehta".to_string(),
        }
    }

    #[tokio::test]
    async fn update_status_overwrites_and_saves() {
        let mut store = MockAppointmentStore::new();
        store
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_appointment())));
        store
            .expect_update()
            .withf(|a| a.id == 42 && a.status == AppointmentStatus::Accepted)
            .returning(|a| Ok(a.clone()));

        let lifecycle = AppointmentLifecycleService::new(Arc::new(store), test_notifier());
        lifecycle
            .update_status(42, AppointmentStatus::Accepted)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_status_missing_id_is_not_found() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_by_id().returning(|_| Ok(None));
        // No update expectation: touching the store would panic the mock.

        let lifecycle = AppointmentLifecycleService::new(Arc::new(store), test_notifier());
        assert_matches!(
            lifecycle.update_status(99, AppointmentStatus::Accepted).await,
            Err(AppointmentError::NotFound)
        );
    }

    #[tokio::test]
    async fn reschedule_moves_the_slot() {
        let new_date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let new_time = NaiveTime::from_hms_opt(14, 30, 0).unwrap();

        let mut store = MockAppointmentStore::new();
        store
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_appointment())));
        store
            .expect_update()
            .withf(move |a| a.date == new_date && a.appointment_time == new_time)
            .returning(|a| Ok(a.clone()));

        let lifecycle = AppointmentLifecycleService::new(Arc::new(store), test_notifier());
        let updated = lifecycle.update_date_time(42, new_date, new_time).await.unwrap();
        assert_eq!(updated.date, new_date);
        assert_eq!(updated.appointment_time, new_time);
    }

    #[tokio::test]
    async fn full_update_keeps_identity_and_status() {
        let mut store = MockAppointmentStore::new();
        store
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_appointment())));
        store.expect_update().returning(|a| Ok(a.clone()));

        let request = UpdateAppointmentRequest {
            patient_name: "Asha R. Rao".to_string(),
            doctor_name: "Dr. N. Mehta".to_string(),
            age: 35,
            gender: "F".to_string(),
            description: "Follow-up".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            appointment_time: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
            appointment_type: "follow-up".to_string(),
            payment_mode: "Card".to_string(),
            transaction_id: "TXN-2".to_string(),
            address: "14 Hill Street".to_string(),
            amount_paid: 750,
        };

        let lifecycle = AppointmentLifecycleService::new(Arc::new(store), test_notifier());
        let updated = lifecycle.update_details(42, request.clone()).await.unwrap();

        assert_eq!(updated.id, 42);
        assert_eq!(updated.doctor_id, 7);
        assert_eq!(updated.patient_id, 3);
        assert_eq!(updated.status, AppointmentStatus::NotAccepted);

        assert_eq!(updated.patient_name, request.patient_name);
        assert_eq!(updated.doctor_name, request.doctor_name);
        assert_eq!(updated.age, request.age);
        assert_eq!(updated.description, request.description);
        assert_eq!(updated.date, request.date);
        assert_eq!(updated.appointment_time, request.appointment_time);
        assert_eq!(updated.appointment_type, request.appointment_type);
        assert_eq!(updated.payment_mode, request.payment_mode);
        assert_eq!(updated.transaction_id, request.transaction_id);
        assert_eq!(updated.amount_paid, request.amount_paid);
        assert_eq!(updated.address, request.address);
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_by_id().returning(|_| Ok(None));

        let lifecycle = AppointmentLifecycleService::new(Arc::new(store), test_notifier());
        assert_matches!(lifecycle.delete(99).await, Err(AppointmentError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let mut store = MockAppointmentStore::new();
        store
            .expect_find_by_id()
            .returning(|_| Ok(Some(sample_appointment())));
        store
            .expect_delete()
            .withf(|id| *id == 42)
            .returning(|_| Ok(()));

        let lifecycle = AppointmentLifecycleService::new(Arc::new(store), test_notifier());
        lifecycle.delete(42).await.unwrap();
    }
}
