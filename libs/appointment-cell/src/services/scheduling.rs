// libs/appointment-cell/src/services/scheduling.rs
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, NewAppointment, UpdateAppointmentRequest,
};
use crate::services::conflict::ConflictDetectionService;
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::notify::NotificationService;
use crate::services::window::TimeWindowService;
use crate::store::{AppointmentStore, SupabaseAppointmentStore};

/// Orchestrates conflict detection, window classification, lifecycle updates
/// and notification dispatch over the appointment store.
///
/// Every date-windowed operation takes the reference day as a parameter; the
/// HTTP layer resolves "today" exactly once per request.
pub struct AppointmentSchedulingService {
    store: Arc<dyn AppointmentStore>,
    conflicts: ConflictDetectionService,
    lifecycle: AppointmentLifecycleService,
    windows: TimeWindowService,
    notifications: Arc<NotificationService>,
}

impl AppointmentSchedulingService {
    pub fn new(config: &AppConfig) -> Self {
        let supabase = Arc::new(SupabaseClient::new(config));
        let store: Arc<dyn AppointmentStore> = Arc::new(SupabaseAppointmentStore::new(supabase));
        let notifications = Arc::new(NotificationService::new(config));
        Self::with_store(store, notifications)
    }

    /// Construction seam for tests and alternative stores.
    pub fn with_store(
        store: Arc<dyn AppointmentStore>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        let conflicts = ConflictDetectionService::new(Arc::clone(&store));
        let lifecycle =
            AppointmentLifecycleService::new(Arc::clone(&store), Arc::clone(&notifications));

        Self {
            store,
            conflicts,
            lifecycle,
            windows: TimeWindowService::new(),
            notifications,
        }
    }

    // ==========================================================================
    // CREATION
    // ==========================================================================

    /// Book a slot. A conflicting appointment fails the call before anything
    /// is written or dispatched; the store's unique slot index turns a racing
    /// insert into the same `DuplicateSlot` failure. The creation notice runs
    /// detached and cannot affect the returned result.
    pub async fn create(&self, request: NewAppointment) -> Result<Appointment, AppointmentError> {
        info!(
            "Creating appointment for patient {} with doctor {}",
            request.patient_id, request.doctor_id
        );

        if self
            .conflicts
            .has_conflict(request.doctor_id, request.appointment_time, request.date)
            .await?
        {
            return Err(AppointmentError::DuplicateSlot);
        }

        let saved = self.store.insert(request).await?;
        self.notifications.dispatch_created(&saved);

        info!("Appointment {} created", saved.id);
        Ok(saved)
    }

    // ==========================================================================
    // LOOKUPS
    // ==========================================================================

    pub async fn get_by_id(&self, id: i64) -> Result<Appointment, AppointmentError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    /// The full table view fails with `NotFound` when empty, matching the
    /// doctor-facing window queries below.
    pub async fn list_all(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let found = self.store.find_all().await?;
        if found.is_empty() {
            return Err(AppointmentError::NotFound);
        }
        Ok(found)
    }

    pub async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.store.find_by_patient(patient_id).await?)
    }

    pub async fn list_by_doctor(&self, doctor_id: i64) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.store.find_by_doctor(doctor_id).await?)
    }

    pub async fn list_by_doctor_and_status(
        &self,
        doctor_id: i64,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.store.find_by_doctor_and_status(doctor_id, status).await?)
    }

    pub async fn list_by_patient_and_status(
        &self,
        patient_id: i64,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.store.find_by_patient_and_status(patient_id, status).await?)
    }

    pub async fn list_by_patient_and_type(
        &self,
        patient_id: i64,
        appointment_type: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self
            .store
            .find_by_patient_and_type(patient_id, appointment_type)
            .await?)
    }

    pub async fn list_by_doctor_and_type(
        &self,
        doctor_id: i64,
        appointment_type: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self
            .store
            .find_by_doctor_and_type(doctor_id, appointment_type)
            .await?)
    }

    /// Occupied appointments on one day of a doctor's calendar; callers
    /// derive the free slots from the booked times.
    pub async fn list_booked_slots(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.store.find_by_doctor_and_date(doctor_id, date).await?)
    }

    // ==========================================================================
    // WINDOWED LISTINGS
    // ==========================================================================

    pub async fn list_today(&self, reference: NaiveDate) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Retrieving appointments for {}", reference);
        Ok(self.store.find_in_window(&self.windows.today(reference)).await?)
    }

    pub async fn list_upcoming(
        &self,
        status: AppointmentStatus,
        reference: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let query = self.windows.upcoming(reference).with_status(status);
        Ok(self.store.find_in_window(&query).await?)
    }

    /// Doctor dashboard view; an empty result is reported as `NotFound` so
    /// "nothing actionable" stays distinct from a bad request.
    pub async fn list_upcoming_for_doctor(
        &self,
        doctor_id: i64,
        status: AppointmentStatus,
        reference: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let query = self
            .windows
            .upcoming(reference)
            .for_doctor(doctor_id)
            .with_status(status);
        let found = self.store.find_in_window(&query).await?;

        if found.is_empty() {
            warn!(
                "No upcoming appointments for doctor {} with status {}",
                doctor_id, status
            );
            return Err(AppointmentError::NotFound);
        }
        Ok(found)
    }

    /// Type-filtered doctor dashboard view; empty also fails `NotFound`.
    pub async fn list_upcoming_for_doctor_by_type(
        &self,
        doctor_id: i64,
        appointment_type: &str,
        status: AppointmentStatus,
        reference: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let query = self
            .windows
            .upcoming(reference)
            .for_doctor(doctor_id)
            .with_status(status)
            .with_type(appointment_type);
        let found = self.store.find_in_window(&query).await?;

        if found.is_empty() {
            warn!(
                "No upcoming {} appointments for doctor {} with status {}",
                appointment_type, doctor_id, status
            );
            return Err(AppointmentError::NotFound);
        }
        Ok(found)
    }

    /// Same-day doctor dashboard view; empty fails `NotFound`.
    pub async fn list_today_for_doctor(
        &self,
        doctor_id: i64,
        status: AppointmentStatus,
        reference: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let query = self
            .windows
            .today(reference)
            .for_doctor(doctor_id)
            .with_status(status);
        let found = self.store.find_in_window(&query).await?;

        if found.is_empty() {
            warn!(
                "No appointments today for doctor {} with status {}",
                doctor_id, status
            );
            return Err(AppointmentError::NotFound);
        }
        Ok(found)
    }

    pub async fn list_today_for_patient(
        &self,
        patient_id: i64,
        status: AppointmentStatus,
        reference: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let query = self
            .windows
            .today(reference)
            .for_patient(patient_id)
            .with_status(status);
        Ok(self.store.find_in_window(&query).await?)
    }

    /// Patient counterpart of `list_upcoming_for_doctor`: an empty result is
    /// an empty list, never an error.
    pub async fn list_upcoming_for_patient(
        &self,
        patient_id: i64,
        status: AppointmentStatus,
        reference: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let query = self
            .windows
            .upcoming(reference)
            .for_patient(patient_id)
            .with_status(status);
        Ok(self.store.find_in_window(&query).await?)
    }

    /// The patient "upcoming" view that includes today, concatenated
    /// upcoming-first.
    pub async fn list_combined_upcoming_for_patient(
        &self,
        patient_id: i64,
        reference: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let [upcoming, today] = self.windows.patient_combined_upcoming(reference, patient_id);

        let mut found = self.store.find_in_window(&upcoming).await?;
        found.extend(self.store.find_in_window(&today).await?);
        Ok(found)
    }

    /// A doctor's actionable queue: today's and future appointments awaiting
    /// the given status, concatenated upcoming-first.
    pub async fn list_request_queue(
        &self,
        doctor_id: i64,
        status: AppointmentStatus,
        reference: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let [upcoming, today] = self.windows.request_queue(reference, doctor_id, status);

        let mut found = self.store.find_in_window(&upcoming).await?;
        found.extend(self.store.find_in_window(&today).await?);
        Ok(found)
    }

    // ==========================================================================
    // COUNTS
    // ==========================================================================

    pub async fn count_today_for_doctor(
        &self,
        doctor_id: i64,
        status: AppointmentStatus,
        reference: NaiveDate,
    ) -> Result<usize, AppointmentError> {
        let query = self
            .windows
            .today(reference)
            .for_doctor(doctor_id)
            .with_status(status);
        Ok(self.store.find_in_window(&query).await?.len())
    }

    pub async fn count_upcoming_for_doctor(
        &self,
        doctor_id: i64,
        status: AppointmentStatus,
        reference: NaiveDate,
    ) -> Result<usize, AppointmentError> {
        let query = self
            .windows
            .upcoming(reference)
            .for_doctor(doctor_id)
            .with_status(status);
        Ok(self.store.find_in_window(&query).await?.len())
    }

    // ==========================================================================
    // LIFECYCLE DELEGATES
    // ==========================================================================

    pub async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        self.lifecycle.update_status(id, status).await
    }

    pub async fn update_date_time(
        &self,
        id: i64,
        new_date: NaiveDate,
        new_time: chrono::NaiveTime,
    ) -> Result<Appointment, AppointmentError> {
        self.lifecycle.update_date_time(id, new_date, new_time).await
    }

    pub async fn update_details(
        &self,
        id: i64,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        self.lifecycle.update_details(id, request).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppointmentError> {
        self.lifecycle.delete(id).await
    }
}
