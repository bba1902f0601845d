// libs/appointment-cell/src/store/mod.rs
pub mod supabase;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
#[cfg(test)]
use mockall::automock;

use shared_database::DbError;

use crate::models::{Appointment, AppointmentStatus, NewAppointment, WindowQuery};

pub use supabase::SupabaseAppointmentStore;

/// Persistence contract for appointment records. Implementations only move
/// data; every semantic rule (conflicts, windows, lifecycle) lives in the
/// services that consume this trait.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Persist a new record. The store assigns the identifier and owns the
    /// unique index over (doctor_id, date, appointment_time); a violation
    /// surfaces as `DbError::Conflict`.
    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, DbError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, DbError>;

    async fn find_all(&self) -> Result<Vec<Appointment>, DbError>;

    /// Overwrite the record with the given id.
    async fn update(&self, appointment: &Appointment) -> Result<Appointment, DbError>;

    async fn delete(&self, id: i64) -> Result<(), DbError>;

    async fn find_by_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, DbError>;

    async fn find_by_doctor(&self, doctor_id: i64) -> Result<Vec<Appointment>, DbError>;

    async fn find_by_doctor_and_status(
        &self,
        doctor_id: i64,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, DbError>;

    async fn find_by_patient_and_status(
        &self,
        patient_id: i64,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, DbError>;

    async fn find_by_patient_and_type(
        &self,
        patient_id: i64,
        appointment_type: &str,
    ) -> Result<Vec<Appointment>, DbError>;

    async fn find_by_doctor_and_type(
        &self,
        doctor_id: i64,
        appointment_type: &str,
    ) -> Result<Vec<Appointment>, DbError>;

    /// All appointments occupying a doctor's calendar on one day; callers
    /// derive free slots from the occupied times.
    async fn find_by_doctor_and_date(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, DbError>;

    /// Windowed finder: exact-day or strictly-after threshold, composed with
    /// the query's optional equality filters.
    async fn find_in_window(&self, query: &WindowQuery) -> Result<Vec<Appointment>, DbError>;

    async fn exists_slot(
        &self,
        doctor_id: i64,
        appointment_time: NaiveTime,
        date: NaiveDate,
    ) -> Result<bool, DbError>;
}
