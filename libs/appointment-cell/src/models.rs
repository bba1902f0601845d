// libs/appointment-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use shared_database::DbError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub patient_name: String,
    pub age: i32,
    pub gender: String,
    pub description: String,
    pub date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub payment_mode: String,
    pub transaction_id: String,
    pub address: String,
    pub amount_paid: i32,
    pub doctor_name: String,
}

/// Creation payload. The store assigns the identifier on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub doctor_id: i64,
    pub patient_id: i64,
    pub patient_name: String,
    pub age: i32,
    pub gender: String,
    pub description: String,
    pub date: NaiveDate,
    pub appointment_time: NaiveTime,
    #[serde(default = "AppointmentStatus::initial")]
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub payment_mode: String,
    pub transaction_id: String,
    pub address: String,
    pub amount_paid: i32,
    pub doctor_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "Not Accepted", alias = "NotAccepted")]
    NotAccepted,
    Accepted,
    Rejected,
    Completed,
}

impl AppointmentStatus {
    /// Status every new appointment starts in.
    pub fn initial() -> Self {
        AppointmentStatus::NotAccepted
    }

    /// Rejected and Completed are intended as end states. The status update
    /// operation still overwrites them unconditionally; leaving a terminal
    /// status is logged, not blocked.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Rejected | AppointmentStatus::Completed)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::NotAccepted => write!(f, "Not Accepted"),
            AppointmentStatus::Accepted => write!(f, "Accepted"),
            AppointmentStatus::Rejected => write!(f, "Rejected"),
            AppointmentStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "Not Accepted" | "NotAccepted" => Ok(AppointmentStatus::NotAccepted),
            "Accepted" => Ok(AppointmentStatus::Accepted),
            "Rejected" => Ok(AppointmentStatus::Rejected),
            "Completed" => Ok(AppointmentStatus::Completed),
            other => Err(AppointmentError::InvalidInput(format!(
                "unknown appointment status '{}'",
                other
            ))),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Full-field update. Identifier, doctor, patient and status are immutable
/// through this path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub patient_name: String,
    pub doctor_name: String,
    pub age: i32,
    pub gender: String,
    pub description: String,
    pub date: NaiveDate,
    pub appointment_time: NaiveTime,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub payment_mode: String,
    pub transaction_id: String,
    pub address: String,
    pub amount_paid: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDateTimeRequest {
    pub date: NaiveDate,
    pub appointment_time: NaiveTime,
}

// ==============================================================================
// TIME WINDOW MODELS
// ==============================================================================

/// Date predicate relative to a caller-supplied reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// Exactly the given day.
    On(NaiveDate),
    /// Strictly after the given day.
    After(NaiveDate),
}

/// Parameter tuple for the store's windowed finder: a date window plus
/// optional equality filters. Built by the time window service, executed by
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowQuery {
    pub window: DateWindow,
    pub doctor_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub appointment_type: Option<String>,
}

impl WindowQuery {
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            doctor_id: None,
            patient_id: None,
            status: None,
            appointment_type: None,
        }
    }

    pub fn for_doctor(mut self, doctor_id: i64) -> Self {
        self.doctor_id = Some(doctor_id);
        self
    }

    pub fn for_patient(mut self, patient_id: i64) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_type(mut self, appointment_type: impl Into<String>) -> Self {
        self.appointment_type = Some(appointment_type.into());
        self
    }
}

// ==============================================================================
// COLLABORATOR MODELS
// ==============================================================================

/// Patient record as served by the profile gateway. Only the fields the
/// notification flow needs are deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientProfile {
    #[serde(rename = "patientId")]
    pub patient_id: i64,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "emailId")]
    pub email_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorProfile {
    pub doctor_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

/// Payload posted to the email service for creation and deletion notices.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentNotice {
    pub appointment_id: i64,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub patient_name: String,
    pub date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub doctor_name: String,
    pub contact: Option<String>,
    pub patient_email: Option<String>,
    pub doctor_email: Option<String>,
}

impl AppointmentNotice {
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            appointment_id: appointment.id,
            doctor_id: appointment.doctor_id,
            patient_id: appointment.patient_id,
            patient_name: appointment.patient_name.clone(),
            date: appointment.date,
            appointment_time: appointment.appointment_time,
            status: appointment.status,
            appointment_type: appointment.appointment_type.clone(),
            doctor_name: appointment.doctor_name.clone(),
            contact: None,
            patient_email: None,
            doctor_email: None,
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("appointment not found")]
    NotFound,

    #[error("doctor already has an appointment at this date and time")]
    DuplicateSlot,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<DbError> for AppointmentError {
    fn from(err: DbError) -> Self {
        match err {
            // The only unique constraint on the appointments table is the
            // (doctor_id, date, appointment_time) slot index.
            DbError::Conflict => AppointmentError::DuplicateSlot,
            DbError::NotFound => AppointmentError::NotFound,
            other => AppointmentError::Database(other.to_string()),
        }
    }
}
