// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, NewAppointment, UpdateAppointmentRequest,
    UpdateDateTimeRequest,
};
use crate::services::scheduling::AppointmentSchedulingService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct SlotTimesQuery {
    pub doctor_id: i64,
    pub date: NaiveDate,
}

// ==============================================================================
// HELPERS
// ==============================================================================

fn into_app_error(err: AppointmentError) -> AppError {
    match err {
        e @ AppointmentError::NotFound => AppError::NotFound(e.to_string()),
        e @ AppointmentError::DuplicateSlot => AppError::Conflict(e.to_string()),
        AppointmentError::InvalidInput(msg) => AppError::BadRequest(msg),
        AppointmentError::Database(msg) => AppError::Database(msg),
    }
}

fn parse_status(raw: &str) -> Result<AppointmentStatus, AppError> {
    raw.parse::<AppointmentStatus>().map_err(into_app_error)
}

/// One reference day per request, shared by every query the request runs.
fn reference_date() -> NaiveDate {
    Utc::now().date_naive()
}

// ==============================================================================
// CREATION AND LOOKUP HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn save_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<NewAppointment>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let saved = service.create(request).await.map_err(into_app_error)?;
    Ok(Json(saved))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let appointment = service
        .get_by_id(appointment_id)
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn get_all_appointments(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service.list_all().await.map_err(into_app_error)?;
    Ok(Json(appointments))
}

// ==============================================================================
// DOCTOR / PATIENT LISTING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_by_doctor(doctor_id)
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(state): State<Arc<AppConfig>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_by_patient(patient_id)
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments_by_status(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, status)): Path<(i64, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_by_doctor_and_status(doctor_id, status)
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_patient_appointments_by_status(
    State(state): State<Arc<AppConfig>>,
    Path((patient_id, status)): Path<(i64, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_by_patient_and_status(patient_id, status)
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_patient_appointments_by_type(
    State(state): State<Arc<AppConfig>>,
    Path((patient_id, appointment_type)): Path<(i64, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_by_patient_and_type(patient_id, &appointment_type)
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments_by_type(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, appointment_type)): Path<(i64, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_by_doctor_and_type(doctor_id, &appointment_type)
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

// ==============================================================================
// WINDOWED LISTING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn appointments_for_today(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_today(reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn upcoming_appointments(
    State(state): State<Arc<AppConfig>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_upcoming(status, reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn upcoming_appointments_for_doctor(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, status)): Path<(i64, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_upcoming_for_doctor(doctor_id, status, reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn upcoming_appointments_for_doctor_by_type(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, appointment_type, status)): Path<(i64, String, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_upcoming_for_doctor_by_type(doctor_id, &appointment_type, status, reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn today_appointments_for_doctor(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, status)): Path<(i64, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_today_for_doctor(doctor_id, status, reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn today_appointments_for_patient(
    State(state): State<Arc<AppConfig>>,
    Path((patient_id, status)): Path<(i64, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_today_for_patient(patient_id, status, reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn upcoming_appointments_for_patient(
    State(state): State<Arc<AppConfig>>,
    Path((patient_id, status)): Path<(i64, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_upcoming_for_patient(patient_id, status, reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn combined_upcoming_for_patient(
    State(state): State<Arc<AppConfig>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_combined_upcoming_for_patient(patient_id, reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn request_queue_for_doctor(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, status)): Path<(i64, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_request_queue(doctor_id, status, reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn appointment_times_for_slots(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<SlotTimesQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let appointments = service
        .list_booked_slots(query.doctor_id, query.date)
        .await
        .map_err(into_app_error)?;
    Ok(Json(appointments))
}

// ==============================================================================
// COUNT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn count_today_for_doctor(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, status)): Path<(i64, String)>,
) -> Result<Json<usize>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let count = service
        .count_today_for_doctor(doctor_id, status, reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(count))
}

#[axum::debug_handler]
pub async fn count_upcoming_for_doctor(
    State(state): State<Arc<AppConfig>>,
    Path((doctor_id, status)): Path<(i64, String)>,
) -> Result<Json<usize>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    let count = service
        .count_upcoming_for_doctor(doctor_id, status, reference_date())
        .await
        .map_err(into_app_error)?;
    Ok(Json(count))
}

// ==============================================================================
// MUTATION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppConfig>>,
    Path((appointment_id, status)): Path<(i64, String)>,
) -> Result<Json<Value>, AppError> {
    let status = parse_status(&status)?;
    let service = AppointmentSchedulingService::new(&state);
    service
        .update_status(appointment_id, status)
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment status updated"
    })))
}

#[axum::debug_handler]
pub async fn update_appointment_date_time(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<i64>,
    Json(request): Json<UpdateDateTimeRequest>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let updated = service
        .update_date_time(appointment_id, request.date, request.appointment_time)
        .await
        .map_err(into_app_error)?;
    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<i64>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    let updated = service
        .update_details(appointment_id, request)
        .await
        .map_err(into_app_error)?;
    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentSchedulingService::new(&state);
    service
        .delete(appointment_id)
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment deleted"
    })))
}
