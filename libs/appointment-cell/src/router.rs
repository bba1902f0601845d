// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        // Creation and direct lookups
        .route("/saveappointment", post(handlers::save_appointment))
        .route("/getAppointment/{appointment_id}", get(handlers::get_appointment))
        .route("/getAllAppointments", get(handlers::get_all_appointments))
        // Doctor / patient listings
        .route("/doctor/{doctor_id}", get(handlers::get_doctor_appointments))
        .route("/patient/{patient_id}", get(handlers::get_patient_appointments))
        .route(
            "/doctor/{doctor_id}/status/{status}",
            get(handlers::get_doctor_appointments_by_status),
        )
        .route(
            "/patient/{patient_id}/status/{status}",
            get(handlers::get_patient_appointments_by_status),
        )
        .route(
            "/patient/{patient_id}/type/{appointment_type}",
            get(handlers::get_patient_appointments_by_type),
        )
        .route(
            "/doctor/{doctor_id}/type/{appointment_type}",
            get(handlers::get_doctor_appointments_by_type),
        )
        // Windowed listings
        .route("/appointments-for-today", get(handlers::appointments_for_today))
        .route("/upcoming/{status}", get(handlers::upcoming_appointments))
        .route(
            "/upcoming-appointments/doctor/{doctor_id}/status/{status}",
            get(handlers::upcoming_appointments_for_doctor),
        )
        .route(
            "/upcoming-appointments/doctor/{doctor_id}/type/{appointment_type}/status/{status}",
            get(handlers::upcoming_appointments_for_doctor_by_type),
        )
        .route(
            "/appointments-for-today/doctor/{doctor_id}/status/{status}",
            get(handlers::today_appointments_for_doctor),
        )
        .route(
            "/appointments-for-today/patient/{patient_id}/status/{status}",
            get(handlers::today_appointments_for_patient),
        )
        .route(
            "/upcoming-appointments/patient/{patient_id}/status/{status}",
            get(handlers::upcoming_appointments_for_patient),
        )
        .route(
            "/upcoming-for-patients-all/{patient_id}",
            get(handlers::combined_upcoming_for_patient),
        )
        .route(
            "/requests/doctor/{doctor_id}/status/{status}",
            get(handlers::request_queue_for_doctor),
        )
        .route("/appointment-times-for-slots", get(handlers::appointment_times_for_slots))
        // Counts
        .route(
            "/count/doctor/{doctor_id}/status/{status}",
            get(handlers::count_today_for_doctor),
        )
        .route(
            "/count/upcoming/doctor/{doctor_id}/status/{status}",
            get(handlers::count_upcoming_for_doctor),
        )
        // Mutations
        .route(
            "/updateappointment/{appointment_id}/update/{status}",
            put(handlers::update_appointment_status),
        )
        .route(
            "/update-date-time/{appointment_id}",
            put(handlers::update_appointment_date_time),
        )
        .route(
            "/update-appointment/{appointment_id}",
            put(handlers::update_appointment),
        )
        .route(
            "/delete-appointment/{appointment_id}",
            delete(handlers::delete_appointment),
        )
        .with_state(state)
}
