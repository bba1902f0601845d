// libs/appointment-cell/src/store/supabase.rs
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use shared_database::{DbError, SupabaseClient};

use crate::models::{Appointment, AppointmentStatus, DateWindow, NewAppointment, WindowQuery};
use crate::store::AppointmentStore;

const APPOINTMENTS: &str = "/rest/v1/appointments";
const ORDER: &str = "order=date.asc,appointment_time.asc";

pub struct SupabaseAppointmentStore {
    client: Arc<SupabaseClient>,
}

impl SupabaseAppointmentStore {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    fn representation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }

    fn status_filter(status: AppointmentStatus) -> String {
        format!("status=eq.{}", urlencoding::encode(&status.to_string()))
    }

    fn type_filter(appointment_type: &str) -> String {
        format!("type=eq.{}", urlencoding::encode(appointment_type))
    }

    fn window_filters(query: &WindowQuery) -> Vec<String> {
        let mut parts = Vec::new();

        match query.window {
            DateWindow::On(day) => parts.push(format!("date=eq.{}", day)),
            DateWindow::After(day) => parts.push(format!("date=gt.{}", day)),
        }
        if let Some(doctor_id) = query.doctor_id {
            parts.push(format!("doctor_id=eq.{}", doctor_id));
        }
        if let Some(patient_id) = query.patient_id {
            parts.push(format!("patient_id=eq.{}", patient_id));
        }
        if let Some(status) = query.status {
            parts.push(Self::status_filter(status));
        }
        if let Some(ref appointment_type) = query.appointment_type {
            parts.push(Self::type_filter(appointment_type));
        }

        parts
    }

    async fn fetch(&self, filters: &[String]) -> Result<Vec<Appointment>, DbError> {
        let mut parts = filters.to_vec();
        parts.push(ORDER.to_string());
        let path = format!("{}?{}", APPOINTMENTS, parts.join("&"));
        self.client.request(Method::GET, &path, None).await
    }
}

#[async_trait]
impl AppointmentStore for SupabaseAppointmentStore {
    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, DbError> {
        debug!(
            "Inserting appointment for doctor {} on {} at {}",
            appointment.doctor_id, appointment.date, appointment.appointment_time
        );

        let body = serde_json::to_value(&appointment).map_err(|e| DbError::Decode(e.to_string()))?;

        let mut rows: Vec<Appointment> = self
            .client
            .request_with_headers(
                Method::POST,
                APPOINTMENTS,
                Some(body),
                Some(Self::representation_headers()),
            )
            .await?;

        rows.pop().ok_or_else(|| DbError::Decode("insert returned no row".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, DbError> {
        let path = format!("{}?id=eq.{}", APPOINTMENTS, id);
        let rows: Vec<Appointment> = self.client.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn find_all(&self) -> Result<Vec<Appointment>, DbError> {
        self.fetch(&[]).await
    }

    async fn update(&self, appointment: &Appointment) -> Result<Appointment, DbError> {
        let path = format!("{}?id=eq.{}", APPOINTMENTS, appointment.id);
        let mut body = serde_json::to_value(appointment).map_err(|e| DbError::Decode(e.to_string()))?;
        // The identity column is never rewritten; the row is addressed by
        // the filter alone.
        if let Some(fields) = body.as_object_mut() {
            fields.remove("id");
        }

        let mut rows: Vec<Appointment> = self
            .client
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(body),
                Some(Self::representation_headers()),
            )
            .await?;

        rows.pop().ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let path = format!("{}?id=eq.{}", APPOINTMENTS, id);
        let _rows: Vec<Value> = self
            .client
            .request_with_headers(Method::DELETE, &path, None, Some(Self::representation_headers()))
            .await?;
        Ok(())
    }

    async fn find_by_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, DbError> {
        self.fetch(&[format!("patient_id=eq.{}", patient_id)]).await
    }

    async fn find_by_doctor(&self, doctor_id: i64) -> Result<Vec<Appointment>, DbError> {
        self.fetch(&[format!("doctor_id=eq.{}", doctor_id)]).await
    }

    async fn find_by_doctor_and_status(
        &self,
        doctor_id: i64,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, DbError> {
        self.fetch(&[format!("doctor_id=eq.{}", doctor_id), Self::status_filter(status)])
            .await
    }

    async fn find_by_patient_and_status(
        &self,
        patient_id: i64,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, DbError> {
        self.fetch(&[format!("patient_id=eq.{}", patient_id), Self::status_filter(status)])
            .await
    }

    async fn find_by_patient_and_type(
        &self,
        patient_id: i64,
        appointment_type: &str,
    ) -> Result<Vec<Appointment>, DbError> {
        self.fetch(&[
            format!("patient_id=eq.{}", patient_id),
            Self::type_filter(appointment_type),
        ])
        .await
    }

    async fn find_by_doctor_and_type(
        &self,
        doctor_id: i64,
        appointment_type: &str,
    ) -> Result<Vec<Appointment>, DbError> {
        self.fetch(&[
            format!("doctor_id=eq.{}", doctor_id),
            Self::type_filter(appointment_type),
        ])
        .await
    }

    async fn find_by_doctor_and_date(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, DbError> {
        self.fetch(&[format!("doctor_id=eq.{}", doctor_id), format!("date=eq.{}", date)])
            .await
    }

    async fn find_in_window(&self, query: &WindowQuery) -> Result<Vec<Appointment>, DbError> {
        self.fetch(&Self::window_filters(query)).await
    }

    async fn exists_slot(
        &self,
        doctor_id: i64,
        appointment_time: NaiveTime,
        date: NaiveDate,
    ) -> Result<bool, DbError> {
        let path = format!(
            "{}?doctor_id=eq.{}&appointment_time=eq.{}&date=eq.{}&select=id&limit=1",
            APPOINTMENTS,
            doctor_id,
            urlencoding::encode(&appointment_time.format("%H:%M:%S").to_string()),
            date,
        );

        let rows: Vec<Value> = self.client.request(Method::GET, &path, None).await?;
        Ok(!rows.is_empty())
    }
}
