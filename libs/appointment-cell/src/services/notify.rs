// libs/appointment-cell/src/services/notify.rs
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::models::{Appointment, AppointmentNotice};
use crate::services::profiles::ProfileService;

const CREATED_PATH: &str = "/emailService/appointmentEmail";
const DELETED_PATH: &str = "/emailService/deleteappointmentEmail";

/// Best-effort email dispatch through the gateway's email service. Nothing
/// here ever fails the calling operation: profile gaps leave notice fields
/// empty and delivery errors are logged and dropped.
pub struct NotificationService {
    client: Client,
    base_url: String,
    profiles: ProfileService,
}

impl NotificationService {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.collaborator_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.api_gateway_url.clone(),
            profiles: ProfileService::new(config),
        }
    }

    /// Detached creation notice. The caller's response never waits on or
    /// observes the spawned task.
    pub fn dispatch_created(self: &Arc<Self>, appointment: &Appointment) {
        let notifier = Arc::clone(self);
        let appointment = appointment.clone();
        tokio::spawn(async move { notifier.appointment_created(&appointment).await });
    }

    /// Detached deletion notice.
    pub fn dispatch_deleted(self: &Arc<Self>, appointment: &Appointment) {
        let notifier = Arc::clone(self);
        let appointment = appointment.clone();
        tokio::spawn(async move { notifier.appointment_deleted(&appointment).await });
    }

    pub async fn appointment_created(&self, appointment: &Appointment) {
        let notice = self.build_notice(appointment).await;
        self.post_notice(CREATED_PATH, &notice).await;
    }

    pub async fn appointment_deleted(&self, appointment: &Appointment) {
        let notice = self.build_notice(appointment).await;
        self.post_notice(DELETED_PATH, &notice).await;
    }

    async fn build_notice(&self, appointment: &Appointment) -> AppointmentNotice {
        let (patient, doctor) = tokio::join!(
            self.profiles.patient_profile(appointment.patient_id),
            self.profiles.doctor_profile(appointment.doctor_id),
        );

        let mut notice = AppointmentNotice::from_appointment(appointment);
        if let Some(doctor) = doctor {
            if let (Some(first), Some(last)) = (&doctor.first_name, &doctor.last_name) {
                notice.doctor_name = format!("{} {}", first, last);
            }
            notice.contact = doctor.contact;
            notice.doctor_email = doctor.email;
        }
        if let Some(patient) = patient {
            notice.patient_email = patient.email_id;
        }

        notice
    }

    async fn post_notice(&self, path: &str, notice: &AppointmentNotice) {
        let url = format!("{}{}", self.base_url, path);
        match self.client.post(&url).json(notice).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Notification for appointment {} delivered to {}", notice.appointment_id, path);
            }
            Ok(response) => {
                warn!(
                    "Notification for appointment {} rejected with status {}",
                    notice.appointment_id,
                    response.status()
                );
            }
            Err(e) => {
                warn!("Notification for appointment {} failed: {}", notice.appointment_id, e);
            }
        }
    }
}
