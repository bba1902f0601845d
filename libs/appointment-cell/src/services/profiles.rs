// libs/appointment-cell/src/services/profiles.rs
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::models::{DoctorProfile, PatientProfile};

/// Resolves patient and doctor profiles from the API gateway. Every call is
/// bounded by the collaborator timeout so a slow gateway cannot pin request
/// workers; an unavailable profile degrades to `None` and never fails the
/// calling flow.
pub struct ProfileService {
    client: Client,
    base_url: String,
}

impl ProfileService {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.collaborator_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.api_gateway_url.clone(),
        }
    }

    pub async fn patient_profile(&self, patient_id: i64) -> Option<PatientProfile> {
        let url = format!("{}/patientProfile/byPatientId/{}", self.base_url, patient_id);
        match self.get_json::<PatientProfile>(&url).await {
            Ok(profile) => {
                debug!("Resolved patient profile {}", patient_id);
                Some(profile)
            }
            Err(e) => {
                warn!("Patient profile {} unavailable: {}", patient_id, e);
                None
            }
        }
    }

    pub async fn doctor_profile(&self, doctor_id: i64) -> Option<DoctorProfile> {
        let url = format!(
            "{}/api/doctors/addressprofileregistration/getdoctorprofile/{}",
            self.base_url, doctor_id
        );
        match self.get_json::<DoctorProfile>(&url).await {
            Ok(profile) => {
                debug!("Resolved doctor profile {}", doctor_id);
                Some(profile)
            }
            Err(e) => {
                warn!("Doctor profile {} unavailable: {}", doctor_id, e);
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        response.error_for_status()?.json::<T>().await
    }
}
