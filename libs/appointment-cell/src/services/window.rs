// libs/appointment-cell/src/services/window.rs
use chrono::NaiveDate;
use std::cmp::Ordering;

use crate::models::{AppointmentStatus, DateWindow, WindowQuery};

/// Where an appointment day falls relative to the reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    Past,
    Today,
    Future,
}

/// Builds the date-window queries the store executes. The reference day is
/// always supplied by the caller, resolved once per request, so a request
/// spanning several queries sees a single notion of "now". This service
/// never touches the store.
pub struct TimeWindowService;

impl TimeWindowService {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, date: NaiveDate, reference: NaiveDate) -> DayClass {
        match date.cmp(&reference) {
            Ordering::Less => DayClass::Past,
            Ordering::Equal => DayClass::Today,
            Ordering::Greater => DayClass::Future,
        }
    }

    /// Appointments on the reference day.
    pub fn today(&self, reference: NaiveDate) -> WindowQuery {
        WindowQuery::new(DateWindow::On(reference))
    }

    /// Appointments strictly after the reference day. Doctor-facing
    /// "upcoming" views use this exclusive window; callers wanting today as
    /// well combine it with `today()`.
    pub fn upcoming(&self, reference: NaiveDate) -> WindowQuery {
        WindowQuery::new(DateWindow::After(reference))
    }

    /// A doctor's actionable queue: today and upcoming appointments in the
    /// given status. Returned in execution order, upcoming before today.
    pub fn request_queue(
        &self,
        reference: NaiveDate,
        doctor_id: i64,
        status: AppointmentStatus,
    ) -> [WindowQuery; 2] {
        [
            self.upcoming(reference).for_doctor(doctor_id).with_status(status),
            self.today(reference).for_doctor(doctor_id).with_status(status),
        ]
    }

    /// The patient-facing "upcoming" view, which includes today. This is
    /// deliberately wider than the doctor-facing exclusive window; callers
    /// that want only strictly-future appointments must use `upcoming()`.
    /// Execution order matches `request_queue`: upcoming first, then today.
    pub fn patient_combined_upcoming(
        &self,
        reference: NaiveDate,
        patient_id: i64,
    ) -> [WindowQuery; 2] {
        [
            self.upcoming(reference).for_patient(patient_id),
            self.today(reference).for_patient(patient_id),
        ]
    }
}

impl Default for TimeWindowService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn classifies_relative_to_reference() {
        let windows = TimeWindowService::new();
        assert_eq!(windows.classify(day(1), day(2)), DayClass::Past);
        assert_eq!(windows.classify(day(2), day(2)), DayClass::Today);
        assert_eq!(windows.classify(day(3), day(2)), DayClass::Future);
    }

    #[test]
    fn today_window_is_exact_day() {
        let query = TimeWindowService::new().today(day(2));
        assert_eq!(query.window, DateWindow::On(day(2)));
        assert_eq!(query.doctor_id, None);
        assert_eq!(query.status, None);
    }

    #[test]
    fn upcoming_window_excludes_reference_day() {
        let query = TimeWindowService::new().upcoming(day(2));
        assert_eq!(query.window, DateWindow::After(day(2)));
    }

    #[test]
    fn request_queue_runs_upcoming_before_today() {
        let [first, second] =
            TimeWindowService::new().request_queue(day(2), 7, AppointmentStatus::NotAccepted);

        assert_eq!(first.window, DateWindow::After(day(2)));
        assert_eq!(second.window, DateWindow::On(day(2)));
        for query in [&first, &second] {
            assert_eq!(query.doctor_id, Some(7));
            assert_eq!(query.status, Some(AppointmentStatus::NotAccepted));
            assert_eq!(query.patient_id, None);
        }
    }

    #[test]
    fn patient_combined_upcoming_includes_today() {
        let [first, second] = TimeWindowService::new().patient_combined_upcoming(day(2), 3);

        assert_eq!(first.window, DateWindow::After(day(2)));
        assert_eq!(second.window, DateWindow::On(day(2)));
        for query in [&first, &second] {
            assert_eq!(query.patient_id, Some(3));
            assert_eq!(query.doctor_id, None);
            assert_eq!(query.status, None);
        }
    }
}
