pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

// Re-export the core types for external use
pub use models::{
    Appointment, AppointmentError, AppointmentStatus, DateWindow, NewAppointment,
    UpdateAppointmentRequest, WindowQuery,
};
pub use store::AppointmentStore;
