//! HTTP API handlers for rollcall-web

pub mod attendance;
pub mod error;
pub mod health;
pub mod report;
pub mod roster;
pub mod upload;

pub use attendance::save_attendance;
pub use error::ApiError;
pub use health::health_routes;
pub use report::attendance_report;
pub use roster::roster_view;
pub use upload::{upload_form, upload_roster};
