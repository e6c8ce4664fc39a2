pub mod handlers;
pub mod router;
pub mod models;
pub mod services;
pub mod state;

pub use models::*;
pub use router::schedule_routes;
pub use services::*;
pub use state::ScheduleState;
