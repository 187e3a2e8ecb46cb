//! Crawler lifecycle as seen by the dashboard
//!
//! # Components
//!
//! - `RunState`: the per-record state derived from the backend's pause and
//!   send-file flags
//! - `PauseAffordance`: which pause/resume control a record offers
//!
//! The dashboard never drives these transitions locally. It only decides
//! which actions to offer; the backend confirms every transition on the next
//! fetch.

mod run_state;

pub use run_state::{PauseAffordance, RunState};
