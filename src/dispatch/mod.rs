//! Notification dispatch: validation, token resolution, provider invocation
//! and outcome mapping.

mod dispatcher;
mod types;

pub use dispatcher::{DispatchService, DispatchStats, DispatchStatsSnapshot};
pub use types::{
    DispatchError, DispatchOutcome, DispatchResult, NotificationIntent, NotificationTarget,
};
