use sea_orm::prelude::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of one daily ROI distribution batch.
#[derive(Clone, Debug, Default)]
pub struct DailyRoiSummary {
    pub stakes_processed: u64,
    pub total_distributed: Decimal,
    pub skipped_already_paid: u64,
    pub errors: Vec<String>,
}

/// Outcome of one capital release batch. `already_had_transaction` counts
/// stakes another execution released first, which is a normal idempotency
/// outcome and not an error.
#[derive(Clone, Debug, Default)]
pub struct CapitalReleaseSummary {
    pub stakes_processed: u64,
    pub already_had_transaction: u64,
    pub total_returned: Decimal,
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SchedulerStatus {
    pub is_running: bool,
    pub last_run: Option<String>,
    pub next_run: Option<String>,
    pub schedule: String,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "serde")]
pub struct SlackNotificationData {
    pub channel: String,
    pub text: String,
}
