use crate::config::Config;
use crate::dto::{CapitalReleaseSummary, DailyRoiSummary, SlackNotificationData};
use tracing::{info, warn};

/// Best-effort webhook post of the day's distribution outcome. Failures
/// are logged and swallowed; the financial mutations have already been
/// committed by the time this runs.
pub async fn post_distribution_summary(
    config: &Config,
    client: &reqwest::Client,
    daily: Option<&DailyRoiSummary>,
    release: Option<&CapitalReleaseSummary>,
) {
    let (webhook_url, channel_id) = match (&config.slack_webhook_url, &config.slack_channel_id) {
        (Some(url), Some(channel)) => (url, channel),
        _ => {
            warn!("Notification enabled but webhook url/channel missing in config");
            return;
        }
    };

    let text = summary_text(daily, release);
    let serialized_data = match serde_json::to_string(&SlackNotificationData {
        channel: channel_id.to_owned(),
        text,
    }) {
        Ok(json) => json,
        Err(error) => {
            warn!("Error serializing notification payload: {}", error);
            return;
        }
    };

    let response = client
        .post(webhook_url)
        .header("content-type", "application/json")
        .body(serialized_data)
        .send()
        .await;
    match response {
        Ok(resp) => match resp.status() {
            reqwest::StatusCode::OK => {
                info!("Posted distribution summary to channel {}", channel_id)
            }
            status => warn!("Notification webhook returned {}", status),
        },
        Err(error) => warn!("Notification webhook failed: {:?}", error),
    }
}

fn summary_text(
    daily: Option<&DailyRoiSummary>,
    release: Option<&CapitalReleaseSummary>,
) -> String {
    let mut lines: Vec<String> = vec![];
    match daily {
        Some(summary) => {
            lines.push(format!(
                "ROI: {} stakes paid, {} distributed, {} skipped",
                summary.stakes_processed, summary.total_distributed, summary.skipped_already_paid
            ));
            if !summary.errors.is_empty() {
                lines.push(format!("ROI errors: {}", summary.errors.len()));
            }
        }
        None => lines.push("ROI distribution unavailable".to_owned()),
    }
    match release {
        Some(summary) => {
            lines.push(format!(
                "Capital: {} stakes released, {} returned, {} already returned",
                summary.stakes_processed, summary.total_returned, summary.already_had_transaction
            ));
            if !summary.errors.is_empty() {
                lines.push(format!("Capital errors: {}", summary.errors.len()));
            }
        }
        None => lines.push("Capital release unavailable".to_owned()),
    }
    lines.join("\n")
}
