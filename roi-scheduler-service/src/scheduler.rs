use crate::config::Config;
use crate::dto::{CapitalReleaseSummary, DailyRoiSummary, SchedulerStatus};
use crate::{capital_release, distributor, notify};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::{
    task,
    time::{sleep, Duration},
};
use tracing::{error, info};

/// Wall-clock state of the scheduled daily distribution. Never persisted:
/// a restart recomputes `next_run` from the clock instead of resuming a
/// stale schedule.
#[derive(Debug)]
pub struct SchedulerState {
    pub last_run: Option<DateTime<Utc>>,
    pub next_run: Option<DateTime<Utc>>,
    pub run_hour: u32,
    pub run_minute: u32,
    pub has_run_today: bool,
    last_observed_date: Option<NaiveDate>,
}

impl SchedulerState {
    fn new(run_hour: u32, run_minute: u32) -> Self {
        SchedulerState {
            last_run: None,
            next_run: None,
            run_hour,
            run_minute,
            has_run_today: false,
            last_observed_date: None,
        }
    }

    /// One daily-loop tick. Resets `has_run_today` on a UTC date change,
    /// and claims the run (returns true at most once per day) when
    /// `next_run` has passed.
    fn due(&mut self, now: DateTime<Utc>) -> bool {
        let today = now.date_naive();
        if self.last_observed_date != Some(today) {
            self.has_run_today = false;
            self.last_observed_date = Some(today);
        }
        match self.next_run {
            Some(next_run) if now >= next_run && !self.has_run_today => {
                self.has_run_today = true;
                self.last_run = Some(now);
                true
            }
            _ => false,
        }
    }

    fn reschedule(&mut self, now: DateTime<Utc>) {
        self.next_run = Some(calculate_next_run(now, self.run_hour, self.run_minute));
    }
}

/// Owns the periodic distribution tasks. Constructed once at process start
/// and handed to whatever triggers start/stop; there is no global instance.
pub struct Scheduler {
    db: DatabaseConnection,
    client: reqwest::Client,
    config: Arc<Config>,
    running: Arc<AtomicBool>,
    state: Arc<Mutex<SchedulerState>>,
    daily_tick: Duration,
    release_tick: Duration,
}

impl Scheduler {
    pub fn new(db: DatabaseConnection, client: reqwest::Client, config: Arc<Config>) -> Self {
        let run_hour = config.roi_run_hour.unwrap_or(0);
        let run_minute = config.roi_run_minute.unwrap_or(0);
        let daily_tick = Duration::from_secs(config.daily_tick_secs.unwrap_or(60));
        let release_tick = Duration::from_secs(config.release_tick_secs.unwrap_or(300));
        Scheduler {
            db,
            client,
            config,
            running: Arc::new(AtomicBool::new(false)),
            state: Arc::new(Mutex::new(SchedulerState::new(run_hour, run_minute))),
            daily_tick,
            release_tick,
        }
    }

    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let (run_hour, run_minute) = {
            let mut state = self.state.lock().unwrap();
            state.reschedule(Utc::now());
            (state.run_hour, state.run_minute)
        };
        info!(
            "Scheduler started. Daily distribution at {:02}:{:02} UTC",
            run_hour, run_minute
        );

        task::spawn(daily_loop(
            self.db.clone(),
            self.client.clone(),
            self.config.clone(),
            self.running.clone(),
            self.state.clone(),
            self.daily_tick,
        ));
        task::spawn(release_loop(
            self.db.clone(),
            self.running.clone(),
            self.release_tick,
        ));
    }

    /// Clears the running flag; each loop observes it at its next wake-up.
    /// In-flight store operations are allowed to finish.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        info!("Scheduler stopped");
    }

    pub fn set_schedule(&self, hour: u32, minute: u32) {
        let mut state = self.state.lock().unwrap();
        state.run_hour = hour;
        state.run_minute = minute;
        state.reschedule(Utc::now());
        info!("Schedule updated to {:02}:{:02} UTC", hour, minute);
    }

    pub fn get_status(&self) -> SchedulerStatus {
        let state = self.state.lock().unwrap();
        SchedulerStatus {
            is_running: self.running.load(Ordering::SeqCst),
            last_run: state.last_run.map(|run| run.to_rfc3339()),
            next_run: state.next_run.map(|run| run.to_rfc3339()),
            schedule: format!("{:02}:{:02} UTC", state.run_hour, state.run_minute),
        }
    }

    /// Administrative trigger; same claim-based idempotency as the
    /// scheduled run, so firing it alongside the timer is harmless.
    pub async fn distribute_daily_roi(&self) -> Result<DailyRoiSummary, DbErr> {
        let summary = distributor::distribute_daily_roi(&self.db).await?;
        let mut state = self.state.lock().unwrap();
        state.last_run = Some(Utc::now());
        state.reschedule(Utc::now());
        Ok(summary)
    }

    pub async fn process_expired_stakes(&self) -> Result<CapitalReleaseSummary, DbErr> {
        capital_release::process_expired_stakes(&self.db).await
    }
}

/// Today at hour:minute UTC, rolled to tomorrow when already past.
pub fn calculate_next_run(now: DateTime<Utc>, hour: u32, minute: u32) -> DateTime<Utc> {
    let mut target = Utc
        .with_ymd_and_hms(now.year(), now.month(), now.day(), hour, minute, 0)
        .unwrap();
    if target <= now {
        target = target
            .checked_add_signed(chrono::Duration::days(1))
            .unwrap();
    }
    target
}

async fn daily_loop(
    db: DatabaseConnection,
    client: reqwest::Client,
    config: Arc<Config>,
    running: Arc<AtomicBool>,
    state: Arc<Mutex<SchedulerState>>,
    tick: Duration,
) {
    info!("Daily distribution loop started");
    while running.load(Ordering::SeqCst) {
        let now = Utc::now();
        let due = state.lock().unwrap().due(now);
        if due {
            info!("Scheduled daily distribution triggered");
            let daily = match distributor::distribute_daily_roi(&db).await {
                Ok(summary) => Some(summary),
                Err(db_error) => {
                    error!("Daily ROI distribution failed: {:?}", db_error);
                    None
                }
            };
            let release = match capital_release::process_expired_stakes(&db).await {
                Ok(summary) => Some(summary),
                Err(db_error) => {
                    error!("Capital release failed: {:?}", db_error);
                    None
                }
            };
            if config.slack_notification {
                notify::post_distribution_summary(&config, &client, daily.as_ref(), release.as_ref())
                    .await;
            }
            state.lock().unwrap().reschedule(Utc::now());
        }
        sleep(tick).await;
    }
    info!("Daily distribution loop stopped");
}

/// Safety net: returns principal promptly between daily ticks, and covers
/// a daily loop that crashed before reaching the release step.
async fn release_loop(db: DatabaseConnection, running: Arc<AtomicBool>, tick: Duration) {
    info!("Capital release loop started");
    while running.load(Ordering::SeqCst) {
        match capital_release::process_expired_stakes(&db).await {
            Ok(summary) => {
                if summary.stakes_processed > 0 {
                    info!(
                        "Capital release: {} stakes processed",
                        summary.stakes_processed
                    );
                }
            }
            Err(db_error) => error!("Error in capital release loop: {:?}", db_error),
        }
        sleep(tick).await;
    }
    info!("Capital release loop stopped");
}
