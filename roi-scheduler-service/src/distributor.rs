use crate::dto::DailyRoiSummary;
use crate::profit_share;
use chrono::{DateTime, TimeZone, Utc};
use roi_db_entity::db::platform_user::{Column as UserColumn, Entity as PlatformUser};
use roi_db_entity::db::staking_position::{
    self, Column as StakeColumn, Entity as StakingPosition,
};
use roi_db_entity::db::wallet_transaction::{
    self, ActiveModel as WalletTransactionActiveModel, Entity as WalletTransaction,
};
use sea_orm::{
    prelude::Decimal, sea_query::Expr, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter,
};
use tracing::{info, warn};
use uuid::Uuid;

/// Pays one day of yield to every active staking position and fans profit
/// share out to each staker's upline. Yield is a flat percentage of the
/// original principal, never of the running balance.
pub async fn distribute_daily_roi(db: &DatabaseConnection) -> Result<DailyRoiSummary, DbErr> {
    info!("Starting daily ROI distribution");
    let active_stakes = StakingPosition::find()
        .filter(StakeColumn::Status.eq(staking_position::STATUS_ACTIVE))
        .all(db)
        .await?;

    let mut summary = DailyRoiSummary::default();
    let now = Utc::now();
    let now_ts = now.timestamp();
    let today_start = day_start_timestamp(now);

    for stake in active_stakes {
        if let Some(last_yield) = stake.last_yield_date {
            if last_yield >= today_start {
                summary.skipped_already_paid += 1;
                continue;
            }
        }
        if stake.daily_roi <= Decimal::ZERO {
            continue;
        }
        let roi_amount = stake.amount * stake.daily_roi / Decimal::from(100);

        match pay_stake(db, &stake, roi_amount, now_ts, today_start).await {
            Ok(true) => {
                summary.stakes_processed += 1;
                summary.total_distributed += roi_amount;
                if let Err(error) =
                    profit_share::distribute_profit_share(db, &stake.user_id, roi_amount, &stake.staking_id)
                        .await
                {
                    warn!(
                        "Profit share fan-out failed for stake {}: {:?}",
                        stake.staking_id, error
                    );
                    summary
                        .errors
                        .push(format!("profit share for stake {}: {}", stake.staking_id, error));
                }
            }
            Ok(false) => summary.skipped_already_paid += 1,
            Err(error) => {
                warn!("Error processing stake {}: {:?}", stake.staking_id, error);
                summary
                    .errors
                    .push(format!("stake {}: {}", stake.staking_id, error));
            }
        }
    }

    info!(
        "Daily ROI distribution completed: {} paid, {} total, {} skipped",
        summary.stakes_processed, summary.total_distributed, summary.skipped_already_paid
    );
    Ok(summary)
}

/// Claims today's yield for the stake before any money moves. The claim is
/// a conditional update keyed on `last_yield_date`, so two overlapping
/// distribution runs cannot both pay the same position on one UTC day.
async fn pay_stake(
    db: &DatabaseConnection,
    stake: &staking_position::Model,
    roi_amount: Decimal,
    now_ts: i64,
    today_start: i64,
) -> Result<bool, DbErr> {
    let claimed = StakingPosition::update_many()
        .col_expr(StakeColumn::LastYieldDate, Expr::value(now_ts))
        .col_expr(
            StakeColumn::TotalEarned,
            Expr::col(StakeColumn::TotalEarned).add(roi_amount),
        )
        .filter(StakeColumn::StakingId.eq(stake.staking_id.to_owned()))
        .filter(
            Condition::any()
                .add(StakeColumn::LastYieldDate.is_null())
                .add(StakeColumn::LastYieldDate.lt(today_start)),
        )
        .exec(db)
        .await?;
    if claimed.rows_affected == 0 {
        return Ok(false);
    }

    let transaction = WalletTransactionActiveModel {
        transaction_id: ActiveValue::Set(Uuid::new_v4().to_string()),
        user_id: ActiveValue::Set(stake.user_id.to_owned()),
        staking_id: ActiveValue::Set(stake.staking_id.to_owned()),
        transaction_type: ActiveValue::Set(wallet_transaction::TYPE_ROI.to_owned()),
        amount: ActiveValue::Set(roi_amount),
        roi_percentage: ActiveValue::Set(Some(stake.daily_roi)),
        description: ActiveValue::Set(Some("Daily ROI distribution".to_owned())),
        auto_distributed: ActiveValue::Set(true),
        created_at: ActiveValue::Set(now_ts),
    };
    WalletTransaction::insert(transaction).exec(db).await?;

    PlatformUser::update_many()
        .col_expr(
            UserColumn::RoiBalance,
            Expr::col(UserColumn::RoiBalance).add(roi_amount),
        )
        .col_expr(
            UserColumn::WalletBalance,
            Expr::col(UserColumn::WalletBalance).add(roi_amount),
        )
        .col_expr(UserColumn::LastRoiDate, Expr::value(now_ts))
        .filter(UserColumn::UserId.eq(stake.user_id.to_owned()))
        .exec(db)
        .await?;

    Ok(true)
}

pub fn day_start_timestamp(now: DateTime<Utc>) -> i64 {
    Utc.from_utc_datetime(&now.date_naive().and_hms_opt(0, 0, 0).unwrap())
        .timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roi_db_entity::db::platform_user;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn active_stake(last_yield_date: Option<i64>) -> staking_position::Model {
        staking_position::Model {
            staking_id: "stk-1".to_owned(),
            user_id: "usr-1".to_owned(),
            amount: Decimal::from(1000),
            daily_roi: Decimal::from(2),
            status: staking_position::STATUS_ACTIVE.to_owned(),
            capital_returned: false,
            last_yield_date,
            end_date: None,
            total_earned: Decimal::ZERO,
            created_at: 0,
            completed_at: None,
        }
    }

    fn owner_without_referrer() -> platform_user::Model {
        platform_user::Model {
            user_id: "usr-1".to_owned(),
            full_name: "Owner".to_owned(),
            email: None,
            referred_by: None,
            level: 1,
            wallet_balance: Decimal::ZERO,
            roi_balance: Decimal::ZERO,
            commission_balance: Decimal::ZERO,
            staked_amount: Decimal::from(1000),
            last_roi_date: None,
        }
    }

    fn roi_transaction_row() -> wallet_transaction::Model {
        wallet_transaction::Model {
            transaction_id: "txn-1".to_owned(),
            user_id: "usr-1".to_owned(),
            staking_id: "stk-1".to_owned(),
            transaction_type: wallet_transaction::TYPE_ROI.to_owned(),
            amount: Decimal::from(20),
            roi_percentage: Some(Decimal::from(2)),
            description: None,
            auto_distributed: true,
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn pays_yield_and_credits_owner() {
        let yesterday = Utc::now().timestamp() - 86_400;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![active_stake(Some(yesterday))]])
            .append_query_results(vec![vec![roi_transaction_row()]])
            .append_query_results(vec![vec![owner_without_referrer()]])
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let summary = distribute_daily_roi(&db).await.unwrap();
        assert_eq!(summary.stakes_processed, 1);
        assert_eq!(summary.total_distributed, Decimal::from(20));
        assert_eq!(summary.skipped_already_paid, 0);
        assert!(summary.errors.is_empty());
    }

    #[tokio::test]
    async fn skips_stake_already_paid_today() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![active_stake(Some(Utc::now().timestamp()))]])
            .into_connection();

        let summary = distribute_daily_roi(&db).await.unwrap();
        assert_eq!(summary.stakes_processed, 0);
        assert_eq!(summary.skipped_already_paid, 1);
        assert_eq!(summary.total_distributed, Decimal::ZERO);
    }

    #[tokio::test]
    async fn lost_claim_counts_as_skipped() {
        let yesterday = Utc::now().timestamp() - 86_400;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![active_stake(Some(yesterday))]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let summary = distribute_daily_roi(&db).await.unwrap();
        assert_eq!(summary.stakes_processed, 0);
        assert_eq!(summary.skipped_already_paid, 1);
    }

    #[tokio::test]
    async fn skips_zero_roi_stake() {
        let mut stake = active_stake(None);
        stake.daily_roi = Decimal::ZERO;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stake]])
            .into_connection();

        let summary = distribute_daily_roi(&db).await.unwrap();
        assert_eq!(summary.stakes_processed, 0);
        assert_eq!(summary.skipped_already_paid, 0);
        assert!(summary.errors.is_empty());
    }

    #[test]
    fn day_start_is_utc_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 15, 42, 7).unwrap();
        let start = day_start_timestamp(now);
        assert_eq!(
            start,
            Utc.with_ymd_and_hms(2026, 8, 29, 0, 0, 0).unwrap().timestamp()
        );
        assert!(now.timestamp() >= start);
    }
}
