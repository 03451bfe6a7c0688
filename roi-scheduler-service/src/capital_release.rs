use crate::dto::CapitalReleaseSummary;
use chrono::Utc;
use roi_db_entity::db::platform_user::{Column as UserColumn, Entity as PlatformUser};
use roi_db_entity::db::staking_position::{
    self, Column as StakeColumn, Entity as StakingPosition,
};
use roi_db_entity::db::wallet_transaction::{
    self, ActiveModel as WalletTransactionActiveModel, Column as TransactionColumn,
    Entity as WalletTransaction,
};
use sea_orm::{
    prelude::Decimal, sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter,
};
use tracing::{info, warn};
use uuid::Uuid;

enum ReleaseOutcome {
    Released,
    AlreadyReleased,
}

/// Returns principal to the owner of every stake whose term has elapsed.
/// Safe to run from any number of concurrent callers: the conditional
/// `capital_returned` flip decides a single winner per stake, and an
/// existing `capital_return` transaction is treated as proof the money
/// already moved.
pub async fn process_expired_stakes(db: &DatabaseConnection) -> Result<CapitalReleaseSummary, DbErr> {
    info!("Processing expired stakes for capital return");
    let candidates = StakingPosition::find()
        .filter(StakeColumn::CapitalReturned.eq(false))
        .all(db)
        .await?;

    let mut summary = CapitalReleaseSummary::default();
    let now = Utc::now().timestamp();

    for stake in candidates {
        if stake.user_id.is_empty() || stake.amount <= Decimal::ZERO {
            continue;
        }
        let expired = matches!(stake.end_date, Some(end) if now >= end)
            || stake.status == staking_position::STATUS_COMPLETED;
        if !expired {
            continue;
        }

        match release_stake(db, &stake, now).await {
            Ok(ReleaseOutcome::Released) => {
                summary.stakes_processed += 1;
                summary.total_returned += stake.amount;
            }
            Ok(ReleaseOutcome::AlreadyReleased) => summary.already_had_transaction += 1,
            Err(error) => {
                warn!("Error releasing stake {}: {:?}", stake.staking_id, error);
                summary
                    .errors
                    .push(format!("stake {}: {}", stake.staking_id, error));
            }
        }
    }

    info!(
        "Capital release completed: {} released, {} already returned, {} total",
        summary.stakes_processed, summary.already_had_transaction, summary.total_returned
    );
    Ok(summary)
}

async fn release_stake(
    db: &DatabaseConnection,
    stake: &staking_position::Model,
    now: i64,
) -> Result<ReleaseOutcome, DbErr> {
    let witness = WalletTransaction::find()
        .filter(TransactionColumn::StakingId.eq(stake.staking_id.to_owned()))
        .filter(TransactionColumn::TransactionType.eq(wallet_transaction::TYPE_CAPITAL_RETURN))
        .one(db)
        .await?;
    if witness.is_some() {
        // Money already moved; repair the flags if an earlier run died
        // between the transaction insert and the status write.
        StakingPosition::update_many()
            .col_expr(
                StakeColumn::Status,
                Expr::value(staking_position::STATUS_COMPLETED),
            )
            .col_expr(StakeColumn::CapitalReturned, Expr::value(true))
            .filter(StakeColumn::StakingId.eq(stake.staking_id.to_owned()))
            .exec(db)
            .await?;
        return Ok(ReleaseOutcome::AlreadyReleased);
    }

    // Compare-and-set on capital_returned. Zero rows affected means a
    // concurrent execution won the race for this stake.
    let claimed = StakingPosition::update_many()
        .col_expr(
            StakeColumn::Status,
            Expr::value(staking_position::STATUS_COMPLETED),
        )
        .col_expr(StakeColumn::CapitalReturned, Expr::value(true))
        .col_expr(StakeColumn::CompletedAt, Expr::value(now))
        .filter(StakeColumn::StakingId.eq(stake.staking_id.to_owned()))
        .filter(StakeColumn::CapitalReturned.eq(false))
        .exec(db)
        .await?;
    if claimed.rows_affected == 0 {
        return Ok(ReleaseOutcome::AlreadyReleased);
    }

    let owner = PlatformUser::find_by_id(stake.user_id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "owner {} of stake {}",
                stake.user_id, stake.staking_id
            ))
        })?;
    let deduction = capital_deduction(stake.amount, owner.staked_amount);

    PlatformUser::update_many()
        .col_expr(
            UserColumn::WalletBalance,
            Expr::col(UserColumn::WalletBalance).add(stake.amount),
        )
        .col_expr(
            UserColumn::StakedAmount,
            Expr::col(UserColumn::StakedAmount).sub(deduction),
        )
        .filter(UserColumn::UserId.eq(stake.user_id.to_owned()))
        .exec(db)
        .await?;

    let transaction = WalletTransactionActiveModel {
        transaction_id: ActiveValue::Set(Uuid::new_v4().to_string()),
        user_id: ActiveValue::Set(stake.user_id.to_owned()),
        staking_id: ActiveValue::Set(stake.staking_id.to_owned()),
        transaction_type: ActiveValue::Set(wallet_transaction::TYPE_CAPITAL_RETURN.to_owned()),
        amount: ActiveValue::Set(stake.amount),
        roi_percentage: ActiveValue::Set(None),
        description: ActiveValue::Set(Some(
            "Staking package completed - Capital returned".to_owned(),
        )),
        auto_distributed: ActiveValue::Set(false),
        created_at: ActiveValue::Set(now),
    };
    WalletTransaction::insert(transaction).exec(db).await?;

    Ok(ReleaseOutcome::Released)
}

/// The staked-amount deduction is clamped so the owner's aggregate can
/// never go negative, whatever state the ledger is in.
fn capital_deduction(principal: Decimal, currently_staked: Decimal) -> Decimal {
    principal.min(currently_staked).max(Decimal::ZERO)
}
