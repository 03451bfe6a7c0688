use chrono::Utc;
use roi_db_entity::db::investment_package::{
    Column as PackageColumn, Entity as InvestmentPackage,
};
use roi_db_entity::db::platform_user::{Column as UserColumn, Entity as PlatformUser};
use roi_db_entity::db::referral_commission::{
    self, ActiveModel as CommissionActiveModel, Entity as ReferralCommission,
};
use sea_orm::{
    prelude::Decimal, sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter,
};
use tracing::info;
use uuid::Uuid;

/// Walks the referral parent chain of a paid staker and credits profit
/// share to uplines at depths 2 through 6. The direct referrer (depth 1)
/// is resolved only to find where the walk starts; they are never paid
/// from a yield event.
pub async fn distribute_profit_share(
    db: &DatabaseConnection,
    user_id: &str,
    roi_amount: Decimal,
    staking_id: &str,
) -> Result<(), DbErr> {
    let staker = match PlatformUser::find_by_id(user_id.to_owned()).one(db).await? {
        Some(user) => user,
        None => return Ok(()),
    };
    let direct_referrer_id = match staker.referred_by {
        Some(ref id) => id.to_owned(),
        None => return Ok(()),
    };
    let direct_referrer = match PlatformUser::find_by_id(direct_referrer_id).one(db).await? {
        Some(user) => user,
        None => return Ok(()),
    };

    let mut current_ref = direct_referrer.referred_by;
    for level_depth in 2..=6u32 {
        let upline_id = match current_ref {
            Some(id) => id,
            None => break,
        };
        let upline = match PlatformUser::find_by_id(upline_id).one(db).await? {
            Some(user) => user,
            None => break,
        };

        let package = InvestmentPackage::find()
            .filter(PackageColumn::Level.eq(upline.level))
            .filter(PackageColumn::IsActive.eq(true))
            .one(db)
            .await?;

        // A missing or gated package skips this upline's payout but the
        // walk still continues to the next ancestor.
        if let Some(package) = package {
            if package.enabled_depths().contains(&level_depth) {
                let percentage = package.profit_share_percentage(level_depth);
                if percentage > Decimal::ZERO {
                    let amount = roi_amount * percentage / Decimal::from(100);
                    credit_upline(
                        db,
                        &upline.user_id,
                        &staker,
                        staking_id,
                        level_depth,
                        percentage,
                        amount,
                    )
                    .await?;
                    info!(
                        "Profit share L{}: {} to {} from stake {}",
                        level_depth, amount, upline.user_id, staking_id
                    );
                }
            }
        }

        current_ref = upline.referred_by;
    }

    Ok(())
}

async fn credit_upline(
    db: &DatabaseConnection,
    upline_id: &str,
    staker: &roi_db_entity::db::platform_user::Model,
    staking_id: &str,
    level_depth: u32,
    percentage: Decimal,
    amount: Decimal,
) -> Result<(), DbErr> {
    let commission = CommissionActiveModel {
        commission_id: ActiveValue::Set(Uuid::new_v4().to_string()),
        user_id: ActiveValue::Set(upline_id.to_owned()),
        from_user_id: ActiveValue::Set(staker.user_id.to_owned()),
        from_user_name: ActiveValue::Set(staker.full_name.to_owned()),
        staking_id: ActiveValue::Set(staking_id.to_owned()),
        commission_type: ActiveValue::Set(format!("PROFIT_SHARE_L{}", level_depth)),
        level_depth: ActiveValue::Set(level_depth as i16),
        percentage: ActiveValue::Set(percentage),
        amount: ActiveValue::Set(amount),
        source_type: ActiveValue::Set(referral_commission::SOURCE_ROI_PROFIT_SHARE.to_owned()),
        created_at: ActiveValue::Set(Utc::now().timestamp()),
    };
    ReferralCommission::insert(commission).exec(db).await?;

    PlatformUser::update_many()
        .col_expr(
            UserColumn::CommissionBalance,
            Expr::col(UserColumn::CommissionBalance).add(amount),
        )
        .col_expr(
            UserColumn::WalletBalance,
            Expr::col(UserColumn::WalletBalance).add(amount),
        )
        .filter(UserColumn::UserId.eq(upline_id.to_owned()))
        .exec(db)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roi_db_entity::db::{investment_package, platform_user};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn user(id: &str, referred_by: Option<&str>, level: i32) -> platform_user::Model {
        platform_user::Model {
            user_id: id.to_owned(),
            full_name: format!("User {}", id),
            email: None,
            referred_by: referred_by.map(|r| r.to_owned()),
            level,
            wallet_balance: Decimal::ZERO,
            roi_balance: Decimal::ZERO,
            commission_balance: Decimal::ZERO,
            staked_amount: Decimal::ZERO,
            last_roi_date: None,
        }
    }

    fn package(level: i32, levels_enabled: &str, depth_2_pct: Decimal) -> investment_package::Model {
        investment_package::Model {
            level,
            name: format!("Tier {}", level),
            is_active: true,
            levels_enabled: levels_enabled.to_owned(),
            profit_share_level_1: Decimal::ZERO,
            profit_share_level_2: depth_2_pct,
            profit_share_level_3: Decimal::ZERO,
            profit_share_level_4: Decimal::ZERO,
            profit_share_level_5: Decimal::ZERO,
            profit_share_level_6: Decimal::ZERO,
            commission_level_1: Decimal::ZERO,
            commission_level_2: Decimal::ZERO,
            commission_level_3: Decimal::ZERO,
            commission_level_4: Decimal::ZERO,
            commission_level_5: Decimal::ZERO,
            commission_level_6: Decimal::ZERO,
        }
    }

    fn commission_row(payee: &str, depth: i16, amount: Decimal) -> referral_commission::Model {
        referral_commission::Model {
            commission_id: "com-1".to_owned(),
            user_id: payee.to_owned(),
            from_user_id: "a".to_owned(),
            from_user_name: "User a".to_owned(),
            staking_id: "stk-1".to_owned(),
            commission_type: format!("PROFIT_SHARE_L{}", depth),
            level_depth: depth,
            percentage: Decimal::from(5),
            amount,
            source_type: referral_commission::SOURCE_ROI_PROFIT_SHARE.to_owned(),
            created_at: 0,
        }
    }

    // Mock results are consumed strictly in statement order, so a run that
    // completes with exactly the provisioned queues pins the sequence of
    // lookups and writes.

    #[tokio::test]
    async fn pays_depth_two_ancestor_only() {
        // a <- b <- c <- d: depth 1 = b (never paid), depth 2 = c.
        // Packages enable depth 2 at 5%; depth 3 (d) is gated out.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user("a", Some("b"), 1)]])
            .append_query_results(vec![vec![user("b", Some("c"), 1)]])
            .append_query_results(vec![vec![user("c", Some("d"), 1)]])
            .append_query_results(vec![vec![package(1, "2", Decimal::from(5))]])
            .append_query_results(vec![vec![commission_row("c", 2, Decimal::from(1))]])
            .append_query_results(vec![vec![user("d", None, 1)]])
            .append_query_results(vec![vec![package(1, "2", Decimal::from(5))]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        distribute_profit_share(&db, "a", Decimal::from(20), "stk-1")
            .await
            .unwrap();

        // 7 queries + 1 balance update and nothing else.
        assert_eq!(db.into_transaction_log().len(), 8);
    }

    #[tokio::test]
    async fn chain_shorter_than_depth_two_pays_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user("a", None, 1)]])
            .into_connection();

        distribute_profit_share(&db, "a", Decimal::from(20), "stk-1")
            .await
            .unwrap();

        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn broken_link_terminates_walk() {
        // b's referrer points at a user that no longer exists.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user("a", Some("b"), 1)]])
            .append_query_results(vec![vec![user("b", Some("ghost"), 1)]])
            .append_query_results(vec![Vec::<platform_user::Model>::new()])
            .into_connection();

        distribute_profit_share(&db, "a", Decimal::from(20), "stk-1")
            .await
            .unwrap();

        assert_eq!(db.into_transaction_log().len(), 3);
    }

    #[tokio::test]
    async fn missing_package_skips_payout_but_walk_continues() {
        // c has no active package; d's package pays depth 3.
        let mut d_package = package(1, "3", Decimal::ZERO);
        d_package.profit_share_level_3 = Decimal::from(4);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user("a", Some("b"), 1)]])
            .append_query_results(vec![vec![user("b", Some("c"), 1)]])
            .append_query_results(vec![vec![user("c", Some("d"), 2)]])
            .append_query_results(vec![Vec::<investment_package::Model>::new()])
            .append_query_results(vec![vec![user("d", None, 1)]])
            .append_query_results(vec![vec![d_package]])
            .append_query_results(vec![vec![commission_row("d", 3, Decimal::from(2))]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        distribute_profit_share(&db, "a", Decimal::from(50), "stk-1")
            .await
            .unwrap();

        assert_eq!(db.into_transaction_log().len(), 8);
    }

    #[tokio::test]
    async fn legacy_commission_percentage_is_honored() {
        let mut legacy_package = package(1, "2", Decimal::ZERO);
        legacy_package.commission_level_2 = Decimal::new(75, 1); // 7.5%
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user("a", Some("b"), 1)]])
            .append_query_results(vec![vec![user("b", Some("c"), 1)]])
            .append_query_results(vec![vec![user("c", None, 1)]])
            .append_query_results(vec![vec![legacy_package]])
            .append_query_results(vec![vec![commission_row("c", 2, Decimal::from(3))]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        distribute_profit_share(&db, "a", Decimal::from(40), "stk-1")
            .await
            .unwrap();

        assert_eq!(db.into_transaction_log().len(), 6);
    }

    #[tokio::test]
    async fn gated_depth_pays_nothing_even_with_percentage_set() {
        // Depth 2 has 5% configured but levels_enabled only lists depth 1.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user("a", Some("b"), 1)]])
            .append_query_results(vec![vec![user("b", Some("c"), 1)]])
            .append_query_results(vec![vec![user("c", None, 1)]])
            .append_query_results(vec![vec![package(1, "1", Decimal::from(5))]])
            .into_connection();

        distribute_profit_share(&db, "a", Decimal::from(20), "stk-1")
            .await
            .unwrap();

        assert_eq!(db.into_transaction_log().len(), 4);
    }
}
