use roi_db_entity::db::*;
use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260829_000003_create_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(wallet_transaction::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(wallet_transaction::Column::TransactionId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(wallet_transaction::Column::UserId).string().not_null())
                    .col(
                        ColumnDef::new(wallet_transaction::Column::StakingId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(wallet_transaction::Column::TransactionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(wallet_transaction::Column::Amount).decimal().not_null())
                    .col(ColumnDef::new(wallet_transaction::Column::RoiPercentage).decimal())
                    .col(ColumnDef::new(wallet_transaction::Column::Description).string())
                    .col(
                        ColumnDef::new(wallet_transaction::Column::AutoDistributed)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(wallet_transaction::Column::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(referral_commission::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(referral_commission::Column::CommissionId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(referral_commission::Column::UserId).string().not_null())
                    .col(
                        ColumnDef::new(referral_commission::Column::FromUserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(referral_commission::Column::FromUserName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(referral_commission::Column::StakingId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(referral_commission::Column::CommissionType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(referral_commission::Column::LevelDepth)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(referral_commission::Column::Percentage)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(referral_commission::Column::Amount).decimal().not_null())
                    .col(
                        ColumnDef::new(referral_commission::Column::SourceType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(referral_commission::Column::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(referral_commission::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(wallet_transaction::Entity).to_owned())
            .await
    }
}
