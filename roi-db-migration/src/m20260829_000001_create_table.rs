use roi_db_entity::db::*;
use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260829_000001_create_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(platform_user::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(platform_user::Column::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(platform_user::Column::FullName).string().not_null())
                    .col(ColumnDef::new(platform_user::Column::Email).string())
                    .col(ColumnDef::new(platform_user::Column::ReferredBy).string())
                    .col(ColumnDef::new(platform_user::Column::Level).integer().not_null())
                    .col(
                        ColumnDef::new(platform_user::Column::WalletBalance)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(platform_user::Column::RoiBalance).decimal().not_null())
                    .col(
                        ColumnDef::new(platform_user::Column::CommissionBalance)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(platform_user::Column::StakedAmount)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(platform_user::Column::LastRoiDate).big_integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(staking_position::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(staking_position::Column::StakingId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(staking_position::Column::UserId).string().not_null())
                    .col(ColumnDef::new(staking_position::Column::Amount).decimal().not_null())
                    .col(
                        ColumnDef::new(staking_position::Column::DailyRoi)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(staking_position::Column::Status).string().not_null())
                    .col(
                        ColumnDef::new(staking_position::Column::CapitalReturned)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(staking_position::Column::LastYieldDate).big_integer())
                    .col(ColumnDef::new(staking_position::Column::EndDate).big_integer())
                    .col(
                        ColumnDef::new(staking_position::Column::TotalEarned)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(staking_position::Column::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(staking_position::Column::CompletedAt).big_integer())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(staking_position::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(platform_user::Entity).to_owned())
            .await
    }
}
