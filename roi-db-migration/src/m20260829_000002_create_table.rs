use roi_db_entity::db::*;
use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260829_000002_create_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(investment_package::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(investment_package::Column::Level)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(investment_package::Column::Name).string().not_null())
                    .col(
                        ColumnDef::new(investment_package::Column::IsActive)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::LevelsEnabled)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::ProfitShareLevel1)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::ProfitShareLevel2)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::ProfitShareLevel3)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::ProfitShareLevel4)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::ProfitShareLevel5)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::ProfitShareLevel6)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::CommissionLevel1)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::CommissionLevel2)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::CommissionLevel3)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::CommissionLevel4)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::CommissionLevel5)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(investment_package::Column::CommissionLevel6)
                            .decimal()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(investment_package::Entity).to_owned())
            .await
    }
}
