use sea_orm::entity::prelude::*;
use sea_orm::prelude::Decimal;

pub const TYPE_ROI: &str = "roi";
pub const TYPE_CAPITAL_RETURN: &str = "capital_return";

/// Append-only ledger of balance-affecting events. A `capital_return` row
/// for a staking id doubles as the durable witness that the principal of
/// that position has already been released.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wallet_transaction", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub transaction_id: String,
    pub user_id: String,
    pub staking_id: String,
    pub transaction_type: String,
    pub amount: Decimal,
    pub roi_percentage: Option<Decimal>,
    pub description: Option<String>,
    pub auto_distributed: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
