use sea_orm::entity::prelude::*;
use sea_orm::prelude::Decimal;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staking_position", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub staking_id: String,
    pub user_id: String,
    /// Original locked principal; daily yield is computed from this,
    /// never from the running balance.
    pub amount: Decimal,
    /// Daily yield percentage, e.g. 2 for 2% per day.
    pub daily_roi: Decimal,
    pub status: String,
    pub capital_returned: bool,
    pub last_yield_date: Option<i64>,
    pub end_date: Option<i64>,
    pub total_earned: Decimal,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
