use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "platform_user", schema_name = "public")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub full_name: String,
    pub email: Option<String>,
    /// Weak reference to the referring user, none for root accounts.
    pub referred_by: Option<String>,
    pub level: i32,
    pub wallet_balance: Decimal,
    pub roi_balance: Decimal,
    pub commission_balance: Decimal,
    pub staked_amount: Decimal,
    pub last_roi_date: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
