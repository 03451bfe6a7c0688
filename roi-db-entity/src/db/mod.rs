pub mod investment_package;
pub mod platform_user;
pub mod referral_commission;
pub mod staking_position;
pub mod wallet_transaction;
