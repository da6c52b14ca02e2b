pub mod pda;
pub mod eligibility;
pub mod fee;
pub mod ledger;
pub mod payout;
pub mod signature;
pub mod token;

pub use pda::*;
pub use eligibility::*;
pub use fee::*;
pub use ledger::*;
pub use payout::*;
pub use signature::*;
pub use token::*;
