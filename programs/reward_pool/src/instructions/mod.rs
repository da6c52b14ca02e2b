pub mod initialize_factory;
pub mod create_pool;
pub mod open_token_vault;
pub mod xp_allocation;
pub mod creator_allocation;
pub mod batch_allocation;
pub mod pool_status;
pub mod take_snapshot;
pub mod signer_roles;
pub mod claim_reward;
pub mod emergency_withdraw;
pub mod update_fee_recipient;
pub mod views;

pub use initialize_factory::*;
pub use create_pool::*;
pub use open_token_vault::*;
pub use xp_allocation::*;
pub use creator_allocation::*;
pub use batch_allocation::*;
pub use pool_status::*;
pub use take_snapshot::*;
pub use signer_roles::*;
pub use claim_reward::*;
pub use emergency_withdraw::*;
pub use update_fee_recipient::*;
pub use views::*;
