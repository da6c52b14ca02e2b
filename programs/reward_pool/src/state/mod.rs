pub mod factory_state;
pub mod pool_state;
pub mod medium_state;
pub mod allocation_state;
pub mod claim_state;
pub mod nonce_state;
pub mod signer_state;
pub mod registry_state;

pub use factory_state::*;
pub use pool_state::*;
pub use medium_state::*;
pub use allocation_state::*;
pub use claim_state::*;
pub use nonce_state::*;
pub use signer_state::*;
pub use registry_state::*;
