pub mod test_eligibility;
pub mod test_nonce;
pub mod test_payout;
pub mod test_registry;
pub mod test_signature;

use anchor_lang::error::Error;
use crate::error::RewardPoolError;

/// Error code carried by a program error, for comparing against RewardPoolError
pub fn error_code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        other => panic!("unexpected non-anchor error: {:?}", other),
    }
}

pub fn expect_error<T: std::fmt::Debug>(result: anchor_lang::Result<T>, expected: RewardPoolError) {
    let name = format!("{:?}", expected);
    let err = result.expect_err("operation should fail");
    assert_eq!(error_code(err), error_code(expected.into()), "expected {}", name);
}
