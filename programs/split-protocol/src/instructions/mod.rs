pub mod claim_common;
pub mod claim_for_all_windows_v0;
pub mod claim_token_for_all_v0;
pub mod claim_v0;
pub mod create_split_v0;
pub mod increment_then_claim_all_v0;
pub mod increment_window_v0;
pub mod swap_owner_v0;

pub use claim_for_all_windows_v0::*;
pub use claim_token_for_all_v0::*;
pub use claim_v0::*;
pub use create_split_v0::*;
pub use increment_then_claim_all_v0::*;
pub use increment_window_v0::*;
pub use swap_owner_v0::*;
