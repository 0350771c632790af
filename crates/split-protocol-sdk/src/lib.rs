mod address_finder;
mod error;
mod instruction_builders;
mod serde_helpers;
mod share_preview;
mod split_compiler;

pub use address_finder::AddressFinder;
pub use error::{SdkError, SdkResult};
pub use instruction_builders::*;
pub use share_preview::{allocation_percent, preview_payouts, SharePreview};
pub use split_compiler::*;

pub use split_protocol::state::*;
pub use split_protocol::{AllocationLeaf, LeafScheme, TokenClaim, PERCENTAGE_SCALE};
