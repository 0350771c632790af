pub mod check_eligibility;
pub mod compile_split;
pub mod generate_allocations;
pub mod simulate;
pub mod split_address;
pub mod verify_claim;
