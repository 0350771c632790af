use split_protocol::{proxy_code_hash, split_salt};
use split_protocol_sdk::AddressFinder;

use crate::config::{parse_pubkey, parse_root};
use crate::error::CliResult;

pub fn execute(factory: String, merkle_root: String) -> CliResult<()> {
    let factory = parse_pubkey(&factory)?;
    let merkle_root = parse_root(&merkle_root)?;

    let (address, bump) = AddressFinder::new(factory).find_split_v0_address(&merkle_root);

    println!("🏭 Factory: {}", factory);
    println!("🌳 Merkle root: {}", hex::encode(merkle_root));
    println!("   Salt: {}", hex::encode(split_salt(&merkle_root)));
    println!("   Proxy code hash: {}", hex::encode(proxy_code_hash()));
    println!("📍 Split address: {} (bump {})", address, bump);
    Ok(())
}
