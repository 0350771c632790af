use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;
use split_protocol::{SplitSetup, TransferPolicy, WindowAccess, PERCENTAGE_SCALE};

use crate::error::{CliError, CliResult};

/// Split configuration file structure, used by `simulate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Human-readable split name (for organization)
    pub split_name: String,

    /// Factory the split is deployed through (base58)
    pub factory: String,

    /// Allocations CSV, relative to the config file
    pub allocations_file: PathBuf,

    /// Units the allocations are expressed in
    #[serde(default = "default_scale")]
    pub scale: u64,

    /// Owners (base58). The first one deploys the split and closes windows.
    pub owners: Vec<String>,

    #[serde(default)]
    pub window_access: WindowAccess,

    #[serde(default)]
    pub transfer_policy: TransferPolicy,

    /// Native value deposited before each window is closed
    pub deposits: Vec<u64>,

    /// Recipients that refuse native transfers during the simulation (base58)
    #[serde(default)]
    pub rejecting_accounts: Vec<String>,
}

fn default_scale() -> u64 {
    PERCENTAGE_SCALE
}

impl SplitConfig {
    pub fn load(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: SplitConfig = serde_yaml::from_str(&contents)?;

        if config.allocations_file.is_relative() {
            if let Some(dir) = path.parent() {
                config.allocations_file = dir.join(&config.allocations_file);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.owners.is_empty() {
            return Err(CliError::InvalidConfig("at least one owner is required".into()));
        }
        if self.scale == 0 {
            return Err(CliError::InvalidConfig("scale must be greater than zero".into()));
        }
        if self.deposits.is_empty() {
            return Err(CliError::InvalidConfig("at least one deposit is required".into()));
        }
        self.factory()?;
        self.owner_keys()?;
        self.rejecting_keys()?;
        Ok(())
    }

    pub fn factory(&self) -> CliResult<Pubkey> {
        parse_pubkey(&self.factory)
    }

    pub fn owner_keys(&self) -> CliResult<Vec<Pubkey>> {
        self.owners.iter().map(|s| parse_pubkey(s)).collect()
    }

    pub fn rejecting_keys(&self) -> CliResult<Vec<Pubkey>> {
        self.rejecting_accounts.iter().map(|s| parse_pubkey(s)).collect()
    }

    /// Split setup for deployment; the leaf scheme is filled in from the compiled split.
    pub fn setup(&self) -> CliResult<SplitSetup> {
        Ok(SplitSetup::new(self.owner_keys()?)
            .with_scale(self.scale)
            .with_window_access(self.window_access)
            .with_transfer_policy(self.transfer_policy))
    }
}

pub fn parse_pubkey(s: &str) -> CliResult<Pubkey> {
    Pubkey::from_str(s.trim()).map_err(|e| CliError::InvalidPubkey(format!("{}: {}", s, e)))
}

pub fn parse_root(s: &str) -> CliResult<[u8; 32]> {
    let bytes = hex::decode(s.trim().trim_start_matches("0x"))
        .map_err(|e| CliError::InvalidHex(format!("{}: {}", s, e)))?;
    bytes
        .try_into()
        .map_err(|_| CliError::InvalidHex(format!("{}: expected 32 bytes", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let owner = Pubkey::new_unique();
        let factory = Pubkey::new_unique();
        let yaml = format!(
            "split_name: demo\n\
             factory: {factory}\n\
             allocations_file: allocations.csv\n\
             owners: [{owner}]\n\
             transfer_policy: revert_claim\n\
             deposits: [100, 50]\n"
        );
        let path = dir.path().join("split.yaml");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(yaml.as_bytes())
            .unwrap();

        let config = SplitConfig::load(&path).unwrap();
        assert_eq!(config.allocations_file, dir.path().join("allocations.csv"));
        assert_eq!(config.scale, PERCENTAGE_SCALE);
        assert_eq!(config.window_access, WindowAccess::Open);
        assert_eq!(config.transfer_policy, TransferPolicy::RevertClaim);
        assert_eq!(config.factory().unwrap(), factory);
        assert_eq!(config.setup().unwrap().owners, vec![owner]);
    }

    #[test]
    fn test_config_requires_owners_and_deposits() {
        let config = SplitConfig {
            split_name: "demo".into(),
            factory: Pubkey::new_unique().to_string(),
            allocations_file: PathBuf::from("a.csv"),
            scale: PERCENTAGE_SCALE,
            owners: vec![],
            window_access: WindowAccess::Open,
            transfer_policy: TransferPolicy::WrapNative,
            deposits: vec![1],
            rejecting_accounts: vec![],
        };
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));

        let config = SplitConfig {
            owners: vec![Pubkey::new_unique().to_string()],
            deposits: vec![],
            ..config
        };
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_root() {
        let root = [0xabu8; 32];
        assert_eq!(parse_root(&hex::encode(root)).unwrap(), root);
        assert_eq!(parse_root(&format!("0x{}", hex::encode(root))).unwrap(), root);
        assert!(parse_root("abcd").is_err());
        assert!(parse_root("zz").is_err());
    }
}
