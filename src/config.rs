use std::path::PathBuf;

use clap::Parser;

use crate::store::DEFAULT_SLOT;

/// Runtime settings for the user store. Every flag can also come from the
/// environment.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about = "Local user record store", long_about = None)]
pub struct StoreConfig {
    /// Directory holding the slot files; an in-memory slot is used when unset
    #[arg(long, env = "USER_STORE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Name of the slot the valid users are written to
    #[arg(long = "slot", env = "USER_STORE_SLOT", default_value = DEFAULT_SLOT)]
    pub slot: String,

    /// Request queue length of the store actor
    #[arg(long, env = "USER_STORE_CHANNEL_CAPACITY", default_value_t = 32)]
    pub channel_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            slot: DEFAULT_SLOT.to_string(),
            channel_capacity: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_parser_defaults() {
        let parsed = StoreConfig::try_parse_from(["user_store"]).unwrap();
        // Only meaningful when the environment does not override the flags.
        if std::env::var_os("USER_STORE_DIR").is_none()
            && std::env::var_os("USER_STORE_SLOT").is_none()
            && std::env::var_os("USER_STORE_CHANNEL_CAPACITY").is_none()
        {
            assert_eq!(parsed, StoreConfig::default());
        }
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = StoreConfig::try_parse_from([
            "user_store",
            "--storage-dir",
            "/tmp/users",
            "--slot",
            "staff",
            "--channel-capacity",
            "4",
        ])
        .unwrap();
        assert_eq!(parsed.storage_dir, Some(PathBuf::from("/tmp/users")));
        assert_eq!(parsed.slot, "staff");
        assert_eq!(parsed.channel_capacity, 4);
    }
}
