use serde::{Deserialize, Serialize};
use anyhow::Result;

/// Chunk size for streaming file loads
pub const READ_CHUNK_SIZE: usize = 1024;

/// Default capacity used by the demo binary
pub const DEFAULT_CAPACITY: usize = 64;

/// How the buffer grows when an append outruns its capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthPolicy {
    /// Grow by exactly the number of bytes the append needs.
    /// Worst-case O(n²) total copying under many small appends.
    Additive,
    /// Double the capacity (at least to what the append needs)
    Doubling,
}

/// What to do when the allocator cannot satisfy a growth request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OomPolicy {
    /// Log and abort the process; growth never returns an error
    Abort,
    /// Report `BufferError::AllocFailed` to the caller
    Recover,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BufferConfig {
    pub growth: GrowthPolicy,
    /// Hard ceiling on capacity; `None` means unbounded growth
    pub max_capacity: Option<usize>,
    pub oom: OomPolicy,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            growth: GrowthPolicy::Additive,
            max_capacity: None,
            oom: OomPolicy::Abort,
        }
    }
}

impl BufferConfig {
    pub fn load_or_create(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or("dynbuf.toml");

        if std::path::Path::new(config_file).exists() {
            let content = std::fs::read_to_string(config_file)?;
            let config: BufferConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_file)?;
            Ok(config)
        }
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        tracing::info!("Wrote buffer config: {}", config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_additive_unbounded_abort() {
        let config = BufferConfig::default();
        assert_eq!(config.growth, GrowthPolicy::Additive);
        assert_eq!(config.max_capacity, None);
        assert_eq!(config.oom, OomPolicy::Abort);
    }

    #[test]
    fn config_toml_round_trip() {
        let config = BufferConfig {
            growth: GrowthPolicy::Doubling,
            max_capacity: Some(4096),
            oom: OomPolicy::Recover,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: BufferConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.growth, GrowthPolicy::Doubling);
        assert_eq!(back.max_capacity, Some(4096));
        assert_eq!(back.oom, OomPolicy::Recover);
    }
}
