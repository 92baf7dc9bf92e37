use relget_config::Config;
use relget_errors::Error;
use relget_net::NetConfig;
use relget_repository::NamingPolicy;
use relget_types::PlatformConfig;
use std::path::PathBuf;

/// Everything an install session needs besides the selector and target
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub naming: NamingPolicy,
    pub platform: PlatformConfig,
    pub cache_root: PathBuf,
    pub net: NetConfig,
}

impl SessionConfig {
    /// Default mirror layout and host platform, caching under `cache_root`
    #[must_use]
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            naming: NamingPolicy::default(),
            platform: PlatformConfig::host(),
            cache_root: cache_root.into(),
            net: NetConfig::default(),
        }
    }

    /// Build from loaded configuration
    ///
    /// `tool_version` ends up in the outbound `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns an error if no cache directory is configured and the system
    /// cache directory cannot be determined.
    pub fn from_config(config: &Config, tool_version: &str) -> Result<Self, Error> {
        Ok(Self {
            naming: NamingPolicy::from_config(&config.dist),
            platform: config.platform_config(),
            cache_root: config.cache_root()?,
            net: NetConfig::for_tool("relget", tool_version)
                .with_timeouts(config.request_timeout(), config.connect_timeout()),
        })
    }

    #[must_use]
    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: PlatformConfig) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_net(mut self, net: NetConfig) -> Self {
        self.net = net;
        self
    }
}
