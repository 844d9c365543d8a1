use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;

/// Output format of the log lines written to stdout.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub app_server_host: IpAddr,
    #[serde(default = "default_port")]
    pub app_server_port: u16,
    #[serde(default = "default_trust_proxy_headers")]
    pub trust_proxy_headers: bool,
    #[serde(default = "default_max_form_body_bytes")]
    pub max_form_body_bytes: usize,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_trust_proxy_headers() -> bool {
    true
}

// Same ceiling Go's net/http applies to form bodies.
fn default_max_form_body_bytes() -> usize {
    10 << 20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_server_host: default_host(),
            app_server_port: default_port(),
            trust_proxy_headers: default_trust_proxy_headers(),
            max_form_body_bytes: default_max_form_body_bytes(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        Self::from_vars(std::env::vars())
    }

    /// Builds the config from an explicit set of `KEY=value` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, AppConfig>(vars)?;

        if config.max_form_body_bytes == 0 {
            return Err(envy::Error::Custom(
                "MAX_FORM_BODY_BYTES must be greater than zero.".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.app_server_host, self.app_server_port)
    }
}
