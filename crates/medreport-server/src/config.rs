use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;
use medreport_genai::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use medreport_genai::GeminiConfig;

#[derive(Debug, Parser)]
#[command(name = "medreport-server", about = "AI-powered medical report form")]
pub struct ServerConfig {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Generative model name
    #[arg(long, env = "MEDREPORT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Generative Language API
    #[arg(long, env = "MEDREPORT_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Timeout for a single report generation call (seconds).
    #[arg(long, env = "MEDREPORT_REQUEST_TIMEOUT", default_value = "120")]
    pub request_timeout: u64,

    /// Address to bind the HTTP server to
    #[arg(long, env = "MEDREPORT_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    #[arg(long, env = "MEDREPORT_PORT", default_value = "8501")]
    pub port: u16,
}

impl ServerConfig {
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            api_base: self.api_base.clone(),
            request_timeout: Duration::from_secs(self.request_timeout),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
