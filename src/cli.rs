//! Command-line interface definitions for the news digest service.
//!
//! All arguments can be provided via command-line flags or environment variables.
//! Tuning knobs that rarely change live in the optional YAML file named by
//! `--config` (see [`crate::config::Settings`]).

use clap::Parser;

/// Command-line arguments for the news digest service.
///
/// # Examples
///
/// ```sh
/// # Serve on the default address with the API key from the environment
/// HUGGINGFACE_API_KEY=hf_xxx news_digest
///
/// # Custom bind address and tuning file
/// news_digest --bind 0.0.0.0:8080 --config ./news_digest.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address the HTTP server listens on
    #[arg(short, long, env = "NEWS_DIGEST_BIND", default_value = "127.0.0.1:8000")]
    pub bind: String,

    /// Optional path to a YAML settings file
    #[arg(short, long, env = "NEWS_DIGEST_CONFIG")]
    pub config: Option<String>,

    /// Hugging Face Inference API token
    #[arg(long, env = "HUGGINGFACE_API_KEY", hide_env_values = true)]
    pub hf_api_key: Option<String>,
}
