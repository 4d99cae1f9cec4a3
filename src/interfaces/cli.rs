use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "gistapi")]
#[command(about = "Search a user's public gists with a regular expression over HTTP.")]
#[command(version)]
pub struct Cli {
    /// Address to bind (overrides config and GISTAPI_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config and GISTAPI_PORT)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Seconds a search result stays cached
    #[arg(long)]
    pub cache_ttl: Option<u64>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show effective configuration and exit
    #[arg(long)]
    pub status: bool,
}

impl Cli {
    pub fn apply(&self, config: &mut crate::infrastructure::config::Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ttl) = self.cache_ttl {
            config.cache.ttl_secs = ttl;
        }
    }
}
