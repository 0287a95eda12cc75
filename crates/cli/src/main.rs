use answer_dns_domain::config::ServerConfig;
use answer_dns_domain::CliOverrides;
use clap::Parser;
use tracing::{error, info, warn};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "answer-dns")]
#[command(version)]
#[command(about = "Answers DNS queries per client network from a JSON answers file")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Address to listen on for TCP and UDP, e.g. ":53" or "127.0.0.1:5353"
    #[arg(short = 'l', long, value_name = "ADDR:PORT")]
    listen: Option<String>,

    /// File containing the answers to respond with
    #[arg(short = 'a', long, value_name = "FILE")]
    answers: Option<String>,

    /// TTL for local answers
    #[arg(short = 't', long)]
    ttl: Option<u32>,

    /// Append log output to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log: Option<String>,

    /// Write the process id to this file
    #[arg(long, value_name = "FILE")]
    pid_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(short = 'd', long)]
    debug: bool,
}

impl Cli {
    fn overrides(&self) -> anyhow::Result<CliOverrides> {
        let (bind_address, dns_port) = match self.listen.as_deref() {
            Some(listen) => {
                let (host, port) = ServerConfig::parse_listen(listen)?;
                (host, Some(port))
            }
            None => (None, None),
        };

        Ok(CliOverrides {
            dns_port,
            bind_address,
            answers_path: self.answers.clone(),
            ttl: self.ttl,
            log_file: self.log.clone(),
            log_level: self.log_level.clone(),
            pid_file: self.pid_file.clone(),
            debug: self.debug,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides()?)?;
    bootstrap::init_logging(&config.logging)?;

    info!("Starting answer-dns v{}", env!("CARGO_PKG_VERSION"));

    if let Some(pid_file) = config.pid_file.as_deref() {
        bootstrap::write_pid_file(pid_file)?;
    }

    let services = di::AnswerServices::new(&config);

    // A bad answers file at startup is logged and leaves an empty store in place.
    if services.reload.execute().await.is_err() {
        warn!(path = %config.answers.path, "Serving without answers until the next successful reload");
    }
    let _reloader = server::spawn_reload_on_signal(services.reload.clone())?;

    let listen_addr = config.server.listen_addr()?;
    tokio::select! {
        result = server::start_dns_server(listen_addr, services.handler, config.server.tcp_timeout()) => {
            if let Err(e) = result {
                error!(error = %e, "DNS server error");
                return Err(e);
            }
        }
        _ = server::shutdown_signal() => {}
    }

    info!("Server shutdown complete");
    Ok(())
}
