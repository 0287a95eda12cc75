use anyhow::Context;
use tracing::info;

pub fn write_pid_file(path: &str) -> anyhow::Result<()> {
    let pid = std::process::id();
    std::fs::write(path, format!("{}\n", pid))
        .with_context(|| format!("Failed to write pid file {}", path))?;
    info!(path, pid, "Wrote pid file");
    Ok(())
}
