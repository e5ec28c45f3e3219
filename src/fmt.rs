use std::io::Write;
use std::process::{Command, Stdio};
use anyhow::{anyhow, bail, Context};

/// Pipe generated Rust source through `rustfmt`.
pub fn rustfmt(input: String) -> anyhow::Result<String> {
    let mut command = Command::new("rustfmt")
        .arg("--edition")
        .arg("2021")
        .arg("--emit")
        .arg("stdout")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to start rustfmt")?;

    let mut stdin = command.stdin.take().ok_or_else(|| anyhow!("rustfmt stdin is not piped"))?;
    stdin.write_all(input.as_bytes())?;
    drop(stdin);

    let output = command.wait_with_output()?;
    if !output.status.success() {
        bail!("rustfmt exited with {}: {}", output.status, String::from_utf8_lossy(&output.stderr));
    }

    let stdout = String::from_utf8(output.stdout)?;
    Ok(stdout)
}
