use std::fmt;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, bail};
use log::{debug, info};
use url::Url;

/// Program that hands a URL to the user's browser.
#[derive(Debug, Clone, PartialEq)]
pub enum Opener {
    XdgOpen,
    Open,
    WslView,
    Custom(String),
}

impl fmt::Display for Opener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opener::XdgOpen => write!(f, "xdg-open"),
            Opener::Open => write!(f, "open"),
            Opener::WslView => write!(f, "wslview"),
            Opener::Custom(cmd) => write!(f, "{}", cmd),
        }
    }
}

/// Uses the configured command if there is one, otherwise the first opener
/// found on `PATH`.
pub fn detect_opener(configured: &str) -> Result<Opener> {
    let configured = configured.trim();
    if !configured.is_empty() {
        return Ok(Opener::Custom(configured.to_string()));
    }

    if which::which("wslview").is_ok() {
        Ok(Opener::WslView)
    } else if which::which("xdg-open").is_ok() {
        Ok(Opener::XdgOpen)
    } else if which::which("open").is_ok() {
        Ok(Opener::Open)
    } else {
        bail!("No URL opener found (xdg-open, open, wslview)\nSet `opener` in the config file to your browser command")
    }
}

/// Only web links are ever passed on to the opener.
pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid link: {}", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("Refusing to open {} link: {}", other, raw),
    }
}

pub fn open_url(opener: &Opener, raw: &str) -> Result<()> {
    let url = validate_url(raw)?;
    info!("Opening {} with {}", url, opener);

    let command = opener.to_string();
    let mut words = command.split_whitespace();
    let program = words.next().context("Empty opener command")?;

    let child = Command::new(program)
        .args(words)
        .arg(url.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to run {}", program))?;
    reap(child);
    Ok(())
}

/// Waits for the opener on a detached thread so it never lingers as a zombie.
fn reap(mut child: Child) -> JoinHandle<Option<ExitStatus>> {
    thread::spawn(move || {
        let status = child.wait().ok();
        debug!("Opener exited with {:?}", status);
        status
    })
}
