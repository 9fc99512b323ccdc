use std::process::Command;

use tracing::info;

/// Builds the dial URI, dropping every whitespace character from the number.
pub fn tel_uri(number: &str) -> Option<String> {
    let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("tel:{}", digits))
    }
}

/// Hands a `tel:` URI to whatever places the call. Fire-and-forget.
pub trait Dialer {
    fn dial(&self, uri: &str) -> anyhow::Result<()>;
}

/// Spawns the configured program with the URI, or only logs it.
#[derive(Debug, Clone, Default)]
pub struct SystemDialer {
    command: Option<String>,
}

impl SystemDialer {
    pub fn new(command: Option<String>) -> Self {
        SystemDialer { command }
    }
}

impl Dialer for SystemDialer {
    fn dial(&self, uri: &str) -> anyhow::Result<()> {
        match &self.command {
            Some(program) => {
                Command::new(program).arg(uri).spawn()?;
                info!("Handed {} to {}", uri, program);
            }
            None => info!("Dial {}", uri),
        }
        Ok(())
    }
}
