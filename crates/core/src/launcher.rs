//! Opens outbound links in a new browsing context.

use std::{io, process::Stdio};

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Failure to hand a link to the system opener.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The link was empty.
    #[error("no link to open")]
    EmptyUrl,
    /// The opener could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },
}

/// Hands URLs to an external program without waiting for it.
#[derive(Debug, Clone, Default)]
pub struct Launcher {
    command: Option<String>,
}

impl Launcher {
    /// Use `command` instead of the platform opener when provided.
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|value| !value.trim().is_empty()),
        }
    }

    /// Program and arguments used to open `url`.
    pub fn invocation(&self, url: &str) -> (String, Vec<String>) {
        if let Some(command) = &self.command {
            let mut parts = command.split_whitespace().map(str::to_string);
            let program = parts.next().unwrap_or_default();
            let mut args: Vec<String> = parts.collect();
            args.push(url.to_string());
            return (program, args);
        }
        platform_opener(url)
    }

    /// Open `url`. The child runs detached; its exit status is only logged.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(&self, url: &str) -> Result<(), LaunchError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(LaunchError::EmptyUrl);
        }
        let (program, args) = self.invocation(url);
        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;
        info!(url, program = %program, "Opened outbound link");

        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => debug!(program = %program, "Opener exited"),
                Ok(status) => warn!(program = %program, %status, "Opener exited with failure"),
                Err(err) => warn!(program = %program, %err, "Failed to wait for opener"),
            }
        });
        Ok(())
    }
}

fn platform_opener(url: &str) -> (String, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open".to_string(), vec![url.to_string()])
    } else if cfg!(target_os = "windows") {
        (
            "cmd".to_string(),
            vec![
                "/C".to_string(),
                "start".to_string(),
                String::new(),
                url.to_string(),
            ],
        )
    } else {
        ("xdg-open".to_string(), vec![url.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_command_gets_url_appended() {
        let launcher = Launcher::new(Some("firefox --new-window".to_string()));
        let (program, args) = launcher.invocation("https://play/b");
        assert_eq!(program, "firefox");
        assert_eq!(args, ["--new-window", "https://play/b"]);
    }

    #[test]
    fn blank_command_uses_platform_opener() {
        let launcher = Launcher::new(Some("   ".to_string()));
        let (_, args) = launcher.invocation("https://play/b");
        assert_eq!(args.last().map(String::as_str), Some("https://play/b"));
    }

    #[tokio::test]
    async fn empty_url_is_rejected() {
        let launcher = Launcher::default();
        assert!(matches!(launcher.open("  "), Err(LaunchError::EmptyUrl)));
    }

    #[tokio::test]
    async fn missing_program_is_reported() {
        let launcher = Launcher::new(Some("gamehub-no-such-opener".to_string()));
        let err = launcher.open("https://play/b").unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }
}
