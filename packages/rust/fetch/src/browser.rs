//! Headless browser transport backed by `shot-scraper`.
//!
//! Two modes are used: capturing the rendered HTML of a page, and running an
//! extraction script in the page and reading back its JSON result.

use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, error, instrument, warn};

use rosters_shared::{BrowserConfig, Result, RosterError};

use crate::json::decode_lenient_json;

/// Runs `shot-scraper` as a subprocess.
pub struct HeadlessBrowser {
    config: BrowserConfig,
}

impl HeadlessBrowser {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Arguments for `shot-scraper html`.
    pub fn html_args(&self, url: &str) -> Vec<String> {
        vec![
            "html".into(),
            url.into(),
            "--wait".into(),
            self.config.wait_ms.to_string(),
        ]
    }

    /// Arguments for `shot-scraper javascript`.
    pub fn javascript_args(&self, url: &str, script: &str) -> Vec<String> {
        vec![
            "javascript".into(),
            url.into(),
            script.into(),
            "--user-agent".into(),
            self.config.user_agent.clone(),
        ]
    }

    /// Render `url` and return its HTML.
    ///
    /// Rendering is best effort: a timeout, non-zero exit or missing binary is
    /// logged and reported as `Ok(None)` so callers can fall back to plain HTTP.
    #[instrument(skip(self))]
    pub async fn render_html(&self, url: &str) -> Result<Option<String>> {
        let timeout = Duration::from_secs(self.config.render_timeout_secs);
        match self.run(&self.html_args(url), timeout).await {
            Ok(stdout) => Ok(Some(stdout)),
            Err(RosterError::Browser(message)) => {
                warn!(%message, "rendering failed");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Run `script` in the page at `url` and decode its JSON result.
    #[instrument(skip(self, script))]
    pub async fn evaluate(&self, url: &str, script: &str) -> Result<serde_json::Value> {
        let timeout = Duration::from_secs(self.config.script_timeout_secs);
        let stdout = self.run(&self.javascript_args(url, script), timeout).await?;
        decode_lenient_json(&stdout)
    }

    async fn run(&self, args: &[String], timeout: Duration) -> Result<String> {
        let mut command = match self.config.runner.split_first() {
            Some((launcher, rest)) => {
                let mut c = Command::new(launcher);
                c.args(rest).arg(&self.config.command);
                c
            }
            None => Command::new(&self.config.command),
        };
        command.args(args).kill_on_drop(true);

        debug!(command = %self.config.command, mode = %args[0], "spawning headless browser");

        let output = match tokio::time::timeout(timeout, command.output()).await {
            Err(_) => {
                return Err(RosterError::Browser(format!(
                    "timed out after {}s",
                    timeout.as_secs()
                )));
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                error!(command = %self.config.command, "headless browser not found on PATH");
                return Err(RosterError::Browser(format!(
                    "{} not found",
                    self.config.command
                )));
            }
            Ok(Err(e)) => return Err(RosterError::Browser(e.to_string())),
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let excerpt: String = stderr.chars().take(200).collect();
            return Err(RosterError::Browser(format!(
                "exited with {}: {excerpt}",
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_browser() -> HeadlessBrowser {
        HeadlessBrowser::new(&BrowserConfig {
            command: "rosters-test-no-such-browser".into(),
            render_timeout_secs: 5,
            script_timeout_secs: 5,
            ..BrowserConfig::default()
        })
    }

    #[test]
    fn html_args_include_wait() {
        let browser = HeadlessBrowser::new(&BrowserConfig::default());
        assert_eq!(
            browser.html_args("https://a.edu/roster"),
            vec!["html", "https://a.edu/roster", "--wait", "3000"]
        );
    }

    #[test]
    fn javascript_args_pass_script_and_agent() {
        let browser = HeadlessBrowser::new(&BrowserConfig::default());
        let args = browser.javascript_args("https://a.edu/roster", "1 + 1");
        assert_eq!(args[0], "javascript");
        assert_eq!(args[2], "1 + 1");
        assert_eq!(args[4], "Firefox");
    }

    #[tokio::test]
    async fn render_without_browser_is_none() {
        let rendered = missing_browser()
            .render_html("https://a.edu/roster")
            .await
            .unwrap();
        assert!(rendered.is_none());
    }

    #[tokio::test]
    async fn evaluate_without_browser_is_error() {
        let err = missing_browser()
            .evaluate("https://a.edu/roster", "[]")
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Browser(_)));
    }
}
