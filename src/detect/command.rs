//! Expression engine backed by an external program.
//!
//! The program is invoked twice per lifecycle:
//!
//! - `<cmd> --load-models`: exit status 0 means the models are ready
//! - `<cmd> --detect <image>`: prints `{"expressions": {"happy": 0.93, ...}}`
//!   on stdout, or `{"expressions": null}` when no face was found

use super::traits::{DetectedExpression, ExpressionEngine, Frame};
use anyhow::{anyhow, bail, Context, Result};
use futures::future::BoxFuture;
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Deserialize)]
struct DetectReply {
    expressions: Option<DetectedExpression>,
}

pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    /// `command` is the program followed by its leading arguments
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| anyhow!("engine command is empty"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn run(&self, extra: &[&str]) -> Result<Vec<u8>> {
        let output = self
            .command()
            .args(extra)
            .output()
            .await
            .with_context(|| format!("failed to start '{}'", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("'{}' exited with {}: {}", self.program, output.status, stderr.trim());
        }
        Ok(output.stdout)
    }

    pub(crate) fn parse_reply(stdout: &[u8]) -> Result<Option<DetectedExpression>> {
        let reply: DetectReply =
            serde_json::from_slice(stdout).context("engine printed malformed JSON")?;
        Ok(reply.expressions)
    }
}

impl ExpressionEngine for CommandEngine {
    fn load_models(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.run(&["--load-models"]).await?;
            Ok(())
        })
    }

    fn detect<'a>(&'a self, frame: &'a Frame) -> BoxFuture<'a, Result<Option<DetectedExpression>>> {
        Box::pin(async move {
            let path = frame.path.to_string_lossy();
            let stdout = self.run(&["--detect", &*path]).await?;
            Self::parse_reply(&stdout)
        })
    }
}

/// Stand-in used when no engine command is configured. Never becomes ready.
pub struct UnconfiguredEngine;

impl ExpressionEngine for UnconfiguredEngine {
    fn load_models(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async {
            Err(anyhow!(
                "no expression engine configured (set engine_command in config.toml)"
            ))
        })
    }

    fn detect<'a>(&'a self, _frame: &'a Frame) -> BoxFuture<'a, Result<Option<DetectedExpression>>> {
        Box::pin(async { Err(anyhow!("no expression engine configured")) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply() {
        let json = br#"{"expressions": {"neutral": 0.1, "happy": 0.85, "sad": 0.05}}"#;
        let expressions = CommandEngine::parse_reply(json).unwrap().unwrap();
        assert_eq!(expressions.scores.len(), 3);
        assert_eq!(expressions.scores["happy"], 0.85);

        let none = CommandEngine::parse_reply(br#"{"expressions": null}"#).unwrap();
        assert!(none.is_none());

        assert!(CommandEngine::parse_reply(b"not json").is_err());
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(CommandEngine::new(&[]).is_err());
        let engine = CommandEngine::new(&["python3".to_string(), "detect.py".to_string()]).unwrap();
        assert_eq!(engine.program, "python3");
        assert_eq!(engine.args, vec!["detect.py"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_external_program() {
        let cmd = vec![
            "sh".to_string(),
            "-c".to_string(),
            r#"echo '{"expressions": {"surprised": 0.7, "neutral": 0.3}}'"#.to_string(),
        ];
        let engine = CommandEngine::new(&cmd).unwrap();
        engine.load_models().await.unwrap();

        let frame = Frame {
            path: "face.png".into(),
            width: 1,
            height: 1,
        };
        let expressions = engine.detect(&frame).await.unwrap().unwrap();
        assert_eq!(expressions.scores["surprised"], 0.7);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let cmd = vec!["sh".to_string(), "-c".to_string(), "echo nope >&2; exit 3".to_string()];
        let engine = CommandEngine::new(&cmd).unwrap();
        let err = engine.load_models().await.unwrap_err();
        assert!(format!("{:#}", err).contains("nope"));
    }

    #[tokio::test]
    async fn test_unconfigured_engine_never_loads() {
        assert!(UnconfiguredEngine.load_models().await.is_err());
    }
}
