#![warn(clippy::all)]

#[macro_use]
extern crate strum;

use std::io::Write;
use std::time::Duration;

use anyhow::Context as _;
use serde::Serialize;
use structopt::StructOpt;
use strum::VariantNames;
use tracing_subscriber::EnvFilter;

use skcli_util::{abs_path, console, regex, select, table};

mod cmd;
mod config;
mod model;
mod service;
mod session;

use cmd::{Cmd, Run as _};
use config::Config;
use console::Console;

pub type Error = anyhow::Error;
pub type Result<T> = anyhow::Result<T>;

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(about, author)]
pub struct Opt {
    #[structopt(flatten)]
    global_opt: GlobalOpt,
    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalOpt {
    /// Name of the credentials file searched in the current and parent directories
    #[structopt(
        long,
        global = true,
        env = "SKCLI_CREDS_FILE",
        default_value = config::CredentialStore::DEFAULT_FILE_NAME
    )]
    creds_file: String,
    /// Timeout of each request to the judge (e.g. "30s", "1m")
    #[structopt(
        long,
        global = true,
        env = "SKCLI_TIMEOUT",
        default_value = "30s",
        parse(try_from_str = humantime::parse_duration)
    )]
    timeout: Duration,
    /// Format of the command output
    #[structopt(
        long,
        global = true,
        env = "SKCLI_OUTPUT",
        default_value = OutputFormat::Default.into(),
        possible_values = &OutputFormat::VARIANTS,
    )]
    output: OutputFormat,
    /// Prints debug logs to stderr
    #[structopt(long, global = true)]
    debug: bool,
}

#[cfg(test)]
impl Default for GlobalOpt {
    fn default() -> Self {
        Self {
            creds_file: config::CredentialStore::DEFAULT_FILE_NAME.to_owned(),
            timeout: Duration::from_secs(30),
            output: OutputFormat::Default,
            debug: false,
        }
    }
}

#[derive(
    Serialize,
    EnumString,
    EnumVariantNames,
    IntoStaticStr,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OutputFormat {
    Default,
    Debug,
    Json,
    Yaml,
}

impl Opt {
    /// Installs the global tracing subscriber. Call once per process.
    pub fn init_tracing(&self) {
        let filter = if self.global_opt.debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Runs the command and prints its outcome to `stdout`.
    ///
    /// Returns true if the outcome is a failure.
    pub fn run(&self, stdout: &mut dyn Write, cnsl: &mut Console) -> Result<bool> {
        let conf = Config::new(&self.global_opt).context("Could not setup config")?;
        self.run_with(&conf, stdout, cnsl)
    }

    fn run_with(&self, conf: &Config, stdout: &mut dyn Write, cnsl: &mut Console) -> Result<bool> {
        let outcome = self.cmd.run(conf, cnsl)?;
        outcome.print(stdout, self.global_opt.output)?;
        Ok(outcome.is_error())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::config::Credentials;
    use crate::model::RankingRow;
    use crate::service::MockJudge;

    fn opt_from(args: &[&str]) -> Opt {
        Opt::from_iter_safe(args).unwrap()
    }

    #[test]
    fn test_run_prints_outcome_to_stdout() -> anyhow::Result<()> {
        let test_dir = tempdir()?;
        let mock =
            MockJudge::default().with_ranking(vec![RankingRow::new("Alice Doe", "alice", 10)]);
        let conf = Config::with_mock(test_dir.path(), GlobalOpt::default(), mock)?;
        conf.save_credentials(&Credentials::test_default(), &mut Console::sink())?;
        let opt = opt_from(&["skcli", "ranking"]);

        let mut stdout = Vec::new();
        let is_error = opt.run_with(&conf, &mut stdout, &mut Console::sink())?;

        let stdout = String::from_utf8(stdout)?;
        assert!(!is_error);
        assert!(stdout.contains("Ranking"));
        assert!(stdout.contains("alice"));
        Ok(())
    }

    #[test]
    fn test_run_reports_failure() -> anyhow::Result<()> {
        let test_dir = tempdir()?;
        let conf = Config::with_mock(test_dir.path(), GlobalOpt::default(), MockJudge::default())?;
        let opt = opt_from(&["skcli", "ranking"]);

        let mut stdout = Vec::new();
        let is_error = opt.run_with(&conf, &mut stdout, &mut Console::sink())?;

        assert!(is_error);
        assert!(String::from_utf8(stdout)?.starts_with("Login failed with: "));
        Ok(())
    }

    #[test]
    fn test_run_json_output() -> anyhow::Result<()> {
        let test_dir = tempdir()?;
        let global_opt = GlobalOpt {
            output: OutputFormat::Json,
            ..GlobalOpt::default()
        };
        let conf = Config::with_mock(test_dir.path(), global_opt, MockJudge::default())?;
        let opt = opt_from(&["skcli", "--output", "json", "whoami"]);

        let mut stdout = Vec::new();
        opt.run_with(&conf, &mut stdout, &mut Console::sink())?;

        let value: serde_json::Value = serde_json::from_slice(&stdout)?;
        assert_eq!(value["username"], serde_json::Value::Null);
        Ok(())
    }

    #[test]
    fn test_parse_global_opt() {
        let opt = opt_from(&[
            "skcli",
            "whoami",
            "--creds-file",
            "other.save",
            "--timeout",
            "5s",
            "--output",
            "yaml",
        ]);
        assert_eq!(opt.global_opt.creds_file, "other.save");
        assert_eq!(opt.global_opt.timeout, Duration::from_secs(5));
        assert_eq!(opt.global_opt.output, OutputFormat::Yaml);
    }
}
