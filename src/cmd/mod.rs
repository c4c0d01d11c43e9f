use std::{fmt, io};

use anyhow::Context as _;
use serde::ser::SerializeStruct as _;
use serde::{Serialize, Serializer};
use structopt::StructOpt;
use thiserror::Error;

use crate::session::SessionClient;
use crate::{Config, Console, OutputFormat, Result};

mod errors;
mod get_tasks;
mod latest_sub;
mod login;
mod ranking;
mod submit;
mod whoami;

pub use errors::ErrorsOpt;
pub use get_tasks::GetTasksOpt;
pub use latest_sub::LatestSubOpt;
pub use login::LoginOpt;
pub use ranking::RankingOpt;
pub use submit::SubmitOpt;
pub use whoami::WhoamiOpt;

pub trait Outcome: OutcomeSerialize {
    fn is_error(&self) -> bool;
}

pub trait OutcomeSerialize: fmt::Display + fmt::Debug {
    fn write_json(&self, writer: &mut dyn io::Write) -> Result<()>;

    fn write_yaml(&self, writer: &mut dyn io::Write) -> Result<()>;

    fn print(&self, stdout: &mut dyn io::Write, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Default => {
                let text = self.to_string();
                if !text.is_empty() {
                    writeln!(stdout, "{}", text)?;
                }
            }
            OutputFormat::Debug => writeln!(stdout, "{:?}", self)?,
            OutputFormat::Json => {
                self.write_json(stdout)?;
                writeln!(stdout)?;
            }
            OutputFormat::Yaml => self.write_yaml(stdout)?,
        }
        Ok(())
    }
}

impl<T: Serialize + fmt::Display + fmt::Debug> OutcomeSerialize for T {
    fn write_json(&self, writer: &mut dyn io::Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).context("Could not print outcome as json")
    }

    fn write_yaml(&self, writer: &mut dyn io::Write) -> Result<()> {
        serde_yaml::to_writer(writer, self).context("Could not print outcome as yaml")
    }
}

pub trait Run {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>>;
}

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub enum Cmd {
    /// Shows the username stored in the credentials file
    Whoami(WhoamiOpt),
    /// Logs in to the judge and saves credentials
    Login(LoginOpt),
    /// Shows the contest ranking
    Ranking(RankingOpt),
    /// Shows the latest submission
    #[structopt(alias = "latest_sub")]
    LatestSub(LatestSubOpt),
    /// Shows compilation errors of a submission
    Errors(ErrorsOpt),
    /// Lists tasks of the contest
    #[structopt(alias = "get_tasks")]
    GetTasks(GetTasksOpt),
    /// Submits a source file
    Submit(SubmitOpt),
}

impl Run for Cmd {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        match self {
            Self::Whoami(opt) => opt.run(conf, cnsl),
            Self::Login(opt) => opt.run(conf, cnsl),
            Self::Ranking(opt) => opt.run(conf, cnsl),
            Self::LatestSub(opt) => opt.run(conf, cnsl),
            Self::Errors(opt) => opt.run(conf, cnsl),
            Self::GetTasks(opt) => opt.run(conf, cnsl),
            Self::Submit(opt) => opt.run(conf, cnsl),
        }
    }
}

/// Remote operation a command performs after logging in.
#[derive(IntoStaticStr, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    #[strum(serialize = "Ranking")]
    Ranking,
    #[strum(serialize = "Latest submission")]
    LatestSubmission,
    #[strum(serialize = "Getting errors")]
    GettingErrors,
    #[strum(serialize = "Getting tasks")]
    GettingTasks,
    #[strum(serialize = "Submit")]
    Submit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.into())
    }
}

/// Failure of a command, printed as its outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CmdError {
    #[error("{0}")]
    Validation(String),
    #[error("Login failed with: {0}, please check credentials")]
    Authentication(String),
    #[error("{action} failed with: {cause}, please check credentials")]
    Remote { action: Action, cause: String },
}

impl CmdError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Authentication(_) => "authentication",
            Self::Remote { .. } => "remote",
        }
    }
}

impl Serialize for CmdError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CmdError", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl Outcome for CmdError {
    fn is_error(&self) -> bool {
        true
    }
}

/// Logs in with `session` and performs one remote operation.
pub fn run_remote<T>(
    mut session: SessionClient,
    action: Action,
    f: impl FnOnce(&SessionClient) -> Result<T>,
) -> std::result::Result<T, CmdError> {
    session.authenticate()?;
    f(&session).map_err(|err| CmdError::Remote {
        action,
        cause: format!("{:#}", err),
    })
}

/// Boxes either the outcome of a command or its failure.
pub fn into_outcome<T: Outcome + 'static>(
    result: std::result::Result<T, CmdError>,
) -> Box<dyn Outcome> {
    match result {
        Ok(outcome) => Box::new(outcome),
        Err(err) => Box::new(err),
    }
}
