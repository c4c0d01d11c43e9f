use std::fmt;
use std::path::Path;

use anyhow::Context as _;
use reqwest::Url;
use tracing::{debug, info};

use crate::cmd::CmdError;
use crate::config::Credentials;
use crate::model::{ErrorReport, Language, RankingRow, Submission, Task};
use crate::service::Judge;
use crate::{Error, Result};

/// A judge client bound to one set of credentials.
///
/// The session lives only as long as this value; nothing is persisted.
pub struct SessionClient {
    creds: Credentials,
    judge: Box<dyn Judge>,
    authenticated: bool,
}

impl SessionClient {
    pub fn new(creds: Credentials, judge: Box<dyn Judge>) -> Self {
        Self {
            creds,
            judge,
            authenticated: false,
        }
    }

    #[cfg(test)]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Logs in to the judge with the stored credentials.
    pub fn authenticate(&mut self) -> std::result::Result<(), CmdError> {
        self.try_authenticate()
            .map_err(|err| CmdError::Authentication(format!("{:#}", err)))
    }

    fn try_authenticate(&mut self) -> Result<()> {
        let user = required(self.creds.username(), "username")?;
        let pass = required(self.creds.password(), "password")?;
        let link = parse_link(required(self.creds.link(), "link")?)?;
        debug!("Logging in to {} as {}", link, user);
        self.judge.login(user, pass, &link)?;
        info!("Authenticated as {}", user);
        self.authenticated = true;
        Ok(())
    }

    fn judge(&self) -> Result<&dyn Judge> {
        if self.authenticated {
            Ok(self.judge.as_ref())
        } else {
            Err(Error::msg("Session is not authenticated"))
        }
    }

    pub fn ranking(&self) -> Result<Vec<RankingRow>> {
        self.judge()?.ranking()
    }

    pub fn check_latest(&self) -> Result<Submission> {
        self.judge()?.check_latest()
    }

    pub fn check_errors(&self, submission_url: &str) -> Result<Option<ErrorReport>> {
        self.judge()?.check_errors(submission_url)
    }

    pub fn get_tasks(&self, only_not_completed: bool) -> Result<Vec<Task>> {
        self.judge()?.get_tasks(only_not_completed)
    }

    pub fn send_file(&self, submission_url: &str, file: &Path, lang: Language) -> Result<u16> {
        self.judge()?.send_file(submission_url, file, lang)
    }
}

impl fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SessionClient")
            .field("username", self.creds.username())
            .field("link", self.creds.link())
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str> {
    field
        .as_deref()
        .with_context(|| format!("Missing {} in credentials", name))
}

/// Parses the root link of a contest so that relative paths resolve under it.
fn parse_link(link: &str) -> Result<Url> {
    let mut url =
        Url::parse(link.trim()).with_context(|| format!("Could not parse link : {}", link))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
