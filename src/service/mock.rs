use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::anyhow;
use reqwest::Url;

use crate::model::{ErrorReport, Language, RankingRow, Submission, Task};
use crate::service::Judge;
use crate::{Error, Result};

/// In-memory judge that records every call.
///
/// Clones share the call log, so a clone can be handed to the code under test.
#[derive(Debug, Clone)]
pub struct MockJudge {
    password: String,
    ranking: Vec<RankingRow>,
    latest: Option<Submission>,
    errors: Option<ErrorReport>,
    tasks: Vec<Task>,
    send_status: u16,
    fail_action: bool,
    calls: Rc<RefCell<Vec<String>>>,
}

impl Default for MockJudge {
    fn default() -> Self {
        Self {
            password: "secret".to_owned(),
            ranking: Vec::new(),
            latest: None,
            errors: None,
            tasks: Vec::new(),
            send_status: 200,
            fail_action: false,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl MockJudge {
    pub fn with_ranking(mut self, ranking: Vec<RankingRow>) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn with_latest(mut self, latest: Submission) -> Self {
        self.latest = Some(latest);
        self
    }

    pub fn with_errors(mut self, errors: Option<ErrorReport>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_send_status(mut self, status: u16) -> Self {
        self.send_status = status;
        self
    }

    /// Makes every operation but login fail.
    pub fn failing(mut self) -> Self {
        self.fail_action = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if self.fail_action {
            Err(Error::msg("Received invalid response : 500 Internal Server Error"))
        } else {
            Ok(())
        }
    }
}

impl Judge for MockJudge {
    fn login(&mut self, user: &str, pass: &str, _link: &Url) -> Result<()> {
        self.calls.borrow_mut().push(format!("login {}", user));
        if pass == self.password {
            Ok(())
        } else {
            Err(Error::msg("Invalid username or password"))
        }
    }

    fn ranking(&self) -> Result<Vec<RankingRow>> {
        self.record("ranking".to_owned())?;
        Ok(self.ranking.clone())
    }

    fn check_latest(&self) -> Result<Submission> {
        self.record("check_latest".to_owned())?;
        self.latest
            .clone()
            .ok_or_else(|| anyhow!("Could not find any submission"))
    }

    fn check_errors(&self, submission_url: &str) -> Result<Option<ErrorReport>> {
        self.record(format!("check_errors {}", submission_url))?;
        Ok(self.errors.clone())
    }

    fn get_tasks(&self, only_not_completed: bool) -> Result<Vec<Task>> {
        self.record(format!("get_tasks {}", only_not_completed))?;
        Ok(self
            .tasks
            .iter()
            .filter(|task| !only_not_completed || !task.is_completed())
            .cloned()
            .collect())
    }

    fn send_file(&self, submission_url: &str, file: &Path, lang: Language) -> Result<u16> {
        self.record(format!(
            "send_file {} {} {}",
            submission_url,
            file.display(),
            lang
        ))?;
        Ok(self.send_status)
    }
}
