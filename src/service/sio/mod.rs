//! Judge backed by a SIO2 (oioioi) web frontend such as Szkopuł.
//!
//! All pages are resolved against the root link of the contest,
//! e.g. `https://szkopul.edu.pl/c/<contest>/`.

use std::path::Path;

use anyhow::{anyhow, Context as _};
use maplit::hashmap;
use reqwest::blocking::Client;
use reqwest::header::REFERER;
use reqwest::{StatusCode, Url};
use tracing::{debug, info};

use crate::model::{ErrorReport, Language, RankingRow, Submission, Task};
use crate::service::scrape::ExtractCsrfToken as _;
use crate::service::Judge;
use crate::{Error, Result};

mod login;
mod ranking;
mod report;
mod submissions;
mod submit;
mod tasks;

use login::LoginPageBuilder;
use ranking::RankingPageBuilder;
use report::ReportPageBuilder;
use submissions::SubmissionsPageBuilder;
use submit::SubmitPageBuilder;
use tasks::TasksPageBuilder;

#[derive(Debug)]
pub struct SioJudge {
    client: Client,
    contest: Option<Url>,
}

impl SioJudge {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            contest: None,
        }
    }

    fn contest(&self) -> Result<&Url> {
        self.contest
            .as_ref()
            .context("Not logged in to the judge yet")
    }
}

impl Judge for SioJudge {
    fn login(&mut self, user: &str, pass: &str, link: &Url) -> Result<()> {
        let client = &self.client;
        let login_page = LoginPageBuilder::new(link).build(client)?;

        // Post form data to log in to service
        let url = login_page.url()?;
        let payload = hashmap!(
            "csrfmiddlewaretoken" => login_page.extract_csrf_token()?,
            "auth-username" => user.to_owned(),
            "auth-password" => pass.to_owned(),
            "login_view-current_step" => "auth".to_owned(),
        );
        let res = client
            .post(url.clone())
            .header(REFERER, url.as_str())
            .form(&payload)
            .send()
            .context("Could not send login request")?;
        debug!("{:7} {} ... {}", "POST", url, res.status());

        // Django redirects only after successful authentication
        match res.status() {
            StatusCode::FOUND => {}
            StatusCode::OK => return Err(Error::msg("Invalid username or password")),
            status => return Err(anyhow!("Received invalid response : {}", status)),
        }

        info!("Logged in to {} as {}", link, user);
        self.contest = Some(link.clone());
        Ok(())
    }

    fn ranking(&self) -> Result<Vec<RankingRow>> {
        RankingPageBuilder::new(self.contest()?)
            .build(&self.client)?
            .extract_ranking()
    }

    fn check_latest(&self) -> Result<Submission> {
        SubmissionsPageBuilder::new(self.contest()?)
            .build(&self.client)?
            .extract_latest()?
            .context("Could not find any submission")
    }

    fn check_errors(&self, submission_url: &str) -> Result<Option<ErrorReport>> {
        let url = self
            .contest()?
            .join(submission_url)
            .with_context(|| format!("Could not parse submission url : {}", submission_url))?;
        Ok(ReportPageBuilder::new(url)
            .build(&self.client)?
            .extract_error_report())
    }

    fn get_tasks(&self, only_not_completed: bool) -> Result<Vec<Task>> {
        let tasks = TasksPageBuilder::new(self.contest()?)
            .build(&self.client)?
            .extract_tasks()?;
        Ok(tasks
            .into_iter()
            .filter(|task| !only_not_completed || !task.is_completed())
            .collect())
    }

    fn send_file(&self, submission_url: &str, file: &Path, lang: Language) -> Result<u16> {
        let url = self
            .contest()?
            .join(submission_url)
            .with_context(|| format!("Could not parse submission url : {}", submission_url))?;
        let submit_page = SubmitPageBuilder::new(url).build(&self.client)?;
        let status = submit_page.submit(&self.client, file, lang)?;
        Ok(status.as_u16())
    }
}
