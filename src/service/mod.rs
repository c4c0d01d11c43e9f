use std::path::Path;

use reqwest::Url;

use crate::model::{ErrorReport, Language, RankingRow, Submission, Task};
use crate::Result;

#[cfg(test)]
mod mock;
mod scrape;
mod sio;

#[cfg(test)]
pub use mock::MockJudge;
pub use sio::SioJudge;

/// Operations of a judge platform.
///
/// `login` must succeed before any other operation is called.
pub trait Judge {
    fn login(&mut self, user: &str, pass: &str, link: &Url) -> Result<()>;

    fn ranking(&self) -> Result<Vec<RankingRow>>;

    fn check_latest(&self) -> Result<Submission>;

    /// Returns `None` if the judge reports no errors for the submission.
    fn check_errors(&self, submission_url: &str) -> Result<Option<ErrorReport>>;

    fn get_tasks(&self, only_not_completed: bool) -> Result<Vec<Task>>;

    /// Uploads `file` and returns the http status code of the response.
    fn send_file(&self, submission_url: &str, file: &Path, lang: Language) -> Result<u16>;
}
