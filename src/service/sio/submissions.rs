use anyhow::Context as _;
use reqwest::blocking::Client;
use reqwest::Url;
use scraper::{ElementRef, Html};

use crate::model::Submission;
use crate::select;
use crate::service::scrape::{extract_link, GetHtml, Scrape};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionsPageBuilder<'a> {
    contest: &'a Url,
}

impl<'a> SubmissionsPageBuilder<'a> {
    pub fn new(contest: &'a Url) -> Self {
        Self { contest }
    }

    pub fn build(self, client: &Client) -> Result<SubmissionsPage> {
        let base = self.url()?;
        self.get_html_restricted(client)
            .map(|html| SubmissionsPage {
                base,
                content: html,
            })
    }
}

impl GetHtml for SubmissionsPageBuilder<'_> {
    fn url(&self) -> Result<Url> {
        self.contest
            .join("submissions/")
            .context("Could not parse submissions url")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionsPage {
    base: Url,
    content: Html,
}

impl SubmissionsPage {
    /// The submission list is sorted newest first.
    pub fn extract_latest(&self) -> Result<Option<Submission>> {
        self.content
            .select(select!("table tbody tr"))
            .map(SubmissionElem)
            .find(SubmissionElem::is_submission)
            .map(|elem| elem.extract(&self.base))
            .transpose()
    }
}

impl Scrape for SubmissionsPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

struct SubmissionElem<'a>(ElementRef<'a>);

impl SubmissionElem<'_> {
    const COLUMNS: usize = 5;

    fn is_submission(&self) -> bool {
        self.0.select(select!("td")).count() >= Self::COLUMNS
    }

    fn extract(&self, base: &Url) -> Result<Submission> {
        let tds: Vec<_> = self.0.select(select!("td")).collect();
        let text = |i: usize| tds[i].inner_text().trim().to_owned();
        let url = extract_link(tds[0], base)
            .context("Could not find link to submission")?
            .to_string();
        Ok(Submission::new(
            text(0),
            url,
            text(1),
            text(2),
            text(3),
            text(4),
        ))
    }
}
