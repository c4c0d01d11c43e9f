use reqwest::blocking::Client;
use reqwest::Url;
use scraper::{ElementRef, Html};

use crate::model::ErrorReport;
use crate::service::scrape::{GetHtml, Scrape};
use crate::{regex, select, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPageBuilder {
    submission_url: Url,
}

impl ReportPageBuilder {
    pub fn new(submission_url: Url) -> Self {
        Self { submission_url }
    }

    pub fn build(self, client: &Client) -> Result<ReportPage> {
        self.get_html_restricted(client)
            .map(|html| ReportPage { content: html })
    }
}

impl GetHtml for ReportPageBuilder {
    fn url(&self) -> Result<Url> {
        Ok(self.submission_url.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPage {
    content: Html,
}

impl ReportPage {
    /// Collects compiler diagnostics shown on the submission page.
    ///
    /// Each `file:line:col: severity: message` line becomes the raw entry
    /// `severity::line,message`. Returns `None` if the page has no compiler
    /// output.
    pub fn extract_error_report(&self) -> Option<ErrorReport> {
        let output = self.find_first(select!("pre"))?;
        let errors = output
            .inner_text()
            .lines()
            .filter_map(|line| {
                regex!(r"^[^:]+:(\d+):(?:\d+:)?\s*([a-z ]+?):\s*(.*)$")
                    .captures(line.trim())
                    .map(|caps| format!("{}::{},{}", &caps[2], &caps[1], &caps[3]))
            })
            .collect();
        Some(ErrorReport::new(errors))
    }
}

impl Scrape for ReportPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}
