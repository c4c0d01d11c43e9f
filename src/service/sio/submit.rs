use std::path::Path;

use anyhow::Context as _;
use reqwest::blocking::{multipart, Client};
use reqwest::header::REFERER;
use reqwest::{StatusCode, Url};
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::model::Language;
use crate::service::scrape::{ExtractCsrfToken, GetHtml, Scrape};
use crate::{select, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPageBuilder {
    submission_url: Url,
}

impl SubmitPageBuilder {
    pub fn new(submission_url: Url) -> Self {
        Self { submission_url }
    }

    pub fn build(self, client: &Client) -> Result<SubmitPage> {
        self.get_html_restricted(client).map(|html| SubmitPage {
            builder: self,
            content: html,
        })
    }
}

impl GetHtml for SubmitPageBuilder {
    fn url(&self) -> Result<Url> {
        Ok(self.submission_url.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPage {
    builder: SubmitPageBuilder,
    content: Html,
}

impl SubmitPage {
    /// Uploads `file` and returns the status of the response.
    pub fn submit(&self, client: &Client, file: &Path, lang: Language) -> Result<StatusCode> {
        let url = self.builder.url()?;
        let mut form = multipart::Form::new()
            .text("csrfmiddlewaretoken", self.extract_csrf_token()?)
            .text("kind", "NORMAL")
            .text("prog_lang", prog_lang(lang));
        if let Some(problem_instance_id) = self.extract_problem_instance_id() {
            form = form.text("problem_instance_id", problem_instance_id);
        }
        let form = form
            .file("file", file)
            .with_context(|| format!("Could not read file : {}", file.display()))?;
        let res = client
            .post(url.clone())
            .header(REFERER, url.as_str())
            .multipart(form)
            .send()
            .context("Could not send submission")?;
        debug!("{:7} {} ... {}", "POST", url, res.status());
        Ok(res.status())
    }

    /// Finds the problem preselected by the submission link, if any.
    fn extract_problem_instance_id(&self) -> Option<String> {
        self.find_first(select!("input[name=\"problem_instance_id\"]"))
            .or_else(|| {
                self.find_first(select!(
                    "select[name=\"problem_instance_id\"] option[selected]"
                ))
            })
            .and_then(|elem| elem.value().attr("value"))
            .filter(|value| !value.is_empty())
            .map(ToOwned::to_owned)
    }
}

impl Scrape for SubmitPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

impl ExtractCsrfToken for SubmitPage {}

fn prog_lang(lang: Language) -> &'static str {
    match lang {
        Language::C => "C",
        Language::Cpp => "C++",
        Language::Pascal => "Pascal",
        Language::Python => "Python",
    }
}
