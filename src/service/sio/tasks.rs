use anyhow::Context as _;
use reqwest::blocking::Client;
use reqwest::Url;
use scraper::{ElementRef, Html};

use crate::model::Task;
use crate::select;
use crate::service::scrape::{extract_link, GetHtml, Scrape};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksPageBuilder<'a> {
    contest: &'a Url,
}

impl<'a> TasksPageBuilder<'a> {
    pub fn new(contest: &'a Url) -> Self {
        Self { contest }
    }

    pub fn build(self, client: &Client) -> Result<TasksPage> {
        let base = self.url()?;
        let default_submit_url = self
            .contest
            .join("submit/")
            .context("Could not parse submit url")?;
        self.get_html_restricted(client).map(|html| TasksPage {
            base,
            default_submit_url,
            content: html,
        })
    }
}

impl GetHtml for TasksPageBuilder<'_> {
    fn url(&self) -> Result<Url> {
        self.contest.join("p/").context("Could not parse tasks url")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksPage {
    base: Url,
    default_submit_url: Url,
    content: Html,
}

impl TasksPage {
    pub fn extract_tasks(&self) -> Result<Vec<Task>> {
        self.content
            .select(select!("table tbody tr"))
            .map(TaskElem)
            // round headers span the whole table
            .filter(TaskElem::is_task)
            .map(|elem| elem.extract(&self.base, &self.default_submit_url))
            .collect()
    }
}

impl Scrape for TasksPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

struct TaskElem<'a>(ElementRef<'a>);

impl TaskElem<'_> {
    fn is_task(&self) -> bool {
        self.0.select(select!("td")).nth(1).is_some()
    }

    fn extract(&self, base: &Url, default_submit_url: &Url) -> Result<Task> {
        let mut tds = self.0.select(select!("td"));
        let code = tds
            .next()
            .map(|td| td.inner_text().trim().to_owned())
            .context("Could not find task code")?;
        let name_td = tds.next().context("Could not find task name")?;
        let name = name_td.inner_text().trim().to_owned();
        let id = extract_link(name_td, base)
            .with_context(|| format!("Could not find link to task : {}", code))?
            .to_string();
        let text_of = |elem: Option<ElementRef>| {
            elem.map(|e| e.inner_text().trim().to_owned())
                .unwrap_or_default()
        };
        let points = text_of(self.find_first(select!(".score")));
        let submissions_left = text_of(self.find_first(select!(".submissions-left")));
        let submit_url = self
            .find_first(select!("a.submit"))
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| base.join(href).ok())
            .unwrap_or_else(|| default_submit_url.clone())
            .to_string();
        Ok(Task::new(
            id,
            name,
            code,
            points,
            submissions_left,
            submit_url,
        ))
    }
}

impl Scrape for TaskElem<'_> {
    fn elem(&self) -> ElementRef {
        self.0
    }
}
