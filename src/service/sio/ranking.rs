use anyhow::Context as _;
use reqwest::blocking::Client;
use reqwest::Url;
use scraper::{ElementRef, Html};

use crate::model::RankingRow;
use crate::select;
use crate::service::scrape::{GetHtml, Scrape};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingPageBuilder<'a> {
    contest: &'a Url,
}

impl<'a> RankingPageBuilder<'a> {
    pub fn new(contest: &'a Url) -> Self {
        Self { contest }
    }

    pub fn build(self, client: &Client) -> Result<RankingPage> {
        self.get_html_restricted(client)
            .map(|html| RankingPage { content: html })
    }
}

impl GetHtml for RankingPageBuilder<'_> {
    fn url(&self) -> Result<Url> {
        self.contest
            .join("ranking/")
            .context("Could not parse ranking url")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingPage {
    content: Html,
}

impl RankingPage {
    /// Extracts rows in the order they appear on the page.
    pub fn extract_ranking(&self) -> Result<Vec<RankingRow>> {
        self.content
            .select(select!("table tbody tr"))
            .filter(|tr| tr.find_first(select!(".user-cell")).is_some())
            .map(|tr| RankingRowElem(tr).extract())
            .collect()
    }
}

impl Scrape for RankingPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

struct RankingRowElem<'a>(ElementRef<'a>);

impl RankingRowElem<'_> {
    fn extract(&self) -> Result<RankingRow> {
        let user_cell = self
            .find_first(select!(".user-cell"))
            .context("Could not find user cell")?;
        let name = user_cell.inner_text().trim().to_owned();
        // falls back to the display name when the user is not linked
        let username = user_cell
            .find_first(select!("a"))
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| href.trim_end_matches('/').rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| name.clone());
        let points_text = self
            .find_first(select!(".sum"))
            .or_else(|| self.0.select(select!("td")).last())
            .map(|td| td.inner_text().trim().to_owned())
            .context("Could not find points")?;
        let points = if points_text.is_empty() {
            0
        } else {
            points_text
                .parse()
                .with_context(|| format!("Could not parse points : {}", points_text))?
        };
        Ok(RankingRow::new(name, username, points))
    }
}

impl Scrape for RankingRowElem<'_> {
    fn elem(&self) -> ElementRef {
        self.0
    }
}
