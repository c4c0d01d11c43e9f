use anyhow::{anyhow, Context as _};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::select;
use crate::{Error, Result};

pub trait GetHtml {
    fn url(&self) -> Result<Url>;

    fn get_html(&self, client: &Client) -> Result<(StatusCode, Html)> {
        let url = self.url()?;
        let res = client
            .get(url.clone())
            .send()
            .with_context(|| format!("Could not send request : {}", url))?;
        let status = res.status();
        debug!("{:7} {} ... {}", "GET", url, status);
        let html = res.text().map(|text| Html::parse_document(&text))?;
        Ok((status, html))
    }

    /// Gets a page that is visible only to logged in users.
    fn get_html_restricted(&self, client: &Client) -> Result<Html> {
        let (status, html) = self.get_html(client)?;
        match status {
            StatusCode::OK => Ok(html),
            StatusCode::FOUND => Err(Error::msg("User not logged in")),
            StatusCode::FORBIDDEN => Err(Error::msg(
                "Permission denied. Check if you are registered for the contest.",
            )),
            StatusCode::NOT_FOUND => Err(Error::msg(
                "Could not find page. Check if the contest link is correct.",
            )),
            _ => Err(anyhow!("Received invalid response : {}", status)),
        }
    }
}

pub trait Scrape {
    fn elem(&self) -> ElementRef;

    fn find_first(&self, selector: &Selector) -> Option<ElementRef> {
        self.elem().select(selector).next()
    }

    fn inner_text(&self) -> String {
        self.elem().text().fold(String::new(), |mut ret, s| {
            ret.push_str(s);
            ret
        })
    }
}

impl Scrape for ElementRef<'_> {
    fn elem(&self) -> ElementRef {
        *self
    }
}

pub trait ExtractCsrfToken: Scrape {
    fn extract_csrf_token(&self) -> Result<String> {
        let token = self
            .find_first(select!("[name=\"csrfmiddlewaretoken\"]"))
            .context("Could not extract csrf token")?
            .value()
            .attr("value")
            .context("Could not find csrfmiddlewaretoken value attr")?
            .to_owned();
        if token.is_empty() {
            Err(Error::msg("Found empty csrf token"))
        } else {
            Ok(token)
        }
    }
}

/// Resolves `href` of the first link in the element against `base`.
pub fn extract_link(elem: ElementRef, base: &Url) -> Option<Url> {
    elem.find_first(select!("a"))
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| base.join(href).ok())
}
