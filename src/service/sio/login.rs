use anyhow::{anyhow, Context as _};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use scraper::{ElementRef, Html};

use crate::service::scrape::{ExtractCsrfToken, GetHtml, Scrape};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPageBuilder<'a> {
    link: &'a Url,
}

impl<'a> LoginPageBuilder<'a> {
    const PATH: &'static str = "/login/";

    pub fn new(link: &'a Url) -> Self {
        Self { link }
    }

    pub fn build(self, client: &Client) -> Result<LoginPage<'a>> {
        let (status, html) = self.get_html(client)?;
        match status {
            StatusCode::OK => Ok(LoginPage {
                builder: self,
                content: html,
            }),
            _ => Err(anyhow!("Received invalid response : {}", status)),
        }
    }
}

impl GetHtml for LoginPageBuilder<'_> {
    fn url(&self) -> Result<Url> {
        self.link
            .join(Self::PATH)
            .with_context(|| format!("Could not find login page of {}", self.link))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPage<'a> {
    builder: LoginPageBuilder<'a>,
    content: Html,
}

impl LoginPage<'_> {
    pub fn url(&self) -> Result<Url> {
        self.builder.url()
    }
}

impl Scrape for LoginPage<'_> {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

impl ExtractCsrfToken for LoginPage<'_> {}
