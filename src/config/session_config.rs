use std::time::Duration;

use anyhow::Context as _;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::redirect::Policy;

use crate::Result;

/// Settings of the http client used to talk to the judge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionConfig {
    timeout: Duration,
}

impl SessionConfig {
    pub const USER_AGENT: &'static str = concat!(
        env!("CARGO_PKG_NAME"),
        "-",
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("CARGO_PKG_DESCRIPTION"),
        ")"
    );

    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn get_client_builder(&self) -> ClientBuilder {
        Client::builder()
            .referer(false)
            .redirect(Policy::none()) // redirects manually
            .cookie_store(true) // session lives only as long as the client
            .user_agent(Self::USER_AGENT)
            .timeout(Some(self.timeout))
    }

    pub fn build_client(&self) -> Result<Client> {
        self.get_client_builder().build().context(
            "Could not setup client. \
             TLS backend cannot be initialized, or the resolver cannot load the system configuration.",
        )
    }
}
