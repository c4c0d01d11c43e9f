use std::fmt;

use serde::Serialize;
use structopt::StructOpt;
use tracing::debug;

use crate::cmd::{into_outcome, Outcome, Run};
use crate::config::Credentials;
use crate::session::SessionClient;
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct LoginOpt {
    /// Username on the judge
    #[structopt(long, env = "SKCLI_USERNAME")]
    username: Option<String>,
    /// Password on the judge
    #[structopt(long, env = "SKCLI_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// Root link of the contest (e.g. https://szkopul.edu.pl/c/<contest>/)
    #[structopt(long, alias = "rootLink", env = "SKCLI_ROOT_LINK")]
    root_link: Option<String>,
}

impl Run for LoginOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let creds = Credentials::new(
            self.username.clone(),
            self.password.clone(),
            self.root_link.clone(),
        );
        // saved even if authentication fails
        conf.save_credentials(&creds, cnsl)?;
        debug!("Saved credentials of {:?}", creds.username());

        let mut session = SessionClient::new(creds.clone(), conf.build_judge()?);
        let result = session.authenticate();

        Ok(into_outcome(result.map(|_| LoginOutcome {
            username: creds.username().clone(),
        })))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginOutcome {
    username: Option<String>,
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Logged in successfully")
    }
}

impl Outcome for LoginOutcome {
    fn is_error(&self) -> bool {
        false
    }
}
