use std::fmt;
use std::path::PathBuf;

use anyhow::anyhow;
use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{into_outcome, run_remote, Action, CmdError, Outcome, Run};
use crate::model::Language;
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct SubmitOpt {
    /// Url of the submission form
    #[structopt(name = "sub-url")]
    sub_url: String,
    /// Source file to submit
    #[structopt(name = "file", parse(from_os_str))]
    file: PathBuf,
    /// Language of the source file (C, C++, Pascal or python)
    #[structopt(name = "filetype")]
    filetype: String,
}

impl Run for SubmitOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let lang: Language = match self.filetype.parse() {
            Ok(lang) => lang,
            Err(_) => {
                return Ok(Box::new(CmdError::Validation(format!(
                    "Wrong filetype selected, please choose one of : {}",
                    Language::names()
                ))))
            }
        };

        let session = conf.open_session(cnsl)?;
        let result = run_remote(session, Action::Submit, |session| {
            let status = session.send_file(&self.sub_url, &self.file, lang)?;
            if status >= 400 {
                return Err(anyhow!("wrong response code {}", status));
            }
            Ok(status)
        });
        Ok(into_outcome(result.map(|status| SubmitOutcome { status })))
    }
}

#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmitOutcome {
    status: u16,
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, _f: &mut fmt::Formatter) -> fmt::Result {
        Ok(())
    }
}

impl Outcome for SubmitOutcome {
    fn is_error(&self) -> bool {
        false
    }
}
