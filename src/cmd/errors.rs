use std::fmt;

use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{into_outcome, run_remote, Action, Outcome, Run};
use crate::model::ErrorEntry;
use crate::table::TitledTable;
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct ErrorsOpt {
    /// Url of the submission
    #[structopt(name = "sub-url")]
    sub_url: String,
}

impl Run for ErrorsOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session(cnsl)?;
        let result = run_remote(session, Action::GettingErrors, |session| {
            match session.check_errors(&self.sub_url)? {
                Some(report) if !report.is_empty() => report.parse_entries(),
                _ => Ok(Vec::new()),
            }
        });
        Ok(into_outcome(result.map(|errors| ErrorsOutcome { errors })))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorsOutcome {
    errors: Vec<ErrorEntry>,
}

impl fmt::Display for ErrorsOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "No errors found");
        }
        let mut table = TitledTable::new("Errors", &["Error", "Line", "Message"]);
        for entry in &self.errors {
            table.add_row(&[entry.error(), entry.line(), entry.message()]);
        }
        write!(f, "{}", table)
    }
}

impl Outcome for ErrorsOutcome {
    fn is_error(&self) -> bool {
        false
    }
}
