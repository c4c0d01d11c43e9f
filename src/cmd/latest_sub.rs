use std::fmt;

use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{into_outcome, run_remote, Action, Outcome, Run};
use crate::model::Submission;
use crate::table::TitledTable;
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct LatestSubOpt {
    /// Prints only the url of the submission
    #[structopt(long)]
    url: bool,
    /// Prints only the points of the submission
    #[structopt(long)]
    points: bool,
}

impl Run for LatestSubOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session(cnsl)?;
        let result = run_remote(session, Action::LatestSubmission, |session| {
            session.check_latest()
        });
        let view = if self.url {
            LatestSubView::Url
        } else if self.points {
            LatestSubView::Points
        } else {
            LatestSubView::Table
        };
        Ok(into_outcome(
            result.map(|submission| LatestSubOutcome { submission, view }),
        ))
    }
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
enum LatestSubView {
    Url,
    Points,
    Table,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LatestSubOutcome {
    submission: Submission,
    #[serde(skip)]
    view: LatestSubView,
}

impl fmt::Display for LatestSubOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sub = &self.submission;
        match self.view {
            LatestSubView::Url => write!(f, "{}", sub.url()),
            LatestSubView::Points => write!(f, "{}", sub.points()),
            LatestSubView::Table => {
                let mut table = TitledTable::new(
                    "Latest Submission",
                    &["Timestamp", "Submission url", "Task", "Points"],
                );
                table.add_row(&[sub.timestamp(), sub.url(), sub.task(), sub.points()]);
                write!(f, "{}", table)
            }
        }
    }
}

impl Outcome for LatestSubOutcome {
    fn is_error(&self) -> bool {
        false
    }
}
