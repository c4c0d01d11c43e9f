use std::fmt;

use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{into_outcome, run_remote, Action, Outcome, Run};
use crate::model::{sort_ranking, RankingRow};
use crate::table::TitledTable;
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct RankingOpt {}

impl Run for RankingOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session(cnsl)?;
        let result = run_remote(session, Action::Ranking, |session| session.ranking());
        Ok(into_outcome(result.map(|mut ranking| {
            sort_ranking(&mut ranking);
            RankingOutcome { ranking }
        })))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankingOutcome {
    ranking: Vec<RankingRow>,
}

impl fmt::Display for RankingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut table = TitledTable::new("Ranking", &["Name", "Username", "Points"]);
        for row in &self.ranking {
            table.add_row(vec![
                row.name().to_owned(),
                row.username().to_owned(),
                row.points().to_string(),
            ]);
        }
        write!(f, "{}", table)
    }
}

impl Outcome for RankingOutcome {
    fn is_error(&self) -> bool {
        false
    }
}
