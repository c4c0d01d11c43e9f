use std::fmt;

use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{Outcome, Run};
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct WhoamiOpt {}

impl Run for WhoamiOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let creds = conf.load_credentials(cnsl)?;
        Ok(Box::new(WhoamiOutcome {
            username: creds.username().clone(),
        }))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct WhoamiOutcome {
    username: Option<String>,
}

impl fmt::Display for WhoamiOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.username {
            Some(username) => write!(f, "{}", username),
            None => write!(f, "Username not found in credentials, please log-in"),
        }
    }
}

impl Outcome for WhoamiOutcome {
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::cmd::tests::run_with;
    use crate::config::Credentials;
    use crate::service::MockJudge;
    use crate::GlobalOpt;

    #[test]
    fn prints_username_found_two_levels_up() -> anyhow::Result<()> {
        let test_dir = tempdir()?;
        let start_dir = test_dir.path().join("contest").join("task");
        fs::create_dir_all(&start_dir)?;
        fs::write(
            test_dir.path().join("creds.save"),
            r#"{"username":"alice","password":null,"link":null}"#,
        )?;

        let mock = MockJudge::default();
        let conf = Config::with_mock(&start_dir, GlobalOpt::default(), mock.clone())?;
        let outcome = WhoamiOpt {}.run(&conf, &mut Console::sink())?;

        assert_eq!(outcome.to_string(), "alice");
        assert!(!outcome.is_error());
        assert!(mock.calls().is_empty());
        assert!(!start_dir.join("creds.save").exists());
        Ok(())
    }

    #[test]
    fn prints_message_without_username() -> anyhow::Result<()> {
        let test_dir = tempdir()?;
        let creds = Credentials::new(None, Some("secret".into()), None);
        let outcome = run_with(&test_dir, Some(creds), &MockJudge::default(), &WhoamiOpt {})?;
        assert_eq!(
            outcome.to_string(),
            "Username not found in credentials, please log-in"
        );
        assert!(!outcome.is_error());
        Ok(())
    }

    #[test]
    fn creates_empty_credentials_file() -> anyhow::Result<()> {
        let test_dir = tempdir()?;
        let outcome = run_with(&test_dir, None, &MockJudge::default(), &WhoamiOpt {})?;
        assert_eq!(
            outcome.to_string(),
            "Username not found in credentials, please log-in"
        );
        assert_eq!(fs::read_to_string(test_dir.path().join("creds.save"))?, "");
        Ok(())
    }
}
