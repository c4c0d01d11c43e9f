use std::fmt;

use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{into_outcome, run_remote, Action, Outcome, Run};
use crate::model::Task;
use crate::table::TitledTable;
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct GetTasksOpt {
    /// Lists only tasks without full points
    #[structopt(long, alias = "only_not_completed")]
    only_not_completed: bool,
    /// Prints only the name of the task with the given code
    #[structopt(long, alias = "subUrl", value_name = "code")]
    sub_url: Option<String>,
    /// Prints only the url of the task with the given code
    #[structopt(long, alias = "taskUrl", value_name = "code")]
    task_url: Option<String>,
}

impl GetTasksOpt {
    /// `--sub-url` takes precedence over `--task-url`.
    fn lookup(&self) -> Option<(TaskField, &str)> {
        if let Some(code) = &self.sub_url {
            Some((TaskField::Name, code.as_str()))
        } else if let Some(code) = &self.task_url {
            Some((TaskField::Id, code.as_str()))
        } else {
            None
        }
    }
}

impl Run for GetTasksOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session(cnsl)?;
        let result = run_remote(session, Action::GettingTasks, |session| {
            session.get_tasks(self.only_not_completed)
        });
        Ok(into_outcome(result.map(|tasks| match self.lookup() {
            Some((field, code)) => GetTasksOutcome::Lookup {
                code: code.to_owned(),
                found: tasks
                    .iter()
                    .find(|task| task.code() == code)
                    .map(|task| field.of(task).to_owned()),
            },
            None => GetTasksOutcome::List { tasks },
        })))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum TaskField {
    Name,
    Id,
}

impl TaskField {
    fn of(self, task: &Task) -> &str {
        match self {
            Self::Name => task.name(),
            Self::Id => task.id(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum GetTasksOutcome {
    List { tasks: Vec<Task> },
    Lookup { code: String, found: Option<String> },
}

impl fmt::Display for GetTasksOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Lookup {
                found: Some(value), ..
            } => write!(f, "{}", value),
            Self::Lookup { code, found: None } => {
                write!(f, "No task found with given name {}", code)
            }
            Self::List { tasks } => {
                let mut table = TitledTable::new(
                    "Tasks",
                    &[
                        "Task code",
                        "Task",
                        "Points",
                        "Submissions left",
                        "Task url",
                        "Submit",
                    ],
                );
                for task in tasks {
                    table.add_row(&[
                        task.code(),
                        task.name(),
                        task.points(),
                        task.submissions_left(),
                        task.id(),
                        task.submit_url(),
                    ]);
                }
                write!(f, "{}", table)
            }
        }
    }
}

impl Outcome for GetTasksOutcome {
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use structopt::StructOpt as _;
    use tempfile::tempdir;

    use super::*;
    use crate::cmd::tests::run_with;
    use crate::config::Credentials;
    use crate::service::MockJudge;

    fn mock() -> MockJudge {
        MockJudge::default().with_tasks(vec![
            Task::new(
                "https://judge.test/c/contest/p/abc/",
                "Sum of two",
                "abc",
                "100",
                "9",
                "https://judge.test/c/contest/submit/",
            ),
            Task::new(
                "https://judge.test/c/contest/p/def/",
                "Graph walk",
                "def",
                "40",
                "10",
                "https://judge.test/c/contest/submit/",
            ),
        ])
    }

    fn run(args: &[&str], mock: &MockJudge) -> anyhow::Result<String> {
        let opt = GetTasksOpt::from_iter_safe(args)?;
        let test_dir = tempdir()?;
        let outcome = run_with(&test_dir, Some(Credentials::test_default()), mock, &opt)?;
        assert!(!outcome.is_error());
        Ok(outcome.to_string())
    }

    #[test]
    fn prints_name_for_sub_url() -> anyhow::Result<()> {
        assert_eq!(run(&["get-tasks", "--sub-url", "def"], &mock())?, "Graph walk");
        Ok(())
    }

    #[test]
    fn prints_id_for_task_url() -> anyhow::Result<()> {
        assert_eq!(
            run(&["get-tasks", "--task-url", "abc"], &mock())?,
            "https://judge.test/c/contest/p/abc/"
        );
        Ok(())
    }

    #[test]
    fn prints_message_for_unknown_code() -> anyhow::Result<()> {
        assert_eq!(
            run(&["get-tasks", "--sub-url", "xyz"], &mock())?,
            "No task found with given name xyz"
        );
        Ok(())
    }

    #[test]
    fn lookup_respects_only_not_completed() -> anyhow::Result<()> {
        let mock = mock();
        assert_eq!(
            run(&["get-tasks", "--only-not-completed", "--sub-url", "abc"], &mock)?,
            "No task found with given name abc"
        );
        assert_eq!(mock.calls(), ["login alice", "get_tasks true"]);
        Ok(())
    }

    #[test]
    fn prints_table() -> anyhow::Result<()> {
        let rendered = run(&["get-tasks"], &mock())?;
        assert!(rendered.starts_with("Tasks\n"));
        assert!(rendered.contains("Submissions left"));
        assert!(rendered.contains("Sum of two"));
        assert!(rendered.contains("https://judge.test/c/contest/p/def/"));
        Ok(())
    }

    #[test]
    fn accepts_camel_case_lookup_flags() -> anyhow::Result<()> {
        assert_eq!(run(&["get-tasks", "--subUrl", "def"], &mock())?, "Graph walk");
        assert_eq!(
            run(&["get-tasks", "--taskUrl", "def"], &mock())?,
            "https://judge.test/c/contest/p/def/"
        );
        Ok(())
    }
}
