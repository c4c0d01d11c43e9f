use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Context as _};
use getset::{CopyGetters, Getters};
use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Serialize, Deserialize, Getters, CopyGetters, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankingRow {
    #[get = "pub"]
    name: String,
    #[get = "pub"]
    username: String,
    #[get_copy = "pub"]
    points: u32,
}

impl RankingRow {
    pub fn new(name: impl Into<String>, username: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            points,
        }
    }
}

/// Sorts rows by points in descending order.
///
/// Rows with equal points keep their original relative order.
pub fn sort_ranking(rows: &mut [RankingRow]) {
    rows.sort_by(|a, b| b.points.cmp(&a.points));
}

#[derive(Serialize, Deserialize, Getters, Debug, Clone, PartialEq, Eq, Hash)]
#[get = "pub"]
pub struct Submission {
    timestamp: String,
    url: String,
    task: String,
    kind: String,
    status: String,
    points: String,
}

impl Submission {
    pub fn new(
        timestamp: impl Into<String>,
        url: impl Into<String>,
        task: impl Into<String>,
        kind: impl Into<String>,
        status: impl Into<String>,
        points: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            url: url.into(),
            task: task.into(),
            kind: kind.into(),
            status: status.into(),
            points: points.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Getters, Debug, Clone, PartialEq, Eq, Hash)]
#[get = "pub"]
pub struct Task {
    /// Internal id of the task (url of the task statement on SIO2)
    id: String,
    name: String,
    /// Short code such as `abc`
    code: String,
    points: String,
    submissions_left: String,
    submit_url: String,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
        points: impl Into<String>,
        submissions_left: impl Into<String>,
        submit_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            points: points.into(),
            submissions_left: submissions_left.into(),
            submit_url: submit_url.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.points.trim().parse::<u32>().map_or(false, |p| p >= 100)
    }
}

/// Raw error list of a submission as returned by the judge.
#[derive(Serialize, Deserialize, Getters, Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ErrorReport {
    #[get = "pub"]
    errors: Vec<String>,
}

impl ErrorReport {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn parse_entries(&self) -> crate::Result<Vec<ErrorEntry>> {
        self.errors.iter().map(|raw| raw.parse()).collect()
    }
}

/// One compiler or runtime error.
///
/// Parsed from `kind:category:line,message`; `error` is `kind` and
/// `category` concatenated.
#[derive(Serialize, Deserialize, Getters, Debug, Clone, PartialEq, Eq, Hash)]
#[get = "pub"]
pub struct ErrorEntry {
    error: String,
    line: String,
    message: String,
}

impl FromStr for ErrorEntry {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (head, message) = s
            .split_once(',')
            .with_context(|| format!("Could not find message in error entry : {}", s))?;
        let mut fields = head.split(':');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(kind), Some(category), Some(line)) => Ok(Self {
                error: format!("{}{}", kind, category),
                line: line.to_owned(),
                message: message.to_owned(),
            }),
            _ => Err(anyhow!("Found malformed error entry : {}", s)),
        }
    }
}

#[derive(
    Serialize, Deserialize, EnumString, IntoStaticStr, Debug, Copy, Clone, PartialEq, Eq, Hash,
)]
pub enum Language {
    #[strum(serialize = "C")]
    #[serde(rename = "C")]
    C,
    #[strum(serialize = "C++")]
    #[serde(rename = "C++")]
    Cpp,
    #[strum(serialize = "Pascal")]
    #[serde(rename = "Pascal")]
    Pascal,
    #[strum(serialize = "python")]
    #[serde(rename = "python")]
    Python,
}

impl Language {
    pub const ALL: [Language; 4] = [Self::C, Self::Cpp, Self::Pascal, Self::Python];

    /// Comma separated names of all the languages.
    pub fn names() -> String {
        Self::ALL.iter().map(|lang| lang.to_string()).join(", ")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skcli_util::assert_matches;

    #[test]
    fn test_sort_ranking_desc_and_stable() {
        let mut rows = vec![
            RankingRow::new("a", "a", 10),
            RankingRow::new("b", "b", 30),
            RankingRow::new("c", "c", 10),
            RankingRow::new("d", "d", 30),
            RankingRow::new("e", "e", 0),
        ];
        sort_ranking(&mut rows);
        let order: Vec<&str> = rows.iter().map(|row| row.username().as_str()).collect();
        assert_eq!(order, ["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_parse_error_entry() -> anyhow::Result<()> {
        let tests = &[
            ("cannot:a:12,undefined reference", ("cannota", "12", "undefined reference")),
            (
                "cannot find symbol:a:12,undefined reference",
                ("cannot find symbola", "12", "undefined reference"),
            ),
            ("error::7,expected ';', found '}'", ("error", "7", "expected ';', found '}'")),
            ("a:b:3:extra,msg", ("ab", "3", "msg")),
        ];
        for (raw, (error, line, message)) in tests {
            let entry: ErrorEntry = raw.parse()?;
            assert_eq!(entry.error(), error);
            assert_eq!(entry.line(), line);
            assert_eq!(entry.message(), message);
        }
        Ok(())
    }

    #[test]
    fn test_parse_error_entry_malformed() {
        for raw in &["no comma:a:1", "only:two,msg", ",msg", ""] {
            assert_matches!(raw.parse::<ErrorEntry>() => Err(_));
        }
    }

    #[test]
    fn test_error_report_from_json() -> anyhow::Result<()> {
        let report: ErrorReport = serde_json::from_str(r#"{"errors": ["a:b:1,c"]}"#)?;
        assert!(!report.is_empty());
        assert_eq!(report.parse_entries()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("C".parse::<Language>().ok(), Some(Language::C));
        assert_eq!("C++".parse::<Language>().ok(), Some(Language::Cpp));
        assert_eq!("Pascal".parse::<Language>().ok(), Some(Language::Pascal));
        assert_eq!("python".parse::<Language>().ok(), Some(Language::Python));
        for name in &["c", "Python", "cpp", "Java", ""] {
            assert_matches!(name.parse::<Language>() => Err(_));
        }
    }

    #[test]
    fn test_language_names() {
        assert_eq!(Language::names(), "C, C++, Pascal, python");
    }

    #[test]
    fn test_task_is_completed() {
        let task = |points| Task::new("id", "name", "abc", points, "10", "url");
        assert!(task("100").is_completed());
        assert!(!task("87").is_completed());
        assert!(!task("").is_completed());
    }
}
