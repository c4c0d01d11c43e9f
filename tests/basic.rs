use skcli_util::assert_matches;
use structopt::StructOpt;

use skcli::Opt;

#[test]
fn run_with_no_args() {
    let args = ["skcli"];
    let res = Opt::from_iter_safe(&args);
    assert_matches!(res => Err(_));
}

#[test]
fn parse_commands() {
    let tests: &[&[&str]] = &[
        &["skcli", "whoami"],
        &["skcli", "login", "--username", "alice", "--password", "secret"],
        &["skcli", "login", "--root-link", "https://szkopul.edu.pl/c/contest/"],
        &["skcli", "ranking"],
        &["skcli", "latest-sub", "--url"],
        &["skcli", "latest-sub", "--points"],
        &["skcli", "errors", "https://szkopul.edu.pl/c/contest/s/1/"],
        &["skcli", "get-tasks", "--only-not-completed"],
        &["skcli", "get-tasks", "--sub-url", "abc", "--task-url", "def"],
        &["skcli", "submit", "https://szkopul.edu.pl/c/contest/submit/", "main.c", "C"],
        &["skcli", "--timeout", "5s", "ranking"],
    ];
    for args in tests {
        let res = Opt::from_iter_safe(args.iter());
        assert_matches!(res => Ok(_));
    }
}

#[test]
fn parse_legacy_spellings() {
    let tests: &[&[&str]] = &[
        &["skcli", "login", "--rootLink", "https://szkopul.edu.pl/c/contest/"],
        &["skcli", "latest_sub", "--points"],
        &["skcli", "get_tasks", "--only_not_completed", "--subUrl", "abc"],
        &["skcli", "get_tasks", "--taskUrl", "abc"],
    ];
    for args in tests {
        let res = Opt::from_iter_safe(args.iter());
        assert_matches!(res => Ok(_));
    }
}

#[test]
fn reject_invalid_args() {
    let tests: &[&[&str]] = &[
        &["skcli", "unknown"],
        &["skcli", "errors"],
        &["skcli", "submit", "https://szkopul.edu.pl/c/contest/submit/", "main.c"],
        &["skcli", "--output", "xml", "whoami"],
        &["skcli", "--timeout", "soon", "whoami"],
    ];
    for args in tests {
        let res = Opt::from_iter_safe(args.iter());
        assert_matches!(res => Err(_));
    }
}
