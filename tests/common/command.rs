use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use derive_new::new;
use rstest::fixture;
use std::path::Path;

/// Fixed author date so log output is predictable
pub const AUTHOR_DATE: &str = "Wed, 01 May 2024 12:00:00 +0000";
pub const READABLE_AUTHOR_DATE: &str = "Wed May 01 12:00:00 2024 +0000";
pub const ROOT_DATE: &str = "Thu Jan 01 00:00:00 1970 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with `wug.txt` ("a") and `notwug.txt` ("b") committed as "added wug"
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    write_file(FileSpec::new(
        init_repository_dir.path().join("wug.txt"),
        "a".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("notwug.txt"),
        "b".to_string(),
    ));

    run_gitlet_command(init_repository_dir.path(), &["add", "wug.txt"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["add", "notwug.txt"])
        .assert()
        .success();
    gitlet_commit(init_repository_dir.path(), "added wug")
        .assert()
        .success();

    init_repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let author = generate_random_author();

    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.envs(vec![
        ("NO_PAGER", "1"),
        ("GITLET_AUTHOR_NAME", author.name.as_str()),
        ("GITLET_AUTHOR_EMAIL", author.email.as_str()),
        ("GITLET_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd.env_remove("GITLET_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    run_gitlet_command(dir, &["commit", message])
}

/// Stage every given file and commit it with `message`
pub fn add_and_commit(dir: &Path, files: &[&str], message: &str) {
    for file in files {
        run_gitlet_command(dir, &["add", file]).assert().success();
    }
    gitlet_commit(dir, message).assert().success();
}

/// Commit IDs printed by `log`, newest first
pub fn log_commit_ids(dir: &Path) -> Vec<String> {
    let output = run_gitlet_command(dir, &["log"])
        .output()
        .expect("Failed to run gitlet log");
    assert!(output.status.success(), "gitlet log failed");

    String::from_utf8(output.stdout)
        .expect("log output is not UTF-8")
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}

pub fn head_commit_id(dir: &Path) -> String {
    log_commit_ids(dir)
        .into_iter()
        .next()
        .expect("log printed no commits")
}

#[derive(Debug, Clone, new)]
struct RandomAuthor {
    name: String,
    email: String,
}

fn generate_random_author() -> RandomAuthor {
    use fake::Fake;
    use fake::faker::internet::en::FreeEmail;
    use fake::faker::name::en::Name;

    let name = Name().fake::<String>().replace(" ", "_");
    let email = FreeEmail().fake::<String>();
    RandomAuthor::new(name, email)
}
