use crate::common::command::{init_repository_dir, repository_dir, run_gitlet_command};
use crate::common::{BRANCHES_DIR, COMMITS_DIR, STAGING_FILE, list_dir_files, snapshot_metadata};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir.path().canonicalize()?.display().to_string();

    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty Gitlet repository in .+\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    assert!(repository_dir.path().join(STAGING_FILE).is_file());
    assert_eq!(list_dir_files(&repository_dir.path().join(BRANCHES_DIR)), vec!["master"]);

    let commits = list_dir_files(&repository_dir.path().join(COMMITS_DIR));
    assert_eq!(commits.len(), 1);
    assert!(commits[0].ends_with(".commit"));

    Ok(())
}

#[rstest]
fn every_repository_starts_from_the_same_root_commit(
    init_repository_dir: TempDir,
    #[from(repository_dir)] other_dir: TempDir,
) {
    run_gitlet_command(other_dir.path(), &["init"])
        .assert()
        .success();

    assert_eq!(
        list_dir_files(&init_repository_dir.path().join(COMMITS_DIR)),
        list_dir_files(&other_dir.path().join(COMMITS_DIR))
    );
}

#[rstest]
fn reinitializing_fails_without_touching_the_repository(init_repository_dir: TempDir) {
    let before = snapshot_metadata(init_repository_dir.path());

    run_gitlet_command(init_repository_dir.path(), &["init"])
        .assert()
        .failure()
        .code(1)
        .stdout("A Gitlet version-control system already exists in the current directory.\n");

    assert_eq!(snapshot_metadata(init_repository_dir.path()), before);
}

#[rstest]
#[case(&["status"])]
#[case(&["log"])]
#[case(&["global-log"])]
#[case(&["add", "wug.txt"])]
#[case(&["rm", "wug.txt"])]
#[case(&["commit", "message"])]
#[case(&["find", "message"])]
#[case(&["branch", "dev"])]
#[case(&["rm-branch", "dev"])]
#[case(&["checkout", "--", "wug.txt"])]
#[case(&["checkout", "dev"])]
fn commands_require_an_initialized_repository(repository_dir: TempDir, #[case] args: &[&str]) {
    run_gitlet_command(repository_dir.path(), args)
        .assert()
        .failure()
        .code(1)
        .stdout("Not in an initialized Gitlet directory.\n");

    assert!(!repository_dir.path().join(".gitlet").exists());
}

#[rstest]
fn unknown_command_is_a_usage_error(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["merge", "dev"])
        .assert()
        .failure()
        .code(2);
}
