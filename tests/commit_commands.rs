use crate::common::command::{
    head_of, index_of, init_repository_dir, mygit_commit, run_mygit_command, stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn commit_updates_head_master_log_and_clears_the_index(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let git_dir = dir.path().join(".mygit");

    let head = head_of(dir.path());
    assert_eq!(head.len(), 40);
    assert!(head.chars().all(|c| c.is_ascii_hexdigit()));

    let master = std::fs::read_to_string(git_dir.join("refs/heads/master"))?;
    assert_eq!(master.trim(), head);

    let log = std::fs::read_to_string(git_dir.join("logs/HEAD"))?;
    let lines = log.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 1);

    let fields = lines[0].split(' ').collect::<Vec<_>>();
    assert_eq!(fields[0], "0".repeat(40), "root commit logs a zero parent");
    assert_eq!(fields[1], head);
    assert!(lines[0].contains(" commit: init"));

    assert_eq!(index_of(dir.path()), "");

    Ok(())
}

#[rstest]
fn commit_prints_the_new_commit_hash(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("c.txt"), "new".to_string()));
    run_mygit_command(dir.path(), &["add", "c.txt"]).assert().success();

    let output = stdout_of(mygit_commit(dir.path(), "add c"));
    assert_eq!(output.trim(), head_of(dir.path()));

    Ok(())
}

#[rstest]
fn second_commit_records_its_parent(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let first = head_of(dir.path());

    write_file(FileSpec::new(dir.path().join("a.txt"), "hi".to_string()));
    run_mygit_command(dir.path(), &["add", "a.txt"]).assert().success();
    mygit_commit(dir.path(), "update a").assert().success();

    let second = head_of(dir.path());
    assert_ne!(first, second);

    let log = std::fs::read_to_string(dir.path().join(".mygit/logs/HEAD"))?;
    let lines = log.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with(&format!("{} {}", first, second)));

    Ok(())
}

#[rstest]
fn commit_with_an_empty_index_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    run_mygit_command(dir.path(), &["init"]).assert().success();

    mygit_commit(dir.path(), "empty")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));
}

#[rstest]
fn commit_without_a_message_uses_the_default() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    run_mygit_command(dir.path(), &["init"]).assert().success();
    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    run_mygit_command(dir.path(), &["add", "a.txt"]).assert().success();

    run_mygit_command(dir.path(), &["commit"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No commit message provided, using default.",
        ));

    let log = std::fs::read_to_string(dir.path().join(".mygit/logs/HEAD")).unwrap();
    assert!(log.contains("commit: Default commit message"));
}

#[rstest]
fn log_lists_commits_newest_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let first = head_of(dir.path());

    write_file(FileSpec::new(dir.path().join("a.txt"), "hi".to_string()));
    run_mygit_command(dir.path(), &["add", "a.txt"]).assert().success();
    mygit_commit(dir.path(), "update a").assert().success();
    let second = head_of(dir.path());

    let output = stdout_of(run_mygit_command(dir.path(), &["log"]));

    let first_pos = output.find(&format!("Commit: {}", first)).unwrap();
    let second_pos = output.find(&format!("Commit: {}", second)).unwrap();
    assert!(second_pos < first_pos, "newest commit prints first");

    assert!(output.contains(&format!("Parent: {}", first)));
    assert!(output.contains("Message: update a"));
    assert!(output.contains("Committer: "));

    // the root commit block carries no parent line
    let root_block = &output[first_pos..];
    assert!(!root_block.contains("Parent: "));

    Ok(())
}

#[rstest]
fn log_in_a_fresh_repository_reports_no_commits() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    run_mygit_command(dir.path(), &["init"]).assert().success();

    run_mygit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No commits found"));
}
