use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use derive_new::new;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit containing `a.txt` = "hello" and
/// `dir/b.txt` = "world"
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_mygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("a.txt"), "hello".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("dir").join("b.txt"),
        "world".to_string(),
    );
    write_file(file2);

    run_mygit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    mygit_commit(repository_dir.path(), "init").assert().success();

    repository_dir
}

pub fn run_mygit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("mygit").expect("Failed to find mygit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
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

pub fn mygit_commit(dir: &Path, message: &str) -> Command {
    let author = generate_random_author();
    let mut cmd = run_mygit_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", &author.name),
        ("GIT_AUTHOR_EMAIL", &author.email),
    ]);
    cmd
}

/// Read the current HEAD commit hash
pub fn head_of(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".mygit").join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

/// Read the raw index file
pub fn index_of(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".mygit").join("index")).expect("Failed to read index")
}

/// Capture a command's stdout as a string, asserting success
pub fn stdout_of(mut cmd: Command) -> String {
    let assertion = cmd.assert().success();
    String::from_utf8(assertion.get_output().stdout.clone()).expect("stdout was not UTF-8")
}
