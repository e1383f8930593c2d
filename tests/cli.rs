use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Nothing listens on the discard port, so every request fails fast.
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

fn epigram_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("epigram").unwrap();
    cmd.current_dir(home.path())
        .env("EPIGRAM_HOME", home.path())
        .env("EPIGRAM_API_BASE_URL", UNREACHABLE_API)
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn history_starts_empty() {
    let home = TempDir::new().unwrap();
    epigram_cmd(&home)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent searches."));
}

#[test]
fn search_against_unreachable_api_shows_empty_state() {
    let home = TempDir::new().unwrap();
    epigram_cmd(&home)
        .args(["search", "작은", "습관"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results for '작은 습관'."));

    epigram_cmd(&home)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. 작은 습관"));

    assert!(home.path().join("storage.json").exists());
}

#[test]
fn repeated_search_moves_term_to_front() {
    let home = TempDir::new().unwrap();
    for term in ["foo", "bar", "foo"] {
        epigram_cmd(&home).args(["search", term]).assert().success();
    }

    epigram_cmd(&home)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. foo\n2. bar\n"));
}

#[test]
fn history_clear_with_yes_skips_confirmation() {
    let home = TempDir::new().unwrap();
    epigram_cmd(&home).args(["search", "꿈"]).assert().success();

    epigram_cmd(&home)
        .args(["history", "clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 search."));

    epigram_cmd(&home)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent searches."));
}

#[test]
fn history_clear_can_be_declined() {
    let home = TempDir::new().unwrap();
    epigram_cmd(&home).args(["search", "꿈"]).assert().success();

    epigram_cmd(&home)
        .args(["history", "clear"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    epigram_cmd(&home)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. 꿈"));
}

#[test]
fn signup_dry_run_reports_invalid_fields() {
    let home = TempDir::new().unwrap();
    epigram_cmd(&home)
        .args([
            "signup",
            "--email",
            "not-an-email",
            "--nickname",
            "에피",
            "--password",
            "abcd1234",
            "--password-confirmation",
            "abcd1235",
            "--dry-run",
        ])
        .write_stdin("")
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: 이메일 형식으로 작성해 주세요."))
        .stdout(predicate::str::contains("error: 비밀번호가 일치하지 않습니다."))
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn signup_dry_run_prompts_for_missing_fields() {
    let home = TempDir::new().unwrap();
    epigram_cmd(&home)
        .args(["signup", "--email", "me@example.com", "--dry-run"])
        .write_stdin("에피\nabcd1234\nabcd1234\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("All fields are valid."))
        .stdout(predicate::str::contains("••••••••"))
        .stdout(predicate::str::contains("abcd1234").not());
}

#[test]
fn write_requires_sign_in() {
    let home = TempDir::new().unwrap();
    epigram_cmd(&home)
        .args(["write", "--content", "배움에는 끝이 없다", "--author", "미상"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn config_set_and_get() {
    let home = TempDir::new().unwrap();
    epigram_cmd(&home)
        .args(["config", "page_size", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size set to 3"));

    epigram_cmd(&home)
        .args(["config", "page_size"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("3"));
}

#[test]
fn today_degrades_when_api_is_down() {
    let home = TempDir::new().unwrap();
    epigram_cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("No epigram for today."));
}
