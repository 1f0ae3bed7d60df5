//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("pith")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input() {
    cmd().arg(get_fixture_path("article.html")).assert().success();
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("article.html")).unwrap();
    cmd().arg("-").write_stdin(html).assert().success();
}

#[test]
fn test_cli_html_format() {
    cmd()
        .args(["-f", "html", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("<article"))
        .stdout(predicate::str::contains("hill fort"));
}

#[test]
fn test_cli_text_format() {
    cmd()
        .args(["-f", "text", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("hill fort"))
        .stdout(predicate::str::contains("<article").not());
}

#[test]
fn test_cli_prunes_boilerplate() {
    cmd()
        .arg(get_fixture_path("article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Subscribe now").not())
        .stdout(predicate::str::contains("Site map").not());
}

#[test]
fn test_cli_standard_method() {
    cmd()
        .args(["-m", "standard", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("hill fort"));
}

#[test]
fn test_cli_hybrid_method() {
    cmd()
        .args(["-m", "hybrid", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("hill fort"));
}

#[test]
fn test_cli_invalid_method() {
    cmd()
        .args(["-m", "bogus", &get_fixture_path("article.html")])
        .assert()
        .failure();
}

#[test]
fn test_cli_page_width() {
    cmd()
        .args(["-m", "hybrid", "--page-width", "800", &get_fixture_path("article.html")])
        .assert()
        .success();
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("output.html");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .arg(get_fixture_path("article.html"))
        .assert()
        .success();

    assert!(output.exists());
}

#[test]
fn test_cli_stats() {
    cmd()
        .args(["--stats", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"nodes_before\""))
        .stderr(predicate::str::contains("\"elapsed_ms\""));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Pith"));
}

#[test]
fn test_cli_link_farm() {
    cmd().arg(get_fixture_path("link_farm.html")).assert().success();
}

#[test]
fn test_cli_empty_page() {
    cmd().arg(get_fixture_path("empty.html")).assert().success();
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("nonexistent.html").assert().failure();
}
