use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn treeviz_shows_structure() {
    let mut cmd = cargo_bin_cmd!("pagesmith");
    cmd.arg(fixture_path("brief.txt")).arg("--format").arg("treeviz");

    let output = predicate::str::contains("⧉ Best Bitcoin Casinos UK 2026")
        .and(predicate::str::contains("[comparison_table]"))
        .and(predicate::str::contains("[platform_review]"))
        .and(predicate::str::contains("[faq_group]"));

    cmd.assert().success().stdout(output);
}

#[test]
fn enhances_with_images_and_links() {
    let mut cmd = cargo_bin_cmd!("pagesmith");
    cmd.arg(fixture_path("brief.txt"))
        .arg("--images")
        .arg(fixture_path("images.json"))
        .arg("--links")
        .arg(fixture_path("links.json"));

    let output = predicate::str::contains("https://go.example/stake")
        .and(predicate::str::contains("https://go.example/cloudbet"))
        .and(predicate::str::contains("https://img.example/stake-logo.png"))
        .and(predicate::str::contains("nofollow sponsored"));

    cmd.assert().success().stdout(output);
}

#[test]
fn config_file_is_layered() {
    let mut config = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        config,
        "[affiliate_links]\nplatforms = [\"Stake\"]\noccurrence_cap = 1"
    )
    .expect("write config");

    let mut cmd = cargo_bin_cmd!("pagesmith");
    cmd.arg(fixture_path("brief.txt"))
        .arg("--links")
        .arg(fixture_path("links.json"))
        .arg("--config")
        .arg(config.path());

    let output = predicate::str::contains("https://go.example/stake")
        .and(predicate::str::contains("https://go.example/cloudbet").not());

    cmd.assert().success().stdout(output);
}

#[test]
fn missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("pagesmith");
    cmd.arg(fixture_path("does-not-exist.txt"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn unknown_format_fails() {
    let mut cmd = cargo_bin_cmd!("pagesmith");
    cmd.arg(fixture_path("brief.txt")).arg("--format").arg("html");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}
