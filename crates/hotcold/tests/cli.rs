//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    for key in [
        "HOTCOLD_EMBEDDING_PROVIDER",
        "HOTCOLD_VOCABULARY_FILE",
        "HOTCOLD_GIVE_UP_AFTER",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("HOTCOLD_LOG_DIR", std::env::temp_dir().join("hotcold-test-logs"));
    cmd
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn short_help_flag_shows_usage() {
    cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn short_version_flag_shows_version() {
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn info_json_contains_expected_fields() {
    cmd()
        .arg("info")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\""))
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn info_help_shows_command_options() {
    cmd()
        .args(["info", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn short_quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn verbose_flag_accepted() {
    cmd().args(["--verbose", "info"]).assert().success();
}

#[test]
fn short_verbose_flag_accepted() {
    cmd().args(["-v", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_auto_accepted() {
    cmd().args(["--color", "auto", "info"]).assert().success();
}

#[test]
fn color_always_accepted() {
    cmd().args(["--color", "always", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_flag_shows_error() {
    cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Classify Command
// =============================================================================

#[test]
fn classify_prints_tier_message() {
    cmd()
        .args(["--color", "never", "classify", "20", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HOT!"))
        .stdout(predicate::str::contains("rank 20 of 100"));
}

#[test]
fn classify_json_reports_tier() {
    let output = cmd()
        .args(["--json", "classify", "1", "500"])
        .assert()
        .success();
    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["tier"], "best");
    assert_eq!(json["emoji"], "🔥");
}

#[test]
fn classify_rank_past_total_fails() {
    cmd()
        .args(["classify", "11", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside"));
}

// =============================================================================
// Check Command
// =============================================================================

#[test]
fn check_accepts_vocabulary_word() {
    cmd()
        .args(["--color", "never", "check", "Ocean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ocean"));
}

#[test]
fn check_rejects_digits() {
    cmd()
        .args(["check", "7up"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only letters"));
}

#[test]
fn check_rejects_unknown_word() {
    cmd()
        .args(["check", "xyzzzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in word list"));
}

#[test]
fn check_json_reports_reason() {
    let output = cmd().args(["--json", "check", "a"]).assert().failure();
    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert!(json["reason"].as_str().is_some());
}

// =============================================================================
// Words Command
// =============================================================================

#[test]
fn words_lists_first_page_with_hint() {
    let output = cmd().arg("words").assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    assert_eq!(stdout.lines().count(), 100);
    assert!(String::from_utf8_lossy(&output.get_output().stderr).contains("more"));
}

#[test]
fn words_search_filters() {
    let output = cmd()
        .args(["--json", "words", "--search", "ocean"])
        .assert()
        .success();
    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    let words = json["words"].as_array().unwrap();
    assert!(!words.is_empty());
    assert!(words.iter().all(|w| w.as_str().unwrap().contains("ocean")));
    assert_eq!(json["truncated"], false);
}

#[test]
fn words_all_lists_everything() {
    let output = cmd().args(["--json", "words", "--all"]).assert().success();
    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(
        json["matched"].as_u64().unwrap() as usize,
        json["words"].as_array().unwrap().len()
    );
}

// =============================================================================
// Rank Command
// =============================================================================

#[test]
fn rank_with_hashing_provider() {
    let output = cmd()
        .args(["--provider", "hashing", "--json", "rank", "ocean", "-n", "5"])
        .assert()
        .success();
    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["target"], "ocean");
    assert_eq!(json["provider"], "hashing");

    let rankings = json["rankings"].as_array().unwrap();
    assert_eq!(rankings.len(), 5);
    for (i, entry) in rankings.iter().enumerate() {
        assert_eq!(entry["rank"].as_u64().unwrap() as usize, i + 1);
        assert_ne!(entry["word"], "ocean");
    }
}

#[test]
fn rank_text_output_lists_words() {
    cmd()
        .args(["--provider", "hashing", "--color", "never", "rank", "ocean", "--top", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1."))
        .stdout(predicate::str::contains("3."));
}

#[test]
fn table_provider_without_table_fails() {
    cmd()
        .args(["--provider", "table", "rank", "ocean"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("embedding_table"));
}

// =============================================================================
// Play Command
// =============================================================================

/// A project directory with a small word list and the hashing provider.
fn small_game() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("words.txt"),
        "rain\ntrain\nstorm\ncloud\nlamp\ndesk\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join(".hotcold.toml"),
        "embedding_provider = \"hashing\"\nvocabulary_file = \"words.txt\"\ngive_up_after = 2\n",
    )
    .unwrap();
    dir
}

fn events(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn play_json_game_until_win() {
    let dir = small_game();
    let output = cmd()
        .args(["-C", dir.path().to_str().unwrap(), "--json", "play", "--target", "storm"])
        .write_stdin("rain\n7up\nstorm\n")
        .assert()
        .success();

    let events = events(&output.get_output().stdout);
    let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(kinds, ["start", "guess", "rejected", "guess", "end"]);

    assert_eq!(events[0]["target_len"], 5);
    assert_eq!(events[0]["total_words"], 5);
    assert_eq!(events[1]["result"]["outcome"], "ranked");
    assert_eq!(events[3]["result"]["outcome"], "won");
    assert_eq!(events[3]["result"]["guesses"], 2);
    assert_eq!(events[4]["summary"]["status"], "won");
    assert_eq!(events[4]["summary"]["target"], "storm");
}

#[test]
fn play_give_up_unlocks_after_enough_guesses() {
    let dir = small_game();
    let output = cmd()
        .args(["-C", dir.path().to_str().unwrap(), "--json", "play", "--target", "cloud"])
        .write_stdin("/giveup\nrain\nlamp\n/giveup\n")
        .assert()
        .success();

    let events = events(&output.get_output().stdout);
    let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(kinds, ["start", "rejected", "guess", "guess", "gave_up", "end"]);
    assert_eq!(events[4]["target"], "cloud");
    assert_eq!(events[5]["summary"]["status"], "gave_up");
}

#[test]
fn play_quit_keeps_target_hidden() {
    let dir = small_game();
    let output = cmd()
        .args(["-C", dir.path().to_str().unwrap(), "--json", "play", "--seed", "7"])
        .write_stdin("/quit\n")
        .assert()
        .success();

    let events = events(&output.get_output().stdout);
    let end = events.last().unwrap();
    assert_eq!(end["event"], "end");
    assert_eq!(end["summary"]["status"], "in_progress");
    assert!(end["summary"].get("target").is_none_or(Value::is_null));
}

#[test]
fn play_text_mode_announces_win() {
    let dir = small_game();
    cmd()
        .args(["-C", dir.path().to_str().unwrap(), "--color", "never", "play", "--target", "lamp"])
        .write_stdin("lamp\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("CONGRATULATIONS!"))
        .stdout(predicate::str::contains("LAMP"));
}

#[test]
fn play_unknown_target_fails() {
    let dir = small_game();
    cmd()
        .args(["-C", dir.path().to_str().unwrap(), "play", "--target", "ocean"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ocean"));
}

#[test]
fn play_target_and_seed_conflict() {
    cmd()
        .args(["play", "--target", "storm", "--seed", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// =============================================================================
// Serve Command
// =============================================================================

#[cfg(feature = "mcp")]
#[test]
fn serve_help_mentions_mcp() {
    cmd()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MCP"));
}

// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_flag_changes_directory() {
    // The -C flag should be accepted and work without error
    // We use a path that definitely exists
    cmd().args(["-C", "/tmp", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
