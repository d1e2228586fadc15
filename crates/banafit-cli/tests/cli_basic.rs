//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own data directory and pins the
//! date with the hidden `--today` flag.

use std::path::Path;
use std::process::Command;

const PLAN: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../banafit-core/tests/fixtures/plan.json"
);

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_banafit"))
        .args(args)
        .env("BANAFIT_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn registered_with_plan(data_dir: &Path) {
    let (out, _, code) = run_cli(data_dir, &["account", "register", "Ana"]);
    assert_eq!(code, 0, "register failed");
    assert!(out.contains("Welcome, Ana!"));

    let (out, _, code) = run_cli(data_dir, &["plan", "import", PLAN]);
    assert_eq!(code, 0, "plan import failed");
    assert!(out.contains("Plan imported: 2 rest days"));
}

fn profile_json(data_dir: &Path, today: &str) -> serde_json::Value {
    let (out, _, code) = run_cli(data_dir, &["account", "show", "--json", "--today", today]);
    assert_eq!(code, 0, "account show failed");
    serde_json::from_str(&out).expect("profile is JSON")
}

#[test]
fn test_help() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("workout"));
    assert!(out.contains("diamonds"));
}

#[test]
fn test_commands_need_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let (_, err, code) = run_cli(dir.path(), &["diamonds", "ad"]);
    assert_eq!(code, 1);
    assert!(err.contains("No active session"));
}

#[test]
fn test_toggling_every_exercise_completes_the_day() {
    let dir = tempfile::tempdir().unwrap();
    registered_with_plan(dir.path());

    // 2024-07-22 is a Monday: plan day "Lunes" with four exercises.
    let monday = "2024-07-22";
    for name in ["Push-ups", "Dumbbell Rows", "Shoulder Press"] {
        let (out, _, code) = run_cli(dir.path(), &["workout", "toggle", name, "--today", monday]);
        assert_eq!(code, 0, "toggle {name} failed");
        assert!(!out.contains("completed!"));
    }
    let (out, _, code) = run_cli(dir.path(), &["workout", "toggle", "Plank", "--today", monday]);
    assert_eq!(code, 0);
    assert!(out.contains("[x] Plank (4/4)"));
    assert!(out.contains("Day 2024-07-22 completed! Streak: 1"));

    let profile = profile_json(dir.path(), monday);
    assert_eq!(profile["currentStreak"], 1);
    assert_eq!(profile["diamonds"], 15);

    // Unticking and ticking again books nothing new.
    run_cli(dir.path(), &["workout", "toggle", "Plank", "--today", monday]);
    let (out, _, _) = run_cli(dir.path(), &["workout", "toggle", "Plank", "--today", monday]);
    assert!(out.contains("[x] Plank (4/4)"));
    assert!(!out.contains("completed!"));
    assert_eq!(profile_json(dir.path(), monday)["diamonds"], 15);
}

#[test]
fn test_streak_carries_over_and_resets() {
    let dir = tempfile::tempdir().unwrap();
    registered_with_plan(dir.path());

    for day in ["2024-07-22", "2024-07-23"] {
        let (_, _, code) = run_cli(dir.path(), &["workout", "complete", "--today", day]);
        assert_eq!(code, 0);
    }
    assert_eq!(profile_json(dir.path(), "2024-07-23")["currentStreak"], 2);

    // Missing Wednesday shows a zero streak until Thursday is completed.
    assert_eq!(profile_json(dir.path(), "2024-07-25")["currentStreak"], 0);
    let (out, _, _) = run_cli(dir.path(), &["workout", "complete", "--today", "2024-07-25"]);
    assert!(out.contains("Streak: 1"));
}

#[test]
fn test_completing_an_earlier_date_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    registered_with_plan(dir.path());
    run_cli(dir.path(), &["workout", "complete", "--today", "2024-07-25"]);

    let (_, err, code) = run_cli(dir.path(), &["workout", "complete", "--today", "2024-07-22"]);
    assert_eq!(code, 1);
    assert!(err.contains("2024-07-25 is already completed"));
    let profile = profile_json(dir.path(), "2024-07-25");
    assert_eq!(profile["streak"], 1);
    assert_eq!(profile["diamonds"], 15);
}

#[test]
fn test_oversized_banner_time_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, err, code) = run_cli(
        dir.path(),
        &["config", "set", "rewards.completion_banner_ms", "9223372036854775807"],
    );
    assert_eq!(code, 1);
    assert!(err.contains("rewards.completion_banner_ms"));
}

#[test]
fn test_unknown_exercise_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    registered_with_plan(dir.path());
    let (_, err, code) = run_cli(
        dir.path(),
        &["workout", "toggle", "Deadlift", "--day", "1", "--today", "2024-07-22"],
    );
    assert_eq!(code, 1);
    assert!(err.contains("'Deadlift' is not an exercise of Lunes"));
}

#[test]
fn test_streak_path_json() {
    let dir = tempfile::tempdir().unwrap();
    registered_with_plan(dir.path());
    run_cli(dir.path(), &["workout", "complete", "--today", "2024-07-22"]);

    let (out, _, code) = run_cli(dir.path(), &["workout", "streak", "--json", "--today", "2024-07-22"]);
    assert_eq!(code, 0);
    let path: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(path["streak"], 1);
    let cells = path["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 21);
    assert_eq!(cells[0]["state"], "completed");
    assert_eq!(cells[1]["state"], "next");
    assert_eq!(cells[4]["reward_day"], true);
}

#[test]
fn test_diamonds_and_shop() {
    let dir = tempfile::tempdir().unwrap();
    registered_with_plan(dir.path());

    let (_, err, code) = run_cli(dir.path(), &["shop", "buy", "frame:gold"]);
    assert_eq!(code, 1);
    assert!(err.contains("Not enough diamonds: need 250, have 0"));

    let (out, _, code) = run_cli(dir.path(), &["diamonds", "buy", "1"]);
    assert_eq!(code, 0);
    assert!(out.contains("+200 💎 (balance 200)"));
    run_cli(dir.path(), &["diamonds", "follow", "instagram"]);
    let (_, err, code) = run_cli(dir.path(), &["diamonds", "follow", "ig"]);
    assert_eq!(code, 1);
    assert!(err.contains("already claimed"));

    let (out, _, code) = run_cli(dir.path(), &["shop", "buy", "frame:gold"]);
    assert_eq!(code, 0);
    assert!(out.contains("balance 50"));
    let (_, _, code) = run_cli(dir.path(), &["shop", "activate", "frame:gold"]);
    assert_eq!(code, 0);

    let (out, _, _) = run_cli(dir.path(), &["shop", "list", "--json"]);
    let items: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    let gold = items
        .iter()
        .find(|i| i["item"]["id"] == "gold")
        .expect("gold frame listed");
    assert_eq!(gold["owned"], true);
    assert_eq!(gold["active"], true);
}

#[test]
fn test_logout_clears_profile() {
    let dir = tempfile::tempdir().unwrap();
    registered_with_plan(dir.path());
    let (out, _, code) = run_cli(dir.path(), &["account", "logout"]);
    assert_eq!(code, 0);
    assert!(out.contains("Logged out."));
    let (_, _, code) = run_cli(dir.path(), &["account", "show"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["config", "get", "rewards.base_reward"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "15");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "rewards.base_reward", "20"]);
    assert_eq!(code, 0);
    let (out, _, _) = run_cli(dir.path(), &["config", "get", "rewards.base_reward"]);
    assert_eq!(out.trim(), "20");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "rewards.bonus_min", "999"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
}
