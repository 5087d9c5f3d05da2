//! Drives the terminal front end with in-memory streams.

use math_adventures::cli::{run, Args};
use std::io::Cursor;

fn play(args: &Args, script: &str) -> String {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut out = Vec::new();
    run(args, &mut input, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn seeded() -> Args {
    Args {
        seed: Some(42),
        ..Default::default()
    }
}

#[test]
fn prompts_for_name_and_reports_on_end() {
    let out = play(&seeded(), "\nAda\n\nabc\nend\nn\n");
    assert_eq!(out.matches("Enter your hero name:").count(), 2);
    assert!(out.contains("Welcome, Ada!"));
    assert!(out.contains("❌ Wrong! The answer was"));
    assert!(out.contains("Mission Report for Ada"));
    assert!(out.contains("Total Problems: 1"));
    assert!(out.contains("Start new session?"));
}

#[test]
fn ending_immediately_shows_empty_report() {
    let args = Args {
        name: Some("Ada".to_string()),
        ..seeded()
    };
    let out = play(&args, "quit\n");
    assert!(out.contains("No data to show yet!"));
}

#[test]
fn closed_input_ends_without_new_session_prompt() {
    let args = Args {
        name: Some("Ada".to_string()),
        ..seeded()
    };
    let out = play(&args, "1\n");
    assert!(out.contains("Mission Report for Ada"));
    assert!(!out.contains("Start new session?"));
}

#[test]
fn new_session_starts_over() {
    let args = Args {
        name: Some("Ada".to_string()),
        rounds: Some(1),
        ..seeded()
    };
    let out = play(&args, "x\ny\nx\nn\n");
    assert_eq!(out.matches("Total Problems: 1").count(), 2);
}

#[test]
fn json_report_after_round_limit() {
    let args = Args {
        name: Some("Ada".to_string()),
        rounds: Some(2),
        json: true,
        ..seeded()
    };
    let out = play(&args, "x\ny\n");
    assert!(out.contains("\"total_questions\": 2"));
    assert!(out.contains("\"player\": \"Ada\""));
}

#[test]
fn no_name_and_closed_input_exits_quietly() {
    let out = play(&seeded(), "");
    assert!(!out.contains("Welcome"));
}
