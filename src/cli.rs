// src/cli.rs

use crate::error::Result;
use crate::models::LevelChange;
use crate::pedagogy::{AnswerFeedback, Session};
use crate::report::{AttemptStatus, MissionReport};
use clap::Parser;
use log::{debug, info};
use std::io::{BufRead, Write};
use std::time::Instant;

const END_COMMANDS: [&str; 3] = ["end", "quit", "q"];
const BAR_WIDTH: usize = 20;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "math-adventures")]
#[command(about = "Adaptive arithmetic practice in the terminal", long_about = None)]
pub struct Args {
    /// Hero name (prompted for when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Seed for reproducible puzzles
    #[arg(long)]
    pub seed: Option<u64>,

    /// End each session automatically after this many answers
    #[arg(long)]
    pub rounds: Option<usize>,

    /// Print the mission report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Answer timer for the pending puzzle. Started once when the puzzle is
/// first shown; re-showing the same puzzle keeps the original start.
#[derive(Debug, Default)]
struct AnswerClock {
    started: Option<Instant>,
}

impl AnswerClock {
    fn start(&mut self) -> Instant {
        *self.started.get_or_insert_with(Instant::now)
    }

    /// Seconds since `start`, clearing the clock for the next puzzle.
    fn stop(&mut self) -> f64 {
        self.started
            .take()
            .map(|s| s.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

enum RoundEnd {
    Ended,
    InputClosed,
}

// --- Public Interface ---

/// Drives sessions over the given terminal streams until the learner
/// declines a new session or input closes.
pub fn run<R: BufRead, W: Write>(args: &Args, input: &mut R, out: &mut W) -> Result<()> {
    let name = match args.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => match prompt_name(input, out)? {
            Some(n) => n,
            None => return Ok(()),
        },
    };

    let mut session = match args.seed {
        Some(seed) => Session::with_seed(&name, seed),
        None => Session::new(&name),
    };
    writeln!(out, "Welcome, {}! Type 'end' to finish the session.", session.player())?;

    loop {
        let end = play(args, &mut session, input, out)?;
        print_report(args, &session, out)?;

        if let RoundEnd::InputClosed = end {
            break;
        }
        write!(out, "Start new session? [y/N] ")?;
        out.flush()?;
        match read_line(input)? {
            Some(line) if line.trim().eq_ignore_ascii_case("y") => session.reset(),
            _ => break,
        }
    }

    info!("Goodbye, {}", session.player());
    Ok(())
}

// --- Internal Flow ---

fn prompt_name<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<String>> {
    loop {
        write!(out, "Enter your hero name: ")?;
        out.flush()?;
        match read_line(input)? {
            None => return Ok(None),
            Some(line) if !line.trim().is_empty() => return Ok(Some(line.trim().to_string())),
            Some(_) => continue,
        }
    }
}

fn play<R: BufRead, W: Write>(
    args: &Args,
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> Result<RoundEnd> {
    let mut answered = 0;
    let mut clock = AnswerClock::default();
    loop {
        if args.rounds.is_some_and(|limit| answered >= limit) {
            debug!("Round limit of {} reached", answered);
            return Ok(RoundEnd::Ended);
        }

        let puzzle = session.next_puzzle();
        writeln!(out)?;
        writeln!(out, "[{} Mode]  {} = ?", puzzle.level().name(), puzzle.question())?;
        write!(out, "Answer here: ")?;
        out.flush()?;

        clock.start();
        let line = match read_line(input)? {
            Some(line) => line,
            None => return Ok(RoundEnd::InputClosed),
        };
        let answer = line.trim();
        if answer.is_empty() {
            continue;
        }
        if END_COMMANDS.contains(&answer.to_ascii_lowercase().as_str()) {
            return Ok(RoundEnd::Ended);
        }

        let elapsed = clock.stop();
        if let Some(feedback) = session.submit_answer(answer, elapsed) {
            print_feedback(session, &feedback, out)?;
            answered += 1;
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

// --- Rendering ---

fn print_feedback<W: Write>(session: &Session, feedback: &AnswerFeedback, out: &mut W) -> Result<()> {
    if feedback.correct {
        writeln!(out, "✅ Correct! (+{} XP)", feedback.xp_earned)?;
    } else {
        writeln!(out, "❌ Wrong! The answer was {}", feedback.correct_answer)?;
    }

    match feedback.change {
        LevelChange::Promoted => writeln!(
            out,
            "🎉 Level Up! Welcome to {}!",
            feedback.new_level.name()
        )?,
        LevelChange::Demoted => writeln!(
            out,
            "💪 Keep trying! Dropping to {}.",
            feedback.new_level.name()
        )?,
        LevelChange::Unchanged => {}
    }

    writeln!(
        out,
        "Streak: {} | Level: {} | Accuracy: {:.0}% | XP: {} ({})",
        session.engine().correct_streak(),
        session.level().name(),
        session.tracker().accuracy() * 100.0,
        session.xp(),
        session.rank()
    )?;
    Ok(())
}

fn print_report<W: Write>(args: &Args, session: &Session, out: &mut W) -> Result<()> {
    let report = MissionReport::from_session(session);

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "📊 Mission Report for {}", report.player)?;
    if !report.has_data() {
        writeln!(out, "No data to show yet!")?;
        return Ok(());
    }

    let s = &report.summary;
    writeln!(out, "  Total Problems: {}", s.total_questions)?;
    writeln!(out, "  Final Accuracy: {:.1}%", s.overall_accuracy * 100.0)?;
    writeln!(out, "  Avg Speed:      {:.2}s", s.average_time)?;
    writeln!(out, "  Total XP:       {} ({})", report.xp, report.rank)?;

    writeln!(out)?;
    writeln!(out, "Reaction Time Analysis")?;
    for point in &report.timeline {
        let status = match point.status {
            AttemptStatus::Correct => "Correct",
            AttemptStatus::Wrong => "Wrong",
        };
        writeln!(
            out,
            "  #{:<3} {:<12} {:>7.2}s  {:<7} {}",
            point.question_number,
            point.question,
            point.time_taken,
            status,
            point.level.name()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Accuracy by Difficulty")?;
    for bar in &report.level_accuracy {
        let filled = (bar.accuracy * BAR_WIDTH as f64).round() as usize;
        writeln!(
            out,
            "  {:<7} {:<width$} {:.0}%",
            bar.name,
            "#".repeat(filled),
            bar.accuracy * 100.0,
            width = BAR_WIDTH
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_keeps_first_start_until_stopped() {
        let mut clock = AnswerClock::default();
        let first = clock.start();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(clock.start(), first);
        assert!(clock.stop() >= 0.02);

        // Stopped clock restarts fresh
        let second = clock.start();
        assert!(second > first);
        assert!(clock.stop() < 0.02);
    }

    #[test]
    fn stopping_idle_clock_reports_zero() {
        let mut clock = AnswerClock::default();
        assert_eq!(clock.stop(), 0.0);
    }
}
