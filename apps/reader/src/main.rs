use std::{
    io::BufRead,
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use completion::BackendCompletionClient;
use reader_core::{
    ControllerConfig, KeyboardSignals, ReaderController, Signal, SignalSource, SlotState,
    SystemClock,
};
use shared::domain::Document;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod attention;
mod commands;

use attention::DistractionTracker;
use commands::{parse_command, Command, HELP};

const DEMO_ARTICLE: &str = "This is a short research-style paragraph about synaptic plasticity in the brain. \
Synaptic plasticity refers to the ability of connections between neurons to strengthen or weaken over time, \
in response to increases or decreases in their activity.\n\n\
In many learning tasks, synaptic plasticity is believed to be the biological basis of long-term memory. \
Different forms of plasticity operate on different time scales and in different brain regions.";

#[derive(Parser, Debug)]
#[command(about = "Terminal reader with pacing-aware summaries, explanations and quizzes")]
struct Args {
    #[arg(long, default_value = "http://localhost:4000")]
    server_url: String,
    /// Plain-text article; blank lines separate paragraphs.
    #[arg(long, conflicts_with = "demo")]
    file: Option<PathBuf>,
    #[arg(long)]
    demo: bool,
    #[arg(long)]
    assist_timeout_secs: Option<u64>,
    #[arg(long, default_value_t = 250)]
    poll_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let args = Args::parse();

    let raw = match (&args.file, args.demo) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read article {}", path.display()))?,
        (None, true) => DEMO_ARTICLE.to_string(),
        (None, false) => bail!("pass --file <PATH> or --demo"),
    };
    let document = Document::parse(&raw);
    if document.is_empty() {
        bail!("the article has no readable paragraphs");
    }

    let assist_timeout = args.assist_timeout_secs.map(Duration::from_secs);
    let service = BackendCompletionClient::with_timeout(&args.server_url, assist_timeout)
        .with_context(|| format!("invalid server url {}", args.server_url))?;
    info!(server_url = service.server_url(), paragraphs = document.len(), "reader starting");

    let mut controller = ReaderController::new(
        document,
        Arc::new(service),
        Arc::new(SystemClock),
        ControllerConfig {
            assist_timeout,
            ..ControllerConfig::default()
        },
    );

    run(&mut controller, Duration::from_millis(args.poll_ms.max(10))).await
}

async fn run(controller: &mut ReaderController, poll_every: Duration) -> Result<()> {
    let (line_tx, mut lines) = mpsc::channel(16);
    spawn_stdin_reader(line_tx);

    let mut keyboard = KeyboardSignals::new();
    let mut summary_rx = controller.subscribe_summary();
    let mut explanation_rx = controller.subscribe_explanation();
    let mut quiz_rx = controller.subscribe_quiz();
    let mut ticker = tokio::time::interval(poll_every);
    let mut prompted_for: Option<usize> = None;
    let mut distraction = DistractionTracker::default();

    println!("{HELP}\n");
    show_paragraph(controller);

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                let Some(command) = parse_command(&line) else { continue };
                match command {
                    Command::Quit => break,
                    Command::Next => {
                        let before = controller.current_index();
                        let had_baseline = controller.baseline_wpm().is_some();
                        controller.advance();
                        if let (false, Some(wpm)) = (had_baseline, controller.baseline_wpm()) {
                            println!("(baseline reading speed: {wpm} wpm)");
                        }
                        if controller.current_index() != before {
                            show_paragraph(controller);
                        } else {
                            println!("(end of article)");
                        }
                    }
                    Command::Back => {
                        let before = controller.current_index();
                        controller.retreat();
                        if controller.current_index() != before {
                            show_paragraph(controller);
                        }
                    }
                    Command::Gesture(signal) => keyboard.raise(signal),
                    Command::Select(selection) => {
                        controller.set_selection(selection.as_deref());
                        match controller.selection() {
                            Some(text) => println!("selected: \"{text}\""),
                            None => println!("selection cleared"),
                        }
                    }
                    Command::FullQuiz => {
                        if controller.on_request_full_quiz().is_none() {
                            println!("nothing to quiz on");
                        }
                    }
                    Command::Dismiss => controller.dismiss_attention_check(),
                    Command::Status => {
                        let status = controller.status();
                        println!(
                            "paragraph {}/{} | baseline {} | help needed: {} | loading: {} | attention check: {}",
                            status.index + 1,
                            status.total,
                            status
                                .baseline_wpm
                                .map_or_else(|| "unset".to_string(), |wpm| format!("{wpm} wpm")),
                            status.help_needed,
                            status.loading,
                            status.attention_check_visible,
                        );
                    }
                    Command::Help => println!("{HELP}"),
                    Command::Unknown(input) => println!("unknown command {input:?}; type ? for help"),
                }
            }
            _ = ticker.tick() => {
                // Results arrive through the slot watchers; the handles are not needed here.
                distraction.observe(keyboard.poll().distracted());
                drop(controller.poll_signals(&mut keyboard));

                let index = controller.current_index();
                if prompted_for != Some(index) && controller.is_help_needed() {
                    prompted_for = Some(index);
                    println!("Need help? p = summarize, h = explain, s <text> then h = explain a phrase");
                }
            }
            Ok(()) = summary_rx.changed() => {
                let state = summary_rx.borrow_and_update().clone();
                print_slot("Summary", &state);
            }
            Ok(()) = explanation_rx.changed() => {
                let state = explanation_rx.borrow_and_update().clone();
                print_slot("Simplified", &state);
            }
            Ok(()) = quiz_rx.changed() => {
                let state = quiz_rx.borrow_and_update().clone();
                print_slot("Questions", &state);
                if state.result().is_some() {
                    if distraction.quiz_answered() {
                        keyboard.clear(Signal::Distracted);
                    }
                    if controller.attention_check_visible() {
                        println!("(attention check: answer the questions, then press x)");
                    }
                }
            }
        }
    }

    Ok(())
}

/// Blocking stdin lives on its own thread so shutdown never waits on it.
fn spawn_stdin_reader(tx: mpsc::Sender<String>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
}

fn show_paragraph(controller: &ReaderController) {
    let Some(paragraph) = controller.current_paragraph() else {
        return;
    };
    println!(
        "\n[{}/{}] {}\n",
        controller.current_index() + 1,
        controller.document().len(),
        paragraph.text()
    );
    if controller.baseline_wpm().is_some() {
        println!(
            "(expected reading time: {}s)",
            controller.expected_reading_time().as_secs()
        );
    }
}

fn print_slot(label: &str, state: &SlotState) {
    match state {
        SlotState::Empty => {}
        SlotState::Awaiting => println!("{label}: working..."),
        SlotState::Ready(result) => {
            if let Some(excerpt) = &result.flagged_excerpt {
                println!("Flagged: \"{excerpt}\"");
            }
            println!("{label}:\n{}\n", result.text);
        }
    }
}
