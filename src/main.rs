mod cli_args;
mod config;
mod llm;
mod logging;
mod profile;
mod session;
mod setup;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::ProgressBar;
use std::io::{self, Write};
use std::time::Duration;

pub use cli_args::{Cli, Command};
use config::Config;
use llm::AssistantClient;
use profile::PROFILE;
use session::{ChatSession, InsightAction, Message, Role};

/// Run `f` behind a terminal spinner; the spinner is hidden when stderr is not a TTY.
fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    out
}

/// Prompt for a line of input. `None` on end of input.
fn prompt_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut buf = String::new();
    let read = io::stdin()
        .read_line(&mut buf)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\n', '\r']).to_string()))
}

fn print_message(message: &Message) {
    let label = match message.role() {
        Role::Assistant => message.role().as_str().cyan().bold(),
        Role::User => "you".green().bold(),
    };
    println!("{label}: {}", message.text());
}

fn run_profile(full: bool) -> Result<()> {
    print!("{}", profile::render_profile(&PROFILE, full));
    Ok(())
}

fn run_projects() -> Result<()> {
    print!("{}", profile::render_projects(&PROFILE));
    Ok(())
}

/// One-shot insight for a project card.
fn run_insight(llm: &dyn AssistantClient, selector: &str) -> Result<()> {
    let project = PROFILE.find_project(selector)?;
    let mut action = InsightAction::new(project);

    println!("{}", action.project().title.bold());
    println!("{}", action.project().tools.italic());

    let insight = with_spinner("Generating AI insight...", || {
        action.run(llm).map(str::to_owned)
    });

    log::debug!("Insight state: {:?}", action.state());

    if let Some(text) = insight {
        println!();
        println!("{}", "AI SUGGESTION".bold());
        println!("{text}");
    }

    Ok(())
}

/// Interactive chat: one turn at a time, transcript printed as it grows.
fn run_chat(llm: &dyn AssistantClient) -> Result<()> {
    let mut session = ChatSession::new(&PROFILE);

    println!(
        "{}",
        "Ask about the portfolio. /reset starts over, /quit leaves.".bright_black()
    );
    for message in session.transcript().messages() {
        print_message(message);
    }

    while let Some(line) = prompt_input("> ")? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset();
                for message in session.transcript().messages() {
                    print_message(message);
                }
                continue;
            }
            _ => {}
        }

        let Some(turn) = session.begin_turn(&line) else {
            continue;
        };

        log::trace!("Chat system instruction:\n{}", turn.system_instruction());
        log::debug!("Chat prompt: {:?}", turn.prompt());

        let reply = with_spinner("Thinking...", || turn.resolve(llm));
        log::trace!("Chat reply: {:?}", reply.text());
        session.finish_turn(reply);

        if let Some(message) = session.transcript().last() {
            print_message(message);
        }
    }

    log::info!("Chat closed after {} messages", session.transcript().len());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match &cli.command {
        Command::Profile { full } => run_profile(*full),
        Command::Projects => run_projects(),
        Command::Insight { project } => {
            let cfg = Config::from_sources(&cli);
            let llm = setup::build_assistant_client(&cfg)?;
            run_insight(llm.as_ref(), project)
        }
        Command::Chat => {
            let cfg = Config::from_sources(&cli);
            let llm = setup::build_assistant_client(&cfg)?;
            run_chat(llm.as_ref())
        }
    }
}
