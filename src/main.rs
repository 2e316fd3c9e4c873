//! Terminal table for the prime piles game.
//!
//! Commands: `p <pile>` selects a pile, `s <value>` selects a subtrahend,
//! `m <pile> <value>` moves directly, `r` restarts, `q` quits.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use prime_piles::{
    ActorKind, FirstLegalMove, GameConfig, GameSession, RandomPiles, StepOutcome,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use web_time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(
    name = "prime-piles",
    version,
    about = "Take a prime number of coins from a pile; whoever empties the last pile wins"
)]
struct Cli {
    /// TOML config file. The flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for dealing piles. Defaults to the clock.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of piles on the table.
    #[arg(long)]
    piles: Option<usize>,
    /// Most coins a freshly dealt pile can hold.
    #[arg(long)]
    max_coins: Option<u32>,
    /// Seat B is played by a person instead of the computer.
    #[arg(long)]
    human_b: bool,
    /// Seat A is played by the computer.
    #[arg(long)]
    auto_a: bool,
}

enum Command {
    Pile(usize),
    Subtrahend(u32),
    Move(usize, u32),
    Reset,
    Quit,
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

/// Reads `RUST_LOG`, defaulting to `warn`, and logs compactly to stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).compact())
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!(seed, piles = config.piles, "starting session");

    let mut session = GameSession::new(
        &config,
        Box::new(RandomPiles::new(seed)),
        Box::new(FirstLegalMove),
    )?;

    let mut lines = io::stdin().lock().lines();
    loop {
        match session.step()? {
            StepOutcome::Moved { seat, mv } => {
                println!("{seat}: {mv}");
                continue;
            }
            StepOutcome::GameOver { winner } => println!("{winner} has won! (r: restart, q: quit)"),
            StepOutcome::Stalled => {
                print_table(&session);
                println!("No subtrahend fits any pile. (r: restart, q: quit)");
            }
            StepOutcome::Waiting => print_table(&session),
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        match parse_command(&line?) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if !apply(&mut session, command) {
                    println!("not allowed right now");
                }
            }
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GameConfig::from_toml_str(&src)?
        }
        None => GameConfig::default(),
    };
    if let Some(piles) = cli.piles {
        config.piles = piles;
    }
    if let Some(max_coins) = cli.max_coins {
        config.max_coins_per_pile = max_coins;
    }
    if cli.human_b {
        config.players[1] = ActorKind::Human;
    }
    if cli.auto_a {
        config.players[0] = ActorKind::Automated;
    }
    Ok(config)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some("p") => Command::Pile(next_number(&mut words)?),
        Some("s") => Command::Subtrahend(next_number(&mut words)?),
        Some("m") => Command::Move(next_number(&mut words)?, next_number(&mut words)?),
        Some("r") => Command::Reset,
        Some("q") => Command::Quit,
        Some(other) => bail!("unknown command `{other}`"),
        None => bail!("commands: p <pile>, s <value>, m <pile> <value>, r, q"),
    };
    Ok(command)
}

fn next_number<'a, T>(words: &mut impl Iterator<Item = &'a str>) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let word = words.next().context("missing number")?;
    word.parse()
        .with_context(|| format!("`{word}` is not a number"))
}

fn apply(session: &mut GameSession, command: Command) -> bool {
    match command {
        Command::Pile(index) => session.select_pile(index),
        Command::Subtrahend(value) => session.select_subtrahend(value),
        Command::Move(pile, value) => session.attempt_human_move(pile, value),
        Command::Reset => {
            session.reset();
            true
        }
        Command::Quit => true,
    }
}

fn print_table(session: &GameSession) {
    let state = session.state();
    println!();
    println!("Turn: {}", state.current_player);
    for (index, coins) in state.piles.iter().enumerate() {
        let marker = if state.selected_pile == Some(index) { '>' } else { ' ' };
        println!("{marker} pile {index}: {coins:>3} {}", "o".repeat(*coins as usize));
    }
    let subtrahends: Vec<String> = state
        .subtrahends
        .iter()
        .map(|value| {
            if state.selected_subtrahend == Some(*value) {
                format!("[{value}]")
            } else {
                value.to_string()
            }
        })
        .collect();
    println!("  take: {}", subtrahends.join(" "));
    if state.selected_pile.is_some() {
        println!("  fits: {:?}", state.available_subtrahends);
    }
}
