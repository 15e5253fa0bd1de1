use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use y2_engine::api::{load_catalog, lookup_in, LookupConfig};
use y2_engine::flags::{armor_note, difficulty_stars, FLAGS, SPECIAL_FLAGS};
use y2_engine::resolve::bracket_label;
use y2_engine::{
    choice_row, resolve, ArmorType, BotDefinition, BotId, Catalog, Choice, Dice, Mode, QueryState,
};

#[derive(Copy, Clone, ValueEnum)]
enum Situation {
    None,
    Knockdown,
    Wakeup,
    Dragon,
}

/// Table position shared by the lookup subcommands.
#[derive(clap::Args)]
struct Position {
    /// Bot index (0-based) or code, e.g. `glass-monk`
    #[arg(long)]
    bot: BotId,
    /// Cards in your hand
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u8).range(5..=12))]
    hand: u8,
    /// Situational row to use instead of the hand-size row
    #[arg(long, value_enum, default_value_t = Situation::None)]
    mode: Situation,
    /// Bot is at low health
    #[arg(long, default_value_t = false)]
    desperate: bool,
}

#[derive(Subcommand)]
enum Cmd {
    /// List the available bots
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show one choice of a bot
    Show {
        #[command(flatten)]
        pos: Position,
        /// Choice number as rolled on the d8
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
        choice: u8,
        /// Show the hitback instead of a numbered choice
        #[arg(long, default_value_t = false)]
        hitback: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the full row for a position
    Table {
        #[command(flatten)]
        pos: Position,
    },
    /// Roll the d8 and show the resulting choice
    Roll {
        #[command(flatten)]
        pos: Position,
        /// RNG seed for determinism
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serialize an assembled bot to JSON (stdout)
    Dump {
        #[arg(long)]
        bot: BotId,
        /// Pretty-print JSON
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
    /// Explain the card flags
    Legend,
}

#[derive(Parser)]
#[command(name = "y2-assist")]
#[command(about = "Bot opponent lookup for the card fighting game")]
struct Cli {
    /// YAML bot tables to use instead of the built-in set
    #[arg(long, global = true)]
    bots: Option<String>,
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_mode(s: Situation) -> Mode {
    match s {
        Situation::None => Mode::None,
        Situation::Knockdown => Mode::Knockdown,
        Situation::Wakeup => Mode::Wakeup,
        Situation::Dragon => Mode::Dragon,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn find_bot<'a>(catalog: &'a Catalog, id: &BotId) -> anyhow::Result<&'a BotDefinition> {
    catalog
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("bot '{}' not found", id))
}

fn state_for(pos: &Position, choice_index: usize, hitback: bool) -> QueryState {
    QueryState {
        hand_size: pos.hand,
        choice_index,
        mode: to_mode(pos.mode),
        desperate: pos.desperate,
        hitback,
    }
    .clamped()
}

fn heading(bot: &BotDefinition, state: &QueryState) -> String {
    let mut line = format!(
        "{} {}  hand {}",
        bot.name,
        difficulty_stars(bot.difficulty),
        bracket_label(state.hand_size)
    );
    if state.mode != Mode::None {
        line.push_str(&format!("  {:?}", state.mode).to_lowercase());
    }
    if state.desperate {
        line.push_str("  desperate");
    }
    line
}

fn print_card(label: &str, choice: &Choice) {
    println!("{}. {}", label, choice);
    if choice.attrs.armor != ArmorType::None {
        println!("   {}", armor_note());
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let catalog = load_catalog(cli.bots.as_deref())?;

    match cli.cmd {
        Cmd::List { json } => {
            let bots = catalog.summaries();
            if json {
                println!("{}", serde_json::to_string_pretty(&bots)?);
            } else {
                for b in bots {
                    println!(
                        "{:>2}  {:<24} {}  {}",
                        b.index,
                        b.code,
                        difficulty_stars(b.difficulty),
                        b.name
                    );
                }
            }
        }
        Cmd::Show {
            pos,
            choice,
            hitback,
            json,
        } => {
            let cfg = LookupConfig {
                bot: pos.bot.clone(),
                hand_size: pos.hand,
                choice_index: usize::from(choice - 1),
                mode: to_mode(pos.mode),
                desperate: pos.desperate,
                hitback,
                bots_path: None,
            };
            if json {
                let res = lookup_in(&catalog, &cfg)?;
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                let bot = find_bot(&catalog, &cfg.bot)?;
                let state = cfg.state();
                println!("{}", heading(bot, &state));
                let label = if hitback { "H".to_string() } else { choice.to_string() };
                print_card(&label, resolve(bot, &state));
            }
        }
        Cmd::Table { pos } => {
            let bot = find_bot(&catalog, &pos.bot)?;
            let state = state_for(&pos, 0, false);
            println!("{}", heading(bot, &state));
            let row = choice_row(bot, &state);
            for (i, c) in row.choices.iter().enumerate() {
                print_card(&(i + 1).to_string(), c);
            }
            print_card("H", row.hitback);
        }
        Cmd::Roll { pos, seed } => {
            let bot = find_bot(&catalog, &pos.bot)?;
            let mut dice = match seed {
                Some(seed) => Dice::from_seed(seed),
                None => Dice::from_entropy(),
            };
            let index = dice.roll_choice();
            let state = state_for(&pos, index, false);
            println!("{}", heading(bot, &state));
            print_card(&(index + 1).to_string(), resolve(bot, &state));
        }
        Cmd::Dump { bot, pretty } => {
            let bot = find_bot(&catalog, &bot)?;
            if pretty {
                println!("{}", serde_json::to_string_pretty(bot)?);
            } else {
                println!("{}", serde_json::to_string(bot)?);
            }
        }
        Cmd::Legend => {
            for f in FLAGS.iter().chain(SPECIAL_FLAGS) {
                println!("{:<14} {}", f.icon, f.desc);
            }
            println!();
            println!("R after speed: reversal (faster than 10)");
            println!("! after adj: adjust hand size even if the move whiffs");
            println!("[L]/[M]/[H]: {}", armor_note());
        }
    }
    Ok(())
}
