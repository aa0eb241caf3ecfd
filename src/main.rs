use clap::{Parser, ValueEnum};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{fs::File, io::stderr, path::PathBuf, rc::Rc};

use kitbag::{
    event::EventHandler,
    host::Character,
    input::CrosstermInput,
    policy::{SelectionPolicy, SelectorOutcome},
    preferences::Preferences,
    preset::{Preset, StatsPreset},
    scenario::Scenario,
    selector_model::SelectorModel,
    tui::Tui,
};
use wrap_context::{arg_context, raw_context, wohyna};

// Expanded context macros refer to `crate::utils`.
use kitbag::utils;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Pick,
    Multi,
    Compare,
    Drop,
}

/// Inventory selector
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Scenario file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Selection mode
    #[arg(short, long, value_enum, default_value = "pick")]
    mode: Mode,

    /// Window title
    #[arg(short, long)]
    title: Option<String>,

    /// Line shown under the title
    #[arg(long)]
    hint: Option<String>,

    /// Preferences file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Radius of the nearby tiles to list, overrides the preferences
    #[arg(short, long)]
    radius: Option<i32>,

    /// Log file
    #[arg(long, env = "KITBAG_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Debug print limit
    #[arg(short, long, default_value = "1")]
    debug_print_limit: usize,
}

fn init_logger(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("kitbag.log"));
    let file = arg_context!(File::create(&path))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    anyhow::Ok(())
}

fn exit<B: Backend>(tui: &mut Tui<B>) {
    if let Err(err) = tui.exit() {
        eprintln!(
            "Failed to restore terminal. Run `reset` / `stty sane` or restart your terminal to recover: {}",
            err
        );
    }
}

fn default_title(mode: Mode, character: &dyn Character) -> String {
    match mode {
        Mode::Pick => format!("{}: pick an item", character.name()),
        Mode::Multi => format!("{}: choose items", character.name()),
        Mode::Compare => "Compare which two items?".to_string(),
        Mode::Drop => "Drop what?".to_string(),
    }
}

fn print(outcome: &SelectorOutcome) {
    match outcome {
        SelectorOutcome::Picked(picked) => picked.iter().for_each(|location| {
            println!("{}", location);
        }),
        SelectorOutcome::Chosen(chosen) | SelectorOutcome::Dropped(chosen) => {
            chosen.iter().for_each(|(location, count)| {
                println!("{}\t{}", count, location);
            })
        }
        SelectorOutcome::Compared(compared) => compared.iter().for_each(|(first, second)| {
            println!("{}", first);
            println!("{}", second);
        }),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    raw_context!(utils::DEBUG_PRINT_LIMIT
        .set(args.debug_print_limit)
        .map_err(|err| wohyna!("Second initialization with value: {:?}", err)))?;

    init_logger(args.log_file.clone())?;

    let preferences = match &args.config {
        Some(path) => arg_context!(Preferences::load(path))?,
        None => Preferences::default(),
    };
    raw_context!(preferences.validate())?;

    let scenario = arg_context!(Scenario::load(&args.file))?;
    let radius = args.radius.unwrap_or(preferences.nearby_radius());

    let preset: Rc<dyn Preset> = Rc::new(StatsPreset::default());
    let policy = match args.mode {
        Mode::Pick => SelectionPolicy::PickOne,
        Mode::Multi => SelectionPolicy::MultiWithQuantity,
        Mode::Compare => SelectionPolicy::compare_pair(),
        Mode::Drop => SelectionPolicy::drop_with_quantity(),
    };

    let mut selector = SelectorModel::new(&scenario, preset, preferences, policy);
    selector.set_title(
        &args
            .title
            .clone()
            .unwrap_or_else(|| default_title(args.mode, &scenario)),
    );
    if let Some(hint) = &args.hint {
        selector.set_hint(hint);
    }

    raw_context!(selector.add_character_items())?;
    if !matches!(args.mode, Mode::Drop) {
        raw_context!(selector.add_nearby_items(&scenario, radius))?;
    }

    if selector.empty() {
        log::warn!("Nothing to select from in {:?}", args.file);
    }

    let backend = CrosstermBackend::new(stderr());
    let terminal = raw_context!(Terminal::new(backend))?;

    let mut tui = Tui::new(terminal);
    arg_context!(tui.init()).map_err(|err| {
        exit(&mut tui);
        err
    })?;

    let mut input = CrosstermInput::new(EventHandler::new(250));

    let outcome = raw_context!(selector.execute(&mut tui, &mut input).await).map_err(|err| {
        exit(&mut tui);
        err
    })?;

    exit(&mut tui);

    print(&outcome);

    anyhow::Ok(())
}
