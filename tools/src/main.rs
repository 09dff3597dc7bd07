//! session-runner: headless QuickLife session driver.
//!
//! Usage:
//!   session-runner --seed 12345 --ticks 40 --db save.db
//!   session-runner --db save.db --new-life-at 20
//!   session-runner --db save.db --ipc-mode

use anyhow::Result;
use chrono::{DateTime, Utc};
use quicklife_core::{
    config::SaveConfig,
    engine::{SessionEngine, SessionPhase},
    hooks::RefreshHooks,
    person::{Person, Stats},
    session::GameSession,
    snapshot_store::SnapshotStore,
    storage::SqliteStorage,
    ui::HeadlessUi,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::env;
use std::io::{self, BufRead, Write};

type Engine = SessionEngine<SqliteStorage, HeadlessUi>;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Ready,
    Advance { ms: u64 },
    AgeUp { years: u32 },
    NewLife,
    GetState,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    phase:        SessionPhase,
    year:         i64,
    age:          i64,
    player:       String,
    companions:   usize,
    money_text:   Option<String>,
    panel_open:   Option<bool>,
    has_snapshot: bool,
    saves_ok:     u64,
    saves_failed: u64,
}

/// Stand-in for the game: ages everyone a year and moves money and stats.
struct LifeDriver {
    rng: Pcg64Mcg,
}

impl LifeDriver {
    fn new(seed: u64) -> Self {
        Self { rng: Pcg64Mcg::seed_from_u64(seed) }
    }

    fn create_character(&mut self, engine: &mut Engine) {
        const NAMES: [&str; 6] = ["Ada", "Bram", "Cleo", "Dev", "Esme", "Finn"];
        let name = NAMES[self.rng.gen_range(0..NAMES.len())];
        engine.session = GameSession::new(Person::new(name), 2000);
        engine.ui.create_panel = Some(false);
        engine.ui.story = Some(format!("<p>Age 0: {name} was born.</p>"));
        engine.ui.money = Some(engine.session.player.money.display());
    }

    fn age_up(&mut self, engine: &mut Engine) {
        let session = &mut engine.session;
        session.year += 1;
        session.age += 1;
        session.player.age = session.age;
        for companion in &mut session.companions {
            companion.age += 1;
        }

        let player = &mut session.player;
        if session.age >= 18 {
            let pay = self.rng.gen_range(8_000..40_000);
            player.money.record(session.year, "salary", pay);
            player.money.record(session.year, "living costs", -self.rng.gen_range(5_000..20_000));
        }
        Stats::nudge(&mut player.stats.health, self.rng.gen_range(-4..=3));
        Stats::nudge(&mut player.stats.happiness, self.rng.gen_range(-6..=6));
        Stats::nudge(&mut player.stats.smarts, self.rng.gen_range(-1..=4));

        if session.age == 25 && session.companions.is_empty() {
            let mut partner = Person::new("Sam");
            partner.age = session.age + self.rng.gen_range(-3..=3);
            session.companions.push(partner);
        }

        let line = format!("<p>Age {}: another year passes.</p>", session.age);
        engine.ui.story.get_or_insert_with(String::new).push_str(&line);
        engine.ui.money = Some(session.player.money.display());
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 30u64);
    let new_life_at = parse_arg(&args, "--new-life-at", 0u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let config = match flag_value(&args, "--config") {
        Some(path) => SaveConfig::load(path)?,
        None => SaveConfig::default(),
    };

    if !ipc_mode {
        println!("QuickLife — session-runner");
        println!("  seed:      {seed}");
        println!("  ticks:     {ticks}");
        println!("  db:        {db}");
        println!("  origin:    {}", config.origin);
        println!("  autosave:  {} ms", config.autosave_interval_ms);
        println!();
    }

    let storage = if db == ":memory:" {
        SqliteStorage::in_memory(&config.origin)?
    } else {
        SqliteStorage::open(db, &config.origin)?
    }
    .with_quota(config.quota_bytes);
    storage.migrate()?;

    let hooks = RefreshHooks::new()
        .on_life_stage_displayer(|age| log::info!("life stage: {}", life_stage(age)))
        .on_money_viewer(|money| log::info!("money: {}", money.display()));
    let store = SnapshotStore::from_config(storage, &config).with_hooks(hooks);
    let mut engine = SessionEngine::new(store, HeadlessUi::with_all_elements(), &config);
    engine.handlers_mut().register("reset_session", |session: &mut GameSession| {
        *session = GameSession::default();
    });

    let mut driver = LifeDriver::new(seed);

    if ipc_mode {
        run_ipc_loop(&mut engine, &mut driver, &config)?;
    } else {
        run_batch(&mut engine, &mut driver, &config, ticks, new_life_at);
        print_summary(&engine, &config)?;
    }

    Ok(())
}

fn run_batch(
    engine: &mut Engine,
    driver: &mut LifeDriver,
    config: &SaveConfig,
    ticks: u64,
    new_life_at: u64,
) {
    engine.on_ready();
    if engine.phase() == SessionPhase::Empty {
        driver.create_character(engine);
    }

    for tick in 1..=ticks {
        if tick == new_life_at {
            engine.on_new_life();
            driver.create_character(engine);
        }
        driver.age_up(engine);
        engine.advance(config.autosave_interval());
    }
}

fn run_ipc_loop(engine: &mut Engine, driver: &mut LifeDriver, config: &SaveConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Ready => {
                engine.on_ready();
                if engine.phase() == SessionPhase::Empty {
                    driver.create_character(engine);
                }
            }
            IpcCommand::Advance { ms } => {
                engine.advance(std::time::Duration::from_millis(ms));
            }
            IpcCommand::AgeUp { years } => {
                for _ in 0..years {
                    driver.age_up(engine);
                    engine.advance(config.autosave_interval());
                }
            }
            IpcCommand::NewLife => {
                engine.on_new_life();
                driver.create_character(engine);
            }
            IpcCommand::GetState => {}
        }
        writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(engine))?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(engine: &Engine) -> UiState {
    UiState {
        phase:        engine.phase(),
        year:         engine.session.year,
        age:          engine.session.age,
        player:       engine.session.player.name.clone(),
        companions:   engine.session.companions.len(),
        money_text:   engine.ui.money.clone(),
        panel_open:   engine.ui.create_panel,
        has_snapshot: engine.store().has_snapshot(),
        saves_ok:     engine.saves_ok(),
        saves_failed: engine.saves_failed(),
    }
}

fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn print_summary(engine: &Engine, config: &SaveConfig) -> Result<()> {
    let storage = engine.store().storage();
    let last_saved = storage
        .last_updated(&config.storage_key)?
        .map(format_timestamp)
        .unwrap_or_else(|| "never".to_string());

    println!("=== SESSION SUMMARY ===");
    println!("  phase:        {:?}", engine.phase());
    println!("  player:       {}", engine.session.player.name);
    println!("  year / age:   {} / {}", engine.session.year, engine.session.age);
    println!("  money:        {}", engine.session.player.money.display());
    println!("  companions:   {}", engine.session.companions.len());
    println!("  saves ok:     {}", engine.saves_ok());
    println!("  saves failed: {}", engine.saves_failed());
    println!("  keys stored:  {}", storage.key_count()?);
    println!("  last saved:   {last_saved}");
    Ok(())
}

fn life_stage(age: i64) -> &'static str {
    match age {
        ..=2 => "baby",
        3..=12 => "child",
        13..=19 => "teen",
        20..=64 => "adult",
        _ => "elder",
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_print_in_utc() {
        let t = Utc.with_ymd_and_hms(2026, 3, 9, 7, 5, 0).unwrap();
        assert_eq!(format_timestamp(t), "2026-03-09 07:05:00 UTC");
    }
}
