use std::fs::File;
use std::process;

use anyhow::{bail, Context, Result};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

use ascii_dialogue::{config::PlayerConfig, player::Player, script::Script};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "ascii-dialogue play [<characters.json> <dialogue.json>]";
const CHECK_USAGE: &str = "ascii-dialogue check [<characters.json> <dialogue.json>]";

fn run() -> Result<()> {
    let config = PlayerConfig::load();
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        None => play(&config, &config.characters_path, &config.dialogue_path),
        Some("play") => {
            let (characters, dialogue) = script_paths(&mut args, &config, PLAY_USAGE)?;
            play(&config, &characters, &dialogue)
        }
        Some("check") => {
            let (characters, dialogue) = script_paths(&mut args, &config, CHECK_USAGE)?;
            check(&config, &characters, &dialogue)
        }
        _ => bail!(
            "ASCII Dialogue: terminal dialogue-box player\n\nUsage:\n  {PLAY_USAGE}\n  {CHECK_USAGE}"
        ),
    }
}

/// Both data paths from the command line, or both from the config.
fn script_paths(
    args: &mut impl Iterator<Item = String>,
    config: &PlayerConfig,
    usage: &str,
) -> Result<(String, String)> {
    match (args.next(), args.next()) {
        (Some(characters), Some(dialogue)) => Ok((characters, dialogue)),
        (None, None) => Ok((config.characters_path.clone(), config.dialogue_path.clone())),
        _ => bail!("Usage: {usage}"),
    }
}

fn play(config: &PlayerConfig, characters: &str, dialogue: &str) -> Result<()> {
    // The terminal belongs to the player, so logs only go to a file.
    if let Some(path) = &config.log_file {
        let file = File::create(path).with_context(|| format!("Failed to create log file {path}"))?;
        WriteLogger::init(config.log_level(), Config::default(), file)
            .context("Failed to install logger")?;
    }

    let script = Script::load(characters, dialogue)
        .with_context(|| format!("Failed to load script from {characters} and {dialogue}"))?;

    let mut player = Player::new(script, config.clone());
    player.play()
}

fn check(config: &PlayerConfig, characters: &str, dialogue: &str) -> Result<()> {
    let _ = TermLogger::init(
        config.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let script = Script::load(characters, dialogue)
        .with_context(|| format!("Failed to load script from {characters} and {dialogue}"))?;

    let lines = script.lines();
    let idle = lines.iter().filter(|l| l.is_idle()).count();
    let autoplay = lines.iter().filter(|l| l.autoplay).count();
    eprintln!(
        "{} characters, {} lines ({} idle, {} autoplay) in {} + {}",
        script.characters().count(),
        lines.len(),
        idle,
        autoplay,
        characters,
        dialogue,
    );

    Ok(())
}
