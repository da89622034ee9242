/* Play Sounds - press gamepad buttons to hear the Robot Controller's system sounds.

Put running.wav, connect.wav, disconnect.wav, warning.wav and error.wav in the
sound directory, then hold a button (keyboard stand-in below) to play one.
Only one sound plays at a time.
*/

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use playsounds::input::KeyboardGamepad;
use playsounds::platform::CpalBackend;
use playsounds::telemetry::{TerminalSession, TerminalViewer};
use playsounds::utils::init_logger;
use playsounds::{Arbiter, SoundLibrary, Soundboard, SoundboardConfig, TelemetryBuffer};

#[derive(Parser, Debug)]
#[command(name = "playsounds", about = "Play system sounds from gamepad buttons")]
struct Args {
    /// Directory holding the .wav files
    #[arg(long)]
    sound_dir: Option<PathBuf>,

    /// Playback volume, 0.0 to 1.0
    #[arg(long, default_value_t = 1.0)]
    volume: f32,

    /// Minimum milliseconds between display refreshes
    #[arg(long, default_value_t = 10)]
    refresh_ms: u64,

    /// Milliseconds a key press counts as a held button
    #[arg(long, default_value_t = 150)]
    hold_ms: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> SoundboardConfig {
        let defaults = SoundboardConfig::default();
        SoundboardConfig {
            sound_dir: self.sound_dir.unwrap_or(defaults.sound_dir),
            refresh_interval: Duration::from_millis(self.refresh_ms),
            key_hold: Duration::from_millis(self.hold_ms),
            volume: self.volume,
            ..defaults
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });
    let config = args.into_config();

    // Fail early when there is nothing to play on; sounds are loaded per press
    CpalBackend::probe()?;

    let library = SoundLibrary::new(&config.sound_dir);
    let arbiter = Arbiter::new(library).with_volume(config.volume);
    log::info!("Sound directory: {}", arbiter.library().dir().display());

    let mut footer = vec!["Keys:".to_string()];
    footer.extend(
        KeyboardGamepad::bindings()
            .iter()
            .map(|(key, trigger)| format!("  {key:<2} = {}", trigger.name())),
    );
    footer.push("  Q / Esc = quit".to_string());
    let viewer = TerminalViewer::stdout("Play Sounds").with_footer(footer);

    let mut input = KeyboardGamepad::new(config.poll_interval, config.key_hold);

    let _session = TerminalSession::enter()?;
    let mut soundboard = Soundboard::new(
        arbiter,
        CpalBackend::new(),
        TelemetryBuffer::new(viewer),
        &config,
    );
    soundboard.run(&mut input)
}
