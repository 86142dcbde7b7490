//! Entry point for the **hintbar** daemon.
//!
//! Spawns the command sources on background threads and processes incoming
//! commands on the main thread, printing each new title line to stdout for
//! polybar to pick up.

use hintbar::bar::HintBar;
use hintbar::command::Command;
use hintbar::config::Config;
use hintbar::i3::events::I3EventSource;
use hintbar::i3::wm::I3Wm;
use hintbar::ipc::{default_socket_path, listener::UnixSocketListener};
use hintbar::render::Renderer;
use hintbar::traits::{CommandSource, WindowManager};
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc;

/// Resolve the default config path (`$XDG_CONFIG_HOME/hintbar/config.json`).
fn default_config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("hintbar").join("config.json")
}

/// Load the config named by `--config`, or the default file if it exists.
///
/// A missing default file means compiled-in defaults; any other failure
/// is fatal.
fn load_config() -> Config {
    let explicit = config_arg();
    let path = explicit.clone().unwrap_or_else(default_config_path);
    if explicit.is_none() && !path.exists() {
        info!("no config file at {}, using defaults", path.display());
        return Config::default();
    }
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn config_arg() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

fn main() {
    env_logger::init();

    let config = load_config();
    let socket_path = config.socket_path.clone().unwrap_or_else(default_socket_path);

    let renderer = match Renderer::new(config.render) {
        Ok(r) => r,
        Err(e) => {
            error!("invalid render config: {}", e);
            std::process::exit(1);
        }
    };
    let bar = HintBar::new(I3Wm::new(), config.hints, renderer);

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_sources(cmd_tx.clone(), socket_path);

    // Print the initial line before any event arrives.
    if cmd_tx.send(Command::Refresh).is_err() {
        error!("command channel closed before start");
    }
    drop(cmd_tx);

    run(bar, cmd_rx);
}

fn run<W: WindowManager>(mut bar: HintBar<W>, cmd_rx: mpsc::Receiver<Command>) {
    info!("hintbar running");
    for cmd in cmd_rx {
        match bar.handle(cmd) {
            Ok(Some(line)) => println!("{}", line),
            Ok(None) => {}
            Err(e) => error!("command error: {}", e),
        }
    }
    info!("all command sources closed, exiting");
}

fn spawn_command_sources(tx: mpsc::Sender<Command>, socket_path: PathBuf) {
    {
        let tx = tx.clone();
        std::thread::spawn(move || {
            let mut source = UnixSocketListener::new(&socket_path);
            if let Err(e) = source.run(tx) {
                error!("socket listener error: {}", e);
            }
        });
    }

    std::thread::spawn(move || {
        let mut source = I3EventSource::new();
        if let Err(e) = source.run(tx) {
            error!("i3 event stream error: {}", e);
        }
    });
}
