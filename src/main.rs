//! Folio - A terminal portfolio viewer with a paged production showcase.
//!
//! # Usage
//!
//! ```bash
//! folio                       # bundled sample catalog
//! folio portfolio.json
//! folio --watch --open go-chat-app portfolio.json
//! folio --dump go-chat-app portfolio.json
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use folio::app::{App, item_plain_text};
use folio::catalog::Catalog;
use folio::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use folio::modal::DEFAULT_CLOSE_DELAY;
use folio::perf;
use folio::ui::style::{Background, set_background_mode};

/// A terminal portfolio viewer with a paged production showcase
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// JSON catalog to show (bundled sample when omitted)
    #[arg(value_name = "CATALOG")]
    catalog: Option<PathBuf>,

    /// Reload the catalog when the file changes
    #[arg(short, long)]
    watch: bool,

    /// Modal exit animation delay in milliseconds
    #[arg(long, value_name = "MS")]
    close_delay: Option<u64>,

    /// Open the production item with this id at start
    #[arg(long, value_name = "ID")]
    open: Option<String>,

    /// Force the color theme background (light or dark)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed render/modal debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Print every page of a production item as plain text and exit
    #[arg(long, value_name = "ID")]
    dump: Option<String>,

    /// Save current command-line flags as defaults in the config file
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in the config file
    #[arg(long)]
    clear: bool,
}

// Query the terminal background using OSC 11.
// We talk to /dev/tty so the terminal responds even when stdout is piped.
// On non-Unix platforms we skip the query entirely because the fallback
// (stdin/stdout) leaves an orphaned reader thread that blocks the console
// input buffer, preventing crossterm from receiving any keyboard events.
#[cfg(not(unix))]
fn query_terminal_background() -> std::io::Result<Option<(u8, u8, u8)>> {
    Ok(None)
}

#[cfg(unix)]
fn query_terminal_background() -> std::io::Result<Option<(u8, u8, u8)>> {
    use std::io::{Read, Write};
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel();

    let mut io = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open("/dev/tty")?;
    let reader = io.try_clone()?;

    // OSC 11 query: ESC ] 11 ; ? BEL
    io.write_all(b"\x1b]11;?\x07")?;
    io.flush()?;

    std::thread::spawn(move || {
        let mut reader = reader;
        let mut buf = [0u8; 256];
        let mut collected: Vec<u8> = Vec::new();
        loop {
            match reader.read(&mut buf) {
                Ok(0) => continue,
                Ok(n) => {
                    collected.extend_from_slice(&buf[..n]);
                    if collected.contains(&b'\x07') || collected.windows(2).any(|w| w == b"\x1b\\")
                    {
                        let _ = tx.send(collected);
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let collected = rx
        .recv_timeout(Duration::from_millis(75))
        .unwrap_or_default();
    if collected.is_empty() {
        return Ok(None);
    }
    Ok(parse_osc11_reply(&String::from_utf8_lossy(&collected)))
}

fn background_from_rgb(r: u8, g: u8, b: u8) -> Background {
    let luma = 0.0722_f32.mul_add(
        f32::from(b),
        0.2126_f32.mul_add(f32::from(r), 0.7152 * f32::from(g)),
    );
    if luma >= 140.0 {
        Background::Light
    } else {
        Background::Dark
    }
}

fn detect_background() -> Option<Background> {
    let _raw = enable_raw_mode();
    let result = query_terminal_background();
    let _ = disable_raw_mode();
    result
        .ok()
        .flatten()
        .map(|(r, g, b)| background_from_rgb(r, g, b))
}

fn parse_osc11_reply(reply: &str) -> Option<(u8, u8, u8)> {
    // Expect: ESC ] 11 ; rgb:RRRR/GGGG/BBBB BEL or ST
    let start = reply.find("rgb:")?;
    let data = &reply[start + 4..];
    let mut parts = data.split(['/', '\x07', '\x1b']);
    let r = parts.next()?;
    let g = parts.next()?;
    let b = parts.next()?;
    Some((
        parse_osc_component(r)?,
        parse_osc_component(g)?,
        parse_osc_component(b)?,
    ))
}

fn parse_osc_component(s: &str) -> Option<u8> {
    let hex = s.trim();
    if hex.len() >= 4 {
        let v = u16::from_str_radix(hex.get(..4)?, 16).ok()?;
        u8::try_from(v >> 8).ok()
    } else if hex.len() == 2 {
        u8::from_str_radix(hex, 16).ok()
    } else {
        None
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path).context("failed to load catalog"),
        None => Catalog::bundled().context("bundled catalog is invalid"),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os(perf::DEBUG_LOG_ENV).map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            path = ?render_debug_log_path,
            error = %err,
            "failed to initialize render debug log"
        );
    }

    if let Some(id) = &cli.dump {
        let catalog = load_catalog(cli.catalog.as_ref())?;
        let item = catalog
            .item(id)
            .with_context(|| format!("no production item with id '{id}'"))?;
        print!("{}", item_plain_text(item));
        return Ok(());
    }

    match effective.theme.unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => set_background_mode(detect_background()),
        ThemeMode::Light => set_background_mode(Some(Background::Light)),
        ThemeMode::Dark => set_background_mode(Some(Background::Dark)),
    }

    if let Some(path) = &cli.catalog
        && !path.exists()
    {
        anyhow::bail!("Catalog not found: {}", path.display());
    }

    let close_delay = effective
        .close_delay_ms
        .map_or(DEFAULT_CLOSE_DELAY, Duration::from_millis);

    // Run the application
    let mut app = App::new(cli.catalog)
        .with_watch(effective.watch)
        .with_close_delay(close_delay)
        .with_open_item(cli.open)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_osc11_reply_reads_16_bit_components() {
        let reply = "\x1b]11;rgb:ffff/8000/0000\x07";
        assert_eq!(parse_osc11_reply(reply), Some((255, 128, 0)));
    }

    #[test]
    fn test_parse_osc11_reply_rejects_garbage() {
        assert_eq!(parse_osc11_reply("no color here"), None);
        assert_eq!(parse_osc11_reply("rgb:zz/00/00"), None);
    }

    #[test]
    fn test_background_from_rgb() {
        assert_eq!(background_from_rgb(255, 255, 255), Background::Light);
        assert_eq!(background_from_rgb(0, 0, 0), Background::Dark);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "folio",
            "--close-delay",
            "50",
            "--open",
            "go-chat-app",
            "portfolio.json",
        ])
        .unwrap();
        assert_eq!(cli.close_delay, Some(50));
        assert_eq!(cli.open.as_deref(), Some("go-chat-app"));
        assert_eq!(cli.catalog, Some(PathBuf::from("portfolio.json")));
    }
}
