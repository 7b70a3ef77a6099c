// SPDX-License-Identifier: MPL-2.0
use locale_switch::config;
use locale_switch::infrastructure::{NoopPlatform, TomlPreferenceStore};
use locale_switch::manager::LocaleManager;
use locale_switch::paths;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
locale-switch

USAGE:
  locale-switch [OPTIONS]

OPTIONS:
  --config-dir DIR   Read locale.toml and preferences from DIR
  --set TAG          Commit TAG as the selected language
  --list             Print the language catalog
  -h, --help         Print this help
";

struct Flags {
    config_dir: Option<String>,
    set: Option<String>,
    list: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(error) => {
            eprintln!("error: {error}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        set: args.opt_value_from_str("--set")?,
        list: args.contains("--list"),
    };
    let rest = args.finish();
    if let Some(unexpected) = rest.first() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected argument {:?}", unexpected),
        });
    }
    Ok(flags)
}

fn run(flags: Flags) -> locale_switch::error::Result<()> {
    paths::init_cli_override(flags.config_dir);

    let (config, warning) = config::load();
    if let Some(key) = warning {
        tracing::warn!(key = %key, "using default configuration");
    }

    let store = TomlPreferenceStore::open(&config.store.name).ok_or_else(|| {
        locale_switch::error::Error::Io("no configuration directory available".to_string())
    })?;
    let manager = LocaleManager::new(store, NoopPlatform, config)?;

    if let Some(tag) = flags.set {
        manager.set_locale(&tag)?;
    }

    if flags.list {
        for entry in manager.catalog().iter() {
            let marker = if manager.is_selected(entry.identifier()) { "*" } else { " " };
            println!("{marker} {:<6} {}", entry.identifier(), entry.name_ref());
        }
    }

    let state = manager.state();
    let locale = state.locale();
    println!(
        "current: {} (language={}, region={})",
        state.identifier(),
        locale.language(),
        locale.region().unwrap_or("-")
    );
    Ok(())
}
