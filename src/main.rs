// SPDX-License-Identifier: MPL-2.0
use player_overlay::app::paths;
use player_overlay::config;
use player_overlay::error::{ControlError, Error};
use player_overlay::infrastructure::SourceImageLoader;
use player_overlay::media::{CacheKeyCodec, EntryStatus, ThumbnailCache};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
player_overlay - resolve a media preview through the thumbnail cache

USAGE:
  player_overlay [OPTIONS] <SOURCE>

OPTIONS:
  --cache-dir <DIR>    Override the thumbnail cache root
  --config-dir <DIR>   Override the settings directory
  --app-name <NAME>    Application identity used for the cache namespace
  --no-cache           Bypass the cache and print the source as-is
  -h, --help           Print help
";

struct Flags {
    cache_dir: Option<String>,
    config_dir: Option<String>,
    app_name: Option<String>,
    no_cache: bool,
    source: String,
}

fn parse_args() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let cache_dir = args.opt_value_from_str("--cache-dir")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let app_name = args.opt_value_from_str("--app-name")?;
    let no_cache = args.contains("--no-cache");
    let source = args.free_from_str()?;

    Ok(Some(Flags {
        cache_dir,
        config_dir,
        app_name,
        no_cache,
        source,
    }))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let flags = match parse_args() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "preview resolution failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(flags: Flags) -> Result<(), Error> {
    paths::init_cli_overrides(flags.cache_dir, flags.config_dir);

    let (config, warning) = config::load();
    if let Some(key) = warning {
        tracing::warn!(%key, "using default settings");
    }
    let settings = config.player_settings();

    if flags.no_cache || !settings.should_cache {
        println!("{}\t{:.4}", flags.source, 1.0);
        return Ok(());
    }

    let identity = flags.app_name.as_deref().unwrap_or(paths::APP_NAME);
    let root: PathBuf = paths::cache_root(None, identity).ok_or_else(|| {
        ControlError::CacheUnavailable("no platform cache directory".to_string())
    })?;

    let loader = SourceImageLoader::new()
        .map_err(|err| ControlError::FetchFailed(err.to_string()))?;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut cache = ThumbnailCache::new(CacheKeyCodec::new(root), Arc::new(loader), tx);

    let mut entry = cache.resolve(&flags.source);
    if entry.status != EntryStatus::Ready {
        cache.request(&flags.source);
        while entry.status == EntryStatus::Missing || entry.status == EntryStatus::Pending {
            let Some(completion) = rx.recv().await else {
                break;
            };
            if let Some(done) = cache.complete(completion) {
                entry = done;
            }
        }
    }

    match (entry.status, entry.aspect_ratio) {
        (EntryStatus::Ready, Some(ratio)) => {
            println!("{}\t{:.4}", entry.path.display(), ratio.value());
            Ok(())
        }
        _ => Err(ControlError::FetchFailed(flags.source).into()),
    }
}
