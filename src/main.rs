// SPDX-License-Identifier: MPL-2.0
use image_preview::config;
use image_preview::domain::resource::ResourceLocator;
use image_preview::infrastructure::{HeadlessSurface, ManualWatcher, NotifyWatcher};
use image_preview::preview::Effect;
use image_preview::session::PreviewSession;
use std::path::PathBuf;
use std::rc::Rc;

const HELP: &str = "\
Usage: image_preview [OPTIONS] <IMAGE>

Prints the bootstrap document a preview surface would load for IMAGE.

Options:
  --lang <LOCALE>            Override the display language
  --extension-root <DIR>     Directory holding media/main.css and media/main.js
  --watch                    Keep running and print a new document on every change
  -h, --help                 Print this help
";

struct Args {
    lang: Option<String>,
    extension_root: Option<PathBuf>,
    watch: bool,
    image: String,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let lang = args.opt_value_from_str("--lang")?;
    let extension_root = args.opt_value_from_str("--extension-root")?;
    let watch = args.contains("--watch");
    let image = args.free_from_str()?;
    Ok(Some(Args {
        lang,
        extension_root,
        watch,
        image,
    }))
}

/// Accepts a locator (`file:///…`, `data:…`) or a filesystem path.
fn resolve_image(input: &str) -> image_preview::error::Result<ResourceLocator> {
    if input.contains(':') && !std::path::Path::new(input).exists() {
        return ResourceLocator::parse(input);
    }
    let path = std::fs::canonicalize(input)?;
    ResourceLocator::from_file_path(path)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    let config = config::load()?;
    if let Some(path) = config::config_path() {
        log::debug!("settings from {}", path.display());
    }
    let extension_root = match args.extension_root {
        Some(dir) => ResourceLocator::from_directory_path(std::fs::canonicalize(dir)?)?,
        None => ResourceLocator::from_directory_path(std::env::current_dir()?)?,
    };
    let resource = resolve_image(&args.image)?;

    let mut session = PreviewSession::new(extension_root, &config, args.lang);
    let surface = Rc::new(HeadlessSurface::new());
    surface.set_active(true);

    let id = if args.watch {
        session.open(resource, surface.clone(), &NotifyWatcher::new())?
    } else {
        session.open(resource, surface.clone(), &ManualWatcher::new())?
    };
    if let Some(html) = surface.content() {
        println!("{html}");
    }
    if !args.watch {
        return Ok(());
    }

    log::info!("{id}: watching for changes, press Ctrl+C to stop");
    let mut ticker = tokio::time::interval(std::time::Duration::from_millis(100));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = ticker.tick() => {
                for (_, effect) in session.pump() {
                    if let Effect::Rendered(version) = effect {
                        log::info!("{id}: re-rendered as version {version}");
                        if let Some(html) = surface.content() {
                            println!("{html}");
                        }
                    }
                }
            }
        }
    }
    surface.dispose();
    session.pump();
    Ok(())
}
