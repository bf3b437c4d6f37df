//! Debug tool to inspect saved decks.
//!
//! Usage:
//!   `cargo run --bin dump_deck -- <deck.json>`
//!   `cargo run --bin dump_deck -- <deck.json> --json`
//!   `cargo run --bin dump_deck -- --share <share-id>`
//!
//! Prints each slide with its elements in paint order, or the hydrated deck
//! re-encoded as JSON. Files that fail validation are reported along with
//! the fallback deck the editor would have opened instead.

use std::path::Path;

use anyhow::{bail, Context, Result};
use wrapdeck::animation::{resolve, Phase};
use wrapdeck::config::Config;
use wrapdeck::model::Deck;
use wrapdeck::storage::{self, FileStore, HydrateSource, Hydrated};
use wrapdeck::style::resolved_style;
use wrapdeck::types::ShareId;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_target(false).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let hydrated = if args.iter().any(|a| a == "--share") {
        let Some(id) = positional.first() else {
            bail!("Usage: dump_deck --share <share-id>");
        };
        let config = Config::load()?;
        let store = FileStore::new(config.data_dir.clone(), config.share_retention_days);
        let hydrated = storage::load_shared(&store, &ShareId::new(id.as_str()))?;
        if hydrated.source == HydrateSource::Missing {
            bail!("Share {id} not found under {}", store.root().display());
        }
        hydrated
    } else {
        let Some(path) = positional.first() else {
            bail!("Usage: dump_deck <deck.json> [--json] | --share <share-id>");
        };
        load_file(Path::new(path.as_str()))?
    };

    if let HydrateSource::Fallback(reason) = &hydrated.source {
        eprintln!("warning: deck is invalid ({reason}); showing the fallback deck");
    }

    if json {
        println!("{}", storage::encode(&hydrated.deck)?);
    } else {
        dump(&hydrated.deck);
    }
    Ok(())
}

fn load_file(path: &Path) -> Result<Hydrated> {
    let text = fs_err::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(storage::hydrate(Some(&text)))
}

fn dump(deck: &Deck) {
    println!("{} slide(s), z watermark {}", deck.len(), deck.watermark());
    for (i, slide) in deck.slides().iter().enumerate() {
        let (w, h) = slide.canvas_size();
        println!();
        println!(
            "── Slide {} · {} · {}s · {w}x{h} · {:?} {}",
            i + 1,
            slide.title(),
            slide.duration,
            slide.background.kind,
            slide.background.value
        );
        for el in slide.paint_order() {
            let style = resolved_style(el);
            let enter = resolve(el, true, Phase::Entering);
            println!(
                "  z{:<4} {:<12} {:>6.0},{:<6.0} {:>5.0}x{:<5.0} {:<9} in:{:?} (from x {:.0}) out:{:?}  {}",
                el.z_index,
                el.element_type().name(),
                el.position.x,
                el.position.y,
                el.size.width,
                el.size.height,
                style.color,
                el.animation_in,
                enter.from.x,
                el.animation_out,
                el.label().chars().take(40).collect::<String>(),
            );
        }
    }
}
