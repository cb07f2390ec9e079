use std::path::PathBuf;

use clap::Parser;

use urban_wraps_rs::config::AppConfig;
use urban_wraps_rs::logging::init_tracing;
use urban_wraps_rs::menu_seed::default_menu;
use urban_wraps_rs::state::{save_menu, Collection, FileStore};

#[derive(Parser, Debug)]
#[command(name = "seed")]
#[command(about = "Write the default Urban Wraps menu, or clear stored records")]
struct Args {
    /// Data directory shared with `urban_wraps`
    #[arg(short, long, default_value = ".urban_wraps")]
    data_dir: PathBuf,

    /// Remove all orders, reservations and users instead of seeding
    #[arg(long)]
    clear: bool,
}

fn main() {
    init_tracing();
    let args = Args::parse();
    let config = AppConfig::load(&args.data_dir);

    if args.clear {
        let store = match FileStore::open(config.store_dir()) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Error opening store {:?}: {}", config.store_dir(), e);
                std::process::exit(1);
            }
        };
        for collection in Collection::ALL {
            match store.clear(collection) {
                Ok(removed) => println!("Cleared {} {}", removed, collection.name()),
                Err(e) => {
                    eprintln!("Error clearing {}: {}", collection.name(), e);
                    std::process::exit(1);
                }
            }
        }
        return;
    }

    let menu = default_menu();
    let path = config.menu_path();
    if let Err(e) = save_menu(&path, &menu) {
        eprintln!("Error writing menu {:?}: {}", path, e);
        std::process::exit(1);
    }

    println!(
        "Seeded {} bases, {} ingredients, {} add-ons to {:?}",
        menu.bases.len(),
        menu.ingredients.len(),
        menu.add_ons.len(),
        path
    );
}
