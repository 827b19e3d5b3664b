use anyhow::Context;
use clap::{Parser, Subcommand};
use sectorwheel::animation::WheelStartupAnimationStatus;
use sectorwheel::config::{self, Config};
use sectorwheel::events::WheelEvent;
use sectorwheel::layout::{AdapterPosition, LayoutManager};
use sectorwheel::preview::PreviewRecycler;
use sectorwheel::rotator::RotationDirection;
use sectorwheel::sys::runtime;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about = "Lays out wheel sectors along the bottom arc", long_about = None)]
struct Cli {
    /// Number of items in the adapter
    #[arg(short = 'n', long, default_value_t = 12)]
    items: usize,

    /// Adapter position placed next to the gap area (overrides the config)
    #[arg(short, long, allow_negative_numbers = true)]
    start: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single regular pass and print the placed sectors
    Layout,
    /// Run the startup pass and play the settle animation until it finishes
    Startup,
    /// Lay out the wheel, then rotate it by `delta` radians
    Rotate {
        direction: RotationDirection,
        #[arg(allow_negative_numbers = true)]
        delta: f64,
    },
    /// Write the bundled configuration to the user config directory
    InitConfig,
}

type Manager = LayoutManager<PreviewRecycler>;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = config::load_or_default();
    let mut manager = build_manager(&config, cli.items, cli.start);

    match cli.command {
        Command::Layout => {
            let cursor = manager.layout_children_regular(cli.items);
            println!("next position: {}", cursor.child_pos);
        }
        Command::Startup => run_startup(&mut manager, &config, cli.items)?,
        Command::Rotate { direction, delta } => {
            manager.layout_children_regular(cli.items);
            manager.rotate_wheel_by(direction, delta);
        }
        Command::InitConfig => {
            let (path, written) = config::init_config_file().context("Failed to set up config")?;
            let verb = if written { "wrote" } else { "kept" };
            println!("{} {}", verb, path.display());
            return Ok(());
        }
    }

    print_sectors(&manager);
    Ok(())
}

fn build_manager(config: &Config, items: usize, start: Option<i64>) -> Manager {
    let labels = (0..items).map(|i| format!("item-{}", i)).collect();
    let recycler = PreviewRecycler::new(labels, config.geometry, &config.restrictions);

    let mut manager =
        LayoutManager::bottom(config.restrictions, recycler).with_interpolator(config.interpolator);
    manager.set_start_layout_from_adapter_position(AdapterPosition::new(
        start.unwrap_or(config.start_position),
    ));
    manager
}

fn run_startup(manager: &mut Manager, config: &Config, items: usize) -> anyhow::Result<()> {
    manager.set_initial_layout_finishing_listener(|resting: AdapterPosition| {
        println!("resting position: {}", resting);
    });
    manager.set_startup_animation_listener(|status: WheelStartupAnimationStatus| {
        log::info!("Startup animation: {}", status);
    });

    manager.on_layout_children(items);
    if !manager.is_startup_animation_running() {
        return Ok(());
    }

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx, Duration::from_millis(config.frame_interval_ms));

    loop {
        match rx.recv_blocking().context("Frame clock stopped unexpectedly")? {
            WheelEvent::Frame(dt) => {
                if !manager.tick(dt) {
                    break;
                }
            }
            WheelEvent::Detach => {
                manager.detach();
                break;
            }
        }
    }
    Ok(())
}

fn print_sectors(manager: &Manager) {
    for sector in manager.sectors() {
        println!("{}", sector.view);
    }
}
