use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use classicyou_editor::config::{self, CONFIG_FILE};
use classicyou_editor::level::{EditorLevel, ObjectKind};

/// Inspect a ClassicYou level file.
#[derive(Parser, Debug)]
#[command(
    name = "level-info",
    about = "Loads a ClassicYou level and prints a per-floor summary",
    version
)]
struct Args {
    /// Level file to load.
    file: PathBuf,

    /// Editor configuration file.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Write the loaded level back out to this path.
    #[arg(long, value_name = "OUT")]
    resave: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    classicyou_core::init();

    let args = Args::parse();
    let config = config::load_or_default(&args.config);
    let mut level = EditorLevel::new().with_select_distance(config.editor.select_distance);

    let summary = match level.load_from_file(&args.file) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("Failed to load {}: {e}", args.file.display());
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "{} (format v{}): {} objects loaded, {} skipped",
        args.file.display(),
        summary.version,
        summary.loaded,
        summary.skipped
    );

    for floor in level.floors().floors() {
        let counts: Vec<String> = ObjectKind::ALL
            .iter()
            .map(|kind| {
                let n = floor.objects.iter().filter(|o| o.kind() == *kind).count();
                (kind, n)
            })
            .filter(|(_, n)| *n > 0)
            .map(|(kind, n)| format!("{n} {}", kind.tag()))
            .collect();
        let triangles: usize = floor.meshes.iter().map(|m| m.mesh.triangle_count()).sum();
        log::info!(
            "Floor {:>3}: {} [{}] {} triangles",
            floor.real_floor,
            floor.objects.len(),
            counts.join(", "),
            triangles
        );
    }

    if let Some(out) = &args.resave {
        if let Err(e) = level.save_to_file(out) {
            log::error!("Failed to write {}: {e}", out.display());
            return ExitCode::FAILURE;
        }
        log::info!("Resaved to {}", out.display());
    }
    ExitCode::SUCCESS
}
