use clap::{Parser, Subcommand};
use static_gallery::{config, output, process, scan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Config overrides accepted by commands that resolve the gallery layout.
#[derive(clap::Args, Clone, Default)]
struct LayoutArgs {
    /// Root that manifest URLs are relative to
    #[arg(long)]
    public_root: Option<PathBuf>,

    /// Source image directory, relative to the public root
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Thumbnail + manifest directory, relative to the public root
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Target thumbnail width in pixels
    #[arg(long)]
    thumbnail_width: Option<u32>,
}

#[derive(clap::Args, Clone, Default)]
struct ProcessArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Maximum parallel workers (defaults to CPU cores)
    #[arg(long)]
    max_processes: Option<usize>,

    /// Skip images whose dimensions cannot be read instead of failing the run
    #[arg(long)]
    skip_corrupt: bool,

    /// Enlarge images narrower than the thumbnail width
    #[arg(long)]
    upscale: bool,
}

#[derive(Parser)]
#[command(name = "static-gallery")]
#[command(about = "Generate thumbnails and a gallery.json manifest for a static image gallery")]
#[command(long_about = "\
Generate thumbnails and a gallery.json manifest for a static image gallery

Every .jpg/.jpeg/.png directly inside <public-root>/<input-dir> gets a
thumbnail of the same name in <public-root>/<output-dir>, resized to the
thumbnail width with its aspect ratio kept. gallery.json lists each image:

  [
    { \"urlFull\": \"/images/a.png\", \"urlThumb\": \"/gallery/a.png\",
      \"width\": 1600, \"height\": 800 }
  ]

width/height are the original's, so a grid can lay out before thumbnails load.

Settings come from gallery.toml (see 'static-gallery gen-config'), overridden
by flags. Set RUST_LOG=debug for per-image logs.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate thumbnails and gallery.json
    Process(ProcessArgs),
    /// Show the resolved layout and the images that would be processed
    Check(LayoutArgs),
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Process(args) => {
            let config = resolve(&cli.config, process_overrides(&args))?;
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::process_images(&config, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            output::print_process_summary(&result?);
        }
        Command::Check(args) => {
            let config = resolve(&cli.config, layout_overrides(&args))?;
            let input = config.input_path();
            let images = scan::qualifying_images(&input)
                .map_err(|e| format!("Cannot read input directory {}: {}", input.display(), e))?;
            output::print_check_output(&config, &images);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for progress output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Layer the config file and flag overrides over the stock defaults.
fn resolve(
    path: &std::path::Path,
    overrides: toml::Table,
) -> Result<config::GalleryConfig, config::ConfigError> {
    let file = config::load_raw_config(path)?;
    config::resolve_config(file.into_iter().chain([toml::Value::Table(overrides)]))
}

fn layout_overrides(args: &LayoutArgs) -> toml::Table {
    let mut table = toml::Table::new();
    let paths = [
        ("public_root", &args.public_root),
        ("input_dir", &args.input_dir),
        ("output_dir", &args.output_dir),
    ];
    for (key, value) in paths {
        if let Some(path) = value {
            table.insert(key.into(), path.to_string_lossy().into_owned().into());
        }
    }
    if let Some(width) = args.thumbnail_width {
        section(&mut table, "thumbnails").insert("width".into(), i64::from(width).into());
    }
    table
}

fn process_overrides(args: &ProcessArgs) -> toml::Table {
    let mut table = layout_overrides(&args.layout);
    if args.upscale {
        section(&mut table, "thumbnails").insert("upscale".into(), true.into());
    }
    if let Some(n) = args.max_processes {
        section(&mut table, "processing").insert("max_processes".into(), (n as i64).into());
    }
    if args.skip_corrupt {
        section(&mut table, "processing").insert("fail_on_corrupt".into(), false.into());
    }
    table
}

/// Get or create a sub-table.
fn section<'a>(table: &'a mut toml::Table, name: &str) -> &'a mut toml::Table {
    table
        .entry(name)
        .or_insert(toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .expect("override sections are always tables")
}
