use clap::{Parser, Subcommand};
use imagecloud::config::{self, AppConfig};
use imagecloud::gallery::GalleryDb;
use imagecloud::output;
use imagecloud::services::Services;
use imagecloud::types::{Gallery, Image};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "imagecloud")]
#[command(about = "Manage photo galleries and their images")]
#[command(long_about = "\
Manage photo galleries and their images

Gallery records live in a SQLite database. Images are plain files:

  <images root>/
  └── images/
      └── galleries/
          ├── 1/                 # gallery 1
          │   ├── beach.jpg
          │   └── sunset.jpg
          └── 2/
              └── tokyo.jpg

An image belongs to a gallery when its file is in that gallery's directory.
Deleting a gallery keeps its files unless --purge-images is given.

Run 'imagecloud gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Production mode: refuse to start without a config.toml
    #[arg(long, global = true)]
    prod: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database schema if it doesn't exist
    Migrate,
    /// Drop all gallery records and recreate the schema (image files are kept)
    Reset,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Gallery records
    Gallery {
        #[command(subcommand)]
        command: GalleryCommand,
    },
    /// Image files
    Image {
        #[command(subcommand)]
        command: ImageCommand,
    },
}

#[derive(Subcommand)]
enum GalleryCommand {
    /// Create a gallery
    Create {
        #[arg(long)]
        user: u64,
        #[arg(long)]
        title: String,
    },
    /// Show a gallery with its images laid out in columns
    Show {
        id: u64,
        /// Number of columns (defaults to layout.columns)
        #[arg(long)]
        columns: Option<usize>,
    },
    /// List a user's galleries
    List {
        #[arg(long)]
        user: u64,
    },
    /// Change a gallery's title or owner
    Update {
        id: u64,
        #[arg(long)]
        user: Option<u64>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Soft-delete a gallery
    Delete {
        id: u64,
        /// Also remove the gallery's image directory
        #[arg(long)]
        purge_images: bool,
    },
}

#[derive(Subcommand)]
enum ImageCommand {
    /// Copy a file into a gallery
    Upload {
        gallery_id: u64,
        file: PathBuf,
        /// Stored filename (defaults to the source file's name)
        #[arg(long)]
        name: Option<String>,
    },
    /// List a gallery's images
    List { gallery_id: u64 },
    /// Delete one image from a gallery
    Delete { gallery_id: u64, filename: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Migrate => {
            let (app_config, _services) = open_services(&cli.config_dir, cli.prod)?;
            info!("schema up to date");
            println!("Database ready: {}", app_config.database.path.display());
        }
        Command::Reset => {
            let (_, services) = open_services(&cli.config_dir, cli.prod)?;
            services.destructive_reset()?;
            println!("Gallery records reset");
        }
        Command::Gallery { command } => {
            let (app_config, services) = open_services(&cli.config_dir, cli.prod)?;
            run_gallery(&services, &app_config, command, cli.json)?;
        }
        Command::Image { command } => {
            let (_, services) = open_services(&cli.config_dir, cli.prod)?;
            run_image(&services, command, cli.json)?;
        }
    }

    Ok(())
}

/// Load config, start logging, and open a migrated set of services.
///
/// In production mode a missing `config.toml` is fatal.
fn open_services(
    config_dir: &Path,
    prod: bool,
) -> Result<(AppConfig, Services), Box<dyn std::error::Error>> {
    let app_config = if prod {
        config::require_config(config_dir)?
    } else {
        config::load_config(config_dir)?
    };
    init_logging(&app_config);

    let services = Services::open(&app_config)?;
    services.auto_migrate()?;
    Ok((app_config, services))
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(app_config: &AppConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| app_config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_gallery(
    services: &Services,
    app_config: &AppConfig,
    command: GalleryCommand,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        GalleryCommand::Create { user, title } => {
            let mut gallery = Gallery::new(user, title);
            services.gallery.create(&mut gallery)?;
            emit_gallery(&gallery, json)?;
        }
        GalleryCommand::Show { id, columns } => {
            let gallery = services.gallery_with_images(id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&gallery)?);
            } else {
                let n = columns.unwrap_or(app_config.layout.columns);
                let split = gallery.images_split_n(n)?;
                output::print_gallery_columns(&gallery, &split);
            }
        }
        GalleryCommand::List { user } => {
            let galleries = services.gallery.by_user_id(user)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&galleries)?);
            } else {
                output::print_gallery_list(user, &galleries);
            }
        }
        GalleryCommand::Update { id, user, title } => {
            let mut gallery = services.gallery.by_id(id)?;
            if let Some(user) = user {
                gallery.user_id = user;
            }
            if let Some(title) = title {
                gallery.title = title;
            }
            services.gallery.update(&mut gallery)?;
            emit_gallery(&gallery, json)?;
        }
        GalleryCommand::Delete { id, purge_images } => {
            services.delete_gallery(id, purge_images)?;
            println!("Deleted gallery {}", id);
        }
    }
    Ok(())
}

fn run_image(
    services: &Services,
    command: ImageCommand,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ImageCommand::Upload {
            gallery_id,
            file,
            name,
        } => {
            let filename = match name {
                Some(name) => name,
                None => source_filename(&file)?,
            };
            let source = std::fs::File::open(&file)?;
            let image = services.images.create(gallery_id, source, &filename)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&image)?);
            } else {
                println!("Uploaded {} → {}", file.display(), image.path());
            }
        }
        ImageCommand::List { gallery_id } => {
            let images = services.images.by_gallery_id(gallery_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&images)?);
            } else {
                output::print_images(gallery_id, &images);
            }
        }
        ImageCommand::Delete {
            gallery_id,
            filename,
        } => {
            let image = Image::new(gallery_id, filename);
            services.images.delete(&image)?;
            println!("Deleted {}", image.path());
        }
    }
    Ok(())
}

fn emit_gallery(gallery: &Gallery, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(gallery)?);
    } else {
        output::print_gallery(gallery);
    }
    Ok(())
}

/// Final component of an upload source path.
fn source_filename(file: &Path) -> Result<String, std::io::Error> {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("no filename in {}", file.display()),
            )
        })
}
