//! docshapes CLI - inline shapes of Word documents
//!
//! A command-line tool for listing, extracting and adding inline shapes in
//! DOCX files.

use clap::{Parser, Subcommand};
use colored::*;
use docshapes::render::{JsonFormat, ShapeSummary};
use docshapes::{Document, InlineShapeType, PictureOptions};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Inline shapes of Word documents: list, extract and add pictures
#[derive(Parser)]
#[command(
    name = "docshapes",
    author = "iyulab",
    version,
    about = "Inspect and edit inline shapes in Word documents",
    long_about = "docshapes - inline shape access for Word (.docx) documents.\n\n\
                  Lists pictures, charts, SmartArt and OLE objects anchored in the text, \
                  extracts embedded images and appends new pictures."
)]
struct Cli {
    /// Log library activity to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the inline shapes of a document
    #[command(visible_alias = "ls")]
    List {
        /// Input file path
        input: PathBuf,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Output compact JSON (no indentation)
        #[arg(long, requires = "json")]
        compact: bool,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show shape counts per type
    Info {
        /// Input file path
        input: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract embedded pictures from a document
    Extract {
        /// Input file path
        input: PathBuf,

        /// Output directory for images
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Append a picture to the end of a document
    AddPicture {
        /// Input document path
        input: PathBuf,

        /// Image file to insert
        image: PathBuf,

        /// Output document path (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Width in EMUs (914400 per inch)
        #[arg(long)]
        width: Option<i64>,

        /// Height in EMUs (914400 per inch)
        #[arg(long)]
        height: Option<i64>,

        /// Resolution used for the native size
        #[arg(long, default_value = "72")]
        dpi: u32,

        /// Shape name
        #[arg(long)]
        name: Option<String>,

        /// Alt text (default: image file name)
        #[arg(long)]
        description: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::List {
            input,
            json,
            compact,
            output,
        } => {
            let pb = create_spinner("Reading document...");
            let doc = Document::open(&input)?;
            let shapes = doc.inline_shapes();

            let rendered = if json {
                let format = if compact {
                    JsonFormat::Compact
                } else {
                    JsonFormat::Pretty
                };
                docshapes::render::to_json(&shapes, format)?
            } else {
                docshapes::render::to_text(&shapes)
            };

            pb.finish_and_clear();
            write_output(output.as_ref(), &rendered)?;

            if let Some(path) = output {
                println!(
                    "{} Listed {} inline shapes: {}",
                    "✓".green().bold(),
                    shapes.len(),
                    path.display()
                );
            }
        }

        Commands::Info { input, json } => {
            let pb = create_spinner("Analyzing document...");
            let doc = Document::open(&input)?;
            let report = docshapes::render::shape_report(&doc.inline_shapes());
            pb.finish_and_clear();

            let counts = count_by_type(&report);
            if json {
                let value = serde_json::json!({
                    "format": doc.format().name(),
                    "part": doc.part_name(),
                    "inline_shapes": report.len(),
                    "by_type": counts,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Format".bold(), doc.format());
            println!("{}: {}", "Main part".bold(), doc.part_name());
            println!("{}: {}", "Inline shapes".bold(), report.len());

            if !counts.is_empty() {
                println!("\n{}", "Shapes by Type".cyan().bold());
                println!("{}", "─".repeat(40));
                for (name, count) in &counts {
                    println!("{}: {}", name.bold(), count);
                }
            }
        }

        Commands::Extract { input, output } => {
            let pb = create_spinner("Extracting pictures...");
            let doc = Document::open(&input)?;
            let shapes = doc.inline_shapes();

            fs::create_dir_all(&output)?;

            let mut written = std::collections::BTreeSet::new();
            for shape in shapes.iter() {
                if shape.shape_type() != InlineShapeType::Picture {
                    continue;
                }
                let image = match shape.image() {
                    Ok(image) => image,
                    Err(e) => {
                        pb.suspend(|| {
                            eprintln!("{} {}", "!".yellow().bold(), e);
                        });
                        continue;
                    }
                };
                let filename = image.filename().to_string();
                if written.insert(filename.clone()) {
                    image.save_to(output.join(&filename))?;
                }
            }

            pb.finish_and_clear();

            if written.is_empty() {
                println!("{} No embedded pictures found in document", "!".yellow().bold());
            } else {
                println!(
                    "{} Extracted {} pictures to {}",
                    "✓".green().bold(),
                    written.len(),
                    output.display()
                );
            }
        }

        Commands::AddPicture {
            input,
            image,
            output,
            width,
            height,
            dpi,
            name,
            description,
        } => {
            let pb = create_spinner("Adding picture...");
            let mut doc = Document::open(&input)?;

            let mut options = PictureOptions::new().with_dpi(dpi);
            if let Some(cx) = width {
                options = options.with_width(cx);
            }
            if let Some(cy) = height {
                options = options.with_height(cy);
            }
            if let Some(name) = name {
                options = options.with_name(name);
            }
            let description = description.or_else(|| {
                image
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            });
            if let Some(description) = description {
                options = options.with_description(description);
            }

            let data = fs::read(&image)?;
            let (r_id, cx, cy) = {
                let shape = doc.add_inline_picture_with(data, &options)?;
                (
                    shape.embed_rid().unwrap_or_default().to_string(),
                    shape.width().unwrap_or_default(),
                    shape.height().unwrap_or_default(),
                )
            };

            let target = output.unwrap_or(input);
            doc.save(&target)?;
            pb.finish_and_clear();

            println!(
                "{} Added {} ({}x{} EMU, {}) to {}",
                "✓".green().bold(),
                image.display(),
                cx,
                cy,
                r_id,
                target.display()
            );
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn count_by_type(report: &[ShapeSummary]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for summary in report {
        *counts.entry(summary.shape_type.name()).or_insert(0) += 1;
    }
    counts
}

fn print_version() {
    println!("{} {}", "docshapes".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Inline shape access for Word documents");
    println!();
    println!("Library: docshapes {}", docshapes::version());
    println!("Repository: https://github.com/iyulab/docshapes");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
