use anyhow::{bail, ensure, Context, Result};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use std::{
    collections::HashSet,
    env,
    fs::{self, File},
    io::{self, Write},
    path::PathBuf,
};
use tracing::{info, warn};

use kindle_clippings::{
    export::{
        csv_writer::write_csv,
        json_writer::{render_groups_json, render_records_json},
        markdown::{markdown_file_name, render_group_markdown, render_groups_markdown},
        ExportFormat,
    },
    my_clippings::{
        parser::parse_my_clippings,
        query::{group_by_title, sort_by_location, statistics, KindFilter},
    },
};

const USAGE: &str = "Usage: kindle-clippings [options] <MY_CLIPPINGS_TXT> [OUTPUT]";

struct Args {
    clippings_path: String,
    output_path: Option<String>,
    format: ExportFormat,
    query: String,
    kind: KindFilter,
    sort_location: bool,
    stats: bool,
    verbose: bool,
}

fn options() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optopt(
        "f",
        "format",
        "json (default), groups-json, csv or markdown",
        "FORMAT",
    );
    opts.optopt("q", "query", "keep records containing TEXT", "TEXT");
    opts.optopt(
        "k",
        "kind",
        "all (default), highlight, bookmark, note or unknown",
        "KIND",
    );
    opts.optflag("s", "sort-location", "sort records by location");
    opts.optflag("", "stats", "print statistics instead of exporting");
    opts.optflag("v", "verbose", "debug logging");
    opts.optflag("h", "help", "print this help");
    opts
}

// None when only help was requested
fn get_args() -> Result<Option<Args>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let opts = options();

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    if matches.opt_present("h") {
        print!("{}", opts.usage(USAGE));
        return Ok(None);
    }

    let clippings_path = matches
        .free
        .first()
        .context("path to My Clippings.txt is required")?
        .clone();
    let output_path = matches.free.get(1).cloned();

    let format = match matches.opt_str("f") {
        Some(f) => ExportFormat::of(&f)?,
        None => ExportFormat::Json,
    };
    let kind = match matches.opt_str("k") {
        Some(k) => KindFilter::of(&k)?,
        None => KindFilter::All,
    };

    Ok(Some(Args {
        clippings_path,
        output_path,
        format,
        query: matches.opt_str("q").unwrap_or_default(),
        kind,
        sort_location: matches.opt_present("s"),
        stats: matches.opt_present("stats"),
        verbose: matches.opt_present("v"),
    }))
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("KINDLE_CLIPPINGS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

enum Out {
    Stdout,
    File { path: PathBuf },
    Directory { root: PathBuf },
}

impl Out {
    fn init(output_path: Option<&str>, format: ExportFormat) -> Result<Self> {
        let Some(output_path) = output_path else {
            return Ok(Self::Stdout);
        };

        let path = PathBuf::from(output_path);
        if format == ExportFormat::Markdown {
            fs::create_dir_all(&path).with_context(|| {
                format!("Failed to create output directory: {}", path.display())
            })?;
            Ok(Self::Directory { root: path })
        } else {
            Ok(Self::File { path })
        }
    }

    fn write_text(&self, text: &str) -> Result<()> {
        match self {
            Out::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                if !text.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
            }
            Out::File { path } | Out::Directory { root: path } => {
                fs::write(path, text)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let Some(args) = get_args()? else {
        return Ok(());
    };

    init_tracing(args.verbose)?;

    let clippings_path = PathBuf::from(&args.clippings_path);
    ensure!(
        clippings_path.exists(),
        "File not found: {}",
        clippings_path.display()
    );

    let bytes = fs::read(&clippings_path)
        .with_context(|| format!("Failed to read {}", clippings_path.display()))?;
    let (txt, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        warn!(path = %clippings_path.display(), "input is not valid UTF-8, replaced malformed bytes");
    }

    let parsed = parse_my_clippings(&txt);
    ensure!(
        !parsed.is_empty(),
        "No clippings found in {}",
        clippings_path.display()
    );

    let selected = parsed.search(&args.query, args.kind);
    info!(
        selected = selected.len(),
        total = parsed.len(),
        "selected records"
    );

    if args.stats {
        let stats = statistics(selected.iter().copied());
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let selected = if args.sort_location {
        sort_by_location(selected)
    } else {
        selected
    };

    let out = Out::init(args.output_path.as_deref(), args.format)?;

    match args.format {
        ExportFormat::Json => out.write_text(&render_records_json(selected)?)?,
        ExportFormat::GroupsJson => out.write_text(&render_groups_json(&group_by_title(selected))?)?,
        ExportFormat::Csv => match &out {
            Out::Stdout => write_csv(io::stdout().lock(), selected)?,
            Out::File { path } | Out::Directory { root: path } => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                write_csv(file, selected)?;
            }
        },
        ExportFormat::Markdown => {
            let groups = group_by_title(selected);
            match &out {
                Out::Directory { root } => {
                    let mut used = HashSet::new();
                    let pb = create_progress_bar(groups.len() as u64);
                    for group in groups.iter().progress_with(pb) {
                        let name = markdown_file_name(&group.display_title(), &mut used);
                        let path = root.join(name);
                        fs::write(&path, render_group_markdown(group))
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                    }
                }
                _ => out.write_text(&render_groups_markdown(&groups))?,
            }
        }
    }

    Ok(())
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(
        "{percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
    ) {
        pb.set_style(style.progress_chars("#-"));
    }
    pb
}
