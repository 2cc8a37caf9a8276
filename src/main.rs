//! CLI entry point for treex

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgGroup, Parser};
use termcolor::StandardStream;
use tracing_subscriber::EnvFilter;
use treex::config::{ConfigPaths, IconKind, IconSet, IgnoreList, Settings};
use treex::export::{ExportPipeline, FormatRegistry};
use treex::output::report;
use treex::{
    ColorMode, ConsoleFormatter, IgnoreMatcher, TreeWalker, TreexError, WalkerConfig, join_lines,
    print_json,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "TREEX_LOG";

#[derive(Parser, Debug)]
#[command(name = "treex")]
#[command(about = "🌲 A cross-platform CLI for visualizing folder structures")]
#[command(version)]
#[command(group(
    ArgGroup::new("mode")
        .multiple(false)
        .args([
            "show_ignored",
            "add_ignored",
            "remove_ignored",
            "show_icons",
            "set_icon",
            "restore_icons",
            "list_formats",
        ])
))]
struct Args {
    /// Directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Show extra details like locked and hidden markers
    #[arg(short, long)]
    details: bool,

    /// Only show top-level folders and files (non-recursive)
    #[arg(short, long)]
    collapsed: bool,

    /// Show only folders recursively, omit files
    #[arg(short, long = "folders-only")]
    folders_only: bool,

    /// List currently ignored file and folder names and exit
    #[arg(short, long = "show-ignored")]
    show_ignored: bool,

    /// Comma-separated names to add to the ignored list
    #[arg(short, long = "add-ignored", value_name = "ITEMS")]
    add_ignored: Option<String>,

    /// Comma-separated names to remove from the ignored list
    #[arg(short, long = "remove-ignored", value_name = "ITEMS")]
    remove_ignored: Option<String>,

    /// Show the current icon configuration
    #[arg(long = "show-icons")]
    show_icons: bool,

    /// Replace one icon (folder, file, hidden, locked, permissionDenied)
    #[arg(long = "set-icon", num_args = 2, value_names = ["TYPE", "ICON"])]
    set_icon: Option<Vec<String>>,

    /// Restore every icon to its default
    #[arg(long = "restore-icons")]
    restore_icons: bool,

    /// List supported export formats
    #[arg(long = "list-formats")]
    list_formats: bool,

    /// Export filename without extension
    #[arg(long = "save-to", value_name = "FILENAME", conflicts_with = "mode")]
    save_to: Option<String>,

    /// Export format(s), comma-separated (md, txt, svg, bmp, png, webp)
    #[arg(long = "export-as", value_name = "TYPES", conflicts_with = "mode")]
    export_as: Option<String>,

    /// Output the tree as JSON
    #[arg(long = "json", conflicts_with_all = ["mode", "save_to", "export_as"])]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

/// Split a comma-separated option into trimmed, non-empty items.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging();

    let paths = ConfigPaths::discover();
    tracing::debug!(config_dir = %paths.dir().display(), "using configuration directory");

    if let Err(e) = run(&args, &paths) {
        eprintln!("treex: {}", e);
        if let TreexError::InvalidIconType(_) = e {
            eprintln!("treex: Valid types: {}", IconKind::valid_names());
        }
        process::exit(1);
    }
}

fn run(args: &Args, paths: &ConfigPaths) -> treex::Result<()> {
    let mut stdout = StandardStream::stdout(args.color.choice());

    if args.show_ignored {
        let list = IgnoreList::load(&paths.ignored())?;
        report::write_ignored_list(&mut stdout, &list)?;
        return Ok(());
    }
    if let Some(items) = &args.add_ignored {
        let outcome = IgnoreList::add_and_save(&paths.ignored(), &split_list(items))?;
        report::write_add_outcome(&mut stdout, &outcome)?;
        return Ok(());
    }
    if let Some(items) = &args.remove_ignored {
        let outcome = IgnoreList::remove_and_save(&paths.ignored(), &split_list(items))?;
        report::write_remove_outcome(&mut stdout, &outcome)?;
        return Ok(());
    }
    if args.show_icons {
        let icons = IconSet::load(&paths.icons())?;
        report::write_icons(&mut stdout, &icons)?;
        return Ok(());
    }
    if let Some([kind, symbol]) = args.set_icon.as_deref() {
        let (old, new) = IconSet::update(&paths.icons(), kind, symbol)?;
        report::write_icon_updated(&mut stdout, kind, &old, &new)?;
        return Ok(());
    }
    if args.restore_icons {
        IconSet::restore(&paths.icons())?;
        report::write_icons_restored(&mut stdout)?;
        return Ok(());
    }

    let settings = Settings::load(&paths.settings())?;
    if args.list_formats {
        let registry = FormatRegistry::builtin(&settings.export);
        report::write_formats(&mut stdout, &registry)?;
        return Ok(());
    }

    if args.save_to.is_some() || args.export_as.is_some() {
        let (Some(base), Some(types)) = (&args.save_to, &args.export_as) else {
            return Err(TreexError::Usage(
                "Both --save-to and --export-as options must be provided together".to_string(),
            ));
        };
        let formats: Vec<String> = split_list(types).iter().map(|t| t.to_lowercase()).collect();
        let registry = FormatRegistry::builtin(&settings.export);
        let unsupported = registry.unsupported(&formats);
        if !unsupported.is_empty() {
            return Err(TreexError::Usage(format!(
                "Unsupported export type(s): {}\nSupported types: {}",
                unsupported.join(", "),
                registry.identifiers().join(", ")
            )));
        }

        let walker = build_walker(args, paths)?;
        let root = resolve_root(&args.path)?;
        let tree = join_lines(&walker.lines(&root));

        report::write_export_banner(&mut stdout)?;
        stdout.flush()?;
        let out_dir = std::env::current_dir()?;
        let result = ExportPipeline::new(&registry, out_dir).export_all(tree.trim(), base, &formats);
        report::write_export_results(&mut stdout, &result)?;
        return Ok(());
    }

    let walker = build_walker(args, paths)?;
    let root = resolve_root(&args.path)?;
    if args.json {
        print_json(&walker.tree(&root))?;
    } else {
        let mut formatter = ConsoleFormatter::new(stdout);
        walker.walk_streaming(&root, &mut formatter)?;
    }
    Ok(())
}

fn build_walker(args: &Args, paths: &ConfigPaths) -> treex::Result<TreeWalker> {
    let ignored = IgnoreList::load(&paths.ignored())?;
    let icons = IconSet::load(&paths.icons())?;
    let config = WalkerConfig {
        show_details: args.details,
        collapsed: args.collapsed,
        folders_only: args.folders_only,
    };
    Ok(TreeWalker::new(
        config,
        IgnoreMatcher::new(ignored.names()),
        icons,
    ))
}

fn resolve_root(path: &Path) -> treex::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
