//! CLI entry point for dirgraph

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use dirgraph::config::CONFIG_FILE_NAME;
use dirgraph::logging::init_logging;
use dirgraph::output::{print_generated, write_json};
use dirgraph::{
    DirectoryNode, DirgraphConfig, DotRenderer, Error, RuleSet, ScanConfig, TreeWalker,
};
use tracing::debug;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Status and log lines go to stderr
            std::io::stderr().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dirgraph")]
#[command(about = "Turn a directory tree into a colored Graphviz cluster diagram")]
#[command(version)]
struct Args {
    /// Directory to visualize
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Write the document to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Read settings from FILE (default: dirgraph.toml in the scanned directory)
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Name of the generated digraph
    #[arg(long = "name")]
    name: Option<String>,

    /// Show hidden entries (names starting with '.')
    #[arg(short, long)]
    all: bool,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Ignore entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Leave out entries matched by .gitignore files
    #[arg(long = "gitignore")]
    gitignore: bool,

    /// Keep the platform's directory listing order instead of sorting by name
    #[arg(long = "unsorted")]
    unsorted: bool,

    /// Skip folders that cannot be read instead of failing
    #[arg(long = "skip-unreadable")]
    skip_unreadable: bool,

    /// Descend into symlinked folders (use with -L to bound cycles)
    #[arg(long = "follow-symlinks")]
    follow_symlinks: bool,

    /// Color every folder the same instead of by category
    #[arg(long = "plain")]
    plain: bool,

    /// Output the scanned tree as JSON instead of DOT
    #[arg(long = "json")]
    json: bool,

    /// Control color of status messages: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    let use_color = should_use_color(args.color);
    init_logging(args.verbose, use_color);

    if let Err(e) = run(&args, use_color) {
        eprintln!("dirgraph: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args, use_color: bool) -> Result<(), Error> {
    let root = if args.path.is_absolute() || args.path.as_os_str().is_empty() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&args.path)
    };

    // A settings file picked up from the root is not part of the project
    let (config, hide_config_file) = match &args.config {
        Some(path) => (DirgraphConfig::from_file(path)?, false),
        None => (
            DirgraphConfig::load(&root),
            root.join(CONFIG_FILE_NAME).is_file(),
        ),
    };
    debug!(?config, "effective config");

    let rules = if args.plain {
        RuleSet::plain()
    } else {
        config.rule_set()
    };

    let mut ignore_patterns = config.ignore.clone();
    ignore_patterns.extend(args.ignore.iter().cloned());
    if hide_config_file {
        ignore_patterns.push(CONFIG_FILE_NAME.to_string());
    }

    let scan_config = ScanConfig {
        show_hidden: args.all,
        max_depth: args.level,
        ignore_patterns,
        respect_gitignore: args.gitignore,
        sort_entries: !args.unsorted,
        skip_unreadable: args.skip_unreadable,
        follow_symlinks: args.follow_symlinks,
    };

    let tree = TreeWalker::new(scan_config, rules).walk(&root)?;

    let content = if args.json {
        let mut buf = Vec::new();
        write_json(&tree, &mut buf)?;
        buf
    } else {
        let mut style = config.graph_style();
        if let Some(name) = &args.name {
            style.name = name.clone();
        }
        render_dot(&tree, style, &config)
    };

    match &args.output {
        Some(path) => {
            write_file(path, &content)?;
            if !args.json {
                print_generated(path, use_color)?;
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&content)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn render_dot(
    tree: &DirectoryNode,
    style: dirgraph::GraphStyle,
    config: &DirgraphConfig,
) -> Vec<u8> {
    let document = DotRenderer::new(style)
        .with_edges(config.edges.clone())
        .render(tree);
    let mut text = document.text();
    text.push('\n');
    text.into_bytes()
}

fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
