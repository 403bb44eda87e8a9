// tinyview: TINY scanner, parser and syntax tree viewer

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use thiserror::Error;

use tinyview::config::{LayoutConfig, ViewerConfig};
use tinyview::export::{to_json_document, to_svg};
use tinyview::layout::{layout, Geometry};
use tinyview::parser::{
    format_token_dump, format_tree_dump, parse, scan, FrontendError, LexError, ParseError,
    SyntaxNode, Token,
};
use tinyview::ui::App;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Scanner, parser and syntax tree viewer for the TINY language",
    long_about = "Scanner, parser and syntax tree viewer for the TINY language.\n\
                 \n\
                 Example usage:\n\
                 tinyview scan demos/factorial.tiny            # Token listing\n\
                 tinyview parse demos/factorial.tiny           # Indented tree dump\n\
                 tinyview layout demos/factorial.tiny -o t.json  # Layout geometry as JSON\n\
                 tinyview svg demos/factorial.tiny -o tree.svg # Drawing as SVG\n\
                 tinyview view demos/factorial.tiny            # Interactive viewer"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print phase progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the tokens produced by the scanner
    Scan(InputArgs),
    /// Print the syntax tree, one node per line
    Parse(InputArgs),
    /// Write the layout geometry as JSON
    Layout {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        spacing: SpacingArgs,
    },
    /// Write the tree drawing as an SVG document
    Svg {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        spacing: SpacingArgs,
    },
    /// Open the interactive terminal viewer
    View {
        /// TINY source file
        file: PathBuf,
        #[command(flatten)]
        spacing: SpacingArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// TINY source file
    file: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SpacingArgs {
    /// Width reserved for a node without nested children
    #[arg(long)]
    unit_width: Option<f64>,

    /// Vertical distance between nesting levels
    #[arg(long)]
    level_height: Option<f64>,

    /// Horizontal gap before a chained statement
    #[arg(long)]
    chain_gap: Option<f64>,
}

impl SpacingArgs {
    fn to_config(&self) -> LayoutConfig {
        let defaults = LayoutConfig::default();
        LayoutConfig {
            unit_width: self.unit_width.unwrap_or(defaults.unit_width),
            level_height: self.level_height.unwrap_or(defaults.level_height),
            chain_gap: self.chain_gap.unwrap_or(defaults.chain_gap),
            ..defaults
        }
        .normalized()
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read '{}': {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Frontend(#[from] FrontendError),
}

impl From<LexError> for CliError {
    fn from(err: LexError) -> Self {
        CliError::Frontend(err.into())
    }
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        CliError::Frontend(err.into())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let verbose = cli.verbose;
    match cli.command {
        Command::Scan(input) => {
            let tokens = scan_file(&input.file, verbose)?;
            write_output(input.output.as_deref(), &format_token_dump(&tokens))
        }
        Command::Parse(input) => {
            let root = parse_file(&input.file, verbose)?;
            write_output(input.output.as_deref(), &format_tree_dump(&root))
        }
        Command::Layout { input, spacing } => {
            let config = spacing.to_config();
            let geometry = layout_file(&input.file, &config, verbose)?;
            let mut json = to_json_document(&geometry, &config)?;
            json.push('\n');
            write_output(input.output.as_deref(), &json)
        }
        Command::Svg { input, spacing } => {
            let config = spacing.to_config();
            let geometry = layout_file(&input.file, &config, verbose)?;
            write_output(input.output.as_deref(), &to_svg(&geometry, &config))
        }
        Command::View { file, spacing } => {
            let source = read_source(&file, verbose)?;
            let app = App::new(source, &spacing.to_config(), ViewerConfig::default());
            if verbose {
                match &app.tree {
                    Ok(geometry) => eprintln!("Opening viewer with {} nodes...", geometry.boxes.len()),
                    Err(err) => eprintln!("Opening viewer with error: {}", err),
                }
            }
            run_viewer(app)
        }
    }
}

fn read_source(path: &Path, verbose: bool) -> Result<String, CliError> {
    if verbose {
        eprintln!("Reading {}...", path.display());
    }
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn scan_file(path: &Path, verbose: bool) -> Result<Vec<Token>, CliError> {
    let source = read_source(path, verbose)?;
    let tokens = scan(&source)?;
    if verbose {
        eprintln!("Scanned successfully. Found {} tokens.", tokens.len());
    }
    Ok(tokens)
}

fn parse_file(path: &Path, verbose: bool) -> Result<SyntaxNode, CliError> {
    let tokens = scan_file(path, verbose)?;
    let root = parse(&tokens)?;
    if verbose {
        eprintln!("Parsed successfully. Found {} nodes.", root.node_count());
    }
    Ok(root)
}

fn layout_file(path: &Path, config: &LayoutConfig, verbose: bool) -> Result<Geometry, CliError> {
    let root = parse_file(path, verbose)?;
    let geometry = layout(&root, config);
    if verbose {
        eprintln!(
            "Laid out {} boxes and {} edges in {:.0}x{:.0}.",
            geometry.boxes.len(),
            geometry.edges.len(),
            geometry.width,
            geometry.height
        );
    }
    Ok(geometry)
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, text)?,
        None => print!("{}", text),
    }
    Ok(())
}

fn run_viewer(mut app: App) -> Result<(), CliError> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(CliError::from)
}
