use clap::Parser;
use docmark::config::{Config, OutputFormat};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(
    name = "docmark",
    about = "Compile documentation Markdown into block trees (JSON) or HTML"
)]
struct Cli {
    /// Input file(s) or directory
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: json, html (default: from config or json)
    #[arg(short, long)]
    format: Option<String>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Include source line ranges in JSON output
    #[arg(long)]
    spans: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn load_config(cli: &Cli) -> Config {
    let loaded = match cli.config {
        Some(ref path) => Config::load(path).map(Some),
        None => Config::discover(Path::new(".")),
    };
    loaded
        .unwrap_or_else(|e| die(&e.to_string()))
        .unwrap_or_default()
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    let mut out = result.unwrap_or_else(|e| die(&format!("cannot serialize output: {}", e)));
    out.push('\n');
    out
}

fn render_json(pages: &IndexMap<String, String>, config: &Config) -> String {
    if config.spans {
        let trees: IndexMap<&str, _> = pages
            .iter()
            .map(|(path, text)| (path.as_str(), docmark::compile_spanned(text)))
            .collect();
        match trees.values().next() {
            Some(only) if trees.len() == 1 => to_json(only, config.pretty),
            _ => to_json(&trees, config.pretty),
        }
    } else {
        let trees: IndexMap<&str, _> = pages
            .iter()
            .map(|(path, text)| (path.as_str(), docmark::compile(text)))
            .collect();
        match trees.values().next() {
            Some(only) if trees.len() == 1 => to_json(only, config.pretty),
            _ => to_json(&trees, config.pretty),
        }
    }
}

fn render_html(pages: &IndexMap<String, String>) -> String {
    pages
        .values()
        .map(|text| docmark::render_html(text))
        .collect()
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut config = load_config(&cli);

    // CLI overrides
    if let Some(ref format) = cli.format {
        config.format = match format.as_str() {
            "json" => OutputFormat::Json,
            "html" => OutputFormat::Html,
            _ => die(&format!("invalid format: {}", format)),
        };
    }
    if cli.compact {
        config.pretty = false;
    }
    if cli.spans {
        config.spans = true;
    }

    let files = docmark::list_files(&cli.inputs).unwrap_or_else(|e| die(&format!("{}", e)));
    if files.is_empty() {
        die("no input files found");
    }

    let mut pages: IndexMap<String, String> = IndexMap::new();
    for fp in &files {
        let content = fs::read_to_string(fp)
            .unwrap_or_else(|e| die(&format!("cannot read {}: {}", fp.display(), e)));
        log::info!("compiling {}", fp.display());
        pages.insert(fp.display().to_string(), content);
    }

    let result = match config.format {
        OutputFormat::Json => render_json(&pages, &config),
        OutputFormat::Html => render_html(&pages),
    };

    if let Some(ref output_path) = cli.output {
        fs::write(output_path, &result)
            .unwrap_or_else(|e| die(&format!("cannot write {}: {}", output_path.display(), e)));
        eprintln!(
            "compiled {} file(s) -> {}",
            files.len(),
            output_path.display()
        );
    } else {
        print!("{}", result);
    }
}
