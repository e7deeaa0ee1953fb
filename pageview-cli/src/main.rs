use clap::{Parser, Subcommand, ValueEnum};
use lazy_static::lazy_static;
use pageview_core::{
    FilterMap, PageError, PageSession, SessionConfig, SortDirection, Value, generate_page_window,
    records_from_json_str, summarize,
};
use regex::Regex;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pageview-cli")]
#[command(about = "Search, filter, sort and page through a JSON array of records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Direction {
    #[value(alias = "ascending")]
    Asc,
    #[value(alias = "descending")]
    Desc,
}

impl From<Direction> for SortDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => SortDirection::Ascending,
            Direction::Desc => SortDirection::Descending,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of records from a JSON file
    Page {
        /// JSON file holding an array of objects
        #[arg(short, long)]
        file: PathBuf,
        /// Records per page
        #[arg(long, default_value = "10")]
        page_size: usize,
        /// Page to show (1-based, clamped to the last page)
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Case-insensitive text to look for in any text field
        #[arg(short, long, default_value = "")]
        search: String,
        /// Field filter as key=value (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,
        /// Field to sort by
        #[arg(long)]
        sort: Option<String>,
        /// Sort direction
        #[arg(long, value_enum, default_value_t = Direction::Asc)]
        direction: Direction,
        /// Field holding RFC 3339 timestamps (repeatable)
        #[arg(long = "date-field")]
        date_fields: Vec<String>,
        /// Number of page links to show
        #[arg(long, default_value = "5")]
        max_visible: usize,
        /// Print the page and summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the page numbers shown in navigation controls
    Window {
        #[arg(short, long)]
        current: usize,
        #[arg(short, long)]
        total: usize,
        #[arg(long, default_value = "5")]
        max_visible: usize,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            // Example: RUST_LOG=pageview_core::session=debug
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pageview_core=info,pageview_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// `null`, `true`, `false` and numbers become typed values; anything else,
/// or anything wrapped in double quotes, stays text.
fn parse_filter_value(raw: &str) -> Value {
    let raw = raw.trim();
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Value::Text(raw[1..raw.len() - 1].to_string());
    }
    match raw {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(raw.to_string()),
        },
    }
}

fn parse_filter(expr: &str) -> Result<(String, Value), PageError> {
    lazy_static! {
        static ref FILTER: Regex = Regex::new(r"^\s*([^=\s]+)\s*=(.*)$").unwrap();
    }

    let captures = FILTER.captures(expr).ok_or_else(|| {
        PageError::InvalidConfig(format!("Filter '{}' is not of the form key=value", expr))
    })?;
    let key = captures[1].to_string();
    let value = parse_filter_value(&captures[2]);
    log::debug!("Parsed filter '{}' -> {} = {:?}", expr, key, value);
    Ok((key, value))
}

fn format_window(window: &[usize], current: usize) -> String {
    window
        .iter()
        .map(|&page| {
            if page == current {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Page {
            file,
            page_size,
            page,
            search,
            filters,
            sort,
            direction,
            date_fields,
            max_visible,
            json,
        } => {
            let text = std::fs::read_to_string(&file).map_err(PageError::from)?;
            let items = records_from_json_str(&text, &date_fields)?;

            let initial_filters = filters
                .iter()
                .map(|expr| parse_filter(expr))
                .collect::<Result<FilterMap, _>>()?;

            let config = SessionConfig {
                page_size,
                initial_page: page,
                initial_search_term: search,
                initial_filters,
                initial_sort_key: sort,
                initial_sort_direction: direction.into(),
            };
            let session = PageSession::new(items, config)?;
            let summary = summarize(&session);

            if json {
                let output = serde_json::json!({
                    "items": session.page_items(),
                    "summary": summary,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                let (start, _) = session.page_range();
                for (i, record) in session.page_items().iter().enumerate() {
                    println!("  {}. {}", start + i + 1, serde_json::to_string(record)?);
                }
                if session.total_items() == 0 {
                    println!("No matching records");
                }
                println!("{}", summary);
                let window = session.page_window(max_visible);
                if window.len() > 1 {
                    println!("Pages: {}", format_window(&window, session.current_page()));
                }
            }
        }
        Commands::Window {
            current,
            total,
            max_visible,
        } => {
            let window = generate_page_window(current, total, max_visible);
            println!("{}", format_window(&window, current));
        }
    }

    Ok(())
}
