use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use riboquery::cli::{self, CheckOptions, CheckResult, CliError, SchemaSource, SearchOptions};
use riboquery::logging::{LogConfig, LogFormat};
use riboquery::CompilerConfig;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "riboquery")]
#[command(about = "riboquery - Search Ribo-Seq Study and Sample metadata with boolean queries")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogStyle::Compact, global = true)]
    log_format: LogStyle,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogStyle {
    Pretty,
    Compact,
}

#[derive(clap::Args)]
struct SchemaArgs {
    /// Built-in record schema
    #[arg(short, long, default_value = "sample", conflicts_with = "schema")]
    model: String,

    /// JSON file with a custom record schema
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Ignore ~ on terms that search every column
    #[arg(long)]
    legacy_negation: bool,
}

impl SchemaArgs {
    fn source(&self) -> SchemaSource {
        match &self.schema {
            Some(path) => SchemaSource::File(path.clone()),
            None => SchemaSource::Preset(self.model.clone()),
        }
    }

    fn config(&self) -> CompilerConfig {
        CompilerConfig {
            negate_fallback: !self.legacy_negation,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query and show each stage
    Check {
        /// The search query to compile
        query: String,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't build the filter
        #[arg(long)]
        syntax_only: bool,
    },

    /// Filter JSON records with a query
    Search {
        /// The search query
        query: String,

        /// JSON array of records (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Facet selections, e.g. 'Disease=cancer&Disease=none&verified=on'
        #[arg(long)]
        facets: Option<String>,

        /// Exact-match selection string, e.g. 'Cell-Line=HeLa&Disease=none'
        #[arg(long)]
        select: Option<String>,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'riboquery docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let format = match cli.log_format {
        LogStyle::Pretty => LogFormat::Pretty,
        LogStyle::Compact => LogFormat::Compact,
    };
    if let Err(e) = LogConfig::from_verbosity(cli.verbose).with_format(format).try_init() {
        eprintln!("warning: logging disabled: {}", e);
    }

    let result = match cli.command {
        Commands::Check {
            query,
            schema,
            pretty,
            syntax_only,
        } => run_check(query, &schema, pretty, syntax_only),
        Commands::Search {
            query,
            input,
            facets,
            select,
            schema,
            pretty,
        } => run_search(query, input, facets, select, &schema, pretty),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }?;
    println!("{}", json);
    Ok(())
}

fn run_check(
    query: String,
    schema: &SchemaArgs,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let options = CheckOptions {
        query,
        schema: schema.source(),
        config: schema.config(),
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Compiled(report) => print_json(&report, pretty)?,
    }
    Ok(())
}

fn run_search(
    query: String,
    input: Option<String>,
    facets: Option<String>,
    select: Option<String>,
    schema: &SchemaArgs,
    pretty: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = SearchOptions {
        query,
        input,
        schema: schema.source(),
        config: schema.config(),
        facets,
        select,
    };

    let hits = cli::execute_search(&options)?;
    print_json(&hits, pretty)
}
