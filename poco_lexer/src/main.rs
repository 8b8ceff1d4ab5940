use poco_lexer::config::runtime::{RecoveryPolicy, RuntimeConfig};
use poco_lexer::diagnostics::Diagnostic;
use poco_lexer::file_processor::FileProcessor;
use poco_lexer::lexical::{self, TokenizeOutput};
use poco_lexer::logging;
use poco_lexer::utils::SourceMap;
use std::env;
use std::path::Path;

/// Input tokenized when no file is given
const SAMPLE_SOURCE: &str = "let name = 'Po Co'";

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    input: Option<String>,
    config: Option<String>,
    json: bool,
    halt: bool,
    help: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("poco-lex");

    let options = match parse_options(&args[1.min(args.len())..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} [options] [input.poco]", program_name);
            std::process::exit(2);
        }
    };

    if options.help {
        print_help(program_name);
        return Ok(());
    }

    let mut config = match &options.config {
        Some(path) => RuntimeConfig::load(Path::new(path)).map_err(|e| {
            logging::safe_log_error(e.error_code(), &e.to_string());
            e
        })?,
        None => RuntimeConfig::default(),
    };
    if options.halt {
        config.lexical.recovery_policy = RecoveryPolicy::Halt;
    }

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;

    let (name, source) = match &options.input {
        Some(path) => {
            let processor = FileProcessor::from_preferences(&config.file_processor);
            let file_result = processor.process_file(path)?;
            (path.clone(), file_result.source)
        }
        None => ("<sample>".to_string(), SAMPLE_SOURCE.to_string()),
    };

    let preferences = config.lexical.clone();
    let output = logging::with_source_context(&name, || {
        lexical::tokenize_with_preferences(&source, preferences)
    });

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_tokens(&name, &output);
        print_diagnostics(&source, &output.diagnostics);
    }

    if output.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => options.help = true,
            "--json" => options.json = true,
            "--halt" => options.halt = true,
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| "--config requires a file path".to_string())?;
                options.config = Some(path.clone());
            }
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option '{}'", flag));
            }
            path => {
                if options.input.replace(path.to_string()).is_some() {
                    return Err("Only one input file may be given".to_string());
                }
            }
        }
    }

    Ok(options)
}

fn print_help(program_name: &str) {
    println!("Poco Lexer v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizes Poco source text and reports lexical diagnostics");
    println!();
    println!("USAGE:");
    println!("    {} [options]                  # Tokenize a built-in sample", program_name);
    println!("    {} [options] <input.poco>     # Tokenize a file", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --json              Print tokens and diagnostics as JSON");
    println!("    --halt              Stop at the first unrecognized character");
    println!("    --config <file>     Load runtime preferences from a TOML file");
    println!();
    println!("ENVIRONMENT:");
    println!("    POCO_LEXICAL_RECOVERY_POLICY   resynchronize | halt");
    println!("    POCO_LOGGING_ENABLE_CONSOLE    true to print log events to stderr");
    println!("    POCO_LOGGING_MIN_LEVEL         error | warning | info | debug");
    println!();
    println!("EXIT STATUS:");
    println!("    0 when no error diagnostics were recorded, 1 otherwise");
}

fn print_tokens(name: &str, output: &TokenizeOutput) {
    println!("Tokens for {}:", name);
    for token in &output.tokens {
        println!(
            "  {:>4}:{:<4} {:<10} {:?}",
            token.line(),
            token.column(),
            token.kind.as_str(),
            token.value
        );
    }

    let counts = lexical::get_token_counts(&output.tokens);
    println!(
        "{} tokens ({} statements, {} identifiers, {} literals, {} symbols), {} diagnostics",
        counts.total,
        counts.statements,
        counts.identifiers,
        counts.literals(),
        counts.symbols,
        output.diagnostics.len()
    );
}

fn print_diagnostics(source: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let source_map = SourceMap::new(source);
    eprintln!();
    for diagnostic in diagnostics {
        eprintln!("{}", render_diagnostic(&source_map, diagnostic));
    }
}

fn render_diagnostic(source_map: &SourceMap, diagnostic: &Diagnostic) -> String {
    let message = match diagnostic.code() {
        Some(code) => format!("[{}] {}", code, diagnostic.message),
        None => diagnostic.message.clone(),
    };

    match source_map.char_span(diagnostic.line, diagnostic.column) {
        Some(span) => source_map.format_error(&span, &message),
        None => format!("Error: {}", diagnostic),
    }
}
