// Command-line interface for textfmt
//
// This binary converts user-authored text between the formats of the textfmt-babel library:
// BBCode, Markdown, cf, Discord Markdown, plaintext and HTML.
//
// Every conversion goes through HTML. The CLI reads the input, builds a Document from it and
// renders the requested output; it holds no conversion logic of its own.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension, while being overwrittable by an explicit --from flag.
// Reading from stdin ("-") always needs an explicit --from.
// Usage:
//  textfmt <input> --to <format> [--from <format>] [--output <file>] [--safe-html]  - Convert between formats (default)
//  textfmt convert <input> --to <format> ...                                        - Same as above (explicit)
//  textfmt demo <input> [--from <format>] [--json]                                  - Show the input in every output format
//  textfmt --list-formats                                                           - List available formats
//
// Configuration:
//
// Defaults are embedded by textfmt-config. A textfmt.toml in the working directory is layered on top when present,
// then the file given with --config. Single keys can be overridden with --extra-<section>.<key> <value>.
// Example:
//  textfmt post.bbcode --to markdown --extra-markdown.heading_style setext

use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use textfmt_babel::{Document, DocumentOptions, FormatRegistry};
use textfmt_config::{Loader, TextfmtConfig};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "demo", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .long_help(
            "Source format to convert from.\n\n\
            Input formats: bbcode, cf, html, markdown\n\
            If not specified, the format is auto-detected from the file extension.\n\
            Required when reading from stdin.",
        )
        .value_hint(ValueHint::Other)
}

fn safe_html_arg() -> Arg {
    Arg::new("safe-html")
        .long("safe-html")
        .help("Sanitize the intermediate HTML")
        .action(ArgAction::SetTrue)
}

fn build_cli() -> Command {
    Command::new("textfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich text between BBCode, Markdown, cf, Discord, plaintext and HTML")
        .long_about(
            "textfmt converts user-authored text between markup dialects.\n\n\
            Commands:\n  \
            - convert: Transform between formats (default command)\n  \
            - demo:    Show one input rendered in every output format\n\n\
            Extra Parameters:\n  \
            Use --extra-<section>.<key> <value> to override one configuration key.\n\n\
            Examples:\n  \
            textfmt post.bbcode --to markdown             # Convert to markdown (stdout)\n  \
            textfmt notes.md --to cf -o notes.cf           # Convert to a cf file\n  \
            cat post.txt | textfmt - --from bbcode --to html\n  \
            textfmt demo post.bbcode                       # Every output at once",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a textfmt.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert text between formats.\n\n\
                    Input formats:  bbcode, cf, html, markdown\n\
                    Output formats: bbcode, cf, discord, html, markdown, plaintext\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    textfmt convert post.bbcode --to markdown\n  \
                    textfmt convert notes.md --to discord -o notes.txt\n  \
                    textfmt post.bbcode --to html --safe-html     # 'convert' is optional",
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: bbcode, cf, discord, html, markdown, plaintext\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(safe_html_arg()),
        )
        .subcommand(
            Command::new("demo")
                .about("Render the input in every output format")
                .long_about(
                    "Parse the input once and print it in every output format,\n\
                    one '--- <format> ---' section each.\n\n\
                    Examples:\n  \
                    textfmt demo post.bbcode\n  \
                    textfmt demo notes.md --json",
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(safe_html_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print a JSON object keyed by format name")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Whether a first argument that failed to parse should be retried as `convert <arg>`
fn looks_like_input(arg: &str) -> bool {
    arg == "-" || (!arg.starts_with('-') && !SUBCOMMANDS.contains(&arg))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1 && looks_like_input(&cleaned_args[1]) {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &extra_params,
    );
    let registry = FormatRegistry::with_options(&config.convert_options());

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let to = required(sub_matches, "to");
            let from = resolve_from(&registry, input, sub_matches.get_one::<String>("from"));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let options = document_options(&config, sub_matches.get_flag("safe-html"));
            handle_convert_command(&registry, input, &from, to, output, options);
        }
        Some(("demo", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = resolve_from(&registry, input, sub_matches.get_one::<String>("from"));
            let options = document_options(&config, sub_matches.get_flag("safe-html"));
            handle_demo_command(&registry, input, &from, options, sub_matches.get_flag("json"));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a clap::ArgMatches, id: &str) -> &'a str {
    match matches.get_one::<String>(id) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument '{id}'");
            std::process::exit(1);
        }
    }
}

/// Use the explicit --from, or detect it from the input's extension
fn resolve_from(registry: &FormatRegistry, input: &str, explicit: Option<&String>) -> String {
    if let Some(from) = explicit {
        return from.to_string();
    }
    if input == "-" {
        eprintln!("Error: reading from stdin requires --from");
        std::process::exit(1);
    }
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn document_options(config: &TextfmtConfig, safe_html: bool) -> DocumentOptions {
    let mut options = config.document_options();
    options.safe_html |= safe_html;
    options
}

fn read_input(input: &str) -> String {
    let result = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        fs::read_to_string(input)
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

fn load_document<'r>(
    registry: &'r FormatRegistry,
    input: &str,
    from: &str,
    options: DocumentOptions,
) -> Document<'r> {
    let source = read_input(input);
    tracing::debug!(input, from, bytes = source.len(), "parsing input");
    Document::parse_with(registry, from, &source, options).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    options: DocumentOptions,
) {
    // Validate the target before reading anything
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let doc = load_document(registry, input, from, options);
    let rendered = doc.to_format(to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, rendered).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{rendered}"),
    }
}

/// Handle the demo command
fn handle_demo_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    options: DocumentOptions,
    json: bool,
) {
    let doc = load_document(registry, input, from, options);
    let overview = doc.render_all().unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    if json {
        let object: serde_json::Map<String, serde_json::Value> = overview
            .into_iter()
            .map(|(name, text)| (name.to_string(), serde_json::Value::String(text)))
            .collect();
        match serde_json::to_string_pretty(&object) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", render_overview(&overview));
}

fn render_overview(overview: &[(&str, String)]) -> String {
    overview
        .iter()
        .map(|(name, text)| format!("--- {name} ---\n{text}\n\n"))
        .collect()
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Input formats:");
    for name in registry.list_input_formats() {
        print_format_line(registry, &name);
    }

    println!("\nOutput formats:");
    for name in registry.list_output_formats() {
        print_format_line(registry, &name);
    }
}

fn print_format_line(registry: &FormatRegistry, name: &str) {
    match registry.get(name) {
        Ok(format) => {
            let extensions: Vec<String> = format
                .file_extensions()
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect();
            if extensions.is_empty() {
                println!("  {name:<10} {}", format.description());
            } else {
                println!("  {name:<10} {} ({})", format.description(), extensions.join(", "));
            }
        }
        Err(_) => println!("  {name}"),
    }
}

fn load_cli_config(explicit_path: Option<&str>, overrides: &HashMap<String, String>) -> TextfmtConfig {
    let loader = Loader::new().with_optional_file("textfmt.toml");
    let mut loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    let mut keys: Vec<_> = overrides.keys().collect();
    keys.sort_unstable();
    for key in keys {
        loader = loader
            .set_override(key, overrides[key].as_str())
            .unwrap_or_else(|err| {
                eprintln!("Invalid override --extra-{key}: {err}");
                std::process::exit(1);
            });
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
