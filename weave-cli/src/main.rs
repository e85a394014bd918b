// Command-line interface for weave
//
// This binary converts documents between markup formats through the weave event protocol,
// and lets you look at the event stream a document produces.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  weave <input> --to <format> [--from <format>] [--output <file>]          - Convert (default)
//  weave convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  weave inspect <input> [events|json|treeviz] [--from <format>]            - Show the event stream
//  weave --list-formats                                                     - List formats
//
// Extra Parameters:
//
// Parse and render options can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and applies them over the loaded configuration.
// Example:
//  weave page.html --to markdown --extra-max-section-level 3 --extra-unknown-tags fail

use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;
use weave_babel::{FormatRegistry, ParseOptions, RenderOptions};
use weave_config::{Loader, WeaveConfig};

const INSPECT_FORMATS: &[&str] = &["treeviz", "events", "json"];
const SUBCOMMANDS: &[&str] = &["inspect", "convert", "help"];

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
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

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

fn build_cli() -> Command {
    Command::new("weave")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert markup documents through a stream of document events")
        .long_about(
            "weave converts documents between markup formats. Sources are parsed into a flat\n\
            stream of document events, which is then rendered into the target format.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (default)\n  \
            - inspect: Show the event stream of a document\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass parse and render options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            weave page.html --to markdown                 # Convert to markdown (stdout)\n  \
            weave page.xhtml --to html -o page.html       # Convert to an HTML file\n  \
            weave inspect page.html events                # Show the raw event trace",
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
                .help("Path to a weave.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the event stream of a document")
                .long_about(
                    "Parse a document and print its event stream.\n\n\
                    Views:\n  \
                    - treeviz: Nested tree with icons (default)\n  \
                    - events:  One event per line, indented by depth\n  \
                    - json:    The events as a JSON array\n\n\
                    Examples:\n  \
                    weave inspect page.html                  # Tree visualization\n  \
                    weave inspect page.html events           # Event trace\n  \
                    weave inspect notes.txt --from html      # Explicit source format",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the document")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("How to show the events. Defaults to 'treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_FORMATS))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Source formats: html (.html), xhtml (.xhtml)\n\
                    Target formats: html, markdown, events, json, treeviz\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    weave convert page.html --to markdown         # Convert to markdown (stdout)\n  \
                    weave convert page.xhtml --to html -o out.html\n  \
                    weave page.html --to markdown                 # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file argument means convert
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
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

    let config = load_cli_config(matches.get_one::<String>("config").map(String::as_str));
    init_tracing(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let (parse_options, render_options) = options_from_config(&config, &extra_params);
    let registry = FormatRegistry::default();

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                fail("Missing input path");
            };
            let view = sub_matches
                .get_one::<String>("view")
                .map(String::as_str)
                .unwrap_or("treeviz");
            let from = resolve_source_format(&registry, path, sub_matches.get_one::<String>("from"));
            handle_inspect_command(&registry, path, &from, view, &parse_options);
        }
        Some(("convert", sub_matches)) => {
            let (Some(input), Some(to)) = (
                sub_matches.get_one::<String>("input"),
                sub_matches.get_one::<String>("to"),
            ) else {
                fail("convert needs an input file and --to");
            };
            let from = resolve_source_format(&registry, input, sub_matches.get_one::<String>("from"));
            let output = sub_matches.get_one::<String>("output").map(String::as_str);
            handle_convert_command(
                &registry,
                ConvertRequest {
                    input,
                    from: &from,
                    to,
                    output,
                },
                &parse_options,
                &render_options,
            );
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

struct ConvertRequest<'a> {
    input: &'a str,
    from: &'a str,
    to: &'a str,
    output: Option<&'a str>,
}

fn handle_inspect_command(
    registry: &FormatRegistry,
    path: &str,
    from: &str,
    view: &str,
    parse_options: &ParseOptions,
) {
    let source = read_source(path);

    let events = registry
        .parse_with_options(&source, from, parse_options)
        .unwrap_or_else(|e| fail(&format!("Error: {e}")));
    tracing::debug!(events = events.len(), from, "parsed document");

    // Views never project, so render options do not apply here.
    let output = registry
        .serialize_with_options(&events, view, &RenderOptions::default())
        .unwrap_or_else(|e| fail(&format!("Inspect error: {e}")));

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
}

fn handle_convert_command(
    registry: &FormatRegistry,
    request: ConvertRequest<'_>,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) {
    for name in [request.from, request.to] {
        if let Err(e) = registry.get(name) {
            fail(&format!("Error: {e}"));
        }
    }

    let source = read_source(request.input);

    let events = registry
        .parse_with_options(&source, request.from, parse_options)
        .unwrap_or_else(|e| fail(&format!("Error: {e}")));
    tracing::debug!(
        events = events.len(),
        from = request.from,
        to = request.to,
        "converting document"
    );

    let result = registry
        .serialize_with_options(&events, request.to, render_options)
        .unwrap_or_else(|e| fail(&format!("Error: {e}")));

    match request.output {
        Some(path) => {
            fs::write(path, result)
                .unwrap_or_else(|e| fail(&format!("Error writing file '{path}': {e}")));
            tracing::info!(path, "wrote output");
        }
        None => print!("{result}"),
    }
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let mut abilities = Vec::new();
        if format.supports_parsing() {
            abilities.push("parse");
        }
        if format.supports_serialization() {
            abilities.push("serialize");
        }
        println!("  {name:<10} {:<16} {}", abilities.join(", "), format.description());
    }
}

fn resolve_source_format(registry: &FormatRegistry, path: &str, explicit: Option<&String>) -> String {
    if let Some(format) = explicit {
        return format.clone();
    }
    match registry.detect_format_from_filename(path) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{path}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(&format!("Error reading file '{path}': {e}")))
}

fn load_cli_config(explicit_path: Option<&str>) -> WeaveConfig {
    let loader = Loader::new().with_optional_file("weave.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .build()
        .unwrap_or_else(|err| fail(&format!("Failed to load configuration: {err}")))
}

/// `WEAVE_LOG` wins over the configured level. Logs go to stderr so that
/// converted output on stdout stays clean.
fn init_tracing(config: &WeaveConfig) {
    let filter = EnvFilter::try_from_env("WEAVE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Configured options with the `--extra-*` flags layered on top.
fn options_from_config(
    config: &WeaveConfig,
    extra_params: &HashMap<String, String>,
) -> (ParseOptions, RenderOptions) {
    let mut parse_options = ParseOptions::from(&config.parse);
    let mut render_options = RenderOptions::from(&config.render);

    if let Err(e) = parse_options.apply(extra_params) {
        fail(&format!("Error: {e}"));
    }
    if let Err(e) = render_options.apply(extra_params) {
        fail(&format!("Error: {e}"));
    }

    (parse_options, render_options)
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
