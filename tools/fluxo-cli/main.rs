use clap::{Parser, ValueEnum};
use fluxo::flow::{Block, ResponseValue, plain_text};
use fluxo::navigator::Signal;
use fluxo::parser::{FormatHint, parse_flow};
use fluxo::session::FlowSession;
use fluxo::store::{FileProgressStore, ProgressStore};
use fluxo::validate::validate_number;
#[cfg(feature = "webhook")]
use fluxo::webhook::{WebhookPayload, send_to_webhook};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Auto,
    Json,
    Module,
}

/// An interactive terminal walker for conversational flow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow document (JSON export or scripted module)
    document_path: PathBuf,

    /// How to read the document; defaults to sniffing extension and content
    #[arg(short, long, value_enum)]
    format: Option<FormatCli>,

    /// Session key used to persist and resume progress
    #[arg(short, long)]
    session: Option<String>,

    /// Directory holding progress snapshots
    #[arg(long, default_value = ".fluxo-progress")]
    progress_dir: PathBuf,

    /// Discard stored progress for this session key before starting
    #[arg(long)]
    reset: bool,

    /// POST the completion payload to this URL when the walk finishes
    #[cfg(feature = "webhook")]
    #[arg(long)]
    webhook_url: Option<String>,

    /// Answer every prompt with its default instead of asking
    #[arg(short = 'y', long)]
    yes: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Document Loading ---
    let load_start = Instant::now();
    let raw = fs::read_to_string(&cli.document_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read flow document '{}': {}",
            cli.document_path.display(),
            e
        ))
    });
    let hint = match cli.format {
        Some(FormatCli::Json) => FormatHint::Json,
        Some(FormatCli::Module) => FormatHint::Module,
        Some(FormatCli::Auto) => FormatHint::Auto,
        None => match FormatHint::from_path(&cli.document_path) {
            FormatHint::Module => FormatHint::Module,
            _ => FormatHint::Auto,
        },
    };
    let parsed = parse_flow(&raw, hint)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse flow document: {}", e)));
    let load_duration = load_start.elapsed();

    // --- 2. Document Audit ---
    for issue in parsed.document.audit() {
        eprintln!("Warning: {}", issue);
    }

    let flow_name = parsed.name.clone().unwrap_or_else(|| "Untitled flow".to_string());
    println!("\n--- {} ---", flow_name);

    // --- 3. Session Setup ---
    let session_key = cli.session.clone().unwrap_or_else(|| "default".to_string());
    let store = FileProgressStore::open(&cli.progress_dir).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to open progress directory '{}': {}",
            cli.progress_dir.display(),
            e
        ))
    });
    let mut session = FlowSession::start(parsed.document, store, session_key);
    if cli.reset {
        session.reset();
    }

    // --- 4. Flow Walk ---
    let walk_start = Instant::now();
    walk(&mut session, cli.yes);
    let walk_duration = walk_start.elapsed();

    if session.is_complete() {
        println!("\nFlow complete!");
    }

    // --- 5. Response Summary ---
    let summary = session.summary();
    println!("\n--- Response Summary ---");
    println!("Responses Recorded: {}", summary.responses.len());
    for response in &summary.responses {
        println!("  {} -> {}", response.block_id, response.value);
    }
    if !summary.variables.is_empty() {
        println!("Variables:");
        let mut names: Vec<_> = summary.variables.keys().collect();
        names.sort();
        for name in names {
            println!("  {} = {}", name, summary.variables[name]);
        }
    }

    // --- 6. Webhook Delivery ---
    #[cfg(feature = "webhook")]
    if let Some(url) = &cli.webhook_url {
        let payload = WebhookPayload::new(&summary);
        match send_to_webhook(url, &payload) {
            Ok(()) => println!("\nWebhook delivered to {}", url),
            Err(e) => eprintln!("\nWebhook delivery failed: {}", e),
        }
    }

    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("Document Loading:     {:?}", load_duration);
    println!("Flow Walk:            {:?}", walk_duration);
    println!("---------------------------");
    println!("Total Execution:      {:?}", total_duration);
    println!();
}

/// Drives the session until no signal asks for anything more.
fn walk<S: ProgressStore>(session: &mut FlowSession<S>, assume_defaults: bool) {
    loop {
        match session.signal() {
            Signal::Display(block) => {
                show_block(&block);
                if !session.advance(None, None) {
                    break;
                }
            }
            Signal::AwaitInput(block) => {
                if !collect_input(session, &block, assume_defaults) {
                    break;
                }
            }
            Signal::AssignVariable { .. } => {
                if !session.apply_set_variable() {
                    break;
                }
            }
            Signal::Redirect { url } => {
                println!("\n-> The flow redirects to: {}", url);
                break;
            }
            Signal::Completed => break,
        }
    }
}

fn show_block(block: &Block) {
    match block {
        Block::Text(text) => println!("{}", plain_text(&text.content.rich_text)),
        Block::Image(image) => println!("[image] {}", image.content.url),
        _ => {}
    }
}

/// Prompts for the answer an input block asks for, records it and advances.
/// Returns false once no further block can be reached.
fn collect_input<S: ProgressStore>(
    session: &mut FlowSession<S>,
    block: &Block,
    assume_defaults: bool,
) -> bool {
    match block {
        Block::TextInput(input) => {
            let prompt = label_or(&input.options.labels.placeholder, "Type your answer");
            let answer = if assume_defaults {
                String::new()
            } else {
                prompt_for_input(prompt, None)
            };
            session.add_response(
                &input.id,
                ResponseValue::from(answer),
                input.options.variable_id.as_deref(),
            );
            session.advance(None, None)
        }
        Block::NumberInput(input) => {
            let prompt = label_or(&input.options.labels.placeholder, "Type a number");
            let answer = loop {
                let raw = if assume_defaults {
                    "0".to_string()
                } else {
                    prompt_for_input(prompt, None)
                };
                match validate_number(&raw, None, None) {
                    Ok(_) => break raw.trim().to_string(),
                    Err(error) => println!("{}", error),
                }
            };
            session.add_response(
                &input.id,
                ResponseValue::from(answer),
                input.options.variable_id.as_deref(),
            );
            session.advance(None, None)
        }
        Block::ChoiceInput(choice) => {
            if choice.items.is_empty() {
                return session.advance(None, None);
            }
            println!();
            for (index, item) in choice.items.iter().enumerate() {
                println!(
                    "  {}: {}",
                    index + 1,
                    item.content.as_deref().unwrap_or(&item.id)
                );
            }
            if choice.options.is_multiple_choice {
                let selections = loop {
                    let answer = if assume_defaults {
                        "1".to_string()
                    } else {
                        prompt_for_input("Enter choices (comma separated)", Some("1"))
                    };
                    match parse_selections(&answer, choice.items.len()) {
                        Some(indices) => break indices,
                        None => println!(
                            "Invalid choice. Please enter numbers between 1 and {}.",
                            choice.items.len()
                        ),
                    }
                };
                let values: Vec<String> = selections
                    .iter()
                    .map(|&index| {
                        let item = &choice.items[index];
                        item.content.clone().unwrap_or_else(|| item.id.clone())
                    })
                    .collect();
                session.add_response(
                    &choice.id,
                    ResponseValue::from(values),
                    choice.options.variable_id.as_deref(),
                );
                session.advance(None, None)
            } else {
                let item = loop {
                    let answer = if assume_defaults {
                        "1".to_string()
                    } else {
                        prompt_for_input("Enter choice", Some("1"))
                    };
                    match parse_selection(&answer, choice.items.len()) {
                        Some(index) => break &choice.items[index],
                        None => println!(
                            "Invalid choice. Please enter a number between 1 and {}.",
                            choice.items.len()
                        ),
                    }
                };
                let value = item.content.clone().unwrap_or_else(|| item.id.clone());
                session.add_response(
                    &choice.id,
                    ResponseValue::from(value),
                    choice.options.variable_id.as_deref(),
                );
                session.advance(item.outgoing_edge_id.as_deref(), Some(&item.id))
            }
        }
        Block::FileUpload(input) => {
            let prompt = if input.options.is_multiple_allowed {
                "File names (comma separated)"
            } else {
                "File name"
            };
            let answer = if assume_defaults {
                String::new()
            } else {
                prompt_for_input(prompt, None)
            };
            let value = if input.options.is_multiple_allowed {
                ResponseValue::Many(
                    answer
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                        .collect(),
                )
            } else {
                ResponseValue::from(answer)
            };
            session.add_response(&input.id, value, input.options.variable_id.as_deref());
            session.advance(None, None)
        }
        Block::Rating(rating) => {
            let length = rating.options.length;
            if let Some(left) = &rating.options.labels.left {
                println!("  0 = {}", left);
            }
            if let Some(right) = &rating.options.labels.right {
                println!("  {} = {}", length, right);
            }
            let answer = loop {
                let raw = if assume_defaults {
                    "0".to_string()
                } else {
                    prompt_for_input(&format!("Rate from 0 to {}", length), None)
                };
                match validate_number(&raw, Some(0.0), Some(length as f64)) {
                    Ok(_) => break raw.trim().to_string(),
                    Err(error) => println!("{}", error),
                }
            };
            session.add_response(
                &rating.id,
                ResponseValue::from(answer),
                rating.options.variable_id.as_deref(),
            );
            session.advance(None, None)
        }
        _ => session.advance(None, None),
    }
}

fn parse_selection(answer: &str, count: usize) -> Option<usize> {
    let index: usize = answer.trim().parse().ok()?;
    (1..=count).contains(&index).then(|| index - 1)
}

fn parse_selections(answer: &str, count: usize) -> Option<Vec<usize>> {
    answer
        .split(',')
        .map(|part| parse_selection(part, count))
        .collect()
}

fn label_or<'a>(label: &'a str, fallback: &'a str) -> &'a str {
    if label.is_empty() { fallback } else { label }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
