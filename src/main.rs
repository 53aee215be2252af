use sysvm::{api, config, services};
use sysvm::api::SystemVmFilter;
use sysvm::models::{AppState, Confirmation, SystemVmAction, SystemVmDetails, SystemVmRow};
use sysvm::services::ActionOutcome;

use std::net::SocketAddr;
use std::process;
use std::time::Duration;
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets, modifiers, ContentArrangement};
use indicatif::{ProgressBar, ProgressStyle};
use terminal_size::{Width, terminal_size};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::{DEFAULT_HOST, DEFAULT_PORT};

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    match AppState::from_env() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::new("Failed to create HTTP client").red(), e);
            process::exit(1);
        }
    }
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", yansi::Paint::red("Failed to read custom stylesheet at"), path, e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = sysvm::app::build_app(state.clone());
    tracing::info!(%addr, api = %state.api_base_url, "Starting system VM console");
    println!("{} {}", yansi::Paint::new("Web console running on").green(), yansi::Paint::new(format!("http://{}", addr)).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!("{}: {}\n{}", yansi::Paint::new(format!("Failed to bind to {}", addr)).red(), e, yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow());
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_rows(rows: &[SystemVmRow]) {
    if rows.is_empty() {
        println!("(no system VMs)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Public IP", "State"]);
    for row in rows {
        table.add_row(vec![&row.id, &row.first_row, &row.second_row, &row.state_badge.label]);
    }
    println!("\n{table}\n");
}

fn print_details(details: &SystemVmDetails) {
    println!("\n{}", yansi::Paint::new(&details.title).bold());
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    for (label, value) in &details.fields {
        table.add_row(vec![label, value]);
    }
    if details.viewer_sessions_visible {
        table.add_row(vec!["Active Viewer Sessions", details.viewer_sessions.as_str()]);
    }
    println!("{table}");
    if let Some(url) = &details.console_url {
        println!("{} {}", yansi::Paint::new("Console:").bold(), yansi::Paint::new(url).cyan());
    }
    if details.actions.is_empty() {
        println!("{}\n", yansi::Paint::new("No actions available in the current state").dim());
    } else {
        println!("{} {}\n", yansi::Paint::new("Actions:").bold(), details.action_labels().join(", "));
    }
}

async fn prompt_confirmation(action: SystemVmAction, name: &str) -> Confirmation {
    let mut stdout = tokio::io::stdout();
    let prompt = format!("{} ({}) [y/N] ", action.confirm_message(), name);
    if stdout.write_all(prompt.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
        return Confirmation::Cancel;
    }
    let mut answer = String::new();
    match BufReader::new(tokio::io::stdin()).read_line(&mut answer).await {
        Ok(_) => Confirmation::from_answer(&answer),
        Err(_) => Confirmation::Cancel,
    }
}

async fn run_cli_action(state: &AppState, action: SystemVmAction, id: &str, assume_yes: bool) {
    let mut panel = match services::load_panel(state, id).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::new("Failed to load system VM").red(), e);
            process::exit(1);
        }
    };
    let decision = if assume_yes {
        Confirmation::Confirm
    } else if panel.details.offers(action) {
        prompt_confirmation(action, &panel.details.title).await
    } else {
        // Nothing to confirm; run_action reports it as not offered.
        Confirmation::Confirm
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
    spinner.enable_steady_tick(Duration::from_millis(120));
    let outcome = services::run_action(state, action, &mut panel, decision, |attempt| {
        spinner.set_message(format!("{} (poll {})", action.in_process_text(), attempt));
    })
    .await;
    spinner.finish_and_clear();

    match outcome {
        Ok(ActionOutcome::Completed) => {
            println!("{}", yansi::Paint::new(action.done_text()).green());
            print_rows(std::slice::from_ref(&panel.row));
            print_details(&panel.details);
        }
        Ok(ActionOutcome::Cancelled) => {
            println!("{}", yansi::Paint::new("Cancelled; no command was sent").yellow());
        }
        Ok(ActionOutcome::NotOffered) => {
            eprintln!(
                "{} {} {}",
                yansi::Paint::new(action.label()).red(),
                yansi::Paint::new("is not available while the system VM is").red(),
                panel.record.state
            );
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::new(format!("{} failed", action.label())).red(), e);
            process::exit(1);
        }
    }
}

#[derive(Parser)]
#[command(
    name = "sysvm",
    author,
    version,
    about = "System VM console",
    long_about = r#"sysvm: list, inspect and start/stop/reboot the console proxy and secondary storage VMs of a management server.

Runs either as a small web console or as a command-line tool. Both talk to the management API configured with `API_BASE_URL` (and `API_SESSION_KEY` when the server needs one); use `--env-file` or environment variables to provide them.

Examples:
  1) Run the web console:
      sysvm serve --host 127.0.0.1 --port 8080
  2) Inspect system VMs:
      sysvm systemvms list --type consoleproxy
      sysvm systemvms show 3
  3) Lifecycle actions (asks for confirmation, then waits for the async job):
      sysvm systemvms reboot 3
"#,
    after_help = "Use `sysvm <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web console
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration (env vars / API connectivity)
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Print the effective configuration and try a `listSystemVms` call against the configured management server.")]
    CheckConfig { env_file: Option<String> },
    /// Manage system VMs via the configured API
    #[command(about = "List, show, start, stop and reboot system VMs", long_about = "These commands perform the same actions as the web console. Lifecycle commands ask for confirmation (skip with --yes) and wait for the async job to finish.")]
    Systemvms {
        #[command(subcommand)]
        sub: SystemVmCommands,
    },
}

#[derive(Subcommand)]
enum SystemVmCommands {
    /// List system VMs
    #[command(about = "List system VMs", long_about = "List system VMs, optionally filtered by zone, type (consoleproxy|secondarystoragevm) or state.")]
    List {
        #[arg(long)]
        zone_id: Option<String>,
        #[arg(long = "type")]
        vm_type: Option<String>,
        #[arg(long)]
        state: Option<String>,
    },
    /// Show system VM details and the actions its state allows
    Show { id: String },
    /// Start a stopped system VM
    Start {
        id: String,
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Stop a running system VM
    Stop {
        id: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Reboot a running system VM
    Reboot {
        id: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    // If no command provided, serve the web console by default
    let Some(command) = cli.command else {
        let state = build_state_from_env(None);
        start_server(state, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    };
    match command {
        Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
        } => {
            let state = build_state_from_env(env_file.as_deref());
            start_server(state, &host, port, stylesheet).await;
        }
        Commands::CheckConfig { env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            println!("API_BASE_URL         {}", state.api_base_url);
            println!(
                "API_SESSION_KEY      {}",
                if state.session_key.is_empty() { "(not set)" } else { "(set)" }
            );
            println!("CONSOLE_BASE_URL     {}", state.console_base_url.as_deref().unwrap_or("(not set)"));
            println!("JOB_POLL_INTERVAL_MS {}", state.job_poll.interval.as_millis());
            println!("JOB_MAX_POLLS        {}", state.job_poll.max_polls);
            match api::list_system_vms(&state, &SystemVmFilter::default()).await {
                Ok(vms) => {
                    println!(
                        "{}",
                        yansi::Paint::new(format!("Configuration looks valid ({} system VMs returned)", vms.len())).green()
                    );
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Configuration appears invalid").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Systemvms { sub } => {
            let state = build_state_from_env(None);
            match sub {
                SystemVmCommands::List { zone_id, vm_type, state: vm_state } => {
                    let filter = SystemVmFilter {
                        zoneid: zone_id,
                        systemvmtype: vm_type,
                        state: vm_state,
                    };
                    match services::load_rows(&state, &filter).await {
                        Ok(rows) => print_rows(&rows),
                        Err(e) => {
                            eprintln!("{}: {}", yansi::Paint::new("Failed to list system VMs").red(), e);
                            process::exit(1);
                        }
                    }
                }
                SystemVmCommands::Show { id } => match services::load_panel(&state, &id).await {
                    Ok(panel) => {
                        print_rows(std::slice::from_ref(&panel.row));
                        print_details(&panel.details);
                    }
                    Err(e) => {
                        eprintln!("{}: {}", yansi::Paint::new("Failed to load system VM").red(), e);
                        process::exit(1);
                    }
                },
                SystemVmCommands::Start { id, yes } => run_cli_action(&state, SystemVmAction::Start, &id, yes).await,
                SystemVmCommands::Stop { id, yes } => run_cli_action(&state, SystemVmAction::Stop, &id, yes).await,
                SystemVmCommands::Reboot { id, yes } => run_cli_action(&state, SystemVmAction::Reboot, &id, yes).await,
            }
        }
    }
}
