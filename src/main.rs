use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ctxweave::{ConfigLoader, ScanOptions, Scanner};

#[derive(Parser)]
#[command(name = "ctxweave")]
#[command(
    version,
    about = "Weave file contents into a single LLM-ready context stream"
)]
struct Cli {
    #[arg(value_name = "PATH", help = "Paths or glob patterns to gather")]
    paths: Vec<String>,

    #[arg(long, short = 'r', help = "Do not descend into subdirectories")]
    no_recursive: bool,

    #[arg(
        long,
        short,
        value_name = "GLOB",
        help = "Exclude matching paths (repeatable)"
    )]
    exclude: Vec<String>,

    #[arg(long, help = "Do not honor .gitignore files")]
    no_gitignore: bool,

    #[arg(
        long,
        value_name = "FILE",
        help = "Additional ignore file with gitignore syntax (repeatable)"
    )]
    ignore_file: Vec<PathBuf>,

    #[arg(long, help = "Include files that look binary")]
    no_binary_check: bool,

    #[arg(
        long,
        short,
        value_name = "FILE",
        help = "Write output to a file instead of stdout"
    )]
    output: Option<PathBuf>,

    #[arg(long, value_name = "TEMPLATE", help = "Inline output template")]
    template: Option<String>,

    #[arg(long, help = "Print the merged configuration and exit")]
    show_config: bool,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        // Extract panic message
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        // Log the panic
        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mCtxWeave encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        eprintln!("\n\x1b[33mPlease report this issue at:\x1b[0m");
        eprintln!("  https://github.com/junyeong-ai/ctxweave/issues");
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    // Install panic handler first
    setup_panic_handler();

    // Run the actual CLI
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    use anyhow::Context;

    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    // stdout carries the woven result, so all diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ConfigLoader::load()?;

    if cli.show_config {
        print!("{}", ConfigLoader::render(&config)?);
        return Ok(());
    }

    // CLI flags sit on top of the merged configuration: negative flags
    // force an option off, repeatable flags append.
    let mut options = ScanOptions::from(&config.scan);
    if cli.no_recursive {
        options.recursive = false;
    }
    if cli.no_gitignore {
        options.use_gitignore = false;
    }
    if cli.no_binary_check {
        options.binary_check = false;
    }
    options.exclude.extend(cli.exclude.iter().cloned());
    options.ignore_files.extend(cli.ignore_file.iter().cloned());

    let inputs =
        ctxweave::cli::input::resolve_inputs(&cli.paths).context("cannot read piped input")?;
    let files = Scanner::new(options).scan(&inputs)?;

    let template = ctxweave::render::template::resolve(cli.template.as_deref(), &config)?;
    let mut writer = ctxweave::cli::output::open(cli.output.as_deref())?;
    ctxweave::render::formatter::emit(&mut writer, &files, &template)
        .context("writing output failed")?;

    Ok(())
}
