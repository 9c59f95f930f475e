use anyhow::Result;
use docprune::cli::{self, Commands};
use docprune::commands::{self, FixConfig};

// Main orchestrator function
fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Fix {
            paths,
            dry_run,
            format,
            config,
            jobs,
            verbosity,
        } => {
            cli::init_logging(verbosity);
            cli::configure_thread_pool(jobs);

            let report = commands::handle_fix(FixConfig {
                paths,
                dry_run,
                format,
                config,
            })?;

            if should_signal_pending_changes(dry_run, report.total_removals()) {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Init { force } => {
            cli::init_logging(0);
            commands::init_config(force)
        }
    }
}

// Pure function deciding the dry-run exit status
fn should_signal_pending_changes(dry_run: bool, removals: usize) -> bool {
    dry_run && removals > 0
}
