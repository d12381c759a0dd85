//! sql-grader - grades SQL exercise solutions.

mod cli;

use cli::{Cli, Command};
use sql_grader::config::GraderConfig;
use sql_grader::error::{GraderError, Result};
use sql_grader::grader::Grader;
use sql_grader::logging;
use sql_grader::report::{self, OutputFormat};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        print_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Precedence: CLI flag / env var, then config file, then defaults
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = GraderConfig::load_from_file(&config_path)?;
    config.merge(&cli.overrides());

    let grader = Grader::new(config);

    match cli.command {
        Command::Grade {
            exercise_id,
            format,
        } => grade(&grader, &exercise_id, format).await,
        Command::List => list(&grader),
    }
}

async fn grade(grader: &Grader, exercise_id: &str, format: OutputFormat) -> Result<()> {
    let (exercise, result) = grader.grade(exercise_id).await?;
    print!("{}", report::render(&exercise, &result, format)?);
    // Check failures are reported, not signalled through the exit code
    Ok(())
}

fn list(grader: &Grader) -> Result<()> {
    let exercises = grader.catalog().load_exercises()?;

    if exercises.is_empty() {
        println!("No exercises found.");
        println!(
            "Exercises should be defined in {}/*/{}",
            grader.catalog().root().display(),
            sql_grader::exercise::DEFINITION_FILE
        );
        return Ok(());
    }

    print!("{}", report::render_list(&exercises));
    Ok(())
}

fn print_error(error: &GraderError) {
    match error {
        GraderError::Learner(msg) => {
            eprintln!("❌ Error in your SQL:");
            eprintln!("   {msg}");
        }
        GraderError::SolutionNotFound(path) => {
            eprintln!("Error: {error}");
            eprintln!();
            eprintln!("Create your solution at: {}", path.display());
        }
        _ => eprintln!("Error: {error}"),
    }
}
