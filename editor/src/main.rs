use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use seed_editor::{EditorResult, EditorSession, script};

/// Seed sprite editor, headless mode.
#[derive(Parser, Debug)]
#[command(
    name = "seed-editor",
    about = "Replays an editor script against a new sprite scene",
    long_about = "Replays an editor script against a new sprite scene and prints \
        whatever the script asks for.\n\n\
        EXAMPLES:\n\
          # Run a script file\n\
          seed-editor --script demo.txt\n\
        \n\
          # Read the script from stdin\n\
          echo \"create\\nprint\" | seed-editor",
    version
)]
struct Args {
    /// Editor configuration file.
    #[arg(long, default_value = "editor.toml")]
    config: PathBuf,

    /// Script to replay. Reads stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
}

fn run(args: &Args) -> EditorResult {
    let config = seed_editor::load_or_default(&args.config);
    let source = match &args.script {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            source
        }
    };

    let mut session = EditorSession::new(config);
    let mut stdout = std::io::stdout().lock();
    script::run_script(&mut session, &source, &mut stdout)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    seed_core::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
