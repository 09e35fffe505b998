use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "augur")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Bridge a conversational web app through a real browser",
    long_about = "Augur drives a visible, persistently logged-in browser session against a \
                  conversational web application: it types your prompt into the page, uploads \
                  image attachments through the native file chooser, and waits for the reply \
                  to finish rendering before returning it."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP bridge API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 4000)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Browser profile directory (default: ~/.augur/profile)
        #[arg(long, value_name = "DIR")]
        profile_dir: Option<PathBuf>,

        /// Use a throwaway profile instead of the persistent one
        #[arg(long, conflicts_with = "profile_dir")]
        temp_profile: bool,

        /// Chrome binary to launch
        #[arg(long, value_name = "PATH")]
        chrome_path: Option<PathBuf>,

        /// Target application URL
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },

    /// Ask a single question and print the reply
    Ask {
        /// Prompt text
        #[arg(value_name = "TEXT")]
        text: String,

        /// Image attachment (repeatable; order is preserved)
        #[arg(short = 'i', long = "image", value_name = "FILE")]
        images: Vec<PathBuf>,

        /// Browser profile directory (default: ~/.augur/profile)
        #[arg(long, value_name = "DIR")]
        profile_dir: Option<PathBuf>,

        /// Use a throwaway profile instead of the persistent one
        #[arg(long, conflicts_with = "profile_dir")]
        temp_profile: bool,

        /// Chrome binary to launch
        #[arg(long, value_name = "PATH")]
        chrome_path: Option<PathBuf>,

        /// Target application URL
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Serve {
            port,
            bind,
            profile_dir,
            temp_profile,
            chrome_path,
            url,
        } => commands::serve::execute(port, bind, profile_dir, temp_profile, chrome_path, url).await,
        Commands::Ask {
            text,
            images,
            profile_dir,
            temp_profile,
            chrome_path,
            url,
        } => commands::ask::execute(text, images, profile_dir, temp_profile, chrome_path, url).await,
        Commands::Completion { shell } => {
            commands::completion::execute(shell);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("augur=debug,augur_core=debug,augur_browser=debug,augur_server=debug")
    } else {
        EnvFilter::new("augur=info,augur_browser=info,augur_server=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
