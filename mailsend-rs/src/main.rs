//! mailsend: send the demo messages or print generated Content-IDs

use clap::{Parser, Subcommand};
use lettre::transport::stub::AsyncStubTransport;
use lettre::AsyncTransport;
use mailsend_rs::config::{Config, DemoConfig};
use mailsend_rs::content_id::ContentIdGenerator;
use mailsend_rs::message::MessageComposer;
use mailsend_rs::smtp::{build_transport, Mailer};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Parser)]
#[command(name = "mailsend", version, about = "Compose and send demo emails over SMTP")]
struct Cli {
    /// Path to the TOML configuration (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print generated Content-IDs
    ContentIds {
        #[arg(long, default_value_t = 5)]
        rounds: u32,
        #[arg(long, default_value_t = 5)]
        per_round: u32,
        /// Pause between rounds, in milliseconds
        #[arg(long, default_value_t = 100)]
        pause_ms: u64,
    },
    /// Compose and send the plain, attachment and embedded-image messages
    Send {
        /// Image used for the attachment and embedded messages
        #[arg(long)]
        image: Option<PathBuf>,
        /// Print the formatted messages instead of sending them
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    // Initialize logging
    let default_filter = if config.smtp.debug {
        "mailsend_rs=debug,lettre=debug"
    } else {
        "mailsend_rs=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting mailsend v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::ContentIds {
            rounds,
            per_round,
            pause_ms,
        } => print_content_ids(rounds, per_round, pause_ms).await,
        Command::Send { image, dry_run } => {
            config.validate()?;

            let mut demo = config.demo.clone();
            if let Some(image) = image {
                demo.image_path = image.to_string_lossy().to_string();
            }

            let ids = Arc::new(ContentIdGenerator::from_system());
            let composer = MessageComposer::new(Arc::clone(&ids));
            let from = config.sender_mailbox()?;

            if dry_run {
                let mailer = Mailer::new(AsyncStubTransport::new_ok(), from, ids);
                send_demo_messages(&mailer, &composer, &demo).await?;
                for (envelope, raw) in mailer.transport().messages().await {
                    let to: Vec<String> = envelope.to().iter().map(ToString::to_string).collect();
                    println!("--- envelope to: {}", to.join(", "));
                    println!("{}", raw);
                }
            } else {
                let mailer = Mailer::new(build_transport(&config.smtp)?, from, ids);
                send_demo_messages(&mailer, &composer, &demo).await?;
                info!("All demo messages sent");
            }

            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::from_file(DEFAULT_CONFIG)?,
        None => Config::default(),
    };
    Ok(config)
}

async fn print_content_ids(rounds: u32, per_round: u32, pause_ms: u64) -> anyhow::Result<()> {
    let generator = ContentIdGenerator::global();
    for _ in 0..rounds {
        for _ in 0..per_round {
            println!("{}", generator.next_identifier());
        }
        tokio::time::sleep(Duration::from_millis(pause_ms)).await;
    }
    Ok(())
}

async fn send_demo_messages<T>(
    mailer: &Mailer<T>,
    composer: &MessageComposer,
    demo: &DemoConfig,
) -> anyhow::Result<()>
where
    T: AsyncTransport + Sync,
    T::Error: Display,
{
    let simple = composer.simple_message()?;
    mailer.send_to(simple, &[demo.simple_recipient.as_str()]).await?;

    let with_attachment = composer.message_with_attachment(&demo.image_path).await?;
    mailer
        .send_to(with_attachment, &[demo.attachment_recipient.as_str()])
        .await?;

    let with_image = composer.message_with_embedded_image(&demo.image_path).await?;
    mailer
        .address_and_send(with_image, &demo.embedded_recipient)
        .await?;

    Ok(())
}
