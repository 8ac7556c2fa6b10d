//! Terminal guestbook: sign it, or read the blessings wall.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ww_client::{BlessingsWall, Guestbook, HttpWishesClient, WallState, WishesApi};
use ww_core::models::GuestMessage;

#[derive(Parser, Debug)]
#[command(name = "wishwall-cli", version, about = "Sign the guestbook or read the blessings wall")]
struct Cli {
    /// Full URL of the wishes endpoint.
    #[arg(
        long,
        env = "WISHWALL_ENDPOINT",
        default_value = "http://127.0.0.1:8888/api/wishes"
    )]
    endpoint: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Leave a wish, then show the refreshed wall.
    Sign {
        #[arg(long)]
        name: String,
        #[arg(long)]
        message: String,
    },
    /// Show one page of the wall.
    Wall {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let http = reqwest::Client::builder()
        .user_agent(concat!("wishwall-cli/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let client = HttpWishesClient::with_client(http, cli.endpoint);
    let mut wall = BlessingsWall::new();

    match cli.command {
        Command::Sign { name, message } => {
            let mut form = Guestbook::with_input(name, message);
            let wish = form.begin_submit()?;

            eprintln!("Sending your wish to {}...", client.endpoint());
            let created = form
                .finish_submit(client.submit_wish(&wish).await)
                .context("Failed to send wish. Please try again.")?;
            println!("Wish Sent! Thank you, {}.\n", created.name);

            wall.refresh(&client).await;
            print_wall(&wall)
        }
        Command::Wall { page } => {
            wall.load(&client).await;
            if !wall.go_to(page) && wall.state() == WallState::Loaded {
                eprintln!(
                    "page {page} is out of range, showing page {}",
                    wall.pager().current()
                );
            }
            print_wall(&wall)
        }
    }
}

fn print_wall(wall: &BlessingsWall) -> anyhow::Result<()> {
    match wall.state() {
        WallState::Loading => println!("Gathering Blessings..."),
        WallState::Failed => {
            bail!("Love in Transit: the blessings could not be loaded right now.")
        }
        WallState::Empty => println!("Be the first to write a message for the couple!"),
        WallState::Loaded => {
            for (i, column) in wall.current_columns().iter().enumerate() {
                println!("── column {} ──", i + 1);
                for message in column {
                    print_card(message);
                }
            }
            let (first, last, total) = wall.pager().showing();
            println!("Showing {first} - {last} of {total} blessings");
            let pager = wall.pager();
            if pager.total_pages() > 1 {
                println!("Page {} of {}", pager.current(), pager.total_pages());
            }
        }
    }
    Ok(())
}

fn print_card(message: &GuestMessage) {
    println!("  \"{}\"", message.message);
    println!(
        "    ~ {}  {}",
        message.name,
        message.timestamp.format("%b %-d, %I:%M %p")
    );
}
