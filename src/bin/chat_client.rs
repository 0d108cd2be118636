//! Terminal front end for the relay: one line in, one reply out.

use chat_relay::client::ChatClient;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "chat_client", about = "Chat with a property through the relay")]
struct Args {
    /// Slug of the property to chat about.
    slug: String,

    /// Base URL of the running relay.
    #[arg(long, default_value = "http://localhost:3000")]
    base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = ChatClient::new(&args.base_url, &args.slug);

    println!("Chatting about '{}' (session {}). Ctrl-D to quit.", args.slug, client.session_id());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(reply) = client.send(&line).await {
            println!("> {reply}");
        }
    }

    Ok(())
}
