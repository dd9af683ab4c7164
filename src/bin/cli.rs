//! Flatboard CLI Client
//!
//! Command-line interface for interacting with a Flatboard server.

use clap::{Parser, Subcommand};
use flatboard::client::ClientResponse;
use flatboard::Client;

/// Flatboard CLI
#[derive(Parser, Debug)]
#[command(name = "flatboard-cli")]
#[command(about = "CLI for the Flatboard message server")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Print response headers
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the index page
    Index,

    /// List all messages
    List,

    /// Create a message
    Create {
        /// Message text
        text: String,
    },

    /// Replace the text of a message
    Replace {
        /// Message id
        id: u32,

        /// New message text
        text: String,
    },

    /// Delete a message
    Delete {
        /// Message id
        id: u32,
    },

    /// Append to the scratch resource and print its content
    Scratch {
        /// Bytes to append
        body: String,

        /// Scratch resource name
        #[arg(short, long, default_value = "test.txt")]
        name: String,
    },

    /// Send an arbitrary request
    Raw {
        method: String,
        uri: String,
        #[arg(default_value = "")]
        body: String,
    },
}

fn main() {
    let args = Args::parse();
    let client = Client::new(&args.server);

    let result = match &args.command {
        Commands::Index => client.index(),
        Commands::List => client.list(),
        Commands::Create { text } => client.create(text),
        Commands::Replace { id, text } => client.replace(*id, text),
        Commands::Delete { id } => client.delete(*id),
        Commands::Scratch { body, name } => client.scratch(name, body.as_bytes()),
        Commands::Raw { method, uri, body } => client.request(method, uri, body.as_bytes()),
    };

    match result {
        Ok(response) => print_response(&response, args.verbose),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_response(response: &ClientResponse, verbose: bool) {
    println!("{} {}", response.status, response.reason);
    if verbose {
        for (name, value) in &response.headers {
            println!("{}: {}", name, value);
        }
    }
    if !response.body.is_empty() {
        println!("{}", response.body_text());
    }
    if response.status >= 400 {
        std::process::exit(2);
    }
}
