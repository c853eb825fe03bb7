//! flatdb contact manager
//!
//! Interactive name/phone/email book on a CSV file.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use flatdb::cli::{init_tracing, ContactsSession, Prompter, RewriteArg, Terminal};
use flatdb::config::{Config, DEFAULT_CONTACTS_FILE};
use flatdb::table::ContactBook;

/// flatdb contact manager
#[derive(Parser, Debug)]
#[command(name = "contacts")]
#[command(about = "Interactive contact manager on a CSV file")]
#[command(version)]
struct Args {
    /// Contacts file
    #[arg(short, long, default_value = DEFAULT_CONTACTS_FILE)]
    file: PathBuf,

    /// How full-table rewrites replace the file
    #[arg(short, long, value_enum, default_value = "atomic")]
    rewrite: RewriteArg,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    tracing::info!("flatdb contacts v{}", flatdb::VERSION);

    let config = Config::builder()
        .data_file(&args.file)
        .rewrite_strategy(args.rewrite.into())
        .build();

    if let Err(e) = run(&config) {
        println!("Error: {}", e);
    }
}

fn run(config: &Config) -> flatdb::Result<()> {
    let mut session = ContactsSession::new(ContactBook::open_config(config)?);

    if io::stdin().is_terminal() {
        let mut prompter = Prompter::new(Terminal::new()?, io::stdout());
        session.run(&mut prompter)
    } else {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        session.run(&mut prompter)
    }
}
