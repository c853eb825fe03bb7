//! flatdb mini database
//!
//! Interactive row/value store on a single CSV file.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use flatdb::cli::{
    init_tracing, resolve_file, LineSource, MiniDbSession, Prompter, RewriteArg, Terminal,
};
use flatdb::store::FileStore;
use flatdb::table::{RowTable, ROW_ARITY};

/// flatdb mini database
#[derive(Parser, Debug)]
#[command(name = "minidb")]
#[command(about = "Interactive row/value database on a CSV file")]
#[command(version)]
struct Args {
    /// Table file; when omitted you are asked for one
    file: Option<PathBuf>,

    /// How full-table rewrites replace the file
    #[arg(short, long, value_enum, default_value = "atomic")]
    rewrite: RewriteArg,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        // Errors are reported on stdout like every other message
        println!("Error: {}", e);
    }
}

fn run(args: Args) -> flatdb::Result<()> {
    if io::stdin().is_terminal() {
        let mut prompter = Prompter::new(Terminal::new()?, io::stdout());
        run_session(args, &mut prompter)
    } else {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        run_session(args, &mut prompter)
    }
}

fn run_session<L: LineSource>(
    args: Args,
    prompter: &mut Prompter<L, io::Stdout>,
) -> flatdb::Result<()> {
    let exe = std::env::current_exe()?;
    let search_dir = exe.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    tracing::debug!("Program directory: {}", search_dir.display());

    let Some(path) = resolve_file(prompter, args.file, &search_dir, Some(&exe))? else {
        return Ok(());
    };
    tracing::info!("Opening table {}", path.display());

    let store = FileStore::new(path, ROW_ARITY).with_strategy(args.rewrite.into());
    let table = RowTable::open(store)?;

    MiniDbSession::new(table).run(prompter)
}
