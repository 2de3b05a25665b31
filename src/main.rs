//! CLI entrypoint.

use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use pkgdoc::{Config, Package, PackageInput};
use tracing_subscriber::EnvFilter;

/// Exit code for a query that found no matching symbol.
const EXIT_NOT_FOUND: i32 = 1;
/// Exit code for a fatal failure.
const EXIT_FATAL: i32 = 2;

#[derive(Parser)]
#[command(
	name = "pkgdoc",
	version,
	about = "Extract and pretty-print package documentation",
	long_about = "Extract and pretty-print package documentation.\n\n\
	              The target is a package description document produced by the \
	              language toolchain. Without a query, the package overview is \
	              printed: the package docs followed by one-line summaries of \
	              its contents. With a query, the matching symbol or method is \
	              printed in full, signature first, doc comment below."
)]
struct Cli {
	/// Package description file ('-' reads standard input)
	target: String,

	/// Symbol, Symbol.Method, or bare method name to look up
	query: Option<String>,

	/// Show unexported symbols as well as exported
	#[arg(short = 'u', long = "unexported", default_value_t = false)]
	unexported: bool,

	/// Require symbol matches to respect case exactly
	#[arg(short = 'c', long = "match-case", default_value_t = false)]
	match_case: bool,

	/// Show symbols with package docs even for command packages
	#[arg(long = "cmd", default_value_t = false)]
	cmd: bool,
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.with_writer(io::stderr)
		.init();

	let cli = Cli::parse();
	match run(&cli) {
		Ok(true) => {}
		Ok(false) => {
			let query = cli.query.as_deref().unwrap_or_default();
			report(&format!("no symbol {query} in package {}", cli.target));
			process::exit(EXIT_NOT_FOUND);
		}
		Err(e) => {
			report(&e.to_string());
			process::exit(EXIT_FATAL);
		}
	}
}

fn run(cli: &Cli) -> pkgdoc::Result<bool> {
	let input = if cli.target == "-" {
		let mut text = String::new();
		io::stdin().read_to_string(&mut text)?;
		PackageInput::from_json(&text)?
	} else {
		PackageInput::load(Path::new(&cli.target))?
	};

	let cfg = Config::new()
		.with_unexported(cli.unexported)
		.with_match_case(cli.match_case)
		.with_show_cmd(cli.cmd);

	let stdout = io::stdout();
	let mut pkg = Package::new(input, &cli.target, cfg, stdout.lock());

	match cli.query.as_deref() {
		None | Some("") => {
			pkg.package_doc()?;
			Ok(true)
		}
		Some(query) => match query.split_once('.') {
			Some((symbol, method)) => pkg.method_doc(symbol, method),
			None => pkg.symbol_doc(query),
		},
	}
}

fn report(message: &str) {
	if use_color() {
		eprintln!("{} {message}", "pkgdoc:".red().bold());
	} else {
		eprintln!("pkgdoc: {message}");
	}
}

fn use_color() -> bool {
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	io::stderr().is_terminal()
}
