use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use log::debug;

/// Convert the paths of an SVG file into a C function of NanoVG calls.
///
/// The generated code is written to stdout. Set `RUST_LOG` to get
/// diagnostics on stderr.
#[derive(Parser)]
#[command(name = "svg2nvg")]
struct Cli {
    /// SVG file to convert
    input: PathBuf,

    /// Function name suffix, derived from the input file name if omitted
    #[arg(short, long)]
    name: Option<String>,
}

fn main() {
    fn inner(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
        debug!("Generating from {}", cli.input.display());
        let lines = svg2nvg::generate_file(&cli.input, cli.name.as_deref())?;

        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        Ok(())
    }

    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = inner(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }
}
