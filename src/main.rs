mod logger;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use huffpack::{CodeTable, FrequencyTable, HuffmanTree, compress_file};

#[derive(Parser)]
#[command(name = "huffpack", version)]
#[command(about = "Huffman-encode text files into raw packed bits.", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a text file. The output holds packed bits only, no header
    Encode {
        input: PathBuf,
        output: PathBuf,
        /// Print the code table after the report
        #[arg(long)]
        show_codes: bool,
    },
    /// Print the code table for a text file without writing anything
    Codes {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print symbol frequencies and the expected code length
    Stats { input: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(logger::level_for(cli.verbose, cli.quiet))?;

    match cli.command {
        Commands::Encode { input, output, show_codes } => {
            let compressed = compress_file(&input, &output).with_context(|| {
                format!("failed to compress {} into {}", input.display(), output.display())
            })?;
            println!("{}", compressed.report());
            if show_codes {
                print_codes(&compressed.codes);
            }
        }
        Commands::Codes { input, json } => {
            let (_, codes) = load_codes(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&codes)?);
            } else {
                print_codes(&codes);
            }
        }
        Commands::Stats { input } => {
            let (freq, codes) = load_codes(&input)?;
            for (symbol, count) in freq.iter() {
                println!("{symbol:?}\t{count}");
            }
            println!("symbols: {}", freq.total());
            println!("average code length: {:.4} bits", codes.average_length(&freq)?);
        }
    }

    Ok(())
}

fn load_codes(input: &Path) -> anyhow::Result<(FrequencyTable, CodeTable)> {
    let data = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let freq = FrequencyTable::from_bytes(&data)
        .with_context(|| format!("{} is not a text file", input.display()))?;
    let tree = HuffmanTree::build(&freq)
        .with_context(|| format!("{} has nothing to encode", input.display()))?;
    let codes = CodeTable::from_tree(&tree);
    Ok((freq, codes))
}

fn print_codes(codes: &CodeTable) {
    for (symbol, code) in codes.iter() {
        println!("{symbol:?}\t{code}");
    }
}
