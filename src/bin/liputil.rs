use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;

use lipi_engine::{
    convert, cross_script_transliterate, detect_script, script_css_class, to_latin, Script,
};

#[derive(Parser)]
#[command(name = "liputil", about = "Indic transliteration diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect the dominant script of a text
    Detect {
        /// Text to examine
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Transliterate text into a target script, detecting the source
    Translit {
        /// Text to convert
        text: String,
        /// Target script (devanagari, tamil, malayalam, gurmukhi, latin)
        target: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Convert between two Indic scripts with explicit source and target
    Cross {
        /// Text to convert
        text: String,
        /// Source script
        source: String,
        /// Target script
        target: String,
    },

    /// Convert Indic text to Latin phonetic spelling
    ToLatin {
        /// Text to convert
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct DetectReport {
    script: Script,
    css_class: &'static str,
}

fn parse_script(name: &str) -> Script {
    Script::parse(name).unwrap_or_else(|| {
        eprintln!("Unknown script name: {}", name);
        process::exit(1);
    })
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Detect { text, json } => {
            let script = detect_script(&text);
            let report = DetectReport {
                script,
                css_class: script_css_class(script),
            };
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).expect("JSON serialization failed")
                );
            } else {
                println!("{}", report.script);
            }
        }

        Command::Translit { text, target, json } => {
            let target = parse_script(&target);
            let result = convert(&text, target);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).expect("JSON serialization failed")
                );
            } else {
                println!("{}", result.text);
            }
        }

        Command::Cross {
            text,
            source,
            target,
        } => {
            let source = parse_script(&source);
            let target = parse_script(&target);
            println!("{}", cross_script_transliterate(&text, source, target));
        }

        Command::ToLatin { text, json } => {
            let result = to_latin(&text);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).expect("JSON serialization failed")
                );
            } else {
                println!("{}", result.result);
            }
        }
    }
}
