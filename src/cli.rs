use std::collections::HashSet;

use clap::Parser;

/// Lexicon query CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list file
    #[arg(short = 'i', long = "input")]
    pub wordlist_path: Option<String>,

    /// Check whether a single word is in the lexicon
    #[arg(short = 'w', long = "word")]
    pub word: Option<String>,

    /// Wildcard pattern to match ('?' = one letter, '*' = any run)
    #[arg(short = 'p', long = "pattern")]
    pub pattern: Option<String>,

    /// Template of fixed letters and '?' slots to fill from the rack
    #[arg(short = 't', long = "template", requires = "rack")]
    pub template: Option<String>,

    /// Rack of available tiles (letters, '?' for a blank)
    #[arg(short = 'r', long = "rack", requires = "template")]
    pub rack: Option<String>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Output helpers

pub fn display_membership(word: &str, found: bool) {
    if found {
        println!("'{word}' is in the lexicon.");
    } else {
        println!("'{word}' is not in the lexicon.");
    }
}

pub fn display_matches(matches: &HashSet<String>) {
    let mut words: Vec<&String> = matches.iter().collect();
    words.sort();
    println!("Found {} words:", words.len());
    for word in words {
        println!("{word}");
    }
}

pub fn display_summary(word_count: usize, node_count: usize, edge_count: usize) {
    println!("Indexed {word_count} words into {node_count} nodes and {edge_count} edges.");
}
