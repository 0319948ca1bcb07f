use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Small bundled word list used when no file is supplied.
pub const EMBEDDED_WORDLIST: &str = include_str!("resources/wordlist.txt");

/// Normalizes raw word-list text into builder-ready input: trimmed,
/// lowercased, alphabetic-only, sorted and deduplicated.
pub fn load_wordlist_from_str(data: &str) -> Vec<String> {
    let mut words: Vec<String> = data
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()))
        .collect();
    words.sort();
    words.dedup();
    words
}

pub fn load_wordlist_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_lowercase();
        if !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()) {
            words.push(word);
        }
    }
    words.sort();
    words.dedup();
    Ok(words)
}
