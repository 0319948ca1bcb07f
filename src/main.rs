use lexicon_solver::cli::{display_matches, display_membership, display_summary, parse_cli};
use lexicon_solver::rack::{Rack, rack_search};
use lexicon_solver::wildcard::wildcard_search;
use lexicon_solver::wordlist::{EMBEDDED_WORDLIST, load_wordlist_from_file, load_wordlist_from_str};
use lexicon_solver::Automaton;
use log::info;

fn main() {
    env_logger::init();
    let cli = parse_cli();

    let words = match &cli.wordlist_path {
        Some(path) => match load_wordlist_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load word list from '{path}': {e}");
                return;
            }
        },
        None => load_wordlist_from_str(EMBEDDED_WORDLIST),
    };

    let automaton = match Automaton::from_words(&words) {
        Ok(automaton) => automaton,
        Err(e) => {
            eprintln!("Failed to index word list: {e}");
            return;
        }
    };
    info!(
        "indexed {} words: {} nodes, {} edges",
        words.len(),
        automaton.node_count(),
        automaton.edge_count()
    );

    let mut queried = false;

    if let Some(word) = &cli.word {
        queried = true;
        display_membership(word, automaton.contains(word));
    }

    if let Some(pattern) = &cli.pattern {
        queried = true;
        match wildcard_search(&automaton, pattern) {
            Ok(matches) => display_matches(&matches),
            Err(e) => {
                eprintln!("Invalid pattern: {e}");
                return;
            }
        }
    }

    if let (Some(template), Some(tiles)) = (&cli.template, &cli.rack) {
        queried = true;
        let rack = match Rack::parse(tiles) {
            Ok(rack) => rack,
            Err(e) => {
                eprintln!("Invalid rack: {e}");
                return;
            }
        };
        match rack_search(&automaton, template, rack) {
            Ok(matches) => display_matches(&matches),
            Err(e) => {
                eprintln!("Invalid template: {e}");
                return;
            }
        }
    }

    if !queried {
        display_summary(words.len(), automaton.node_count(), automaton.edge_count());
        println!("Use --word, --pattern, or --template/--rack to run a query.");
    }
}
