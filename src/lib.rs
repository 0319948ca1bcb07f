// Library interface for lexicon-solver
// This allows integration tests to access internal modules

pub mod automaton;
pub mod builder;
pub mod cli;
pub mod errors;
pub mod rack;
pub mod wildcard;
pub mod wordlist;

// Re-export commonly used items for easier testing
pub use automaton::Automaton;
pub use builder::AutomatonBuilder;
pub use errors::{BuildError, PatternError, RackError};
pub use rack::{BLANK, Rack, rack_search};
pub use wildcard::wildcard_search;
pub use wordlist::{EMBEDDED_WORDLIST, load_wordlist_from_file, load_wordlist_from_str};
