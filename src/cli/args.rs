//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Outline-to-speech-card engine: parse outlines, restructure them, derive practice cards
#[derive(Parser, Debug)]
#[command(name = "cuecard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an outline and print its summary
    Parse {
        /// Outline file (.md/.txt text or JSON document)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show an outline as a tree
    Tree {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print the canonical indented text of an outline
    Fmt {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Rewrite the file in place
        #[arg(short, long)]
        write: bool,
    },

    /// Print the outline title (first `# ` header)
    Title {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List the speech cards of an outline
    Cards {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List chapters of the card deck
    Chapters {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Find the card a node maps to
    Locate {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node titles from the root, e.g. `Speech Intro Hook`
        #[arg(required = true, num_args = 1..)]
        path: Vec<String>,
    },

    /// Apply one structural edit at a node
    Edit {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node titles from the root, `>`-separated or repeated
        /// (`-n "Speech > Intro"` or `-n Speech -n Intro`); omit to edit
        /// without a selection
        #[arg(short, long, value_delimiter = '>')]
        node: Vec<String>,
        /// Write the result back instead of printing it
        #[arg(short, long)]
        write: bool,
        #[command(subcommand)]
        op: EditOp,
    },

    /// Convert between outline text and JSON documents (by extension)
    Convert {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[arg(value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Insert a new item after the node (or a new root)
    Add,
    /// Append a new item as the node's last child
    AddChild,
    /// Remove the node with its subtree
    Remove,
    /// Move the node one level out
    Promote,
    /// Nest the node under its previous sibling
    Demote,
    /// Swap with the previous sibling
    MoveUp,
    /// Swap with the next sibling
    MoveDown,
    /// Change the node title
    Rename {
        title: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Create a config template
    Init {
        /// Create in the global config dir instead of the current directory
        #[arg(short, long)]
        global: bool,
    },
    /// Show config file locations
    Path,
}
