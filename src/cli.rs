use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{DesignTier, Locale, SiteType};

/// sitequote - Site builder pricing and dream-site quiz
#[derive(Parser)]
#[command(name = "sitequote")]
#[command(about = "Price a site-builder configuration or a dream-site quiz")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Price a builder selection
    Quote {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print the raw quote as JSON instead of display strings
        #[arg(long)]
        json: bool,
    },
    /// Inspect or validate pricing catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
    /// Run the dream-site quiz non-interactively and print the proposal
    Quiz {
        /// Quiz catalog file (defaults to the built-in catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Use the built-in banded catalog
        #[arg(long, conflicts_with = "catalog")]
        banded: bool,

        /// Site type option id (e.g. landing, online-store)
        #[arg(long)]
        site_type: String,

        /// Client source option id (repeatable)
        #[arg(long = "client-source")]
        client_sources: Vec<String>,

        /// Special feature option id (repeatable)
        #[arg(long = "feature")]
        features: Vec<String>,

        /// Design style option id
        #[arg(long)]
        design_style: String,

        /// Timeline option id
        #[arg(long)]
        timeline: String,
    },
    /// Build the lead payload for a builder selection
    Lead {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Visitor name
        #[arg(long)]
        name: String,

        /// Contact method (phone, email, messenger handle)
        #[arg(long)]
        contact: String,

        /// Free-text message
        #[arg(long, default_value = "")]
        message: String,

        /// Language prefix of the page the form was sent from
        #[arg(long)]
        lang: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Print a built-in catalog as JSON
    Dump {
        /// Dump the quiz catalog instead of the builder rule table
        #[arg(long)]
        quiz: bool,

        /// With --quiz, dump the banded revision
        #[arg(long, requires = "quiz")]
        banded: bool,
    },
    /// Validate a catalog file
    Validate {
        /// Path to catalog file to validate
        file: PathBuf,

        /// The file is a quiz catalog
        #[arg(long)]
        quiz: bool,
    },
}

/// Builder selection flags shared by `quote` and `lead`
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Rule table file (defaults to the built-in table)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Site type
    #[arg(short, long)]
    pub site_type: SiteType,

    /// Design tier
    #[arg(short, long, default_value = "template")]
    pub design: DesignTier,

    /// Page count (defaults to the pages included with the site type)
    #[arg(short, long)]
    pub pages: Option<u32>,

    /// Module id (repeatable)
    #[arg(short, long = "module")]
    pub modules: Vec<String>,

    /// Display language
    #[arg(short, long, default_value = "uk")]
    pub locale: Locale,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
