//! Command-line surface for `foglio-cli`.
#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "foglio-cli", version, about = "Blog collection admin CLI", long_about = None)]
pub struct Cli {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "FOGLIO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// API base URL, e.g. <http://api.test/api>
    #[arg(long = "api-base-url", env = "FOGLIO_API_BASE_URL", value_name = "URL")]
    pub api_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post management (list/create/update/delete)
    Posts(PostsArgs),
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List one page of posts, optionally filtered by a search term
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        /// Slug; derived from the title when omitted
        #[arg(long)]
        slug: Option<String>,
        /// Publication timestamp (`YYYY-MM-DDTHH:MM`); omitted means unpublished
        #[arg(long)]
        published_at: Option<String>,
    },
    /// Update an existing post (all fields are sent)
    Update {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        published_at: Option<String>,
    },
    /// Delete a post after confirmation
    Delete {
        id: i64,
        /// Skip the interactive confirmation prompt
        #[arg(long, default_value_t = false)]
        yes: bool,
        /// Page the post is being viewed on; drives post-delete renumbering
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
}
