use clap::Parser;

/// Browse trending movies, search, and get recommendations from a CineMatch server
#[derive(Parser, Debug)]
#[command(name = "cinematch", version, about)]
pub struct Cli {
    /// Open recommendations for a genre (e.g. action, comedy, sci-fi)
    #[arg(short = 'g', long = "genre", conflicts_with = "query")]
    pub genre: Option<String>,

    /// Base URL of the CineMatch server
    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    /// Number of results to request per search
    #[arg(short = 'k', long = "top-k")]
    pub top_k: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,

    /// Check that the server is reachable and exit
    #[arg(long = "check")]
    pub check: bool,

    /// Search immediately for this query
    #[arg(trailing_var_arg = true)]
    pub query: Vec<String>,
}

impl Cli {
    pub fn initial_query(&self) -> Option<String> {
        let query = self.query.join(" ");
        if query.trim().is_empty() {
            None
        } else {
            Some(query)
        }
    }
}
