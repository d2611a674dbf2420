use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::search::{Choice, DateRange, FilterState, PriceRange, SortBy, filters::DEFAULT_MAX_PRICE};

#[derive(Parser)]
#[command(name = "sokoni-search")]
#[command(about = "Search a marketplace catalog from the command line", long_about = None)]
pub struct Cli {
    /// JSON array of listings to search
    #[arg(long, value_name = "FILE")]
    pub corpus: Vec<PathBuf>,

    /// JSON array of events, searched alongside listings
    #[arg(long, value_name = "FILE")]
    pub events: Vec<PathBuf>,

    /// Where recent searches are remembered
    #[arg(long, value_name = "DIR", env = "SOKONI_HISTORY_DIR")]
    pub history_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank listings by a free-text query and filters
    Search(SearchArgs),
    /// Autocomplete a partially typed query
    Suggest { query: String },
    /// Inspect or reset recent searches
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    List,
    Clear,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query; omit to browse the newest listings
    #[arg(default_value = "")]
    pub query: String,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub subcategory: Option<String>,
    /// `new` or `used`
    #[arg(long)]
    pub condition: Option<String>,
    /// Substring of the listing location, e.g. a city
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, default_value_t = 0.0)]
    pub min_price: f64,
    #[arg(long, default_value_t = DEFAULT_MAX_PRICE)]
    pub max_price: f64,
    /// relevance, price-low, price-high, newest, oldest, alphabetical, discount, popularity
    #[arg(long, default_value = "relevance")]
    pub sort: String,
    /// all, today, week or month
    #[arg(long, default_value = "all")]
    pub date_range: String,
    #[arg(long)]
    pub hot_deals: bool,
    #[arg(long)]
    pub featured: bool,
    #[arg(long)]
    pub verified: bool,
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,
    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// The filter snapshot these arguments describe.
    pub fn filters(&self) -> FilterState {
        let choice = |value: &Option<String>| value.clone().map_or(Choice::All, Choice::from);
        FilterState {
            search_term: self.query.clone(),
            category: choice(&self.category),
            subcategory: choice(&self.subcategory),
            condition: choice(&self.condition),
            location: choice(&self.location),
            price_range: PriceRange::new(self.min_price, self.max_price),
            sort_by: SortBy::parse(&self.sort),
            is_hot_deal: self.hot_deals,
            is_featured: self.featured,
            verified_sellers_only: self.verified,
            date_range: DateRange::parse(&self.date_range),
        }
    }
}
