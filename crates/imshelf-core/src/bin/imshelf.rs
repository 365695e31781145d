//! One-shot Open Library search from the terminal.

use clap::Parser;
use imshelf_core::{
    CatalogSource, OpenLibrarySource, Query, QueryType, SearchFilters, PAGE_SIZE,
};

#[derive(Parser)]
#[command(name = "imshelf", about = "Search Open Library from the terminal")]
struct Args {
    /// Search text
    query: String,

    /// Field to search: title, author, subject, isbn, or general
    #[arg(long = "type", default_value = "general", value_parser = parse_query_type)]
    query_type: QueryType,

    /// Language code filter (e.g. eng)
    #[arg(long)]
    language: Option<String>,

    /// First-publish-year filter
    #[arg(long)]
    year: Option<i32>,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

fn parse_query_type(s: &str) -> Result<QueryType, String> {
    match s.to_ascii_lowercase().as_str() {
        "title" => Ok(QueryType::Title),
        "author" => Ok(QueryType::Author),
        "subject" => Ok(QueryType::Subject),
        "isbn" => Ok(QueryType::Isbn),
        "general" | "q" => Ok(QueryType::General),
        other => Err(format!(
            "unknown query type '{other}' (expected title, author, subject, isbn, or general)"
        )),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let query = Query::new(args.query_type, args.query).with_filters(SearchFilters {
        language: args.language,
        publish_year: args.year,
    });

    let source = OpenLibrarySource::new();
    let mut shown = 0u64;
    let mut total = 0u64;

    for page_index in 0..args.pages {
        let page = source.fetch_page(&query, page_index).await?;
        total = page.total_matches;

        for record in &page.records {
            let title = record.title.as_deref().unwrap_or("(untitled)");
            let authors = if record.author_name.is_empty() {
                "unknown".to_string()
            } else {
                record.author_name.join(", ")
            };
            let year = record
                .first_publish_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "----".to_string());
            println!("{year}  {title} — {authors}");
            println!("      {}", record.detail_url());
        }

        shown += page.records.len() as u64;
        if page.records.len() < PAGE_SIZE {
            break;
        }
    }

    println!("\n{shown} of {total} matches shown");
    Ok(())
}
