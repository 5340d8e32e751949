use clap::Parser;
use std::path::PathBuf;
use wishcard_rs::{export, CardRenderer, RedirectResolver, Wish};

/// wishcard: render a new-year wish as a shareable PNG card
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// The wish text to render
    #[clap(short, long)]
    pub content: String,

    /// Author shown on the card (blank renders as anonymous)
    #[clap(short, long, default_value = "")]
    pub author: String,

    /// Wish-wall origin queried for the share URL
    #[clap(short, long, default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// Share URL to encode directly, skipping the redirect endpoint
    #[clap(short, long)]
    pub redirect_url: Option<String>,

    /// Directory the card is written into
    #[clap(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args: Args = Args::parse();

    let wish = Wish::new(args.content, args.author);
    let renderer = CardRenderer::new();

    let url = match args.redirect_url {
        Some(url) => url,
        None => RedirectResolver::new(args.base_url).resolve_or_default().await,
    };

    let card = match renderer.generate(&wish, &url).await {
        Ok(card) => card,
        Err(err) => {
            println!("Card rendering failed: {}", err);
            std::process::exit(1);
        }
    };

    match export::download(&card, &args.output_dir) {
        Ok(path) => println!("Wrote {}", path.display()),
        Err(err) => {
            println!(
                "Failed to write card into {}: {}",
                args.output_dir.display(),
                err
            );
            std::process::exit(1);
        }
    }
}
