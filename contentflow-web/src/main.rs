use anyhow::{bail, Context, Result};
use chrono::FixedOffset;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use contentflow::api::csrf::get_cookie;
use contentflow::caption::render_caption;
use contentflow::config::Settings;
use contentflow::dom::{Document, ModalRegion, ThumbnailId};
use contentflow::logging::{self, LogConfig};
use contentflow::post_time::format_post_time;
use contentflow::{ApiClient, LikeToggleController, ModalController};
use contentflow_types::{ModalKey, PostId};

/// Contentflow - drive the blog's interactive page components from the terminal
#[derive(Parser)]
#[command(name = "contentflow")]
#[command(about = "Image modal, like toggle and post time tools for Contentflow pages")]
#[command(version)]
struct Cli {
    /// Site URL to talk to
    #[arg(long, short, env = "CONTENTFLOW_SERVER_URL", global = true)]
    server: Option<String>,

    /// Settings file (defaults to ./contentflow.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a raw caption to the modal's caption HTML
    Caption {
        text: String,
        /// Hashtag link prefix
        #[arg(long)]
        tag_base: Option<String>,
    },
    /// Open the image modal on a page snapshot and replay input
    Gallery {
        /// JSON page snapshot
        page: PathBuf,
        /// 1-based position of the clicked thumbnail among all thumbnails
        #[arg(long, default_value_t = 1)]
        thumbnail: usize,
        /// Comma-separated key names (ArrowLeft, ArrowRight, Escape) or
        /// button clicks (next, prev)
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
    },
    /// Toggle the like on a post
    Like {
        post_id: String,
        /// Cookie header carrying the csrftoken cookie
        #[arg(long, env = "CONTENTFLOW_COOKIES")]
        cookie: Option<String>,
    },
    /// Format a post timestamp the way the page shows it
    Time {
        utc: String,
        #[arg(long, default_value = "en-US")]
        locale: String,
        /// Viewer offset from UTC in minutes
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset_minutes: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _ = dotenv::dotenv();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command {
        Command::Caption { text, tag_base } => {
            let base = tag_base.unwrap_or(settings.caption.tag_url_base);
            println!("{}", render_caption(&text, &base));
        }
        Command::Gallery {
            page,
            thumbnail,
            keys,
        } => {
            let doc = Document::load(&page)
                .with_context(|| format!("Failed to load page {}", page.display()))?;
            let thumb = thumbnail
                .checked_sub(1)
                .map(ThumbnailId)
                .filter(|id| doc.thumbnail(*id).is_some())
                .with_context(|| format!("Page has no thumbnail #{}", thumbnail))?;

            let mut modal = ModalController::new(
                ModalRegion::new(),
                Some(settings.caption.tag_url_base),
                log_config.clone(),
            );
            modal.open_thumbnail(&doc, thumb);
            print_frame(&modal);

            for key in &keys {
                match key.as_str() {
                    "next" => modal.next(),
                    "prev" => modal.prev(),
                    name => modal.handle_key(ModalKey::parse(name)),
                }
                print_frame(&modal);
            }
        }
        Command::Like { post_id, cookie } => {
            let server = cli.server.unwrap_or(settings.server.url);
            let cookies = cookie.or(settings.client.cookies).unwrap_or_default();
            let token = get_cookie(&cookies, &settings.client.csrf_cookie);
            if token.is_none() {
                log::warn!("No {} cookie supplied", settings.client.csrf_cookie);
            }

            let client = ApiClient::new(server).with_csrf_token(token);
            let controller = LikeToggleController::new(client, log_config.clone());

            let mut doc = Document::new();
            let post_id = PostId::new(post_id);
            let button = doc.add_like_button(post_id.clone(), false, 0);

            match controller.toggle(&mut doc, button).await {
                Ok(response) => {
                    let label = doc
                        .like_button(button)
                        .map(|b| b.label.clone())
                        .unwrap_or_default();
                    let count = doc
                        .text_of(&response.post_id.likes_count_element_id())
                        .or_else(|| doc.text_of(&post_id.likes_count_element_id()))
                        .unwrap_or_default()
                        .to_string();
                    println!("{}  {}", label, count);
                }
                Err(e) => {
                    for alert in doc.alerts() {
                        eprintln!("{}", alert);
                    }
                    bail!("Like toggle failed: {}", e);
                }
            }
        }
        Command::Time {
            utc,
            locale,
            offset_minutes,
        } => {
            let tz = FixedOffset::east_opt(offset_minutes * 60)
                .with_context(|| format!("Offset out of range: {} minutes", offset_minutes))?;
            println!("{}", format_post_time(&utc, &locale, &tz)?);
        }
    }

    Ok(())
}

fn print_frame(modal: &ModalController<ModalRegion>) {
    let region = modal.surface();
    if region.show_calls == 0 {
        println!("(modal not opened)");
        return;
    }
    println!(
        "[{}] {} {}\n    {}",
        if region.open { "open" } else { "closed" },
        region.counter,
        region.image_src,
        region.caption_html
    );
}

