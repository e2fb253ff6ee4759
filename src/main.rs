//! Study Video Effectiveness Rater
//!
//! Command-line dashboard for rating educational YouTube videos.

use clap::{Parser, Subcommand};
use std::sync::Arc;
use study_video_rater::{
    client::YouTubeClient,
    config::Config,
    scoring,
    sentiment::{LexiconScorer, PolarityScorer, SentimentAggregator},
    types::{EffectivenessLabel, VideoMetadata, VideoReport},
    VideoAnalyzer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "study-video-rater")]
#[command(about = "Rate the learning effectiveness of educational YouTube videos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to ./config.toml or ~/.config/study-video-rater/config.toml)
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and analyze a video
    Analyze {
        /// YouTube video URL
        url: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score raw counters without contacting the API
    Score {
        #[arg(long)]
        views: u64,
        #[arg(long)]
        likes: u64,
        #[arg(long)]
        comments: u64,
        /// Average comment sentiment in [-1, 1]
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        sentiment: f64,
    },
    /// Show per-comment polarity and the mean for some texts
    Sentiment {
        /// Comment texts
        #[arg(required = true)]
        texts: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Analyze { url, json } => analyze_video(cli.config.as_deref(), &url, json).await,
        Commands::Score {
            views,
            likes,
            comments,
            sentiment,
        } => score_counters(views, likes, comments, sentiment),
        Commands::Sentiment { texts } => show_sentiment(&texts),
    };

    if let Err(e) = outcome {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    match path {
        Some(p) => Config::load(p),
        None => Config::load_default(),
    }
}

async fn analyze_video(config_path: Option<&str>, url: &str, json: bool) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    config.require_api_key()?;

    let youtube = Arc::new(YouTubeClient::new(&config.youtube)?);
    let aggregator = SentimentAggregator::new(Arc::new(LexiconScorer::new()));
    let analyzer =
        VideoAnalyzer::new(youtube.clone(), youtube, aggregator).with_config(&config.analysis);

    tracing::info!("Fetching and analyzing {}", url);
    let report = analyzer.analyze(url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

fn render_report(report: &VideoReport) {
    let meta = &report.metadata;

    println!("\n📌 Video Details\n");
    println!("Title: {}", meta.title);
    println!("{:>14} {:>14} {:>14}", "Views", "Likes", "Comments");
    println!("{:>14} {:>14} {:>14}", meta.views, meta.likes, meta.comments);

    println!("\n📈 Effectiveness Result\n");
    println!("Final Score: {:.2}", report.effectiveness.score);
    println!("{}", banner(report.effectiveness.label));

    println!("\n🧠 Sentiment Analysis\n");
    println!(
        "Average Sentiment Score: {:.3} ({} comments)",
        report.sentiment, report.comment_count
    );

    for warning in &report.warnings {
        println!("⚠️  {}", warning);
    }

    println!("\n{}", "-".repeat(60));
    println!("Rule-based analytics using YouTube Data API & lexicon sentiment analysis");
}

fn banner(label: EffectivenessLabel) -> String {
    let icon = match label {
        EffectivenessLabel::HighlyEffective => "✅",
        EffectivenessLabel::ModeratelyEffective => "ℹ️ ",
        EffectivenessLabel::LowEffectiveness => "🔻",
    };
    format!("{} {} Learning Video", icon, label)
}

fn score_counters(views: u64, likes: u64, comments: u64, sentiment: f64) -> anyhow::Result<()> {
    if !(-1.0..=1.0).contains(&sentiment) {
        anyhow::bail!("sentiment must be within [-1, 1], got {}", sentiment);
    }

    let meta = VideoMetadata::new("", views, likes, comments);
    let result = scoring::evaluate(&meta, sentiment);

    if scoring::is_low_data(&meta) {
        println!("Low-data floor applied (views < 500 or likes + comments < 20)");
    } else {
        println!("Engagement density: {:.4}", scoring::engagement_density(&meta));
        println!("Sentiment factor:   {:.2}", scoring::sentiment_factor(sentiment));
    }
    println!("Final Score: {:.2}", result.score);
    println!("{}", banner(result.label));

    Ok(())
}

fn show_sentiment(texts: &[String]) -> anyhow::Result<()> {
    let scorer = Arc::new(LexiconScorer::new());

    for text in texts {
        let p = scorer.polarity(text)?;
        println!("{:>7.3}  {:<8}  {}", p, LexiconScorer::label(p), text);
    }

    let mean = SentimentAggregator::new(scorer).compute_sentiment(texts)?;
    println!("\nAverage Sentiment Score: {:.3}", mean);

    Ok(())
}
