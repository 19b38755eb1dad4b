use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use windsite::assessment::{AssessmentOutcome, AssessmentService};
use windsite::presentation::{ReportView, WindRoseView, decorated_rating};
use windsite::{Coordinates, OpenMeteoSource, WindSiteConfig, export, telemetry};

#[derive(Parser)]
#[command(name = "windsite", version, about = "Wind energy site suitability assessment")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = "WINDSITE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API and static frontend
    Serve {
        /// Port to listen on, overrides the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Assess a single site and print the report
    Assess {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: String,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: String,
        /// Also write the report as an HTML document
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List the example locations
    Examples,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = WindSiteConfig::load_from_path(cli.config.clone())?;
    telemetry::init(&config.logging, cli.verbose)?;

    match cli.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            windsite::web::run(&config, port).await
        }
        Command::Assess { lat, lon, export } => {
            assess(&config, &lat, &lon, export).await
        }
        Command::Examples => {
            for example in &config.examples {
                println!(
                    "{:<36} {:>9.4} {:>10.4}",
                    example.name, example.latitude, example.longitude
                );
            }
            Ok(())
        }
    }
}

async fn assess(
    config: &WindSiteConfig,
    lat: &str,
    lon: &str,
    export_path: Option<PathBuf>,
) -> Result<()> {
    let coordinates = Coordinates::parse(lat, lon)?;
    let source = OpenMeteoSource::new(&config.source)?;
    let service = AssessmentService::new(Arc::new(source));

    let report = match service.assess(coordinates).await {
        Ok(AssessmentOutcome::Current(report)) => report,
        Ok(AssessmentOutcome::Superseded { .. }) => {
            anyhow::bail!("Assessment was superseded by a newer request")
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    let view = ReportView::from(&report);
    println!("Site Assessment Report");
    println!("  Latitude:          {}", view.latitude);
    println!("  Longitude:         {}", view.longitude);
    println!("  Wind Speed:        {}", report.measurement.format_wind_speed());
    println!("  Elevation:         {}", report.measurement.format_elevation());
    println!("  Suitability Score: {}", view.score_display);
    println!("  Recommendation:    {}", decorated_rating(report.rating));
    if let Some(direction) = view.prevailing_direction {
        println!("  Prevailing Wind:   {direction}");
    }

    match &view.wind_rose {
        WindRoseView::Chart { labels, values, .. } => {
            println!("  Wind frequency (%):");
            for (label, value) in labels.iter().zip(values) {
                println!("    {label:<3} {value:>6.2}");
            }
        }
        WindRoseView::InsufficientData { message } => println!("  {message}"),
    }

    if let Some(path) = export_path {
        let document = export::render_html(&report).context("Failed to render report")?;
        tokio::fs::write(&path, document)
            .await
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
