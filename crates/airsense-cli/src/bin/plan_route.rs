use airsense_cli::client::decode_ranking;
use airsense_cli::report::format_ranking;
use airsense_cli::{AirSenseClient, PlanSafeRouteRequest};
use airsense_core::HealthProfile;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank route alternatives by air-quality exposure", long_about = None)]
struct Args {
    /// AirSense server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    #[arg(long, allow_hyphen_values = true)]
    start_lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    start_lon: f64,

    #[arg(long, allow_hyphen_values = true)]
    end_lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    end_lon: f64,

    /// Forecast horizon: now, 6h, 12h or 24h
    #[arg(long, default_value = "6h")]
    horizon: String,

    #[arg(long)]
    asthma: bool,

    #[arg(long)]
    child: bool,

    #[arg(long)]
    elderly: bool,

    /// Print the raw server reply instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = AirSenseClient::new(args.url);

    let request = PlanSafeRouteRequest {
        start_lat: args.start_lat,
        start_lon: args.start_lon,
        end_lat: args.end_lat,
        end_lon: args.end_lon,
        horizon: args.horizon,
        health_profile: HealthProfile {
            asthma: args.asthma,
            child: args.child,
            elderly: args.elderly,
        },
    };

    let body = client.plan_safe_route_raw(&request).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let ranked = decode_ranking(body)?;
    println!(
        "Routes from {:.4}, {:.4} to {:.4}, {:.4} (horizon {}):",
        request.start_lat, request.start_lon, request.end_lat, request.end_lon, request.horizon
    );
    print!("{}", format_ranking(&ranked));
    Ok(())
}
