use clap::{Parser, Subcommand};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::fs;

const TOKEN_FILE: &str = ".carenest_token";

#[derive(Parser)]
#[command(name = "carenest-cli")]
#[command(about = "CLI client for the CareNest API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// List your babies.
    Babies,
    AddBaby {
        #[arg(short, long)]
        name: String,
        /// YYYY-MM-DD
        #[arg(short, long)]
        date_of_birth: String,
        #[arg(short, long, default_value = "other")]
        gender: String,
    },
    LogFeeding {
        #[arg(short, long)]
        baby: String,
        /// breast, formula, solid or water
        #[arg(short, long)]
        kind: String,
        #[arg(short, long)]
        quantity: Option<f64>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    LogSleep {
        #[arg(short, long)]
        baby: String,
        /// RFC 3339 timestamp
        #[arg(short, long)]
        start: String,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short, long)]
        quality: Option<String>,
    },
    /// Today's feeding and sleep summary for a baby.
    Summary {
        #[arg(short, long)]
        baby: String,
    },
    Logout,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
}

fn token() -> String {
    fs::read_to_string(TOKEN_FILE).unwrap_or_default()
}

async fn save_token(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if res.status().is_success() {
        let body: AuthResponse = res.json().await?;
        fs::write(TOKEN_FILE, body.token)?;
        println!("Logged in. Token saved to {}", TOKEN_FILE);
    } else {
        println!("Failed: {}", res.text().await?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::Signup { name, email, password } => {
            let res = client.post(format!("{}/api/auth/signup", cli.url))
                .json(&json!({ "name": name, "email": email, "password": password }))
                .send()
                .await?;
            save_token(res).await?;
        }
        Commands::Login { email, password } => {
            let res = client.post(format!("{}/api/auth/login", cli.url))
                .json(&json!({ "email": email, "password": password }))
                .send()
                .await?;
            save_token(res).await?;
        }
        Commands::Babies => {
            let res = client.get(format!("{}/api/baby", cli.url))
                .header("Authorization", format!("Bearer {}", token()))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::AddBaby { name, date_of_birth, gender } => {
            let res = client.post(format!("{}/api/baby", cli.url))
                .header("Authorization", format!("Bearer {}", token()))
                .json(&json!({
                    "name": name,
                    "date_of_birth": date_of_birth,
                    "gender": gender,
                }))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::LogFeeding { baby, kind, quantity, notes } => {
            let res = client.post(format!("{}/api/tracking/feeding", cli.url))
                .header("Authorization", format!("Bearer {}", token()))
                .json(&json!({
                    "baby": baby,
                    "kind": kind,
                    "quantity": quantity,
                    "notes": notes,
                }))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::LogSleep { baby, start, end, quality } => {
            let res = client.post(format!("{}/api/tracking/sleep", cli.url))
                .header("Authorization", format!("Bearer {}", token()))
                .json(&json!({
                    "baby": baby,
                    "start_time": start,
                    "end_time": end,
                    "quality": quality,
                }))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::Summary { baby } => {
            let res = client.get(format!("{}/api/tracking/summary/{}", cli.url, baby))
                .header("Authorization", format!("Bearer {}", token()))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::Logout => {
            let _ = fs::remove_file(TOKEN_FILE);
            println!("Logged out (token removed).");
        }
    }

    Ok(())
}
