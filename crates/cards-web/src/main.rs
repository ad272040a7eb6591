/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Coincard contributors
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::time::Duration;
use tracing::info;

mod routes;

use cards_core::{Config, DEFAULT_LIMIT, TTL_BADGE_SECS};
use cards_providers::MetricService;
use cards_render::text_table;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "coincard")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Run the HTTP server
  Serve {
    /// Address to bind, overriding CARDS_BIND_ADDR
    #[arg(long)]
    bind: Option<String>,
  },
  /// Fetch one coin or category and print it as a text table
  Fetch {
    /// Coin id, e.g. "bitcoin"
    id: String,

    /// Treat the id as a category and list its coins
    #[arg(long)]
    category: bool,

    /// Number of rows for category listings
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,
  },
}

#[actix_web::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  // Initialize logging
  let log_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt().with_env_filter(log_level).init();

  // Load configuration
  let config = Config::from_env()?;
  let service = MetricService::from_config(&config)?;

  match cli.command {
    Commands::Serve { bind } => {
      let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
      info!("Serving coincard on {}", addr);

      let data = web::Data::new(service);
      HttpServer::new(move || App::new().app_data(data.clone()).configure(routes::configure))
        .bind(&addr)?
        .run()
        .await?;
    }
    Commands::Fetch { id, category, limit } => {
      let ttl = Duration::from_secs(TTL_BADGE_SECS);
      let result = if category {
        service.category(&id, limit, ttl).await
      } else {
        service.coin(&id, ttl).await
      };

      match result {
        Ok(result) => {
          info!("Data served by {}", result.provider);
          print!("{}", text_table(&result.metrics));
        }
        Err(e) => {
          eprintln!("data unavailable: {}", e);
          std::process::exit(1);
        }
      }
    }
  }

  Ok(())
}
