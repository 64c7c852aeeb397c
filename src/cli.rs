// src/cli.rs
use std::env;
use std::path::PathBuf;

use crate::params::Params;
use crate::progress::ConsoleProgress;
use crate::runner;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut params = Params::new();
    parse_cli(&mut params)?;

    let mut progress = ConsoleProgress::new();
    let summary = runner::run(&params, Some(&mut progress))?;

    println!("Saved raw trades to {}", summary.raw_path.display());
    println!("Saved aggregated trades to {}", summary.aggregated_path.display());
    Ok(())
}

fn parse_cli(params: &mut Params) -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--base-url" => {
                let v = args.next().ok_or("Missing value for --base-url")?;
                params.base_url = v.trim_end_matches('/').to_string();
            }
            "--page-size" => {
                params.page_size = args.next().ok_or("Missing value for --page-size")?.parse()?;
            }
            "--max-pages" => {
                params.max_pages = args.next().ok_or("Missing value for --max-pages")?.parse()?;
            }
            "--list-page-size" => {
                params.list_page_size =
                    args.next().ok_or("Missing value for --list-page-size")?.parse()?;
            }
            "--list-max-pages" => {
                params.list_max_pages =
                    args.next().ok_or("Missing value for --list-max-pages")?.parse()?;
            }
            "--chamber" => {
                params.chamber = Some(args.next().ok_or("Missing value for --chamber")?);
            }
            "--politician-id" => {
                params
                    .politician_ids
                    .push(args.next().ok_or("Missing value for --politician-id")?);
            }
            "--owner-column" => {
                params.hints.owner = Some(args.next().ok_or("Missing value for --owner-column")?);
            }
            "--transaction-column" => {
                params.hints.transaction =
                    Some(args.next().ok_or("Missing value for --transaction-column")?);
            }
            "--raw-csv" => {
                params.raw_csv = PathBuf::from(args.next().ok_or("Missing value for --raw-csv")?);
            }
            "--aggregated-csv" => {
                params.aggregated_csv =
                    PathBuf::from(args.next().ok_or("Missing value for --aggregated-csv")?);
            }
            "--skip-ssl-verify" => params.verify_ssl = false,
            "--delay-ms" => {
                params.pause_ms = args.next().ok_or("Missing value for --delay-ms")?.parse()?;
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if params.max_pages == 0 {
        return Err("--max-pages must be at least 1".into());
    }
    if params.list_max_pages == 0 {
        return Err("--list-max-pages must be at least 1".into());
    }
    Ok(())
}
