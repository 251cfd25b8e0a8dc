//! Print the shareable summary for one day
//!
//! Usage: day_summary <YYYY-MM-DD> [--24h] [--unit oz|ml]

use feedme::config::Config;
use feedme::db::Database;
use feedme::models::{Feeding, Preferences};
use feedme::tools::days::{day_summary, resolve_unit};

fn usage() -> ! {
    eprintln!("Usage: day_summary <YYYY-MM-DD> [--24h] [--unit oz|ml]");
    std::process::exit(2);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut date = None;
    let mut use_24_hour_clock = false;
    let mut unit = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--24h" => use_24_hour_clock = true,
            "--unit" => unit = Some(args.next().unwrap_or_else(|| usage())),
            "-h" | "--help" => usage(),
            _ if date.is_none() => date = Some(arg.clone()),
            _ => usage(),
        }
    }
    let date = date.unwrap_or_else(|| usage());

    let config = Config::from_env();
    let database = Database::open_migrated(&config.database_path)?;

    let (records, preferences) = database.with_conn(|conn| Ok((Feeding::list(conn)?, Preferences::get(conn)?)))?;
    let unit = resolve_unit(unit.as_deref(), &preferences)?;
    let response = day_summary(&records, &date, use_24_hour_clock, unit)?;

    println!("{}", response.summary);
    Ok(())
}
