use osm_power_extract::data::types::Category;
use osm_power_extract::extract_from_path;
use std::env;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <extract.osm.pbf>", args[0]);
        eprintln!("  Scans the extract for wind generators and solar plants.");
        std::process::exit(1);
    }

    let pbf_path = &args[1];
    if !Path::new(pbf_path).exists() {
        eprintln!("Error: PBF file not found: {}", pbf_path);
        std::process::exit(1);
    }

    log::info!("Extracting renewable infrastructure from: {}", pbf_path);
    let records = extract_from_path(pbf_path)?;

    let wind = records
        .iter()
        .filter(|r| r.category == Category::WindGenerator)
        .count();
    let solar = records.len() - wind;
    log::info!(
        "Found {} records: {} wind generators, {} solar plants",
        records.len(),
        wind,
        solar
    );

    for record in records.iter().take(10) {
        log::info!(
            "  {} {}/{} name={} source={}",
            record.category,
            record.source_kind,
            record.source_id,
            record.name().unwrap_or("-"),
            record.source_tag().unwrap_or("-")
        );
    }

    Ok(())
}
