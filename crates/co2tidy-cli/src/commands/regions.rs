//! Regions command - build or extend the ISO3 to continent mapping.

use colored::Colorize;
use co2tidy::{Continent, GenerateOptions, RegionMapGenerator};

pub fn run(options: GenerateOptions, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !json_output {
        println!(
            "{} {}",
            "Checking codes in".cyan().bold(),
            options.input.display().to_string().white()
        );
    }

    let generator = RegionMapGenerator::new(options);
    let report = generator.run()?;
    let options = generator.options();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} rows, {} unique codes",
        report.total_rows.to_string().white().bold(),
        report.unique_codes.to_string().white().bold()
    );
    println!(
        "Mapped {} rows, unmapped {} ({:.1}% match)",
        report.mapping.mapped.to_string().green(),
        report.mapping.unmapped.to_string().yellow(),
        report.mapping.match_rate() * 100.0
    );

    if report.corrections_merged > 0 {
        println!(
            "Merged {} corrections from {}",
            report.corrections_merged.to_string().green().bold(),
            options.out_unmapped.display()
        );
    }
    if report.corrections_rejected > 0 {
        println!(
            "{} {} corrections had an invalid region and were ignored",
            "Warning:".yellow().bold(),
            report.corrections_rejected
        );
    }
    if let Some(reason) = &report.merge_skipped {
        println!("{} {}", "Warning:".yellow().bold(), reason);
    }

    println!();
    println!(
        "{} {} ({} entries)",
        "Saved mapping to".green().bold(),
        options.out_json.display().to_string().white(),
        report.map_size
    );
    println!(
        "Preview: {} ({} rows)",
        options.out_preview.display(),
        report.preview_rows
    );

    if report.unmapped.is_empty() {
        println!("{}", "All codes mapped.".green());
    } else {
        println!();
        println!("{}", "Most frequent unmapped codes:".yellow().bold());
        for code in report.unmapped.iter().take(10) {
            println!("  {:8} {}", code.code, code.count);
        }
        let labels: Vec<&str> = Continent::ALL.iter().map(|c| c.label()).collect();
        println!();
        println!(
            "Fill the region column of {} with one of: {}",
            options.out_unmapped.display().to_string().cyan(),
            labels.join(", ")
        );
        println!("then run this command again to merge the corrections.");
    }

    Ok(())
}
