//! Integration tests for the region mapping generate/extend workflow.

use std::fs;

use tempfile::TempDir;

use co2tidy::{Continent, GenerateOptions, RegionMap, RegionMapGenerator, TidyError};

/// Options with every file inside `dir` and `content` as the input dataset.
fn setup(dir: &TempDir, content: &str) -> GenerateOptions {
    let input = dir.path().join("co2_tidy.csv");
    fs::write(&input, content).unwrap();

    GenerateOptions {
        input,
        iso3_column: "country".to_string(),
        out_json: dir.path().join("mappings/region_fallback.json"),
        out_unmapped: dir.path().join("mappings/region_unmapped.csv"),
        out_preview: dir.path().join("mappings/region_mapped_preview.csv"),
    }
}

const DATASET: &str = "country,year,emissions\n\
                       KOR,2020,1\n\
                       XKX,2020,2\n\
                       kor,2021,1\n\
                       ZZZ,2020,3\n\
                       XKX,2021,2\n\
                       ,2020,1\n";

#[test]
fn test_first_run_reports_unmapped_codes() {
    let dir = TempDir::new().unwrap();
    let options = setup(&dir, DATASET);

    let report = RegionMapGenerator::new(options.clone()).run().expect("Generate failed");

    assert_eq!(report.total_rows, 6);
    assert_eq!(report.unique_codes, 3);
    assert_eq!(report.mapping.mapped, 2);
    assert_eq!(report.mapping.unmapped, 4);
    assert_eq!(report.unmapped.len(), 2);
    assert_eq!(report.unmapped[0].code, "XKX");
    assert_eq!(report.unmapped[0].count, 2);
    assert_eq!(report.unmapped[1].code, "ZZZ");
    assert!(report.merge_skipped.is_none());

    assert_eq!(
        fs::read_to_string(&options.out_unmapped).unwrap(),
        "ISO3,count,region\nXKX,2,\nZZZ,1,\n"
    );

    let preview = fs::read_to_string(&options.out_preview).unwrap();
    let mut lines = preview.lines();
    assert_eq!(lines.next(), Some("country,region_mapped"));
    assert_eq!(lines.next(), Some("KOR,Asia"));
    assert_eq!(lines.next(), Some("XKX,"));
    assert_eq!(report.preview_rows, 6);

    let saved = RegionMap::load(&options.out_json).unwrap();
    assert_eq!(saved, RegionMap::seed());
    assert_eq!(report.map_size, saved.len());
}

#[test]
fn test_corrections_are_merged_on_next_run() {
    let dir = TempDir::new().unwrap();
    let options = setup(&dir, DATASET);
    let generator = RegionMapGenerator::new(options.clone());

    generator.run().unwrap();
    fs::write(
        &options.out_unmapped,
        "ISO3,count,region\nXKX,2,Europe\nZZZ,1,Atlantis\nQQQ,1,\n",
    )
    .unwrap();

    let second = generator.run().unwrap();
    assert_eq!(second.corrections_merged, 1);
    assert_eq!(second.corrections_rejected, 1);

    let saved = RegionMap::load(&options.out_json).unwrap();
    assert_eq!(saved.get("XKX"), Some(Continent::Europe));
    assert_eq!(saved.get("ZZZ"), None);
    assert_eq!(saved.get("QQQ"), None);
    assert_eq!(saved.len(), RegionMap::seed().len() + 1);

    let third = generator.run().unwrap();
    assert_eq!(third.mapping.mapped, 4);
    assert_eq!(third.unmapped.len(), 1);
    assert_eq!(third.unmapped[0].code, "ZZZ");
}

#[test]
fn test_persisted_entries_override_seed() {
    let dir = TempDir::new().unwrap();
    let options = setup(&dir, "country\nTUR\n");

    let persisted: RegionMap = [("TUR".to_string(), Continent::Europe)].into_iter().collect();
    persisted.save(&options.out_json).unwrap();

    let report = RegionMapGenerator::new(options.clone()).run().unwrap();
    assert_eq!(report.mapping.mapped, 1);

    let saved = RegionMap::load(&options.out_json).unwrap();
    assert_eq!(saved.get("TUR"), Some(Continent::Europe));
}

#[test]
fn test_malformed_report_skips_merge() {
    let dir = TempDir::new().unwrap();
    let options = setup(&dir, DATASET);
    fs::create_dir_all(options.out_unmapped.parent().unwrap()).unwrap();
    fs::write(&options.out_unmapped, "code,continent\nXKX,Europe\n").unwrap();

    let report = RegionMapGenerator::new(options.clone()).run().unwrap();

    assert!(report.merge_skipped.is_some());
    assert_eq!(report.corrections_merged, 0);
    assert!(options.out_json.exists());
    assert_eq!(RegionMap::load(&options.out_json).unwrap().get("XKX"), None);
}

#[test]
fn test_missing_code_column_is_an_error() {
    let dir = TempDir::new().unwrap();
    let options = GenerateOptions {
        iso3_column: "iso3".to_string(),
        ..setup(&dir, DATASET)
    };

    let err = RegionMapGenerator::new(options.clone()).run().unwrap_err();
    assert!(matches!(err, TidyError::MissingColumn { .. }));
    assert!(!options.out_json.exists());
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let options = GenerateOptions {
        input: dir.path().join("absent.csv"),
        ..setup(&dir, DATASET)
    };

    let err = RegionMapGenerator::new(options).run().unwrap_err();
    assert!(matches!(err, TidyError::InputNotFound(_)));
}
