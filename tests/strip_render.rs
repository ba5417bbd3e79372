use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

use qrstrip::{LinkEntry, QrDecoder, StripConfig, StripGenerator};

const STUDY_NOTES_URL: &str = "https://567-labs.github.io/systematically-improving-rag/";
const TALKS_URL: &str = "https://567-labs.github.io/systematically-improving-rag/talks/";
const SLACK_URL: &str =
    "https://join.slack.com/t/improvingrag/shared_invite/zt-3dkinqb3q-vknvaBLoTx5tBj4PpGOVjw";

fn three_link_config(dir: &TempDir) -> StripConfig {
    let mut config = StripConfig {
        links: vec![
            LinkEntry::new("Study Notes", STUDY_NOTES_URL),
            LinkEntry::new("Talks", TALKS_URL),
            LinkEntry::new("Slack", SLACK_URL),
        ],
        ..StripConfig::default()
    };
    config.output.image = dir.path().join("images").join("codes.jpeg");
    config
}

#[test]
fn composite_matches_layout_arithmetic() {
    let dir = TempDir::new().expect("tempdir");
    let generator = StripGenerator::new(three_link_config(&dir)).expect("generator");
    let artifacts = generator.run().expect("run");

    // size=400, padding=20, text_height=60 => tiles of 440x480,
    // three of them plus outer padding => 1360x480.
    let strip = image::open(&artifacts.image).expect("open strip");
    assert_eq!(strip.width(), 3 * 440 + 40);
    assert_eq!(strip.height(), 480);
}

#[test]
fn every_tile_decodes_to_its_url() {
    let dir = TempDir::new().expect("tempdir");
    let generator = StripGenerator::new(three_link_config(&dir)).expect("generator");
    let artifacts = generator.run().expect("run");

    generator
        .verify_written(&artifacts)
        .expect("decode-back verification");

    // Spot-check the middle tile by hand as well.
    let strip = image::open(&artifacts.image).expect("open strip");
    let middle = strip.crop_imm(20 + 440, 0, 440, 440);
    let decoded = QrDecoder::new().decode(&middle).expect("decode middle tile");
    assert_eq!(decoded, TALKS_URL);
}

#[test]
fn manifest_records_links_in_order_and_output_path() {
    let dir = TempDir::new().expect("tempdir");
    let config = three_link_config(&dir);
    let expected_output = config.output.image.display().to_string();
    let generator = StripGenerator::new(config).expect("generator");
    let artifacts = generator.run().expect("run");

    let raw = fs::read_to_string(&artifacts.manifest).expect("read manifest");
    let value: Value = serde_json::from_str(&raw).expect("parse manifest");

    let links = value["links"].as_object().expect("links object");
    let keys: Vec<&String> = links.keys().collect();
    assert_eq!(keys, ["Study Notes", "Talks", "Slack"]);
    assert_eq!(links["Study Notes"], STUDY_NOTES_URL);
    assert_eq!(links["Talks"], TALKS_URL);
    assert_eq!(links["Slack"], SLACK_URL);

    let settings = &value["qr_code_settings"];
    assert_eq!(settings["size"], 400);
    assert_eq!(settings["padding"], 20);
    assert_eq!(settings["text_height"], 60);
    assert_eq!(settings["error_correction"], "HIGH");

    assert_eq!(value["output"], expected_output.as_str());
}

#[test]
fn manifest_is_byte_identical_across_runs() {
    let dir = TempDir::new().expect("tempdir");
    let generator = StripGenerator::new(three_link_config(&dir)).expect("generator");

    let first = generator.run().expect("first run");
    let first_bytes = fs::read(&first.manifest).expect("read first manifest");

    let second = generator.run().expect("second run");
    let second_bytes = fs::read(&second.manifest).expect("read second manifest");

    assert_eq!(first.manifest, second.manifest);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn missing_preferred_font_still_completes() {
    let dir = TempDir::new().expect("tempdir");
    let mut config = three_link_config(&dir);
    config.font.path = Some(PathBuf::from("/nonexistent/preferred-font.ttf"));

    let generator = StripGenerator::new(config).expect("generator");
    let artifacts = generator.run().expect("run with fallback font");

    assert!(artifacts.image.exists());
    generator
        .verify_written(&artifacts)
        .expect("strip rendered with fallback font must still decode");
}

#[test]
fn output_directories_are_created_and_files_overwritten() {
    let dir = TempDir::new().expect("tempdir");
    let mut config = three_link_config(&dir);
    config.output.image = dir.path().join("deeply/nested/out/codes.jpeg");

    let generator = StripGenerator::new(config).expect("generator");
    let artifacts = generator.run().expect("first run");
    assert!(artifacts.image.exists());
    assert!(artifacts.manifest.exists());

    // Second run overwrites in place without error.
    let again = generator.run().expect("second run");
    assert_eq!(again.image, artifacts.image);
}

#[test]
fn single_link_strip_has_single_tile_width() {
    let dir = TempDir::new().expect("tempdir");
    let mut config = three_link_config(&dir);
    config.links = vec![LinkEntry::new("Only", "https://example.com/only")];

    let generator = StripGenerator::new(config).expect("generator");
    let artifacts = generator.run().expect("run");

    let strip = image::open(&artifacts.image).expect("open strip");
    assert_eq!(strip.width(), 440 + 40);
    assert_eq!(strip.height(), 480);
}
