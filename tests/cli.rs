//! CLI argument parsing and validation tests — no network I/O.
//!
//! These tests verify that invalid arguments are rejected before any cassette
//! or live adapter is consulted.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("styleshot");
    cmd.env("STYLESHOT_CONFIG", "/nonexistent/styleshot/config.toml")
        .env_remove("STYLESHOT_REPLAY")
        .env_remove("STYLESHOT_REC")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY");
    cmd
}

#[test]
fn missing_both_images_exits_with_error() {
    cmd().assert().failure().stderr(predicate::str::contains(
        "Both a model image and a product image are required.",
    ));
}

#[test]
fn missing_product_image_exits_with_error() {
    cmd()
        .args(["--model-image", "face.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Both a model image and a product image are required."));
}

#[test]
fn non_image_input_exits_with_error() {
    cmd()
        .args(["--model-image", "face.jpg", "--product-image", "brief.docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not an image file"));
}

#[test]
fn invalid_model_exits_with_error() {
    cmd()
        .args(["--model-image", "face.jpg", "--product-image", "bag.png", "--model", "dall-e-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported model"));
}

#[test]
fn invalid_aspect_ratio_exits_with_error() {
    cmd()
        .args(["--model-image", "face.jpg", "--product-image", "bag.png", "-a", "100:200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported aspect ratio"));
}

#[test]
fn blank_style_exits_with_error() {
    cmd()
        .args(["--model-image", "face.jpg", "--product-image", "bag.png", "--style", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("style #1 is blank"));
}

#[test]
fn missing_api_key_exits_with_error() {
    cmd()
        .args(["--model-image", "face.jpg", "--product-image", "bag.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key for Gemini"));
}
