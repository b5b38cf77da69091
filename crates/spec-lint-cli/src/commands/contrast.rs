//! Contrast command implementation.

use anyhow::{Context, Result};
use spec_lint_core::contrast::{self, ContrastResult, Rgb};

/// Runs the contrast command.
pub fn run(foreground: &str, background: &str, font_size: f64, font_weight: f64) -> Result<()> {
    let result = analyze(foreground, background, font_size, font_weight)?;

    println!(
        "{} on {}: {}:1 ({})",
        result.foreground,
        result.background,
        result.ratio,
        result.grade()
    );
    let mark = |ok: bool| if ok { "\x1b[32mpass\x1b[0m" } else { "\x1b[31mfail\x1b[0m" };
    println!("  AA normal  {}", mark(result.passes.aa));
    println!("  AA large   {}", mark(result.passes.aa_large));
    println!("  AAA normal {}", mark(result.passes.aaa));
    println!("  AAA large  {}", mark(result.passes.aaa_large));

    for hint in contrast::suggestions(&result, result.large_text) {
        println!("  = help: {hint}");
    }

    Ok(())
}

fn analyze(
    foreground: &str,
    background: &str,
    font_size: f64,
    font_weight: f64,
) -> Result<ContrastResult> {
    let ratio = contrast::quick_contrast_check(foreground, background)
        .context("Failed to compute contrast")?;
    let foreground = Rgb::from_hex(foreground).context("invalid foreground")?;
    let background = Rgb::from_hex(background).context("invalid background")?;

    Ok(ContrastResult {
        ratio: (ratio * 100.0).round() / 100.0,
        passes: contrast::classify(ratio),
        foreground,
        background,
        large_text: contrast::is_large_text(font_size, font_weight),
    })
}
