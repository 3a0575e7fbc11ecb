//! Results dashboard.

use contentflow_core::{ContentResult, Platform};

use super::{BOLD, CYAN, DIM, RESET, header, kv_line, success, warning};

/// Print the full results view for `result`.
pub fn print_results(result: &ContentResult) {
    println!();
    if result.is_demo() {
        warning("Content API unreachable, showing demo content");
        println!();
    }

    header("📊", &format!("Results: {}", result.topic));
    kv_line("Processing time", &format!("{}s", result.processing_time));
    kv_line("Quality score", &format!("{}/10", result.quality_score));
    kv_line("Word count", &result.word_count.to_string());
    kv_line("Platforms", &result.platform_count.to_string());
    kv_line("Content type", result.content_type.label());
    kv_line("Audience", result.target_audience.label());
    kv_line("Tone", result.tone.label());
    kv_line("Channels", &channel_labels(&result.platforms));
    if !result.keywords.is_empty() {
        kv_line("Keywords", &result.keywords.join(", "));
    }
    kv_line("Created", &result.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    println!();
    header("📝", "Content Preview");
    for line in result.sample_content.lines() {
        println!("  {line}");
    }

    println!();
    header("🔍", "SEO");
    kv_line("Meta title", &result.meta_title);
    kv_line("Meta description", &result.meta_description);
    for density in &result.keyword_density {
        kv_line(&density.keyword, &format!("{}%", density.density));
    }

    if !result.platform_versions.is_empty() {
        println!();
        header("📱", "Platform Versions");
        for version in &result.platform_versions {
            println!("  {BOLD}{CYAN}{}{RESET}", version.platform);
            for line in version.content.lines().take(6) {
                println!("    {DIM}{line}{RESET}");
            }
            println!();
        }
    }

    println!();
    header("✅", "Quality Checks");
    for check in &result.quality_checks {
        success(check);
    }

    println!();
    header("💡", "Recommendations");
    for rec in &result.recommendations {
        println!("  • {rec}");
    }
}

fn channel_labels(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ")
}
