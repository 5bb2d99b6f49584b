//! CLI `inspect` command: display all scores for a single article.

use anyhow::{bail, Result};

use seithi::config::SeithiConfig;

/// Inspect a single article by ID and display its scores.
pub fn inspect(config: &SeithiConfig, id: &str) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = seithi::db::open_database(&db_path)?;

    let Some(a) = seithi::articles::query::get_article(&conn, id)? else {
        bail!("article not found: {id}");
    };

    println!("Article: {}", a.id);
    println!("{}", "=".repeat(50));
    println!("  Title:          {}", a.title);
    println!("  URL:            {}", a.url);
    println!("  Domain:         {}", a.domain);
    println!(
        "  Published:      {}",
        a.published_at.as_deref().unwrap_or("(unknown)")
    );
    println!();

    let s = &a.scores;
    println!(
        "  Epistemic:      opinion {:.3}  mixed {:.3}  facts {:.3}",
        s.epistemic_opinion_score, s.epistemic_mixed_score, s.epistemic_facts_score
    );
    println!(
        "  Emotive:        triggering {:.3}  mixed {:.3}  calm {:.3}",
        s.emotive_triggering_score, s.emotive_mixed_score, s.emotive_calm_score
    );
    println!(
        "  Density:        fluff {:.3}  standard {:.3}  deep {:.3}",
        s.density_fluff_score, s.density_standard_score, s.density_deep_score
    );

    Ok(())
}
