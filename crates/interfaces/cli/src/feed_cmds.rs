use std::io::Write;

use anyhow::{Result, bail};

use takes_config::AppConfig;
use takes_trending::{Take, TrendingScorer};

pub(crate) fn run_score(
    out: &mut impl Write,
    scorer: &TrendingScorer,
    takes: &[Take],
) -> Result<()> {
    for take in takes {
        writeln!(out, "{:<24} {:>6}", take.label(), scorer.score(take))?;
    }
    Ok(())
}

pub(crate) fn run_rank(
    out: &mut impl Write,
    scorer: &TrendingScorer,
    takes: &[Take],
    limit: usize,
    json: bool,
) -> Result<()> {
    let ranked = scorer.top(takes, limit);

    if json {
        serde_json::to_writer_pretty(&mut *out, &ranked)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "── trending ({} of {}) ─────────────────────────────",
        ranked.len(),
        takes.len()
    )?;
    for (pos, item) in ranked.iter().enumerate() {
        let author = item.take.author.as_deref().unwrap_or("anonymous");
        writeln!(
            out,
            "  {:>3}. {:>6}  {:<20} {author}",
            pos + 1,
            item.trending_score,
            item.take.label(),
        )?;
        if let Some(content) = item.take.content.as_deref() {
            writeln!(out, "         {}", truncate_str(content, 72))?;
        }
    }
    Ok(())
}

pub(crate) fn run_explain(
    out: &mut impl Write,
    scorer: &TrendingScorer,
    takes: &[Take],
    id: Option<&str>,
) -> Result<()> {
    let selected: Vec<&Take> = match id {
        Some(id) => takes.iter().filter(|t| t.id.as_deref() == Some(id)).collect(),
        None => takes.iter().collect(),
    };
    if let Some(id) = id {
        if selected.is_empty() {
            bail!("no take with id '{id}' in feed");
        }
    }

    for take in selected {
        writeln!(out, "── {} ─────────────────────────────────────", take.label())?;
        writeln!(out, "{}", scorer.breakdown(take))?;
    }
    Ok(())
}

pub(crate) fn run_show_config(out: &mut impl Write, config: &AppConfig) -> Result<()> {
    write!(out, "{}", toml::to_string_pretty(config)?)?;
    Ok(())
}

fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
