//! Console, JSON and HTML rendering of a finished check.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::NaiveDateTime;
use photo_policy::{LegalRef, PhotoContext, PolicyDecision, Sensitivity};
use serde::Serialize;
use tracing::warn;

/// Everything shown to the user about one photo.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub context: &'a PhotoContext,
    pub result: &'a PolicyDecision,
    pub sensitivity: Sensitivity,
    pub legal_refs: Vec<&'a LegalRef>,
}

/// Plain-text summary printed after the questions.
pub fn render_console(report: &CheckReport<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Ergebnis:");
    let _ = writeln!(out, "{}", report.result.message);
    let _ = writeln!(
        out,
        "Sensibilität: {} – {}",
        report.sensitivity.tier, report.sensitivity.message
    );

    let _ = writeln!(out, "\nBegründung:");
    for reason in &report.result.reasons {
        let _ = writeln!(out, " - {reason}");
    }

    if report
        .result
        .legal_ref_keys
        .as_ref()
        .is_some_and(|keys| !keys.is_empty())
    {
        let _ = writeln!(out, "\nRechtsgrundlagen/Hinweise:");
        for legal in &report.legal_refs {
            let _ = writeln!(out, " - {}: {}", legal.label, legal.url);
        }
    }
    out
}

/// Standalone HTML page for archiving or sharing the result.
pub fn render_html(
    report: &CheckReport<'_>,
    logo_uri: Option<&str>,
    generated_at: NaiveDateTime,
) -> String {
    let ctx = report.context;
    let result = report.result;

    let logo_html = logo_uri
        .map(|uri| {
            format!(
                r#"<img src="{}" alt="Logo" style="height:40px;vertical-align:middle;">"#,
                escape_html(uri)
            )
        })
        .unwrap_or_default();

    let rule_info = result
        .rule_id
        .as_deref()
        .map(|id| format!("<p><b>Regel-ID:</b> {}</p>", escape_html(id)))
        .unwrap_or_default();

    let reasons_html = result
        .reasons
        .iter()
        .map(|r| format!("    <li>{}</li>", escape_html(r)))
        .collect::<Vec<_>>()
        .join("\n");

    let legal_html = if report.legal_refs.is_empty() {
        "<p class='muted'>Keine Links hinterlegt.</p>".to_string()
    } else {
        let items = report
            .legal_refs
            .iter()
            .map(|r| {
                format!(
                    r#"<li><a href="{}" target="_blank" rel="noopener">{}</a></li>"#,
                    escape_html(&r.url),
                    escape_html(&r.label)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<ul>{items}</ul>")
    };

    let ja_nein = |flag: bool| if flag { "Ja" } else { "Nein" };
    let ctx_table = format!(
        r#"<table>
      <tr><th>Minderjährige</th><td>{}</td></tr>
      <tr><th>Erkennbar</th><td>{}</td></tr>
      <tr><th>Gruppenfoto</th><td>{}</td></tr>
      <tr><th>Hervorgehoben</th><td>{}</td></tr>
      <tr><th>Kanal</th><td>{}</td></tr>
      <tr><th>Einwilligung</th><td>{}</td></tr>
      <tr><th>Sensibilität</th><td>{} – {}</td></tr>
    </table>"#,
        ja_nein(ctx.minors),
        ja_nein(ctx.identifiable),
        ja_nein(ctx.group_photo),
        ja_nein(ctx.prominent_subject),
        escape_html(ctx.channel.as_str()),
        escape_html(ctx.consent_status.as_str()),
        report.sensitivity.tier,
        escape_html(report.sensitivity.message),
    );

    let created = generated_at.format("%Y-%m-%d %H:%M");

    format!(
        r#"<!doctype html>
<html lang="de">
<head>
<meta charset="utf-8">
<title>Foto-Check Report</title>
<style>
  body {{ font-family: Arial, sans-serif; margin: 24px; }}
  h1 {{ margin-top: 0; }}
  .header {{ display:flex; align-items:center; gap:16px; }}
  table {{ border-collapse: collapse; width: 100%; margin: 16px 0; }}
  th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
  th {{ background: #f5f5f5; width: 200px; }}
  .box {{ border: 1px solid #ddd; padding: 12px; border-radius: 8px; }}
  .decision {{ font-size: 18px; font-weight: bold; }}
  .muted {{ color:#666; font-size: 12px; }}
</style>
</head>
<body>
  <div class="header">
    {logo_html}
    <div>
      <h1>Foto-Check Report</h1>
      <div class="muted">Erstellt: {created}</div>
    </div>
  </div>

  <div class="box">
    <div class="decision">{message}</div>
    {rule_info}
    {ctx_table}
  </div>

  <h2>Begründungen</h2>
  <ul>
{reasons_html}
  </ul>

  <h2>Rechtsgrundlagen / Hinweise</h2>
  {legal_html}

  <hr>
  <p class="muted">
    Hinweis: Dieses Tool ersetzt keine Rechtsberatung.
    Im Zweifel Datenschutzbeauftragte/r oder Rechtsberatung einbeziehen.
  </p>
</body>
</html>
"#,
        message = escape_html(&result.message),
    )
}

/// Write `html` as `report_<YYYY-MM-DD_HH-MM>.html` into `dir`.
pub fn write_report(dir: &Path, html: &str, generated_at: NaiveDateTime) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create report directory: {}", dir.display()))?;

    let filename = format!("report_{}.html", generated_at.format("%Y-%m-%d_%H-%M"));
    let path = dir.join(filename);
    std::fs::write(&path, html)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    Ok(path)
}

/// Read the logo and encode it as a `data:` URI.
///
/// `logo_path` is resolved against `base_dir` (the policy file's directory).
/// A missing or unreadable logo yields `None`; the report is still written.
pub fn load_logo_data_uri(base_dir: &Path, logo_path: Option<&Path>) -> Option<String> {
    let path = base_dir.join(logo_path?);
    if !path.exists() {
        warn!(path = %path.display(), "logo file not found; report without logo");
        return None;
    }

    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read logo; report without logo");
            return None;
        }
    };

    Some(format!(
        "data:{};base64,{}",
        mime_for(&path),
        BASE64.encode(data)
    ))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

/// Escape text for use in HTML element content and quoted attributes.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
