//! HTML generation for the dashboard and overview pages.
//!
//! Pages are assembled from plain strings. Every piece of user text passes
//! through [`escape`] on its way in.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use recall_core::{
  availability::{Availability, Stats},
  concept::Concept,
  schedule::{INTERVAL_DAYS, STEADY_STATE_DAYS},
};

/// Everything a listing page needs, read once per request.
#[derive(Debug, Default)]
pub struct Listing {
  pub availability: Availability,
  pub stats:        Stats,
  /// Records skipped because they could not be decoded.
  pub malformed:    usize,
  /// Set when the store could not be read; the lists are then empty.
  pub problem:      Option<String>,
}

// ─── Escaping ────────────────────────────────────────────────────────────────

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}

// ─── Pages ───────────────────────────────────────────────────────────────────

/// `GET /` — stats, the add form and the concepts due now.
pub fn dashboard(listing: &Listing) -> String {
  let Stats { total, due, later } = listing.stats;
  let mut body = String::new();

  body.push_str(
    r#"<div class="header"><h1>📚 Student Revision To-Do</h1><p>Spaced Repetition Learning System</p></div>"#,
  );
  body.push_str(&diagnostics(listing));

  body.push_str(&format!(
    r#"<div class="intervals-info"><h4>📅 How it works:</h4><p>Concepts reappear for review after: <strong>{}</strong>, then every <strong>{STEADY_STATE_DAYS} days</strong> thereafter. This spaced repetition helps improve long-term retention!</p></div>"#,
    interval_list(),
  ));

  body.push_str(&format!(
    r#"<div class="stats">{}{}{}</div>"#,
    stat(total, "Total Concepts"),
    stat(due, "Due for Review"),
    stat(later, "Scheduled Later"),
  ));

  body.push_str(ADD_FORM);

  body.push_str(&format!(
    r#"<div class="container"><h2>📋 Concepts Due for Review ({due})</h2>"#
  ));
  if listing.availability.due.is_empty() {
    body.push_str(
      r#"<div class="no-tasks">🎉 No concepts due for review right now!<br>Add new concepts above or check back later.</div>"#,
    );
  }
  for concept in &listing.availability.due {
    body.push_str(&concept_item(
      concept,
      "",
      "",
      &format!(
        r#"<form action="/complete/{}" method="post" style="display: inline;"><button type="submit" class="btn btn-success">✅ Mark as Reviewed</button></form>"#,
        concept.id
      ),
    ));
  }
  body.push_str("</div>");

  body.push_str(
    r#"<div class="container"><h2>📊 All Concepts Status</h2><p><a href="/all" class="link">View all concepts and their schedules →</a></p></div>"#,
  );

  page("Student Revision To-Do", &body)
}

/// `GET /all` — every pending concept, due or scheduled.
pub fn overview(listing: &Listing) -> String {
  let Availability { due, scheduled } = &listing.availability;
  let mut body = String::new();

  body.push_str(r#"<div class="header"><h1>📚 All Concepts Overview</h1></div>"#);
  body.push_str(&diagnostics(listing));
  body.push_str(r#"<div class="container"><a href="/" class="back-link">← Back to Dashboard</a>"#);

  body.push_str(&format!("<h2>✅ Available for Review ({})</h2>", due.len()));
  if due.is_empty() {
    body.push_str(r#"<div class="no-tasks">No concepts are due for review right now.</div>"#);
  }
  for concept in due {
    body.push_str(&concept_item(
      concept,
      " available",
      r#" | <span class="next-review">Ready Now!</span>"#,
      &delete_button(concept),
    ));
  }

  body.push_str(&format!("<h2>⏰ Scheduled for Later ({})</h2>", scheduled.len()));
  if scheduled.is_empty() {
    body.push_str(r#"<div class="no-tasks">No concepts are scheduled for later review.</div>"#);
  }
  for item in scheduled {
    body.push_str(&concept_item(
      &item.concept,
      " scheduled",
      &format!(r#" | <span class="next-review">{}</span>"#, due_in(item.wait_days)),
      &delete_button(&item.concept),
    ));
  }
  body.push_str("</div>");

  page("All Concepts - Student Revision To-Do", &body)
}

/// A minimal page for requests that cannot be served.
pub fn error_page(status: StatusCode, message: &str) -> String {
  let reason = status.canonical_reason().unwrap_or("Error");
  let body = format!(
    r#"<div class="header"><h1>{} {}</h1></div><div class="container"><p>{}</p><a href="/" class="back-link">← Back to Dashboard</a></div>"#,
    status.as_u16(),
    escape(reason),
    escape(message),
  );
  page(reason, &body)
}

// ─── Fragments ───────────────────────────────────────────────────────────────

/// "Due in N day(s)".
pub fn due_in(days: u64) -> String {
  let plural = if days == 1 { "" } else { "s" };
  format!("Due in {days} day{plural}")
}

fn interval_list() -> String {
  let days: Vec<String> = INTERVAL_DAYS.iter().map(u32::to_string).collect();
  format!("{} days", days.join(", "))
}

fn stat(n: usize, label: &str) -> String {
  format!(
    r#"<div class="stat-item"><div class="stat-number">{n}</div><div class="stat-label">{label}</div></div>"#
  )
}

fn date(ts: DateTime<Utc>) -> String { ts.format("%Y-%m-%d").to_string() }

fn concept_item(concept: &Concept, class: &str, status: &str, actions: &str) -> String {
  let description = concept
    .description
    .as_deref()
    .map(|d| format!(r#"<div class="task-description">{}</div>"#, escape(d)))
    .unwrap_or_default();
  let last = concept.last_completed.map_or_else(|| "Never".to_owned(), date);

  format!(
    r#"<div class="task-item{class}"><div class="task-header"><h3 class="task-title">{title}</h3><span class="task-cycle">Review #{review}</span></div>{description}<div class="task-dates"><strong>Created:</strong> {created} | <strong>Last Reviewed:</strong> {last}{status}</div>{actions}</div>"#,
    title = escape(&concept.title),
    review = u64::from(concept.current_cycle) + 1,
    created = date(concept.created_at),
  )
}

fn delete_button(concept: &Concept) -> String {
  format!(
    r#"<form action="/delete/{}" method="post" class="task-actions"><button type="submit" class="btn btn-danger">🗑 Delete</button></form>"#,
    concept.id
  )
}

fn diagnostics(listing: &Listing) -> String {
  let mut out = String::new();
  if let Some(problem) = &listing.problem {
    out.push_str(&format!(
      r#"<div class="banner banner-error"><strong>Storage unavailable.</strong> Concepts cannot be shown right now: {}</div>"#,
      escape(problem)
    ));
  }
  if listing.malformed > 0 {
    let noun = if listing.malformed == 1 { "record" } else { "records" };
    out.push_str(&format!(
      r#"<div class="banner banner-warning">{} stored {noun} could not be read and {} hidden.</div>"#,
      listing.malformed,
      if listing.malformed == 1 { "is" } else { "are" },
    ));
  }
  out
}

fn page(title: &str, body: &str) -> String {
  format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#,
    escape(title),
  )
}

const ADD_FORM: &str = r#"<div class="container"><h2>➕ Add New Concept</h2><form action="/add" method="post"><div class="form-group"><label for="title">Concept Title:</label><input type="text" id="title" name="title" required placeholder="e.g., Python Lists and Dictionaries"></div><div class="form-group"><label for="description">Description (optional):</label><textarea id="description" name="description" placeholder="Key points to remember, examples, or notes..."></textarea></div><button type="submit" class="btn">Add Concept</button></form></div>"#;

const STYLE: &str = "
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; background-color: #f5f7fa; color: #333; }
.header { text-align: center; margin-bottom: 30px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 20px; border-radius: 10px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
.container { background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); margin-bottom: 20px; }
.form-group { margin-bottom: 20px; }
label { display: block; margin-bottom: 5px; font-weight: 600; color: #555; }
input[type=\"text\"], textarea { width: 100%; padding: 12px; border: 2px solid #e1e5e9; border-radius: 6px; font-size: 16px; box-sizing: border-box; }
textarea { resize: vertical; min-height: 80px; }
.btn { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 12px 24px; border: none; border-radius: 6px; cursor: pointer; font-size: 16px; font-weight: 600; }
.btn-success { background: linear-gradient(135deg, #56ab2f 0%, #a8e6cf 100%); }
.btn-danger { background: #dc3545; padding: 6px 14px; font-size: 14px; }
.task-item { background: #f8f9fa; padding: 20px; border-left: 4px solid #667eea; margin-bottom: 15px; border-radius: 0 8px 8px 0; }
.available { border-left-color: #28a745; }
.scheduled { border-left-color: #ffc107; }
.task-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px; }
.task-title { font-size: 18px; font-weight: 600; margin: 0; }
.task-cycle { background: #667eea; color: white; padding: 4px 12px; border-radius: 20px; font-size: 12px; font-weight: 600; }
.available .task-cycle { background: #28a745; }
.scheduled .task-cycle { background: #ffc107; color: #333; }
.task-description { color: #666; margin-bottom: 15px; line-height: 1.5; }
.task-dates { font-size: 14px; color: #888; margin-bottom: 15px; }
.task-actions { margin: 0; }
.next-review { font-weight: 600; color: #667eea; }
.available .next-review { color: #28a745; }
.no-tasks { text-align: center; color: #666; font-style: italic; padding: 40px; background: #f8f9fa; border-radius: 8px; border: 2px dashed #ddd; }
.stats { display: flex; justify-content: space-around; background: white; padding: 20px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); margin-bottom: 20px; }
.stat-item { text-align: center; }
.stat-number { font-size: 24px; font-weight: bold; color: #667eea; }
.stat-label { font-size: 14px; color: #666; margin-top: 5px; }
.intervals-info { background: #e3f2fd; padding: 15px; border-radius: 8px; margin-bottom: 20px; border-left: 4px solid #2196f3; }
.intervals-info h4 { margin: 0 0 10px 0; color: #1976d2; }
.intervals-info p { margin: 0; color: #666; font-size: 14px; }
.banner { padding: 15px; border-radius: 8px; margin-bottom: 20px; }
.banner-error { background: #fdecea; border-left: 4px solid #dc3545; color: #842029; }
.banner-warning { background: #fff8e1; border-left: 4px solid #ffc107; color: #664d03; }
.link, .back-link { color: #667eea; text-decoration: none; font-weight: 600; }
.back-link { display: inline-block; margin-bottom: 20px; }
";
