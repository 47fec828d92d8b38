//! Alert message rendering.

use std::time::Duration;

use chrono::Local;

use crate::notify::AlertEpisode;

/// Subject line for an alert.
pub fn subject(episode: &AlertEpisode) -> String {
    format!("ALERT: web service down - {}", episode.target)
}

/// Plain-text alert body.
pub fn text_body(episode: &AlertEpisode) -> String {
    format!(
        "ALERT: web service down\n\
         \n\
         URL: {url}\n\
         Status: DOWN\n\
         Failed attempts: {failures}\n\
         Time: {time}\n\
         \n\
         Details:\n\
         - The service failed on the first attempt\n\
         - {retries} additional retries were made every {interval}\n\
         - All attempts failed\n\
         \n\
         This message was sent automatically by the monitoring system.\n",
        url = episode.target,
        failures = episode.failures,
        time = local_time(episode),
        retries = episode.max_retries,
        interval = humanize(episode.retry_interval),
    )
}

/// HTML alert body.
pub fn html_body(episode: &AlertEpisode) -> String {
    format!(
        "<h2>ALERT: web service down</h2>\n\
         <p><strong>URL:</strong> {url}</p>\n\
         <p><strong>Status:</strong> DOWN</p>\n\
         <p><strong>Failed attempts:</strong> {failures}</p>\n\
         <p><strong>Time:</strong> {time}</p>\n\
         <h3>Details:</h3>\n\
         <ul>\n\
         <li>The service failed on the first attempt</li>\n\
         <li>{retries} additional retries were made every {interval}</li>\n\
         <li>All attempts failed</li>\n\
         </ul>\n\
         <p><em>This message was sent automatically by the monitoring system.</em></p>\n",
        url = escape_html(episode.target.as_str()),
        failures = episode.failures,
        time = local_time(episode),
        retries = episode.max_retries,
        interval = humanize(episode.retry_interval),
    )
}

fn local_time(episode: &AlertEpisode) -> String {
    episode
        .detected_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S %:z")
        .to_string()
}

fn humanize(interval: Duration) -> String {
    let secs = interval.as_secs();
    match secs {
        60 => "minute".to_string(),
        s if s >= 60 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "second".to_string(),
        s => format!("{} seconds", s),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
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
