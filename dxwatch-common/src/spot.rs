//! Spot records and cluster line parsing
//!
//! A DX cluster announces received stations as single text lines:
//!
//! ```text
//! DX de W1AW:     14025.0  JA1ABC       Nice signal                    1234Z
//! ```
//!
//! The grammar is `DX de <spotter>: <freq> <spotted> <comment> <hhmm>Z`
//! with a case-insensitive tag and callsigns, the frequency in decimal kHz
//! and the comment free text (possibly empty). The feed also carries login
//! banners, talk messages and WWV announcements; anything that does not
//! match the grammar is silently ignored.

/// A single parsed spot announcement.
///
/// Ephemeral: created per feed line, discarded after classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    /// Callsign of the reporting station
    pub spotter: String,
    /// Callsign of the station that was heard
    pub spotted: String,
    /// Frequency in kHz
    pub freq_khz: f64,
    /// Free-text comment, trimmed; may be empty
    pub comment: String,
    /// Time token as received from the cluster (e.g. "1234Z"), never
    /// parsed into a calendar date
    pub time: String,
}

const TAG: &str = "DX de ";

fn is_callsign(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '/')
}

fn is_frequency(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Four digits followed by 'Z' or 'z'.
fn is_time_token(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 5
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && (bytes[4] == b'Z' || bytes[4] == b'z')
}

/// Split off the next whitespace-delimited token.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(idx) => Some((&s[..idx], &s[idx..])),
        None => Some((s, "")),
    }
}

/// Parse one raw feed line into a [`Spot`].
///
/// Returns `None` for any line that does not match the grammar, including
/// a frequency that fails to parse; non-spot lines are expected feed
/// traffic, not errors. The comment keeps its internal whitespace but is
/// trimmed at both ends.
pub fn parse_spot_line(line: &str) -> Option<Spot> {
    let line = line.trim_end_matches(['\r', '\n']);

    if !line
        .get(..TAG.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(TAG))
    {
        return None;
    }

    // Spotter callsign, terminated by a colon
    let (spotter, rest) = line[TAG.len()..].split_once(':')?;
    if !is_callsign(spotter) {
        return None;
    }

    let (freq_token, rest) = next_token(rest)?;
    if !is_frequency(freq_token) {
        return None;
    }
    let freq_khz: f64 = freq_token.parse().ok()?;
    if freq_khz <= 0.0 {
        return None;
    }

    let (spotted, rest) = next_token(rest)?;
    if !is_callsign(spotted) {
        return None;
    }

    // The time is the last whitespace-delimited HHMMZ token; cluster
    // decorations after it (grid squares etc.) are ignored.
    let mut time = None;
    let mut scan = 0;
    for token in rest.split_whitespace() {
        let start = scan + rest[scan..].find(token)?;
        scan = start + token.len();
        if is_time_token(token) {
            time = Some((start, token));
        }
    }
    let (time_start, time) = time?;
    let comment = rest[..time_start].trim();

    Some(Spot {
        spotter: spotter.to_string(),
        spotted: spotted.to_string(),
        freq_khz,
        comment: comment.to_string(),
        time: time.to_string(),
    })
}
