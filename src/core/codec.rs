//! Plan encodings: shareable link token and file export/import
//!
//! The shareable form projects the plan down to name -> semester pairs,
//! serializes them compactly and deflate-compresses the result into a
//! URL-safe base64 token. Decoding tolerates the legacy uncompressed
//! percent-encoded form and degrades unknown course names to placeholder
//! placements so a shared slot assignment is never dropped.
//!
//! The file form is a verbose JSON document carrying the full placements,
//! an ISO-8601 export timestamp and a format version.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::core::catalog::Catalog;
use crate::core::models::{Placement, PlanState};

/// Query parameter carrying the share token
pub const SHARE_PARAM: &str = "plan";

/// Version stamp of the export document format
const EXPORT_VERSION: &str = "1.0";

/// One entry of a decoded simplified mapping.
///
/// Current tokens carry a bare semester number; legacy tokens carried the
/// full placement object. The runtime shape decides which (untagged).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SimplifiedEntry {
    /// Modern form: assigned semester only, attributes re-derived on load
    Semester(u8),
    /// Legacy full-fidelity form, accepted as-is
    Legacy(Placement),
}

/// Project the plan down to course name -> semester
#[must_use]
pub fn simplify(plan: &PlanState) -> BTreeMap<String, u8> {
    plan.iter()
        .map(|(name, placement)| (name.clone(), placement.semester))
        .collect()
}

/// Encode the plan as a URL-safe share token.
///
/// An empty plan yields an empty token; the caller drops the link
/// parameter entirely in that case.
///
/// # Errors
/// Returns an error if serialization or compression fails.
pub fn encode_share(plan: &PlanState) -> Result<String, String> {
    let simplified = simplify(plan);
    if simplified.is_empty() {
        return Ok(String::new());
    }

    let json = serde_json::to_string(&simplified)
        .map_err(|e| format!("Failed to serialize plan: {e}"))?;

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(json.as_bytes())
        .map_err(|e| format!("Failed to compress plan: {e}"))?;
    let compressed = encoder
        .finish()
        .map_err(|e| format!("Failed to compress plan: {e}"))?;

    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Decode a share token back into a hydrated plan.
///
/// Tries the compressed form first, then the legacy percent-encoded form.
/// An empty token decodes to an empty plan.
///
/// # Errors
/// Returns an error when neither form is readable; the caller falls back to
/// durable storage.
pub fn decode_share(token: &str, catalog: &Catalog) -> Result<PlanState, String> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(PlanState::new());
    }

    match decode_compressed(token) {
        Ok(entries) => Ok(hydrate(entries, catalog)),
        Err(compressed_err) => decode_legacy(token).map_or_else(
            |_| Err(format!("Unreadable share token: {compressed_err}")),
            |entries| Ok(hydrate(entries, catalog)),
        ),
    }
}

fn decode_compressed(token: &str) -> Result<BTreeMap<String, SimplifiedEntry>, String> {
    let compressed = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| format!("not base64: {e}"))?;

    let mut json = String::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_string(&mut json)
        .map_err(|e| format!("not deflate data: {e}"))?;

    serde_json::from_str(&json).map_err(|e| format!("not a plan mapping: {e}"))
}

fn decode_legacy(token: &str) -> Result<BTreeMap<String, SimplifiedEntry>, String> {
    let json = percent_decode(token)?;
    serde_json::from_str(&json).map_err(|e| format!("not a legacy plan mapping: {e}"))
}

/// Decode a percent-encoded string (the legacy token form)
fn percent_decode(input: &str) -> Result<String, String> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input
                .get(i + 1..i + 3)
                .ok_or_else(|| "truncated percent escape".to_string())?;
            let byte = u8::from_str_radix(hex, 16)
                .map_err(|_| format!("invalid percent escape: %{hex}"))?;
            decoded.push(byte);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).map_err(|_| "decoded token is not UTF-8".to_string())
}

/// Rebuild full placements from decoded simplified entries.
///
/// Semester entries refresh their attributes from the combined catalog;
/// names the catalog no longer knows degrade to placeholder placements so
/// the user's slot assignment survives. Legacy entries pass through.
#[must_use]
pub fn hydrate(entries: BTreeMap<String, SimplifiedEntry>, catalog: &Catalog) -> PlanState {
    entries
        .into_iter()
        .map(|(name, entry)| {
            let placement = match entry {
                SimplifiedEntry::Semester(semester) => catalog.get(&name).map_or_else(
                    || Placement::placeholder(semester),
                    |record| Placement::from_record(record, semester),
                ),
                SimplifiedEntry::Legacy(placement) => placement,
            };
            (name, placement)
        })
        .collect()
}

/// Build a shareable link for the plan; no parameter when the plan is empty.
///
/// # Errors
/// Returns an error if token encoding fails.
pub fn share_url(base: &str, plan: &PlanState) -> Result<String, String> {
    let token = encode_share(plan)?;
    if token.is_empty() {
        return Ok(base.to_string());
    }
    let separator = if base.contains('?') { '&' } else { '?' };
    Ok(format!("{base}{separator}{SHARE_PARAM}={token}"))
}

/// Extract the share token from user input: either a bare token or a URL
/// carrying the `plan` query parameter.
#[must_use]
pub fn token_from_input(input: &str) -> String {
    let input = input.trim();
    let marker = format!("{SHARE_PARAM}=");
    input.find(&marker).map_or_else(
        || input.to_string(),
        |at| {
            let tail = &input[at + marker.len()..];
            tail.split('&').next().unwrap_or(tail).to_string()
        },
    )
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    courses: &'a PlanState,
    #[serde(rename = "exportDate")]
    export_date: String,
    version: &'a str,
}

/// Serialize the plan to the verbose export document. Non-destructive.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn export_plan(plan: &PlanState) -> Result<String, String> {
    let document = ExportDocument {
        courses: plan,
        export_date: Utc::now().to_rfc3339(),
        version: EXPORT_VERSION,
    };
    serde_json::to_string_pretty(&document).map_err(|e| format!("Failed to export plan: {e}"))
}

/// Parse an import document into a plan.
///
/// The document is accepted only when a `courses` field is present. The
/// entries themselves are deserialized leniently (string or numeric
/// credits, defaulted season/block/category) but must carry a semester.
///
/// # Errors
/// Returns a user-visible message for unparseable JSON, a missing
/// `courses` field or malformed entries; the caller leaves the current
/// plan untouched.
pub fn import_plan(json: &str) -> Result<PlanState, String> {
    let document: serde_json::Value =
        serde_json::from_str(json).map_err(|_| "Could not read the JSON document".to_string())?;

    let courses = document
        .get("courses")
        .ok_or_else(|| "Invalid file format: missing \"courses\" field".to_string())?;

    serde_json::from_value(courses.clone())
        .map_err(|e| format!("Invalid file format: {e}"))
}
