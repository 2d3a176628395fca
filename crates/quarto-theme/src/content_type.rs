//! Content type detection for theme resources.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Detection runs in stages, each one only consulted while the answer so far
//! is generic (`text/plain` or `application/octet-stream`):
//!
//! 1. Magic-byte sniffing of the file head with `infer`; files without a
//!    known signature are classified as text or binary.
//! 2. The external `file -b --mime-type` utility, bounded by a timeout.
//! 3. A table of well-known web resource extensions.
//!
//! Finally, stylesheets that were classified as `text/plain` or `text/x-c`
//! are reported as `text/css`, since content sniffing cannot recognize them.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, warn};

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_CSS: &str = "text/css";

/// Bytes read from the start of a file for sniffing.
const SNIFF_LEN: usize = 8192;

/// Extensions browsers need an exact type for, checked after sniffing.
const WEB_EXTENSIONS: &[(&str, &str)] = &[
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("mjs", "text/javascript"),
    ("json", "application/json"),
    ("map", "application/json"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("xml", "application/xml"),
    ("txt", "text/plain"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("eot", "application/vnd.ms-fontobject"),
    ("pdf", "application/pdf"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
];

/// Settings for the external MIME detection utility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentTypeConfig {
    /// Ask the external utility when sniffing gives a generic answer
    pub external_tool: bool,

    /// Program invoked as `<program> -b --mime-type <file>`
    pub program: String,

    /// Upper bound on a single invocation, in milliseconds
    pub timeout_ms: u64,
}

impl Default for ContentTypeConfig {
    fn default() -> Self {
        Self {
            external_tool: true,
            program: "file".to_string(),
            timeout_ms: 2000,
        }
    }
}

/// Determines the MIME type of files on disk.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeResolver {
    config: ContentTypeConfig,
}

fn is_generic(mime: &str) -> bool {
    mime == OCTET_STREAM || mime == TEXT_PLAIN
}

impl ContentTypeResolver {
    pub fn new(config: ContentTypeConfig) -> Self {
        Self { config }
    }

    /// Resolver that never spawns a process.
    pub fn in_process() -> Self {
        Self::new(ContentTypeConfig {
            external_tool: false,
            ..ContentTypeConfig::default()
        })
    }

    /// Determine the MIME type of `path`.
    ///
    /// Never fails: callers check that the file exists first, and an unreadable
    /// file is reported as `application/octet-stream`.
    pub async fn determine(&self, path: &Path) -> String {
        let mut mime = sniff_file(path).await;

        if is_generic(&mime) && self.config.external_tool {
            if let Some(second_opinion) = self.ask_external_tool(path).await {
                mime = second_opinion;
            }
        }

        if is_generic(&mime) {
            if let Some(by_extension) = mime_type_from_extension(path) {
                mime = by_extension.to_string();
            }
        }

        if (mime == TEXT_PLAIN || mime == "text/x-c") && has_extension(path, "css") {
            mime = TEXT_CSS.to_string();
        }

        debug!(path = %path.display(), content_type = %mime, "Determined content type");
        mime
    }

    /// Run `<program> -b --mime-type <path>`.
    ///
    /// Returns `None` on spawn failure, nonzero exit, empty output or timeout.
    async fn ask_external_tool(&self, path: &Path) -> Option<String> {
        let mut command = Command::new(&self.config.program);
        command
            .arg("-b")
            .arg("--mime-type")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let timeout = Duration::from_millis(self.config.timeout_ms);
        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                debug!(program = %self.config.program, error = %e, "MIME utility unavailable");
                return None;
            }
            Err(_) => {
                warn!(
                    program = %self.config.program,
                    path = %path.display(),
                    timeout_ms = self.config.timeout_ms,
                    "MIME utility timed out"
                );
                return None;
            }
        };

        if !output.status.success() {
            debug!(status = ?output.status, "MIME utility exited unsuccessfully");
            return None;
        }

        let answer = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!answer.is_empty()).then_some(answer)
    }
}

/// Classify the head of a file.
async fn sniff_file(path: &Path) -> String {
    let head = match read_head(path).await {
        Ok(head) => head,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Could not read file for sniffing");
            return OCTET_STREAM.to_string();
        }
    };
    sniff_bytes(&head)
}

async fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = tokio::fs::File::open(path).await?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut head).await?;
    Ok(head)
}

/// Classify content by its magic bytes, falling back to text vs. binary.
pub fn sniff_bytes(head: &[u8]) -> String {
    if let Some(kind) = infer::get(head) {
        return kind.mime_type().to_string();
    }

    if looks_like_text(head) {
        TEXT_PLAIN.to_string()
    } else {
        OCTET_STREAM.to_string()
    }
}

fn looks_like_text(head: &[u8]) -> bool {
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        // The read may have cut a multi-byte character at the end
        Err(e) => e.error_len().is_none(),
    }
}

/// Get MIME type from a path's extension, for well-known web resources.
pub fn mime_type_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    WEB_EXTENSIONS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == expected)
}
