//! Home page, stored-file serving, and the static recorder script.

use {
    askama::Template,
    axum::{
        extract::{Path, State},
        http::{StatusCode, header},
        response::{Html, IntoResponse, Response},
    },
    axum_extra::extract::cookie::CookieJar,
};

use crate::{error::GatewayError, flash::take_flash, state::AppState};

#[derive(Template)]
#[template(path = "index.html", escape = "html")]
struct IndexTemplate<'a> {
    flash: Option<String>,
    uploads_folder: &'a str,
    tts_folder: &'a str,
    files: &'a [String],
    tts_files: &'a [String],
}

/// `GET /`
///
/// Both listings, newest first, plus any pending flash notice.
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, GatewayError> {
    let (jar, flash) = take_flash(jar);

    let files = state.store.list_recordings().await?;
    let tts_files = state.store.list_syntheses().await?;

    let template = IndexTemplate {
        flash,
        uploads_folder: state.store.uploads_name(),
        tts_folder: state.store.tts_name(),
        files: &files,
        tts_files: &tts_files,
    };
    let body = template.render()?;

    Ok((jar, Html(body)))
}

/// `GET /{folder}/{filename}`
///
/// Raw file bytes from one of the two stores.
///
/// The folder name must exactly match a configured directory; anything else
/// is refused before any disk access. Filenames with path separators or
/// parent components are refused outright.
pub async fn stored_file(
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
) -> Response {
    let Some(dir) = state.store.resolve_folder(&folder) else {
        return (StatusCode::NOT_FOUND, "Invalid folder").into_response();
    };

    if unsafe_filename(&filename) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match tokio::fs::read(dir.join(&filename)).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, content_type_for(&filename))],
            bytes,
        )
            .into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// `GET /script.js`
///
/// The browser recorder script.
pub async fn script_js(State(state): State<AppState>) -> Response {
    match tokio::fs::read(&state.script_path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "text/javascript")], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Path separators and parent components never reach the filesystem.
fn unsafe_filename(name: &str) -> bool {
    name.contains(['/', '\\']) || name.contains("..")
}

fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some(ext) if ext.eq_ignore_ascii_case("wav") => "audio/wav",
        Some(ext) if ext.eq_ignore_ascii_case("txt") => "text/plain; charset=utf-8",
        Some(ext) if ext.eq_ignore_ascii_case("js") => "text/javascript",
        _ => "application/octet-stream",
    }
}
