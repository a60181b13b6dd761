//! Export Handlers

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderValue},
    prelude::*,
};

use crate::extensions::*;

pub(crate) mod index;
pub(crate) mod stats;
pub(crate) mod template;

/// Render `text` as a CSV attachment named `filename`.
fn render_csv(res: &mut Response, filename: &str, text: String) -> Result<(), StatusError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .or_500("failed to encode content disposition header")?;

    res.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    res.headers_mut().insert(CONTENT_DISPOSITION, disposition);
    res.render(text);

    Ok(())
}
