use askama::Template;
use axum::extract::State;
use axum::response::Html;

use crate::error::Result;
use crate::state::AppState;

/// Form page that posts urls back to the gateway.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub base_url: &'a str,
}

pub async fn page_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let page = PageTemplate {
        base_url: state.base_url(),
    }
    .render()?;

    Ok(Html(page))
}
