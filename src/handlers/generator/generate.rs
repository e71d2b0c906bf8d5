use axum::{
    extract::State,
    response::Html,
    Extension, Form,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::SessionUser;
use crate::services::{generate_batch, GenerationRequest};
use crate::state::GeneratorState;
use crate::views::generator::{self as pages, GeneratorOutcome};

/// Raw form fields; validated into a `GenerationRequest` before use
#[derive(Debug, Default, Deserialize)]
pub struct GenerateForm {
    pub length: Option<String>,
    pub count: Option<String>,
    pub complexity: Option<String>,
}

/// GET /generator - empty generator form
pub async fn generator_page(Extension(user): Extension<SessionUser>) -> Html<String> {
    Html(pages::generator_page(&user.username, &GeneratorOutcome::Nothing))
}

/// POST /generator - generate passwords and log them to the history
///
/// Invalid input never reaches generation: the page shows a single error
/// entry instead of the list and nothing is written.
pub async fn generate(
    State(state): State<GeneratorState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<GenerateForm>,
) -> Result<Html<String>, ApiError> {
    let request = GenerationRequest::parse(
        form.length.as_deref(),
        form.count.as_deref(),
        form.complexity.as_deref(),
        &state.limits,
    );

    let outcome = match request {
        Ok(request) => {
            let passwords = {
                let mut rng = rand::thread_rng();
                generate_batch(&request, &mut rng)
            };
            state.history.append(&user, &passwords).await?;
            tracing::info!(
                "Generated {} password(s) of length {} ({}) for '{}'",
                request.count,
                request.length,
                request.complexity,
                user.username
            );
            GeneratorOutcome::Passwords(passwords)
        }
        Err(err) => {
            tracing::debug!("Rejected generator input from '{}': {}", user.username, err);
            GeneratorOutcome::Error(format!("Invalid input: {}. Please try again.", err))
        }
    };

    Ok(Html(pages::generator_page(&user.username, &outcome)))
}
