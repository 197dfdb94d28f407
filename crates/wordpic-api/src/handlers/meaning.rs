use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use wordpic_core::models::MeaningRequest;
use wordpic_records::{MeaningInput, RecordStore};

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Record the meaning behind an original-image upload.
///
/// Invoked by the caller after the upload has returned a location; the
/// record write is deliberately decoupled from the store write, so a
/// failure here does not undo the stored object.
#[tracing::instrument(skip(state, body), fields(operation = "image_meaning", word = %body.word))]
pub async fn image_meaning(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<MeaningRequest>,
) -> Result<(StatusCode, &'static str), HttpAppError> {
    record_meaning(state.records.as_ref(), &state.word_table, body).await
}

/// Record the meaning behind a compressed-image upload. Identical contract
/// to [`image_meaning`]; only the target table differs.
#[tracing::instrument(
    skip(state, body),
    fields(operation = "compressed_image_meaning", word = %body.word)
)]
pub async fn compressed_image_meaning(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<MeaningRequest>,
) -> Result<(StatusCode, &'static str), HttpAppError> {
    record_meaning(state.records.as_ref(), &state.compressed_word_table, body).await
}

async fn record_meaning(
    records: &dyn RecordStore,
    table: &str,
    body: MeaningRequest,
) -> Result<(StatusCode, &'static str), HttpAppError> {
    let record = records
        .put_meaning(
            table,
            MeaningInput {
                word: body.word,
                meaning: body.meaning,
                image_location: body.image_location,
            },
        )
        .await?;

    tracing::info!(
        table = %table,
        word = %record.word,
        timestamp = %record.timestamp,
        "Meaning record written"
    );

    Ok((StatusCode::CREATED, "Record entered successfully"))
}
