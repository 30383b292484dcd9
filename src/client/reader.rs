use futures::{Stream, StreamExt};

use crate::errors::{BoxError, ClassifyError};
use crate::models::GenerateResponse;

/// Pull the first record from a response stream and validate it.
///
/// Requests are always sent with `stream: false`, so exactly one meaningful
/// record is expected. The stream is not drained past the first record.
pub async fn read_single_response<S, E>(records: &mut S) -> Result<GenerateResponse, ClassifyError>
where
    S: Stream<Item = Result<GenerateResponse, E>> + Unpin,
    E: Into<BoxError>,
{
    let record = match records.next().await {
        Some(Ok(record)) => record,
        Some(Err(e)) => return Err(ClassifyError::Transport(e.into())),
        None => return Err(ClassifyError::MissingResponse),
    };

    validate_response(record)
}

/// Check a record for completion, an accepted status, or a remote error
pub fn validate_response(record: GenerateResponse) -> Result<GenerateResponse, ClassifyError> {
    if let Some(message) = record.error {
        return Err(ClassifyError::Remote(message));
    }

    if !record.is_acceptable() {
        return Err(ClassifyError::UnexpectedResponse { status: record.status });
    }

    Ok(record)
}
