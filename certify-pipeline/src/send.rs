//! Send phase: mail every rendered certificate over one session.

use std::path::Path;

use certify_core::artifact::{artifact_file_name, artifact_path, is_flat_name};
use certify_core::{roster, BatchResult, Roster, RosterRow};
use certify_mailer::{Composer, MailSession, MailTransport, PdfAttachment};

use crate::error::{PipelineError, RowFailure};

/// Pick the roster for the send phase.
///
/// An explicit path wins. Otherwise the first `.xlsx` / `.csv` in `workdir` by
/// file name is used; finding none is `RosterError::SourceNotFound`.
pub fn resolve_roster(explicit: Option<&Path>, workdir: &Path) -> Result<Roster, PipelineError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let found = roster::discover_at(workdir)?;
            tracing::info!("using roster {}", found.display());
            found
        }
    };
    Ok(roster::load_at(&path)?)
}

/// Email each row its certificate from `workdir`.
///
/// The session is opened before any artifact is read; if it fails, the phase
/// returns `PipelineError::Session` and nothing is sent. After that, each row
/// either counts as a success or adds exactly one error message.
pub fn send_batch<T: MailTransport>(
    rows: &[RosterRow],
    workdir: &Path,
    transport: &T,
    composer: &Composer,
) -> Result<BatchResult, PipelineError> {
    let mut session = transport.open().map_err(PipelineError::Session)?;
    let mut result = BatchResult::default();

    for row in rows {
        match send_row(&mut session, row, workdir, composer) {
            Ok(()) => {
                tracing::info!("sent: {} <{}>", row.name, row.email);
                result.record_success();
            }
            Err(failure) => {
                tracing::warn!("{failure}");
                result.record_error(failure.to_string());
            }
        }
    }

    if let Err(e) = session.close() {
        tracing::warn!("closing mail session: {e}");
    }
    tracing::info!(
        "send batch finished: {} sent, {} failed",
        result.success_count,
        result.errors.len()
    );
    Ok(result)
}

fn send_row<S: MailSession>(
    session: &mut S,
    row: &RosterRow,
    workdir: &Path,
    composer: &Composer,
) -> Result<(), RowFailure> {
    let path = artifact_path(&row.name, workdir);
    if !is_flat_name(&row.name) || !path.is_file() {
        return Err(RowFailure::ArtifactMissing {
            name: row.name.clone(),
        });
    }

    let bytes = std::fs::read(&path).map_err(|source| RowFailure::Read {
        email: row.email.clone(),
        path: path.clone(),
        source,
    })?;
    let send_failure = |source| RowFailure::Send {
        email: row.email.clone(),
        source,
    };

    let attachment = PdfAttachment {
        file_name: artifact_file_name(&row.name),
        bytes,
    };
    let message = composer.compose(row, attachment).map_err(send_failure)?;
    session.send(&message).map_err(send_failure)
}
