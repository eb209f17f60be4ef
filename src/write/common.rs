use crate::common::{Result, document};

/// Decode an acknowledgement envelope into its `ok` flag.
pub(crate) fn acknowledged(body: &[u8]) -> Result<bool> {
    let acknowledgement: document::Acknowledgement = document::decode_envelope(body)?;
    Ok(acknowledgement.ok)
}
