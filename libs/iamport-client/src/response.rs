use serde::Deserialize;

use crate::error::IamportError;

/// Response envelope used by every gateway endpoint.
///
/// `code == 0` means success. The payload travels under the `response` key
/// on the wire; `content` is accepted as an alias.
#[derive(Debug, Clone, Deserialize)]
pub struct IamportResponse<T> {
    pub code: i64,
    pub message: Option<String>,
    #[serde(rename = "response", alias = "content")]
    pub content: Option<T>,
}

impl<T> IamportResponse<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Map the envelope code to a result, keeping optional content.
    ///
    /// # Errors
    ///
    /// Returns [`IamportError::Gateway`] with the gateway's code and message
    /// when `code != 0`.
    pub fn into_result(self) -> Result<Option<T>, IamportError> {
        if self.code != 0 {
            return Err(IamportError::Gateway {
                code: self.code,
                message: self.message,
            });
        }
        Ok(self.content)
    }

    /// Like [`into_result`](Self::into_result), but content is mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`IamportError::Gateway`] when `code != 0`, or
    /// [`IamportError::InvalidResponse`] when a successful envelope has no
    /// content.
    pub fn into_content(self) -> Result<T, IamportError> {
        self.into_result()?.ok_or_else(|| {
            IamportError::InvalidResponse("successful envelope without content".to_owned())
        })
    }
}
