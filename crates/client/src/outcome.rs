use serde::Serialize;

/// Normalized result of one gateway call.
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    Success { data: T },
    Failure { error: String },
}

impl<T> ApiOutcome<T> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            Self::Success { data } => ApiOutcome::Success { data: f(data) },
            Self::Failure { error } => ApiOutcome::Failure { error },
        }
    }

    /// # Errors
    /// Returns the failure text when the call did not succeed.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure { error } => Err(error),
        }
    }
}

impl<T: Serialize> Serialize for ApiOutcome<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ApiOutcome", 2)?;
        match self {
            Self::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            },
            Self::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            },
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_discriminated_shape() {
        let ok: ApiOutcome<u32> = ApiOutcome::Success { data: 7 };
        assert_eq!(serde_json::to_value(&ok).unwrap(), serde_json::json!({"success": true, "data": 7}));

        let failed: ApiOutcome<u32> = ApiOutcome::Failure { error: "Failed to connect".to_owned() };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"success": false, "error": "Failed to connect"})
        );
    }

    #[test]
    fn accessors_follow_variant() {
        let ok: ApiOutcome<&str> = ApiOutcome::Success { data: "x" };
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&"x"));
        assert_eq!(ok.error(), None);
        assert_eq!(ok.map(str::len).into_result(), Ok(1));

        let failed: ApiOutcome<&str> = ApiOutcome::Failure { error: "nope".to_owned() };
        assert!(!failed.is_success());
        assert_eq!(failed.error(), Some("nope"));
        assert_eq!(failed.into_result(), Err("nope".to_owned()));
    }
}
