use thiserror::Error;

/// Failure of a single forecast fetch.
///
/// Variants are listed in the order the pipeline can hit them; the first one
/// encountered ends the call and no partial forecast is returned.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The upstream could not be reached, or the response body could not be read.
    #[error("error making request: {0}")]
    Request(#[source] reqwest::Error),

    /// The upstream answered with something other than `200 OK`.
    #[error("unexpected status code: {code}")]
    UnexpectedStatus { code: u16 },

    #[error("error decoding response: {0}")]
    Decode(#[from] DecodeError),

    #[error("error loading timezone: {0}")]
    Timezone(#[from] TimezoneError),

    #[error("error parsing time {value:?} at index {index}: {source}")]
    TimeParse {
        index: usize,
        value: String,
        #[source]
        source: TimestampError,
    },
}

/// Coarse classification of a [`ForecastError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastErrorKind {
    Request,
    UnexpectedStatus,
    Decode,
    Timezone,
    TimeParse,
}

impl ForecastError {
    pub fn kind(&self) -> ForecastErrorKind {
        match self {
            ForecastError::Request(_) => ForecastErrorKind::Request,
            ForecastError::UnexpectedStatus { .. } => ForecastErrorKind::UnexpectedStatus,
            ForecastError::Decode(_) => ForecastErrorKind::Decode,
            ForecastError::Timezone(_) => ForecastErrorKind::Timezone,
            ForecastError::TimeParse { .. } => ForecastErrorKind::TimeParse,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// One of the hourly arrays does not line up with `time`.
    #[error("hourly field `{field}` has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum TimezoneError {
    #[error("unknown time zone {id:?}")]
    Unknown {
        id: String,
        #[source]
        source: chrono_tz::ParseError,
    },

    /// `timezone=auto` was requested but the response did not say which zone was picked.
    #[error("upstream did not report the zone it inferred for \"auto\"")]
    MissingInferredZone,
}

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("{0}")]
    Format(#[from] chrono::ParseError),

    /// Parsed, but not in the exact zero-padded `YYYY-MM-DDTHH:MM` layout.
    #[error("timestamp is not in YYYY-MM-DDTHH:MM layout")]
    Layout,

    #[error("local time does not exist in this zone")]
    Nonexistent,
}
