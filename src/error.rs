use std::env;
use std::fmt;
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    /// Codes below 100 are internal failures; their message is logged but the
    /// page shows its own fallback text instead.
    pub fn is_user_facing(&self) -> bool {
        self.code >= 100
    }

    pub fn display_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.is_user_facing() && !self.message.is_empty() {
            self.message.as_str()
        } else {
            fallback
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        malformed_response_error(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        io_error(err)
    }
}

pub fn invalid_input_error(message: impl Into<String>) -> Error {
    Error {
        code: 101,
        message: message.into(),
    }
}

pub fn rejected_error(message: impl Into<String>) -> Error {
    Error {
        code: 102,
        message: message.into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn io_error(err: io::Error) -> Error {
    Error {
        code: 2,
        message: format!("io error: {}", err),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: format!("reqwest error: {}", err),
    }
}

pub fn upstream_error(status: u16) -> Error {
    Error {
        code: 4,
        message: format!("upstream error: status {}", status),
    }
}

pub fn malformed_response_error<T: fmt::Display>(err: T) -> Error {
    Error {
        code: 5,
        message: format!("malformed response: {}", err),
    }
}

#[test]
fn internal_errors_use_fallback() {
    let err = upstream_error(500);

    assert!(!err.is_user_facing());
    assert_eq!(err.display_message("fallback"), "fallback");
}

#[test]
fn rejected_errors_keep_server_text() {
    let err = rejected_error("no route");

    assert!(err.is_user_facing());
    assert_eq!(err.display_message("fallback"), "no route");
}

#[test]
fn empty_rejection_uses_fallback() {
    assert_eq!(rejected_error("").display_message("fallback"), "fallback");
}
