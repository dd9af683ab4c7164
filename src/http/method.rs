//! Method definitions
//!
//! The closed set of request method tokens the server recognizes.

/// A request method token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    /// `OPTION` (and `OPTIONS`)
    Options,
    Head,
    Trace,
    Connect,
    /// Any token outside the recognized set
    Unknown(String),
}

impl Method {
    /// Classify a raw method token (case-sensitive)
    pub fn from_token(token: &[u8]) -> Self {
        match token {
            b"GET" => Method::Get,
            b"POST" => Method::Post,
            b"PUT" => Method::Put,
            b"DELETE" => Method::Delete,
            b"OPTION" | b"OPTIONS" => Method::Options,
            b"HEAD" => Method::Head,
            b"TRACE" => Method::Trace,
            b"CONNECT" => Method::Connect,
            other => Method::Unknown(String::from_utf8_lossy(other).into_owned()),
        }
    }

    /// Whether the token is part of the recognized set
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Method::Unknown(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Options => "OPTION",
            Method::Head => "HEAD",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
            Method::Unknown(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
