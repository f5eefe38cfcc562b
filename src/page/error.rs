//! Configuration errors
//!
//! The only errors this crate returns. Content problems never fail (see
//! [StructuralWarning](crate::page::ast::StructuralWarning)); invalid enhancement options or
//! link tables do, before any document is touched.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No platform names to link
    MissingPlatforms,
    /// Platform name at this position is empty or whitespace
    BlankPlatformName(usize),
    /// Same platform listed twice, ignoring case
    DuplicatePlatform(String),
    /// Platform names must fit on one line
    PlatformNameWithNewline(String),
    /// A cap override names a platform that is not configured
    UnknownCapOverride(String),
    /// Image category with no usable keywords
    EmptyKeywordCategory(String),
    /// Link record for this platform has no target
    BlankTargetUrl(String),
    /// The platform matcher could not be compiled
    LinkPattern(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingPlatforms => write!(f, "no affiliate platforms configured"),
            ConfigError::BlankPlatformName(index) => {
                write!(f, "platform name #{} is blank", index + 1)
            }
            ConfigError::DuplicatePlatform(name) => {
                write!(f, "platform '{}' is listed more than once", name)
            }
            ConfigError::PlatformNameWithNewline(name) => {
                write!(f, "platform name {:?} spans more than one line", name)
            }
            ConfigError::UnknownCapOverride(name) => {
                write!(f, "cap override for unknown platform '{}'", name)
            }
            ConfigError::EmptyKeywordCategory(name) => {
                write!(f, "image keyword category '{}' has no keywords", name)
            }
            ConfigError::BlankTargetUrl(name) => {
                write!(f, "affiliate link for '{}' has no target url", name)
            }
            ConfigError::LinkPattern(reason) => {
                write!(f, "platform names do not fit one matcher: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
