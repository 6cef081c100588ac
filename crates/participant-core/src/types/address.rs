//! # Device Address
//!
//! The identity of a participant device. A device address is a SIP or SIPS
//! URI, optionally wrapped in a name-addr with a display name:
//!
//! ```text
//! sip:alice@example.org:5060;gr=urn:uuid:f81d4fae
//! "Alice" <sips:alice@example.org;transport=tls>
//! ```
//!
//! The `gr` URI parameter carries the GRUU that distinguishes the devices
//! of a single participant.
//!
//! ```rust
//! use rvoip_participant_core::DeviceAddress;
//!
//! let addr: DeviceAddress = "\"Alice\" <sip:alice@example.org;gr=phone>".parse().unwrap();
//! assert_eq!(addr.user(), Some("alice"));
//! assert_eq!(addr.gruu(), Some("phone"));
//! assert_eq!(addr.as_string_uri_only(), "sip:alice@example.org;gr=phone");
//! ```

use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while, take_while1},
    character::complete::{anychar, char, digit1, multispace0, none_of},
    combinator::{all_consuming, map, map_res, opt, value},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{ParticipantError, Result};

/// URI scheme of a device address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// `sip:`
    Sip,
    /// `sips:`
    Sips,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Sip => f.write_str("sip"),
            Scheme::Sips => f.write_str("sips"),
        }
    }
}

/// SIP identity of a participant device
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceAddress {
    scheme: Scheme,
    display_name: Option<String>,
    user: Option<String>,
    host: String,
    port: Option<u16>,
    params: Vec<(String, Option<String>)>,
}

impl DeviceAddress {
    /// Create a `sip:` address for `user@host`
    pub fn sip(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: Scheme::Sip,
            display_name: None,
            user: Some(user.into()),
            host: host.into().to_ascii_lowercase(),
            port: None,
            params: Vec::new(),
        }
    }

    /// Parse an address from its textual form
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParticipantError::invalid_address(input, "empty address"));
        }

        match all_consuming(alt((name_addr, addr_spec)))(trimmed) {
            Ok((_, address)) => Ok(address),
            Err(_) => Err(ParticipantError::invalid_address(input, "malformed SIP URI")),
        }
    }

    /// Use the secure `sips:` scheme
    pub fn with_secure(mut self) -> Self {
        self.scheme = Scheme::Sips;
        self
    }

    /// Set the display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Add or replace a URI parameter
    pub fn with_param(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        let key = key.into();
        if let Some(slot) = self.params.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            slot.1 = value;
        } else {
            self.params.push((key, value));
        }
        self
    }

    /// Set the GRUU (`gr` parameter)
    pub fn with_gruu(self, gruu: impl Into<String>) -> Self {
        self.with_param("gr", Some(gruu.into()))
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Look up a URI parameter. Flag parameters yield `Some(None)`.
    pub fn param(&self, key: &str) -> Option<Option<&str>> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_deref())
    }

    /// The GRUU of this device, if any
    pub fn gruu(&self) -> Option<&str> {
        self.param("gr").flatten()
    }

    pub fn is_secure(&self) -> bool {
        self.scheme == Scheme::Sips
    }

    /// Compare scheme, user, host and port, ignoring the display name and
    /// URI parameters.
    pub fn weak_equal(&self, other: &DeviceAddress) -> bool {
        self.scheme == other.scheme
            && self.user == other.user
            && self.host == other.host
            && self.port == other.port
    }

    /// The URI without display name or angle brackets
    pub fn as_string_uri_only(&self) -> String {
        let mut out = format!("{}:", self.scheme);
        if let Some(user) = &self.user {
            out.push_str(user);
            out.push('@');
        }
        if self.host.contains(':') {
            out.push('[');
            out.push_str(&self.host);
            out.push(']');
        } else {
            out.push_str(&self.host);
        }
        if let Some(port) = self.port {
            out.push_str(&format!(":{}", port));
        }
        for (key, val) in &self.params {
            out.push(';');
            out.push_str(key);
            if let Some(val) = val {
                out.push('=');
                out.push_str(val);
            }
        }
        out
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => {
                f.write_str("\"")?;
                for c in name.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, "\" <{}>", self.as_string_uri_only())
            }
            None => f.write_str(&self.as_string_uri_only()),
        }
    }
}

impl FromStr for DeviceAddress {
    type Err = ParticipantError;

    fn from_str(s: &str) -> Result<Self> {
        DeviceAddress::parse(s)
    }
}

impl Serialize for DeviceAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeviceAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DeviceAddress::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ---- parsers ----

fn scheme(input: &str) -> IResult<&str, Scheme> {
    alt((
        value(Scheme::Sips, tag_no_case("sips:")),
        value(Scheme::Sip, tag_no_case("sip:")),
    ))(input)
}

fn user(input: &str) -> IResult<&str, &str> {
    terminated(take_while1(|c: char| !"@;<>:\" ".contains(c)), char('@'))(input)
}

fn host(input: &str) -> IResult<&str, String> {
    alt((
        map(delimited(char('['), take_while1(|c: char| c != ']'), char(']')), |h: &str| {
            h.to_ascii_lowercase()
        }),
        map(
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'),
            |h: &str| h.to_ascii_lowercase(),
        ),
    ))(input)
}

fn port(input: &str) -> IResult<&str, u16> {
    preceded(char(':'), map_res(digit1, |p: &str| p.parse::<u16>()))(input)
}

fn param(input: &str) -> IResult<&str, (String, Option<String>)> {
    map(
        preceded(
            char(';'),
            pair(
                take_while1(|c: char| !"=;>? ".contains(c)),
                opt(preceded(char('='), take_while(|c: char| !";>? ".contains(c)))),
            ),
        ),
        |(k, v): (&str, Option<&str>)| (k.to_string(), v.map(str::to_string)),
    )(input)
}

fn addr_spec(input: &str) -> IResult<&str, DeviceAddress> {
    map(
        tuple((scheme, opt(user), host, opt(port), many0(param))),
        |(scheme, user, host, port, params)| DeviceAddress {
            scheme,
            display_name: None,
            user: user.map(str::to_string),
            host,
            port,
            params,
        },
    )(input)
}

// quoted-string with `\x` quoted-pairs
fn quoted_string(input: &str) -> IResult<&str, String> {
    map(
        delimited(
            char('"'),
            many0(alt((preceded(char('\\'), anychar), none_of("\"\\")))),
            char('"'),
        ),
        |chars: Vec<char>| chars.into_iter().collect(),
    )(input)
}

fn display_name(input: &str) -> IResult<&str, String> {
    alt((
        quoted_string,
        map(take_while1(|c: char| c != '<' && c != '"'), |s: &str| s.trim().to_string()),
    ))(input)
}

fn name_addr(input: &str) -> IResult<&str, DeviceAddress> {
    map(
        tuple((
            opt(display_name),
            multispace0,
            delimited(char('<'), addr_spec, char('>')),
        )),
        |(name, _, mut address)| {
            address.display_name = name.filter(|n| !n.is_empty());
            address
        },
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addr_spec() {
        let addr = DeviceAddress::parse("sip:alice@Example.org:5070;transport=udp;lr").unwrap();
        assert_eq!(addr.scheme(), Scheme::Sip);
        assert_eq!(addr.user(), Some("alice"));
        assert_eq!(addr.host(), "example.org");
        assert_eq!(addr.port(), Some(5070));
        assert_eq!(addr.param("transport"), Some(Some("udp")));
        assert_eq!(addr.param("lr"), Some(None));
        assert_eq!(addr.to_string(), "sip:alice@example.org:5070;transport=udp;lr");
    }

    #[test]
    fn test_parse_name_addr() {
        let addr = DeviceAddress::parse("\"Alice Phone\" <sips:alice@example.org;gr=urn:uuid:1234>").unwrap();
        assert!(addr.is_secure());
        assert_eq!(addr.display_name(), Some("Alice Phone"));
        assert_eq!(addr.gruu(), Some("urn:uuid:1234"));
        assert_eq!(addr.to_string(), "\"Alice Phone\" <sips:alice@example.org;gr=urn:uuid:1234>");

        let unquoted = DeviceAddress::parse("Bob <sip:bob@example.org>").unwrap();
        assert_eq!(unquoted.display_name(), Some("Bob"));

        let bare = DeviceAddress::parse("<sip:conference.example.org>").unwrap();
        assert_eq!(bare.user(), None);
        assert_eq!(bare.display_name(), None);
    }

    #[test]
    fn test_parse_ipv6_host() {
        let addr = DeviceAddress::parse("sip:carol@[2001:DB8::1]:5060").unwrap();
        assert_eq!(addr.host(), "2001:db8::1");
        assert_eq!(addr.as_string_uri_only(), "sip:carol@[2001:db8::1]:5060");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            DeviceAddress::parse("   "),
            Err(ParticipantError::InvalidAddress { .. })
        ));
        assert!(DeviceAddress::parse("tel:+15551234").is_err());
        assert!(DeviceAddress::parse("sip:alice@").is_err());
        assert!(DeviceAddress::parse("sip:alice@example.org:port").is_err());
        assert!(DeviceAddress::parse("sip:alice@example.org:99999").is_err());
    }

    #[test]
    fn test_weak_equal_ignores_params() {
        let a = DeviceAddress::parse("sip:alice@example.org;gr=one").unwrap();
        let b = DeviceAddress::parse("\"Alice\" <sip:alice@example.org;gr=two>").unwrap();
        let c = DeviceAddress::parse("sip:alice@example.org:5080").unwrap();
        assert!(a.weak_equal(&b));
        assert_ne!(a, b);
        assert!(!a.weak_equal(&c));
    }

    #[test]
    fn test_builder_and_serde() {
        let addr = DeviceAddress::sip("dave", "example.org").with_port(5061).with_gruu("tablet");
        assert_eq!(addr.to_string(), "sip:dave@example.org:5061;gr=tablet");

        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"sip:dave@example.org:5061;gr=tablet\"");
        let back: DeviceAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_display_name_with_quotes_and_backslash() {
        let addr = DeviceAddress::sip("alice", "example.org").with_display_name("Al \"the phone\" C:\\work");
        assert_eq!(
            addr.to_string(),
            r#""Al \"the phone\" C:\\work" <sip:alice@example.org>"#
        );

        let parsed: DeviceAddress = addr.to_string().parse().unwrap();
        assert_eq!(parsed.display_name(), Some("Al \"the phone\" C:\\work"));
        assert_eq!(parsed, addr);

        let json = serde_json::to_string(&addr).unwrap();
        let back: DeviceAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);

        // Unterminated quoted-pair
        assert!(DeviceAddress::parse("\"Al \\\" <sip:alice@example.org>").is_err());
    }
}
