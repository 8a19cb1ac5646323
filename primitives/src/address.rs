use {
  serde::{Deserialize, Serialize},
  std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    ops::Deref,
    str::FromStr,
  },
  thiserror::Error,
};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
  #[error("Address is empty")]
  Empty,

  #[error("Address '{0}' contains whitespace")]
  Whitespace(String),

  #[error("Hex address '{0}' must have exactly 40 hex digits after 0x")]
  InvalidHexLength(String),

  #[error("Hex address '{0}' is not valid hex: {1}")]
  InvalidHex(String, hex::FromHexError),
}

/// Represents the address of a wallet account.
///
/// EVM accounts use `0x` prefixed, 20 byte hex addresses. Those are
/// compared in their canonical form, which ignores ASCII case, so an
/// EIP-55 checksummed address and its lowercase form are the same key
/// in every map and set.
///
/// Non-EVM accounts (solana, bitcoin, etc.) carry their native string
/// encoding and are compared exactly.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
  /// Parses and validates an address string.
  pub fn new(value: impl Into<String>) -> Result<Self, Error> {
    let value = value.into();
    if value.is_empty() {
      return Err(Error::Empty);
    }

    if value.chars().any(char::is_whitespace) {
      return Err(Error::Whitespace(value));
    }

    if let Some(digits) = strip_hex_prefix(&value) {
      if digits.len() != 40 {
        return Err(Error::InvalidHexLength(value));
      }
      if let Err(e) = hex::decode(digits) {
        return Err(Error::InvalidHex(value, e));
      }
    }

    Ok(Self(value))
  }

  /// True for `0x` prefixed hex addresses used by EVM chains.
  pub fn is_hex(&self) -> bool {
    strip_hex_prefix(&self.0).is_some()
  }

  /// The canonical form of the address, lowercase for hex addresses
  /// and unchanged otherwise.
  pub fn canonical(&self) -> String {
    if self.is_hex() {
      self.0.to_ascii_lowercase()
    } else {
      self.0.clone()
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  fn canonical_bytes(&self) -> impl Iterator<Item = u8> + '_ {
    let fold = self.is_hex();
    self.0.bytes().map(move |b| match fold {
      true => b.to_ascii_lowercase(),
      false => b,
    })
  }
}

fn strip_hex_prefix(value: &str) -> Option<&str> {
  value
    .strip_prefix("0x")
    .or_else(|| value.strip_prefix("0X"))
}

impl PartialEq for Address {
  fn eq(&self, other: &Self) -> bool {
    match (self.is_hex(), other.is_hex()) {
      (true, true) => self.0.eq_ignore_ascii_case(&other.0),
      (false, false) => self.0 == other.0,
      _ => false,
    }
  }
}

impl Eq for Address {}

impl Hash for Address {
  fn hash<H: Hasher>(&self, state: &mut H) {
    for b in self.canonical_bytes() {
      state.write_u8(b);
    }
    state.write_u8(0xff);
  }
}

impl PartialOrd for Address {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Address {
  fn cmp(&self, other: &Self) -> Ordering {
    self.canonical_bytes().cmp(other.canonical_bytes())
  }
}

impl AsRef<str> for Address {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl Deref for Address {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "address({})", self.0)
  }
}

impl From<Address> for String {
  fn from(addr: Address) -> Self {
    addr.0
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::new(s)
  }
}

impl TryFrom<&str> for Address {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

impl TryFrom<String> for Address {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}
