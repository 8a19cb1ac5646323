/// Address format checks for non-EVM chains that encode account
/// addresses in base58 or bech32.
pub trait AddressFormat {
  /// Solana addresses are base58 encoded ed25519 public keys.
  fn is_solana_address(&self) -> bool;

  /// Bitcoin addresses, either segwit (bech32) or legacy base58check.
  fn is_bitcoin_address(&self) -> bool;
}

impl AddressFormat for str {
  fn is_solana_address(&self) -> bool {
    let mut bytes = [0u8; 32];
    matches!(bs58::decode(self).into(&mut bytes), Ok(32))
  }

  fn is_bitcoin_address(&self) -> bool {
    let lower = self.to_ascii_lowercase();
    if lower.starts_with("bc1") || lower.starts_with("tb1") {
      return lower.len() >= 14 && lower.len() <= 74;
    }

    // legacy p2pkh / p2sh: version byte + 20 byte hash + 4 byte checksum
    matches!(self.chars().next(), Some('1' | '3' | 'm' | 'n' | '2'))
      && matches!(bs58::decode(self).into_vec(), Ok(v) if v.len() == 25)
  }
}

#[cfg(test)]
mod tests {
  use super::AddressFormat;

  #[test]
  fn classifies_non_evm_addresses() {
    assert!("So11111111111111111111111111111111111111112".is_solana_address());
    assert!("11111111111111111111111111111111".is_solana_address());
    assert!(!"0x0dcd5d886577d5081b0c52e242ef29e70be3e7bc".is_solana_address());

    assert!("bc1qwl8399fz829uqvqly9tcatgrgtwp3udnhxfq4k".is_bitcoin_address());
    assert!("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2".is_bitcoin_address());
    assert!(
      !"So11111111111111111111111111111111111111112".is_bitcoin_address()
    );
  }
}
