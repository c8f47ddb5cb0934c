//! Base64 variable-length quantities as used by the `mappings` field of a source map.
//!
//! The sign is stored in the lowest bit of the first digit; each digit carries five data bits
//! plus a continuation bit (`0x20`), least significant group first.

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const CONTINUATION: u32 = 0x20;
const DATA_MASK: u32 = 0x1f;

pub fn encode(value: i64) -> String {
  let mut out = String::new();
  encode_into(&mut out, value);
  out
}

pub fn encode_into(out: &mut String, value: i64) {
  let mut rest = if value < 0 {
    (value.unsigned_abs() << 1) | 1
  } else {
    (value as u64) << 1
  };
  loop {
    let mut digit = (rest & DATA_MASK as u64) as u32;
    rest >>= 5;
    if rest > 0 {
      digit |= CONTINUATION;
    };
    out.push(BASE64[digit as usize] as char);
    if rest == 0 {
      break;
    };
  }
}

fn digit_value(byte: u8) -> Option<u32> {
  let value = match byte {
    b'A'..=b'Z' => byte - b'A',
    b'a'..=b'z' => byte - b'a' + 26,
    b'0'..=b'9' => byte - b'0' + 52,
    b'+' => 62,
    b'/' => 63,
    _ => return None,
  };
  Some(value as u32)
}

/// Decodes the first quantity in `input`, returning it and the number of bytes consumed. None
/// if `input` is empty, ends mid-quantity or contains a non-Base64 byte.
pub fn decode(input: &str) -> Option<(i64, usize)> {
  let mut raw = 0u64;
  let mut shift = 0u32;
  for (i, &byte) in input.as_bytes().iter().enumerate() {
    let digit = digit_value(byte)?;
    raw = raw.checked_add(((digit & DATA_MASK) as u64).checked_shl(shift)?)?;
    shift += 5;
    if digit & CONTINUATION == 0 {
      let magnitude = (raw >> 1) as i64;
      let value = if raw & 1 == 1 { -magnitude } else { magnitude };
      return Some((value, i + 1));
    };
    if shift >= 64 {
      return None;
    };
  }
  None
}

/// Decodes every quantity of a segment such as `AAgBC`.
pub fn decode_all(mut input: &str) -> Option<Vec<i64>> {
  let mut values = Vec::new();
  while !input.is_empty() {
    let (value, consumed) = decode(input)?;
    values.push(value);
    input = &input[consumed..];
  }
  Some(values)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encodes_small_values() {
    assert_eq!(encode(0), "A");
    assert_eq!(encode(1), "C");
    assert_eq!(encode(-1), "D");
    assert_eq!(encode(15), "e");
    assert_eq!(encode(-15), "f");
    assert_eq!(encode(16), "gB");
    assert_eq!(encode(1000), "w+B");
  }

  #[test]
  fn decodes_what_it_encodes() {
    for value in [-100_000, -33, -16, -1, 0, 1, 16, 31, 32, 100_000, i32::MAX as i64] {
      let encoded = encode(value);
      assert_eq!(decode(&encoded), Some((value, encoded.len())), "{value}");
    }
  }

  #[test]
  fn rejects_truncated_or_invalid_input() {
    assert_eq!(decode(""), None);
    assert_eq!(decode("g"), None);
    assert_eq!(decode("!"), None);
    assert_eq!(decode_all("AAgBC"), Some(vec![0, 0, 16, 1]));
  }
}
