//! ECDSA signature values and their encodings

use ecsign_algorithms::CurveParams;
use ecsign_api::{error::validate, Error, Result};

/// Largest supported scalar width in bytes
const MAX_COMPONENT_LEN: usize = 32;

/// ECDSA signature (r, s)
///
/// Both components are fixed-width big-endian integers of the curve's scalar
/// width. They are stored as decoded, not range-checked, so verification can
/// reject out-of-range values with `Ok(false)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    r: Vec<u8>,
    s: Vec<u8>,
}

impl Signature {
    /// Build from components of equal width
    pub fn new(r: Vec<u8>, s: Vec<u8>) -> Result<Self> {
        validate::encoding(
            !r.is_empty() && r.len() == s.len(),
            "ECDSA signature",
            "r and s must be non-empty and of equal width",
        )?;
        validate::max_length("ECDSA signature component", r.len(), MAX_COMPONENT_LEN)?;
        Ok(Self { r, s })
    }

    /// The r component
    pub fn r(&self) -> &[u8] {
        &self.r
    }

    /// The s component
    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /// Width of each component
    pub fn component_len(&self) -> usize {
        self.r.len()
    }

    /// Fixed-width r ∥ s
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 * self.r.len());
        out.extend_from_slice(&self.r);
        out.extend_from_slice(&self.s);
        out
    }

    /// Parse r ∥ s for `curve`
    pub fn from_bytes(curve: &CurveParams, bytes: &[u8]) -> Result<Self> {
        let width = curve.scalar_size();
        if bytes.len() != 2 * width {
            return Err(Error::encoding(
                "ECDSA signature",
                format!("expected {} bytes, got {}", 2 * width, bytes.len()),
            ));
        }
        let (r, s) = bytes.split_at(width);
        Self::new(r.to_vec(), s.to_vec())
    }

    /// ASN.1 DER `SEQUENCE { INTEGER r, INTEGER s }`
    pub fn to_der(&self) -> Vec<u8> {
        let r = encode_integer(&self.r);
        let s = encode_integer(&self.s);

        let mut body = Vec::with_capacity(r.len() + s.len());
        body.extend_from_slice(&r);
        body.extend_from_slice(&s);

        let mut der = vec![0x30];
        encode_length(body.len(), &mut der);
        der.extend_from_slice(&body);
        der
    }

    /// Parse strict DER, left-padding both integers to the curve's width
    pub fn from_der(curve: &CurveParams, der: &[u8]) -> Result<Self> {
        let width = curve.scalar_size();
        let mut reader = DerReader { bytes: der, pos: 0 };

        reader.expect_tag(0x30, "SEQUENCE")?;
        let len = reader.length()?;
        validate::encoding(
            len == reader.remaining(),
            "ECDSA DER parsing",
            "SEQUENCE length does not match input",
        )?;

        let r = reader.integer(width)?;
        let s = reader.integer(width)?;
        validate::encoding(
            reader.remaining() == 0,
            "ECDSA DER parsing",
            "trailing data after signature",
        )?;

        Self::new(r, s)
    }

    /// Does s lie in the lower half, s ≤ n/2?
    ///
    /// An s that is not a valid scalar for `curve` counts as high.
    pub fn is_low_s(&self, curve: &CurveParams) -> bool {
        match curve.scalars().from_bytes(&self.s) {
            Ok(s) => !curve.scalars().is_high(&s),
            Err(_) => false,
        }
    }

    /// The equivalent signature (r, n - s) when s is high
    pub fn normalize_s(&self, curve: &CurveParams) -> Result<Self> {
        let zq = curve.scalars();
        validate::length("ECDSA signature component", self.s.len(), zq.byte_len())?;
        let s = zq.from_bytes(&self.s).map_err(|_| {
            Error::encoding("ECDSA signature", "s is not less than the group order")
        })?;
        if !zq.is_high(&s) {
            return Ok(self.clone());
        }
        Ok(Self {
            r: self.r.clone(),
            s: zq.to_bytes(&zq.negate(&s)),
        })
    }
}

/// Minimal two's-complement content octets for an unsigned integer
fn encode_integer(bytes: &[u8]) -> Vec<u8> {
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len().saturating_sub(1));
    let trimmed = &bytes[start..];

    let mut out = vec![0x02];
    let pad = trimmed.first().map_or(true, |&b| b & 0x80 != 0);
    let content_len = trimmed.len() + usize::from(pad);
    encode_length(content_len, &mut out);
    if pad {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
    out
}

fn encode_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
    } else {
        let bytes = len.to_be_bytes();
        let skip = bytes.iter().take_while(|&&b| b == 0).count();
        out.push(0x80 | (bytes.len() - skip) as u8);
        out.extend_from_slice(&bytes[skip..]);
    }
}

struct DerReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DerReader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn byte(&mut self) -> Result<u8> {
        let b = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| Error::encoding("ECDSA DER parsing", "unexpected end of input"))?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        validate::encoding(
            len <= self.remaining(),
            "ECDSA DER parsing",
            "length exceeds input",
        )?;
        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn expect_tag(&mut self, tag: u8, what: &'static str) -> Result<()> {
        if self.byte()? != tag {
            return Err(Error::encoding(
                "ECDSA DER parsing",
                format!("expected {} tag", what),
            ));
        }
        Ok(())
    }

    fn length(&mut self) -> Result<usize> {
        let first = self.byte()?;
        if first < 0x80 {
            return Ok(first as usize);
        }
        let count = (first & 0x7F) as usize;
        validate::encoding(
            (1..=2).contains(&count),
            "ECDSA DER parsing",
            "unsupported length form",
        )?;
        let mut len = 0usize;
        for &b in self.take(count)? {
            len = (len << 8) | b as usize;
        }
        validate::encoding(
            len >= 0x80 && (count == 1 || len > 0xFF),
            "ECDSA DER parsing",
            "length not minimally encoded",
        )?;
        Ok(len)
    }

    /// One INTEGER, returned as exactly `width` big-endian bytes
    fn integer(&mut self, width: usize) -> Result<Vec<u8>> {
        self.expect_tag(0x02, "INTEGER")?;
        let len = self.length()?;
        let content = self.take(len)?;

        validate::encoding(!content.is_empty(), "ECDSA DER parsing", "empty INTEGER")?;
        validate::encoding(
            content[0] & 0x80 == 0,
            "ECDSA DER parsing",
            "negative INTEGER",
        )?;
        validate::encoding(
            !(content.len() > 1 && content[0] == 0 && content[1] & 0x80 == 0),
            "ECDSA DER parsing",
            "INTEGER not minimally encoded",
        )?;

        let magnitude = if content[0] == 0 { &content[1..] } else { content };
        validate::encoding(
            magnitude.len() <= width,
            "ECDSA DER parsing",
            "INTEGER wider than the curve order",
        )?;

        let mut out = vec![0u8; width];
        out[width - magnitude.len()..].copy_from_slice(magnitude);
        Ok(out)
    }
}
