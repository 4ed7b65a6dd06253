//! SEC1 point encodings

use ecsign_common::ct_is_zero;

use super::curve::CurveParams;
use super::point::{AffinePoint, PointFormat};
use crate::error::{validate, Error, Result};

impl CurveParams {
    /// Length of 0x04 ∥ x ∥ y
    pub fn uncompressed_len(&self) -> usize {
        1 + 2 * self.field_size()
    }

    /// Length of 0x02/0x03 ∥ x
    pub fn compressed_len(&self) -> usize {
        1 + self.field_size()
    }

    /// Affine coordinates as fixed-width big-endian bytes
    pub fn coordinates(&self, p: &AffinePoint) -> Option<(Vec<u8>, Vec<u8>)> {
        if p.is_identity() {
            return None;
        }
        Some((self.field().to_bytes(&p.x), self.field().to_bytes(&p.y)))
    }

    /// Build a point from fixed-width coordinates, checking the curve equation
    pub fn point_from_coordinates(&self, x: &[u8], y: &[u8]) -> Result<AffinePoint> {
        validate::length("point x-coordinate", x.len(), self.field_size())?;
        validate::length("point y-coordinate", y.len(), self.field_size())?;
        let fp = self.field();
        let x = fp.from_bytes(x).map_err(|_| Error::InvalidPoint {
            context: "point coordinates",
            reason: "x-coordinate not less than p",
        })?;
        let y = fp.from_bytes(y).map_err(|_| Error::InvalidPoint {
            context: "point coordinates",
            reason: "y-coordinate not less than p",
        })?;
        validate::point(
            self.equation_holds(&x, &y),
            "point coordinates",
            "point is not on the curve",
        )?;
        Ok(AffinePoint::from_coordinates_unchecked(x, y))
    }

    /// Detect serialized point format
    pub fn detect_format(&self, bytes: &[u8]) -> Result<PointFormat> {
        if bytes.is_empty() {
            return Err(Error::InvalidPoint {
                context: "point decoding",
                reason: "empty encoding",
            });
        }
        let uncompressed = self.uncompressed_len();
        let compressed = self.compressed_len();
        match (bytes[0], bytes.len()) {
            (0x00, len) if len == uncompressed || len == compressed => {
                if bool::from(ct_is_zero(bytes)) {
                    Ok(PointFormat::Identity)
                } else {
                    Err(Error::InvalidPoint {
                        context: "point decoding",
                        reason: "invalid identity encoding",
                    })
                }
            }
            (0x04, len) if len == uncompressed => Ok(PointFormat::Uncompressed),
            (0x02 | 0x03, len) if len == compressed => Ok(PointFormat::Compressed),
            _ => Err(Error::InvalidPoint {
                context: "point decoding",
                reason: "unknown or malformed format",
            }),
        }
    }

    /// Serialize as 0x04 ∥ x ∥ y; the identity becomes all zeros
    pub fn serialize_uncompressed(&self, p: &AffinePoint) -> Vec<u8> {
        let mut out = vec![0u8; self.uncompressed_len()];
        if let Some((x, y)) = self.coordinates(p) {
            out[0] = 0x04;
            out[1..1 + x.len()].copy_from_slice(&x);
            out[1 + x.len()..].copy_from_slice(&y);
        }
        out
    }

    /// Serialize as 0x02/0x03 ∥ x; the identity becomes all zeros
    pub fn serialize_compressed(&self, p: &AffinePoint) -> Vec<u8> {
        let mut out = vec![0u8; self.compressed_len()];
        if let Some((x, _)) = self.coordinates(p) {
            out[0] = if self.field().is_odd(&p.y) { 0x03 } else { 0x02 };
            out[1..].copy_from_slice(&x);
        }
        out
    }

    /// Decode any SEC1 form, validating that the point lies on the curve
    pub fn deserialize_point(&self, bytes: &[u8]) -> Result<AffinePoint> {
        let size = self.field_size();
        match self.detect_format(bytes)? {
            PointFormat::Identity => Ok(AffinePoint::identity()),
            PointFormat::Uncompressed => {
                self.point_from_coordinates(&bytes[1..1 + size], &bytes[1 + size..])
            }
            PointFormat::Compressed => self.decompress(bytes[0] == 0x03, &bytes[1..]),
        }
    }

    fn decompress(&self, y_odd: bool, x_bytes: &[u8]) -> Result<AffinePoint> {
        let fp = self.field();
        let x = fp.from_bytes(x_bytes).map_err(|_| Error::InvalidPoint {
            context: "point decompression",
            reason: "x-coordinate not less than p",
        })?;
        let y = fp.sqrt(&self.rhs(&x))?.ok_or(Error::InvalidPoint {
            context: "point decompression",
            reason: "x-coordinate is not on the curve",
        })?;
        let y = if fp.is_odd(&y) == y_odd {
            y
        } else {
            fp.negate(&y)
        };
        // y = 0 has no odd twin
        validate::point(
            fp.is_odd(&y) == y_odd,
            "point decompression",
            "no root with the requested parity",
        )?;
        Ok(AffinePoint::from_coordinates_unchecked(x, y))
    }
}
