//! Reserved-header padding for stored pictures.
//!
//! The reference Northwind data stores category pictures and employee photos
//! behind a 78-byte legacy container header. The rest of the system only
//! deals with the payload, so the header is added on write and stripped on
//! read. Its contents are never interpreted; new buffers get a zeroed prefix.

use thiserror::Error;

/// Number of leading bytes reserved ahead of the payload.
pub const RESERVED_HEADER_LEN: usize = 78;

/// Errors from encoding or decoding a padded buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobError {
    /// The payload is larger than the configured maximum.
    #[error("payload of {len} bytes exceeds the maximum of {max} bytes")]
    TooLarge {
        /// Size of the payload.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A non-empty stored buffer is shorter than the reserved header.
    #[error("stored blob of {len} bytes is shorter than the {}-byte header", RESERVED_HEADER_LEN)]
    Truncated {
        /// Size of the stored buffer.
        len: usize,
    },
}

/// Encoder/decoder for reserved-header buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedHeaderCodec {
    max_payload: usize,
}

impl ReservedHeaderCodec {
    /// Create a codec that accepts payloads of at most `max_payload` bytes.
    #[must_use]
    pub const fn new(max_payload: usize) -> Self {
        Self { max_payload }
    }

    /// Largest payload [`encode`](Self::encode) accepts.
    #[must_use]
    pub const fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Pad `payload` for storage.
    ///
    /// # Errors
    ///
    /// Returns `BlobError::TooLarge` if `payload` exceeds the maximum size.
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>, BlobError> {
        if payload.len() > self.max_payload {
            return Err(BlobError::TooLarge {
                len: payload.len(),
                max: self.max_payload,
            });
        }

        let mut stored = vec![0_u8; RESERVED_HEADER_LEN + payload.len()];
        if let Some(body) = stored.get_mut(RESERVED_HEADER_LEN..) {
            body.copy_from_slice(payload);
        }
        Ok(stored)
    }

    /// Strip the reserved header from a stored buffer.
    ///
    /// A missing or zero-length buffer decodes to an empty payload.
    ///
    /// # Errors
    ///
    /// Returns `BlobError::Truncated` if a non-empty buffer is shorter than
    /// the header.
    pub fn decode(stored: Option<&[u8]>) -> Result<&[u8], BlobError> {
        match stored {
            None | Some([]) => Ok(&[]),
            Some(bytes) => bytes
                .get(RESERVED_HEADER_LEN..)
                .ok_or(BlobError::Truncated { len: bytes.len() }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| u8::try_from(i % 251).unwrap()).collect()
    }

    #[test]
    fn test_encode_pads_with_zeroed_header() {
        let codec = ReservedHeaderCodec::new(1024);
        let payload = sample(100);

        let stored = codec.encode(&payload).unwrap();

        assert_eq!(stored.len(), 178);
        assert!(stored[..RESERVED_HEADER_LEN].iter().all(|&b| b == 0));
        assert_eq!(&stored[RESERVED_HEADER_LEN..], payload.as_slice());
    }

    #[test]
    fn test_round_trip() {
        let codec = ReservedHeaderCodec::new(1024);
        let payload = sample(100);

        let stored = codec.encode(&payload).unwrap();
        let decoded = ReservedHeaderCodec::decode(Some(stored.as_slice())).unwrap();

        assert_eq!(decoded, payload.as_slice());
    }

    #[test]
    fn test_payload_at_limit_is_accepted() {
        let codec = ReservedHeaderCodec::new(16);
        assert_eq!(codec.encode(&sample(16)).unwrap().len(), 94);
    }

    #[test]
    fn test_oversized_payload_is_rejected() {
        let codec = ReservedHeaderCodec::new(1024);
        let result = codec.encode(&sample(2000));
        assert_eq!(
            result,
            Err(BlobError::TooLarge {
                len: 2000,
                max: 1024
            })
        );
    }

    #[test]
    fn test_decode_absent_is_empty() {
        assert!(ReservedHeaderCodec::decode(None).unwrap().is_empty());
        assert!(ReservedHeaderCodec::decode(Some(&[][..])).unwrap().is_empty());
    }

    #[test]
    fn test_empty_payload_round_trip() {
        let codec = ReservedHeaderCodec::new(0);
        let stored = codec.encode(&[]).unwrap();

        assert_eq!(stored.len(), RESERVED_HEADER_LEN);
        assert!(ReservedHeaderCodec::decode(Some(stored.as_slice())).unwrap().is_empty());
    }

    #[test]
    fn test_decode_keeps_legacy_header_untouched() {
        let mut stored = vec![0x15_u8; RESERVED_HEADER_LEN];
        stored.extend_from_slice(b"BM-payload");

        assert_eq!(
            ReservedHeaderCodec::decode(Some(stored.as_slice())).unwrap(),
            b"BM-payload"
        );
    }

    #[test]
    fn test_decode_truncated_buffer() {
        let stored = vec![1_u8; 40];
        assert_eq!(
            ReservedHeaderCodec::decode(Some(stored.as_slice())),
            Err(BlobError::Truncated { len: 40 })
        );
    }
}
