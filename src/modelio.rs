//! Robust saving/loading of model parameters.
//!
//! # `.bnrm` Normalizer Format
//!
//! A compact little-endian binary image of a [`Normalizer`]:
//!
//! ```text
//! ┌───────────┬────────────┬──────────────┬───────────┬────────────────────┬──────────────────────┐
//! │ "bnrm"[4] │ u8 version │ u8 hasOffset │ u64: dim  │ [f64; dim] diagonal│ [f64; dim] offset    │
//! │           │            │              │           │                    │ (only if hasOffset)  │
//! └───────────┴────────────┴──────────────┴───────────┴────────────────────┴──────────────────────┘
//! ```
//!
//! Decoded data goes through `briny`'s [`Validate`] gate before a model is
//! built from it: the flag must be `0` or `1`, the lengths must agree and
//! every value must be finite.
//!
//! # Example
//!
//! ```rust
//! use briny_blas::models::Normalizer;
//! use briny_blas::modelio::{read_normalizer, write_normalizer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = Normalizer::with_offset(vec![2.0, 0.5], vec![1.0, -1.0])?;
//!
//!     let mut bytes = Vec::new();
//!     write_normalizer(&mut bytes, &model)?;
//!     let back = read_normalizer(&mut bytes.as_slice())?;
//!     assert_eq!(back, model);
//!
//!     Ok(())
//! }
//! ```

use crate::models::Normalizer;
use briny::prelude::*;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const BNRM_MAGIC: &[u8; 4] = b"bnrm";
const BNRM_VERSION: u8 = 1;

/// Decoded, not yet trusted, normalizer image.
struct PackedNormalizer {
    has_offset: u8,
    diagonal: Vec<f64>,
    offset: Vec<f64>,
}

impl Validate for PackedNormalizer {
    fn validate(&self) -> Result<(), ValidationError> {
        let expected_offset = match self.has_offset {
            0 => 0,
            1 => self.diagonal.len(),
            _ => return Err(ValidationError),
        };
        if self.offset.len() != expected_offset {
            return Err(ValidationError);
        }
        if !self.diagonal.iter().chain(&self.offset).all(|v| v.is_finite()) {
            return Err(ValidationError);
        }
        Ok(())
    }
}

/// Encodes a normalizer into any writer.
///
/// # Errors
/// Returns an error if the writer fails.
pub fn write_normalizer<W: Write>(out: &mut W, model: &Normalizer) -> Result<(), Box<dyn Error>> {
    out.write_all(BNRM_MAGIC)?;
    out.write_all(&[BNRM_VERSION, u8::from(model.has_offset())])?;
    out.write_all(&(model.input_size() as u64).to_le_bytes())?;
    for &v in model.diagonal().iter().chain(model.offset()) {
        out.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}

fn read_f64s<R: Read>(input: &mut R, count: usize) -> Result<Vec<f64>, Box<dyn Error>> {
    let mut buf8 = [0u8; 8];
    // the count is untrusted until the data is actually there
    let mut values = Vec::with_capacity(count.min(1 << 16));
    for _ in 0..count {
        input.read_exact(&mut buf8)?;
        values.push(f64::from_le_bytes(buf8));
    }
    Ok(values)
}

/// Decodes a normalizer from any reader.
///
/// # Errors
/// Fails on a wrong magic header or version, on truncated input, or when the
/// decoded parameters do not validate.
pub fn read_normalizer<R: Read>(input: &mut R) -> Result<Normalizer, Box<dyn Error>> {
    let mut magic = [0u8; 4];
    input.read_exact(&mut magic)?;
    if &magic != BNRM_MAGIC {
        return Err("invalid magic header".into());
    }

    let mut head = [0u8; 2];
    input.read_exact(&mut head)?;
    let [version, has_offset] = head;
    if version != BNRM_VERSION {
        return Err(format!("unsupported normalizer version {version}").into());
    }

    let mut buf8 = [0u8; 8];
    input.read_exact(&mut buf8)?;
    let dim = usize::try_from(u64::from_le_bytes(buf8))?;

    let diagonal = read_f64s(input, dim)?;
    let offset = if has_offset == 1 { read_f64s(input, dim)? } else { Vec::new() };

    let trusted = TrustedData::new(PackedNormalizer {
        has_offset,
        diagonal,
        offset,
    })?;
    let packed = trusted.into_inner();
    let model = if packed.has_offset == 1 {
        Normalizer::with_offset(packed.diagonal, packed.offset)?
    } else {
        Normalizer::from_diagonal(packed.diagonal)
    };
    log::debug!(
        "loaded normalizer: dimension={} offset={}",
        model.input_size(),
        model.has_offset()
    );
    Ok(model)
}

/// Saves a normalizer to a file.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn save_normalizer(path: impl AsRef<Path>, model: &Normalizer) -> Result<(), Box<dyn Error>> {
    let mut file = BufWriter::new(File::create(path)?);
    write_normalizer(&mut file, model)?;
    file.flush()?;
    Ok(())
}

/// Loads a normalizer from a file written by [`save_normalizer`].
///
/// # Errors
/// See [`read_normalizer`]; also fails if the file cannot be opened.
pub fn load_normalizer(path: impl AsRef<Path>) -> Result<Normalizer, Box<dyn Error>> {
    let mut file = BufReader::new(File::open(path)?);
    read_normalizer(&mut file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(model: &Normalizer) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_normalizer(&mut bytes, model).unwrap();
        bytes
    }

    #[test]
    fn layout() {
        let bytes = encode(&Normalizer::from_diagonal(vec![1.5]));
        assert_eq!(&bytes[..4], b"bnrm");
        assert_eq!(bytes[4..6], [1, 0]);
        assert_eq!(bytes[6..14], 1u64.to_le_bytes());
        assert_eq!(bytes[14..], 1.5f64.to_le_bytes());
    }

    #[test]
    fn rejects_corruption() {
        let good = encode(&Normalizer::with_offset(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap());

        let mut bad_magic = good.clone();
        bad_magic[0] = b'x';
        assert!(read_normalizer(&mut bad_magic.as_slice()).is_err());

        let mut bad_flag = good.clone();
        bad_flag[5] = 7;
        assert!(read_normalizer(&mut bad_flag.as_slice()).is_err());

        let truncated = &good[..good.len() - 1];
        assert!(read_normalizer(&mut &truncated[..]).is_err());

        let mut nan = good.clone();
        nan[14..22].copy_from_slice(&f64::NAN.to_le_bytes());
        assert!(read_normalizer(&mut nan.as_slice()).is_err());
    }
}
