//! Pixel dimensions from image file headers.
//!
//! PNG: [8-byte signature][len u32][type "IHDR"][width u32][height u32], all
//! big-endian. JPEG: marker segments after SOI; any SOF marker carries
//! [len u16][precision u8][height u16][width u16].

use anyhow::{Context, Result, anyhow};
use byteorder::{BigEndian, ReadBytesExt};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Reads `(width, height)` from a PNG or JPEG header.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a recognized image.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    let file =
        File::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut signature = [0u8; 2];
    reader
        .read_exact(&mut signature)
        .with_context(|| format!("Failed to read image header: {}", path.display()))?;
    reader.seek(SeekFrom::Start(0))?;

    match signature {
        [0x89, b'P'] => png_dimensions(&mut reader),
        [0xFF, 0xD8] => jpeg_dimensions(&mut reader),
        _ => Err(anyhow!("unrecognized image format: {}", path.display())),
    }
}

fn png_dimensions<R: Read>(reader: &mut R) -> Result<(u32, u32)> {
    let mut signature = [0u8; 8];
    reader.read_exact(&mut signature)?;
    if signature != PNG_SIGNATURE {
        return Err(anyhow!("bad PNG signature"));
    }

    let _chunk_len = reader.read_u32::<BigEndian>()?;
    let mut chunk_type = [0u8; 4];
    reader.read_exact(&mut chunk_type)?;
    if &chunk_type != b"IHDR" {
        return Err(anyhow!("PNG does not start with an IHDR chunk"));
    }

    let width = reader.read_u32::<BigEndian>()?;
    let height = reader.read_u32::<BigEndian>()?;
    Ok((width, height))
}

fn jpeg_dimensions<R: Read + Seek>(reader: &mut R) -> Result<(u32, u32)> {
    let soi = reader.read_u16::<BigEndian>()?;
    if soi != 0xFFD8 {
        return Err(anyhow!("bad JPEG start-of-image marker"));
    }

    loop {
        let mut marker = reader.read_u8()?;
        if marker != 0xFF {
            return Err(anyhow!("malformed JPEG marker stream"));
        }
        // Fill bytes before a marker are legal.
        while marker == 0xFF {
            marker = reader.read_u8()?;
        }

        match marker {
            // SOF0..SOF15 minus the arithmetic-coding tables
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                let _segment_len = reader.read_u16::<BigEndian>()?;
                let _precision = reader.read_u8()?;
                let height = reader.read_u16::<BigEndian>()?;
                let width = reader.read_u16::<BigEndian>()?;
                return Ok((u32::from(width), u32::from(height)));
            }
            0xD9 => return Err(anyhow!("JPEG ended before a frame header")),
            _ => {
                let segment_len = reader.read_u16::<BigEndian>()?;
                if segment_len < 2 {
                    return Err(anyhow!("malformed JPEG segment length"));
                }
                reader.seek(SeekFrom::Current(i64::from(segment_len) - 2))?;
            }
        }
    }
}
