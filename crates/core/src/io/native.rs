//! Uncompressed TIFF reading/writing
//!
//! Uses the `tiff` crate. Grayscale images load as `(rows, cols)` grids and
//! RGB images as `(rows, cols, 3)` grids; the sample type follows the file.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::ColorType;

use crate::error::{Error, Result};
use crate::grid::{AnyGrid, Grid};

/// Read a TIFF file
pub fn read_tiff<P: AsRef<Path>>(path: P) -> Result<AnyGrid> {
    let file = File::open(path.as_ref())?;
    decode_tiff(BufReader::new(file))
}

/// Read a TIFF from an in-memory buffer
pub fn read_tiff_from_buffer(data: &[u8]) -> Result<AnyGrid> {
    decode_tiff(Cursor::new(data))
}

/// Write a grid to a TIFF file
pub fn write_tiff<P: AsRef<Path>>(grid: &AnyGrid, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    encode_tiff(grid, BufWriter::new(file))
}

/// Write a grid to an in-memory TIFF buffer
pub fn write_tiff_to_buffer(grid: &AnyGrid) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_tiff(grid, Cursor::new(&mut buf))?;
    Ok(buf)
}

fn decode_tiff<R: Read + Seek>(reader: R) -> Result<AnyGrid> {
    let mut decoder = Decoder::new(reader)?;
    let (width, height) = decoder.dimensions()?;
    let rows = height as usize;
    let cols = width as usize;

    let shape = match decoder.colortype()? {
        ColorType::Gray(_) => vec![rows, cols],
        ColorType::RGB(_) => vec![rows, cols, 3],
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "TIFF color type {:?}",
                other
            )));
        }
    };

    let grid = match decoder.read_image()? {
        DecodingResult::U8(buf) => AnyGrid::U8(Grid::from_vec(&shape, buf)?),
        DecodingResult::U16(buf) => AnyGrid::U16(Grid::from_vec(&shape, buf)?),
        DecodingResult::U32(buf) => AnyGrid::U32(Grid::from_vec(&shape, buf)?),
        DecodingResult::F32(buf) => AnyGrid::F64(Grid::from_vec(
            &shape,
            buf.into_iter().map(f64::from).collect(),
        )?),
        DecodingResult::F64(buf) => AnyGrid::F64(Grid::from_vec(&shape, buf)?),
        _ => {
            return Err(Error::UnsupportedFormat(
                "TIFF sample format (signed or 64-bit integer)".to_string(),
            ));
        }
    };

    Ok(grid)
}

/// `(cols, rows, rgb)` for a grid that can be written as an image
fn image_layout(shape: &[usize]) -> Result<(u32, u32, bool)> {
    let dims = |rows: usize, cols: usize| -> Result<(u32, u32)> {
        let w = u32::try_from(cols).map_err(|_| Error::InvalidShape {
            shape: shape.to_vec(),
            reason: "too wide for TIFF".to_string(),
        })?;
        let h = u32::try_from(rows).map_err(|_| Error::InvalidShape {
            shape: shape.to_vec(),
            reason: "too tall for TIFF".to_string(),
        })?;
        Ok((w, h))
    };

    match shape {
        [rows, cols] => dims(*rows, *cols).map(|(w, h)| (w, h, false)),
        [rows, cols, 3] => dims(*rows, *cols).map(|(w, h)| (w, h, true)),
        _ => Err(Error::UnsupportedDimensionality {
            ndim: shape.len(),
            operation: "TIFF export (expects (rows, cols) or (rows, cols, 3))",
        }),
    }
}

fn encode_tiff<W: Write + Seek>(grid: &AnyGrid, writer: W) -> Result<()> {
    let (width, height, rgb) = image_layout(grid.shape())?;
    let mut encoder = TiffEncoder::new(writer)?;

    match (grid, rgb) {
        (AnyGrid::U8(g), false) => {
            encoder.write_image::<colortype::Gray8>(width, height, &g.to_vec())?
        }
        (AnyGrid::U8(g), true) => {
            encoder.write_image::<colortype::RGB8>(width, height, &g.to_vec())?
        }
        (AnyGrid::U16(g), false) => {
            encoder.write_image::<colortype::Gray16>(width, height, &g.to_vec())?
        }
        (AnyGrid::U16(g), true) => {
            encoder.write_image::<colortype::RGB16>(width, height, &g.to_vec())?
        }
        (AnyGrid::U32(g), false) => {
            encoder.write_image::<colortype::Gray32>(width, height, &g.to_vec())?
        }
        (AnyGrid::F64(g), false) => {
            encoder.write_image::<colortype::Gray64Float>(width, height, &g.to_vec())?
        }
        (AnyGrid::Bool(g), false) => {
            let bytes: Vec<u8> = g.iter().map(|&v| if v { 255 } else { 0 }).collect();
            encoder.write_image::<colortype::Gray8>(width, height, &bytes)?
        }
        (other, true) => {
            return Err(Error::UnsupportedDType {
                dtype: other.dtype(),
                operation: "RGB TIFF export",
            });
        }
    }

    Ok(())
}
