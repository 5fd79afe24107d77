use crate::error::{Error, Result};
use crate::image::RasterImage;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Seek, SeekFrom, Write};

//===========================================================================//

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

// Resource type field for icons (2 would mean a cursor; never written here).
const RESOURCE_TYPE_ICON: u16 = 1;

// Sizes of the ICONDIR header and of one ICONDIRENTRY record.
const HEADER_LEN: u32 = 6;
const ENTRY_LEN: u32 = 16;

//===========================================================================//

/// A collection of images; the contents of a single ICO file.
#[derive(Clone, Debug, Default)]
pub struct IconDir {
    entries: Vec<IconEntry>,
}

impl IconDir {
    /// Creates a new, empty collection of icons.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Returns the entries in this collection, in file order.
    pub fn entries(&self) -> &[IconEntry] {
        &self.entries
    }

    /// Adds an entry to the collection.  Entries are written in insertion
    /// order; readers select by size rather than position, so no sorting is
    /// performed.
    pub fn add_entry(&mut self, entry: IconEntry) {
        self.entries.push(entry);
    }

    /// Reads an ICO file into memory.
    pub fn read<R: Read + Seek>(mut reader: R) -> Result<IconDir> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            return Err(Error::InvalidData(format!(
                "invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            )));
        }
        let restype = reader.read_u16::<LittleEndian>()?;
        if restype != RESOURCE_TYPE_ICON {
            return Err(Error::InvalidData(format!(
                "unsupported resource type (was {}, but must be {})",
                restype, RESOURCE_TYPE_ICON
            )));
        }
        let num_entries = reader.read_u16::<LittleEndian>()? as usize;
        let mut entries = Vec::<IconEntry>::with_capacity(num_entries);
        let mut spans = Vec::<(u32, u32)>::with_capacity(num_entries);
        for _ in 0..num_entries {
            let width_byte = reader.read_u8()?;
            let height_byte = reader.read_u8()?;
            let _num_colors = reader.read_u8()?;
            let reserved = reader.read_u8()?;
            if reserved != 0 {
                return Err(Error::InvalidData(format!(
                    "invalid reserved field value in ICONDIRENTRY \
                     (was {}, but must be 0)",
                    reserved
                )));
            }
            let _color_planes = reader.read_u16::<LittleEndian>()?;
            let _bits_per_pixel = reader.read_u16::<LittleEndian>()?;
            let data_size = reader.read_u32::<LittleEndian>()?;
            let data_offset = reader.read_u32::<LittleEndian>()?;
            // The directory stores only one byte each for width and height,
            // with zero meaning a size of 256 or more.  These values are
            // corrected below from the PNG data itself once it has been read.
            let width = if width_byte == 0 { 256 } else { width_byte as u32 };
            let height =
                if height_byte == 0 { 256 } else { height_byte as u32 };
            spans.push((data_offset, data_size));
            entries.push(IconEntry { width, height, data: Vec::new() });
        }
        for (index, &(data_offset, data_size)) in spans.iter().enumerate() {
            reader.seek(SeekFrom::Start(data_offset as u64))?;
            let mut data = vec![0u8; data_size as usize];
            reader.read_exact(&mut data)?;
            entries[index].data = data;
        }
        for entry in entries.iter_mut() {
            // Defer decode errors until the caller actually decodes this
            // entry, so a single malformed blob doesn't hide the rest of the
            // file.
            if let Ok((width, height)) = entry.decode_size() {
                entry.width = width;
                entry.height = height;
            }
        }
        Ok(IconDir { entries })
    }

    /// Writes an ICO file out to disk.  Returns an error if the collection
    /// is empty or holds more entries than the 16-bit count field allows.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::NoEntries);
        }
        if self.entries.len() > (u16::MAX as usize) {
            return Err(Error::TooManyEntries(self.entries.len()));
        }
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(RESOURCE_TYPE_ICON)?;
        writer.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        let mut data_offset =
            HEADER_LEN + ENTRY_LEN * (self.entries.len() as u32);
        for entry in self.entries.iter() {
            // A width/height byte of zero indicates a size of 256 or more.
            let width = if entry.width > 255 { 0 } else { entry.width as u8 };
            writer.write_u8(width)?;
            let height =
                if entry.height > 255 { 0 } else { entry.height as u8 };
            writer.write_u8(height)?;
            writer.write_u8(0)?; // no color palette
            writer.write_u8(0)?; // reserved
            writer.write_u16::<LittleEndian>(1)?; // color planes
            writer.write_u16::<LittleEndian>(32)?; // bits per pixel
            let data_size = entry.data.len() as u32;
            writer.write_u32::<LittleEndian>(data_size)?;
            writer.write_u32::<LittleEndian>(data_offset)?;
            data_offset += data_size;
        }
        for entry in self.entries.iter() {
            writer.write_all(&entry.data)?;
        }
        Ok(())
    }

    /// Encodes the whole container into a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::<u8>::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }
}

//===========================================================================//

/// One entry in an ICO file: a single PNG-compressed image plus the
/// dimensions recorded in its directory record.
#[derive(Clone, Debug)]
pub struct IconEntry {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl IconEntry {
    /// Encodes an image as a 32-bit RGBA PNG in a new entry.
    pub fn encode(image: &RasterImage) -> Result<IconEntry> {
        let mut data = Vec::<u8>::new();
        image.write_png(&mut data)?;
        Ok(IconEntry {
            width: image.width(),
            height: image.height(),
            data,
        })
    }

    /// Decodes this entry back into an image.  Returns an error if the data
    /// is malformed or disagrees with the directory dimensions.
    pub fn decode(&self) -> Result<RasterImage> {
        if !self.data.starts_with(PNG_SIGNATURE) {
            return Err(Error::InvalidData(
                "entry data is not a PNG".to_string(),
            ));
        }
        let image = RasterImage::read_png(self.data.as_slice())?;
        if image.width() != self.width || image.height() != self.height {
            return Err(Error::InvalidData(format!(
                "encoded image has wrong dimensions \
                 (was {}x{}, but should be {}x{})",
                image.width(),
                image.height(),
                self.width,
                self.height
            )));
        }
        Ok(image)
    }

    /// Decodes just enough of the PNG data to determine its size.
    pub(crate) fn decode_size(&self) -> Result<(u32, u32)> {
        if !self.data.starts_with(PNG_SIGNATURE) {
            return Err(Error::InvalidData(
                "entry data is not a PNG".to_string(),
            ));
        }
        let decoder = png::Decoder::new(self.data.as_slice());
        let png_reader = decoder.read_info()?;
        Ok((png_reader.info().width, png_reader.info().height))
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the raw PNG data for this entry.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

//===========================================================================//


//===========================================================================//
