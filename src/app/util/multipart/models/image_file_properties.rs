use imagesize::ImageSize;

use super::file_properties::FileProperties;

#[derive(Debug)]
pub struct ImageFileProperties {
    pub file_properties: FileProperties,
    pub image_size: ImageSize,
}

impl ImageFileProperties {
    /// Reads the image dimensions from the file header. Returns the file back when the
    /// header is not a format `imagesize` recognizes.
    pub fn from_file_properties(file_properties: FileProperties) -> Result<Self, FileProperties> {
        match imagesize::blob_size(&file_properties.data) {
            Ok(image_size) => Ok(Self {
                file_properties,
                image_size,
            }),
            Err(_) => Err(file_properties),
        }
    }
}
