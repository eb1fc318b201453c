use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InputFileNotFound(String),
    UnableToDecodeInputFile(String, image::ImageError),
    UnableToEncodeOutputFile(String, image::ImageError),
    UnableToReadInputFile(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToReadDirectory(String, std::io::Error),
    UnableToCreateBackupFile(String, std::io::Error),
    BackgroundRemoverNotFound(which::Error),
    BackgroundRemovalFailed(String),
    RemappedBufferSizeMismatch,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputFileNotFound(path) => {
                write!(f, "Input file '{}' not found", path)
            }
            Self::UnableToDecodeInputFile(path, error) => {
                write!(
                    f,
                    "Unable to decode input file '{}' as image: {}",
                    path, error
                )
            }
            Self::UnableToEncodeOutputFile(path, error) => {
                write!(f, "Unable to encode output file '{}': {}", path, error)
            }
            Self::UnableToReadInputFile(path, error) => {
                write!(f, "Unable to read input file '{}': {}", path, error)
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToReadDirectory(path, error) => {
                write!(f, "Unable to read directory '{}': {}", path, error)
            }
            Self::UnableToCreateBackupFile(path, error) => {
                write!(f, "Unable to create backup file '{}': {}", path, error)
            }
            Self::BackgroundRemoverNotFound(error) => {
                write!(f, "Background removal executable not found: {}", error)
            }
            Self::BackgroundRemovalFailed(reason) => {
                write!(f, "Background removal failed: {}", reason)
            }
            Self::RemappedBufferSizeMismatch => {
                write!(f, "Remapped pixel buffer does not match image dimensions")
            }
        }
    }
}

impl std::error::Error for Error {}
