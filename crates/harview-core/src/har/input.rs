use crate::{Error, Result};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Raw HAR content handed to the decoder: either text already in memory or
/// a stream that is read to completion before parsing.
///
/// The decoder only consumes a stream; closing it stays with whoever
/// opened it.
pub enum Input<'a> {
    Text(Cow<'a, str>),
    Stream(Box<dyn Read + 'a>),
}

impl<'a> Input<'a> {
    /// Wrap any readable stream
    pub fn stream<R: Read + 'a>(reader: R) -> Self {
        Input::Stream(Box::new(reader))
    }

    /// Open a file path as a stream input. `-` reads standard input.
    pub fn from_path(path: &Path) -> Result<Input<'static>> {
        if path.as_os_str() == "-" {
            tracing::debug!("Reading HAR from stdin");
            return Ok(Input::stream(io::stdin().lock()));
        }

        let metadata = fs::metadata(path)?;
        if metadata.is_dir() {
            return Err(Error::InvalidInputKind(format!(
                "{} is a directory",
                path.display()
            )));
        }

        tracing::debug!("Reading HAR file from: {}", path.display());
        let file = File::open(path)?;
        Ok(Input::stream(BufReader::new(file)))
    }

    /// Collapse the input into a single text buffer
    pub(crate) fn into_text(self) -> Result<Cow<'a, str>> {
        match self {
            Input::Text(text) => Ok(text),
            Input::Stream(mut reader) => {
                let mut buffer = String::new();
                reader.read_to_string(&mut buffer)?;
                tracing::debug!("Read {} bytes from stream", buffer.len());
                Ok(Cow::Owned(buffer))
            }
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Input<'_> {
    fn from(text: String) -> Self {
        Input::Text(Cow::Owned(text))
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<File> for Input<'_> {
    fn from(file: File) -> Self {
        Input::stream(BufReader::new(file))
    }
}

impl<'a> From<&'a mut File> for Input<'a> {
    fn from(file: &'a mut File) -> Self {
        Input::stream(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_text_input_is_returned_as_is() {
        let text = Input::from("{}").into_text().unwrap();
        assert_eq!(text, "{}");
    }

    #[test]
    fn test_stream_is_read_to_completion() {
        let input = Input::stream(Cursor::new(b"{\"log\": {}}".to_vec()));
        let text = input.into_text().unwrap();
        assert_eq!(text, "{\"log\": {}}");
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let text = Input::from_path(file.path()).unwrap().into_text().unwrap();
        assert_eq!(text, "{}");
    }

    #[test]
    fn test_from_path_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let result = Input::from_path(dir.path());
        assert!(matches!(result, Err(Error::InvalidInputKind(_))));
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = Input::from_path(&dir.path().join("missing.har"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_invalid_utf8_stream_is_io_error() {
        let input = Input::stream(Cursor::new(vec![0xff, 0xfe, 0x00]));
        assert!(matches!(input.into_text(), Err(Error::Io(_))));
    }
}
