//! Loading of program images.
use std::{fs, path::Path};

use crate::{definitions::rom, LoadError};

#[derive(Clone, Debug)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program image, it is copied verbatim to the program start
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data.
    ///
    /// Fails if the image does not fit between the program start and the end of memory.
    pub fn new(name: &str, data: &[u8]) -> Result<Self, LoadError> {
        if data.len() > rom::MAX_SIZE {
            return Err(LoadError::TooLarge {
                size: data.len(),
                max: rom::MAX_SIZE,
            });
        }
        Ok(Rom {
            name: name.to_string(),
            data: data.into(),
        })
    }

    /// Will read the rom from the given file, the file name becomes the rom name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::debug!("read {} bytes from {}", data.len(), path.display());
        Rom::new(&name, &data)
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::Rom;
    use crate::{definitions::rom, LoadError};
    use std::io::Write;

    #[test]
    fn test_rom_max_size() {
        let data = vec![0xAB; rom::MAX_SIZE];
        let rom = Rom::new("max", &data).expect("the largest image has to fit");
        assert_eq!(rom.get_data().len(), 3584);
        assert_eq!(rom.get_name(), "max");
    }

    #[test]
    fn test_rom_too_large() {
        let data = vec![0xAB; rom::MAX_SIZE + 1];
        match Rom::new("too large", &data) {
            Err(LoadError::TooLarge { size, max }) => {
                assert_eq!(size, 3585);
                assert_eq!(max, 3584);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_rom_from_file() {
        let path = std::env::temp_dir().join(format!("chip-rom-test-{}.ch8", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
        }

        let rom = Rom::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(rom.get_data(), &[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(
            rom.get_name(),
            path.file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn test_rom_missing_file() {
        let path = std::env::temp_dir().join("chip-rom-test-this-file-does-not-exist.ch8");
        assert!(matches!(Rom::from_file(&path), Err(LoadError::Io(_))));
    }
}
