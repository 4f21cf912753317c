use std::fs;
use std::path::Path;

use log::{debug, error};

use crate::error::{Error, Result};

/// Reads a whole ROM image from disk, byte for byte
pub fn read_rom(path: &Path) -> Result<Vec<u8>> {
    let rom = fs::read(path).map_err(|e| {
        error!("unable to read {}: {}", path.display(), e);
        Error::FileOpenFailed
    })?;
    debug!("read {} bytes from {}", rom.len(), path.display());
    Ok(rom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_rom_bytes_unchanged() {
        let path = std::env::temp_dir()
            .join(format!("chip8-core-rom-{}.ch8", std::process::id()));
        fs::File::create(&path)
            .and_then(|mut f| f.write_all(&[0x12, 0x00, 0xFF]))
            .unwrap();
        assert_eq!(read_rom(&path), Ok(vec![0x12, 0x00, 0xFF]));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_rom() {
        let path = Path::new("/this/rom/does/not/exist.ch8");
        assert_eq!(read_rom(path), Err(Error::FileOpenFailed));
    }
}
