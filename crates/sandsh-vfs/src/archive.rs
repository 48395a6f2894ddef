//! Zip archive extraction into the sandbox root, and packing for fixtures.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use sandsh_types::error::{Result, ShellError};
use zip::write::SimpleFileOptions;

/// Maximum directory depth walked when packing an archive.
const MAX_DEPTH: usize = 64;

/// Replace `root` with the contents of the zip file at `archive`.
///
/// Any existing tree at `root` is removed first. Entries whose names would
/// land outside `root` are skipped. Returns the number of files written.
pub fn extract_archive(archive: &Path, root: &Path) -> Result<usize> {
    let file = File::open(archive)
        .map_err(|e| ShellError::Archive(format!("cannot open {}: {e}", archive.display())))?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| ShellError::Archive(format!("cannot read {}: {e}", archive.display())))?;

    if root.exists() {
        fs::remove_dir_all(root)?;
    }
    fs::create_dir_all(root)?;

    let mut files = 0;
    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| ShellError::Archive(format!("bad entry #{i}: {e}")))?;
        let Some(relative) = entry.enclosed_name() else {
            log::warn!("Skipping unsafe archive entry: {}", entry.name());
            continue;
        };
        let out = root.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out)?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut target = File::create(&out)?;
        io::copy(&mut entry, &mut target)?;
        files += 1;
    }

    log::info!(
        "Extracted {files} files from {} into {}",
        archive.display(),
        root.display()
    );
    Ok(files)
}

/// Pack the tree under `source` into a new zip file at `archive`.
///
/// Entry names are relative to `source` and `/`-separated. Directories get
/// their own entries so empty ones survive a round trip.
pub fn create_archive(source: &Path, archive: &Path) -> Result<usize> {
    let file = File::create(archive)?;
    let mut zip = zip::ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    let mut files = 0;
    pack_dir(&mut zip, source, "", options, 0, &mut files)?;
    zip.finish()
        .map_err(|e| ShellError::Archive(format!("cannot finish {}: {e}", archive.display())))?;
    Ok(files)
}

fn pack_dir(
    zip: &mut zip::ZipWriter<File>,
    dir: &Path,
    prefix: &str,
    options: SimpleFileOptions,
    depth: usize,
    files: &mut usize,
) -> Result<()> {
    if depth >= MAX_DEPTH {
        return Err(ShellError::Archive(format!(
            "directory tree too deep at {}",
            dir.display()
        )));
    }
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = format!("{prefix}{}", entry.file_name().to_string_lossy());
        let path = entry.path();
        if path.is_dir() {
            zip.add_directory(format!("{name}/"), options)
                .map_err(|e| ShellError::Archive(format!("cannot add {name}: {e}")))?;
            pack_dir(zip, &path, &format!("{name}/"), options, depth + 1, files)?;
        } else {
            zip.start_file(name.clone(), options)
                .map_err(|e| ShellError::Archive(format!("cannot add {name}: {e}")))?;
            let mut source = File::open(&path)?;
            io::copy(&mut source, zip)?;
            *files += 1;
        }
    }
    Ok(())
}
