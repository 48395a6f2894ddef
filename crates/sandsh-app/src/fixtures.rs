//! Sample fixtures: a small tree, its archive, and a startup script.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sandsh_vfs::archive::create_archive;

const TREE_DIR: &str = "virtual_fs";
const ARCHIVE_NAME: &str = "virtual_fs.zip";
const SCRIPT_NAME: &str = "startup_script.sh";
const STARTUP_SCRIPT: &str = "ls\ncd subdir\nls\nwhoami\ncd";

/// Paths written by [`generate_files`].
#[derive(Debug)]
pub struct Fixtures {
    pub tree: PathBuf,
    pub archive: PathBuf,
    pub startup_script: PathBuf,
}

/// Write the sample tree (unless it already exists), pack it, and write the
/// startup script, all under `base`.
pub fn generate_files(base: &Path) -> Result<Fixtures> {
    let tree = base.join(TREE_DIR);
    if !tree.exists() {
        fs::create_dir_all(tree.join("subdir"))
            .with_context(|| format!("creating {}", tree.display()))?;
        fs::write(tree.join("file1.txt"), "This is the content of file 1.\n")?;
        fs::write(
            tree.join("file2.txt"),
            "This is the content of file 2.\nThis is the content of file 2.\n",
        )?;
        fs::write(
            tree.join("subdir").join("file3.txt"),
            "This is the content of a file in the subdirectory.\n",
        )?;
    }

    let archive = base.join(ARCHIVE_NAME);
    create_archive(&tree, &archive)
        .with_context(|| format!("packing {}", archive.display()))?;
    log::info!("Created file system archive: {}", archive.display());

    let startup_script = base.join(SCRIPT_NAME);
    fs::write(&startup_script, STARTUP_SCRIPT)
        .with_context(|| format!("writing {}", startup_script.display()))?;
    log::info!("Created startup script: {}", startup_script.display());

    Ok(Fixtures {
        tree,
        archive,
        startup_script,
    })
}
