use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::debug;
use thiserror::Error;

#[derive(Debug)]
pub struct Directory {
    pub base: PathBuf,
    pub directories: Vec<Directory>,
    pub files_by_extension: HashMap<String, Vec<PathBuf>>,
}

impl Directory {
    pub fn index<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let path = path.as_ref().canonicalize()?;

        if !path.is_dir() {
            return Err(DirectoryError::NotADirectory(path));
        }

        let mut ret = Self {
            base: path.clone(),
            directories: vec![],
            files_by_extension: HashMap::new(),
        };

        for file in path.read_dir()? {
            let file = file?;
            let fpath = file.path();
            let ftype = file.file_type()?;

            if ftype.is_dir() {
                if !fpath.ends_with(".git") {
                    ret.directories.push(Directory::index(fpath)?);
                }
            } else {
                let extension = fpath
                    .extension()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned();

                ret.files_by_extension
                    .entry(extension)
                    .or_insert_with(Vec::new)
                    .push(fpath);
            }
        }

        Ok(ret)
    }

    // Recreate this tree under dest, copying every file. Subdirectories are
    // created as needed, existing files are overwritten.
    pub fn mirror_to<P: AsRef<Path>>(&self, dest: P) -> Result<(), DirectoryError> {
        let dest = dest.as_ref().canonicalize()?;

        if !dest.is_dir() {
            return Err(DirectoryError::NotADirectory(dest));
        }

        for files in self.files_by_extension.values() {
            for file in files {
                // base is an ancestor of everything we indexed
                let base_relative_name = file.strip_prefix(&self.base).unwrap();
                let outpath = dest.join(base_relative_name);

                std::fs::copy(file, &outpath)?;
                debug!(
                    "copied {} -> {}",
                    file.to_string_lossy(),
                    outpath.to_string_lossy()
                );
            }
        }

        for directory in &self.directories {
            let stem = match directory.base.file_name() {
                Some(stem) => stem,
                None => continue,
            };

            let dest = dest.join(stem);
            if !dest.exists() {
                std::fs::create_dir(&dest)?;
            }
            directory.mirror_to(&dest)?;
        }

        Ok(())
    }

    pub fn find_all_by_extension<S: AsRef<str>>(&self, ext: S) -> Vec<&Path> {
        let mut ret = match self.files_by_extension.get(ext.as_ref()) {
            Some(vec) => vec.iter().map(|pb| pb.as_path()).collect(),
            None => vec![],
        };

        for dir in &self.directories {
            ret.extend_from_slice(&dir.find_all_by_extension(ext.as_ref()));
        }

        ret
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
}
