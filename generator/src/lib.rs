pub mod fs;

use std::path::Path;

use log::info;
use thiserror::Error;

use crate::fs::{Directory, DirectoryError};

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

// Throw away whatever was generated last time and lay the static files
// down as the base of the output tree
pub fn copy_static<A: AsRef<Path>, B: AsRef<Path>>(from: A, to: B) -> Result<(), GenerateError> {
    let from = from.as_ref();
    let to = to.as_ref();

    if to.is_dir() {
        info!("cleaning output directory {}", to.to_string_lossy());
        std::fs::remove_dir_all(to)?;
    }
    std::fs::create_dir_all(to)?;

    info!(
        "copying static files from {} to {}",
        from.to_string_lossy(),
        to.to_string_lossy()
    );

    let statics = Directory::index(from)?;
    statics.mirror_to(to)?;

    Ok(())
}

pub fn generate_page<A: AsRef<Path>, B: AsRef<Path>>(
    from: A,
    template: &str,
    dest: B,
) -> Result<(), GenerateError> {
    let from = from.as_ref();
    let dest = dest.as_ref();

    info!(
        "generating {} -> {}",
        from.to_string_lossy(),
        dest.to_string_lossy()
    );

    let markdown = std::fs::read_to_string(from)?;
    let content = parser::render(&markdown)?;
    let title = parser::extract_title(&markdown)?;

    let filled = template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content);

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest, filled)?;

    Ok(())
}

// Every markdown file under content becomes an html file at the same
// relative path under out
pub fn generate_pages<A: AsRef<Path>, B: AsRef<Path>, C: AsRef<Path>>(
    content: A,
    template_path: B,
    out: C,
) -> Result<(), GenerateError> {
    let template = std::fs::read_to_string(template_path.as_ref())?;
    let out = out.as_ref();

    let root = Directory::index(content.as_ref())?;
    for file in root.find_all_by_extension("md") {
        // index canonicalized base, so every indexed file sits under it
        let relative = file.strip_prefix(&root.base).unwrap();

        let mut dest = out.join(relative);
        dest.set_extension("html");

        generate_page(file, &template, &dest)?;
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Convert(#[from] parser::Error),
}
