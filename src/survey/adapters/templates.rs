//! Template source reading `copilot-usage-<lang>.md` files from a directory.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

use crate::survey::{
    domain::{IssueTemplate, LanguageCode},
    ports::{TemplateError, TemplateSource},
};

/// Template source scoped to a single template directory.
#[derive(Debug)]
pub struct DirTemplateSource {
    dir: Dir,
}

impl DirTemplateSource {
    /// Opens the template directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be opened.
    pub fn open(path: &Utf8Path) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir })
    }
}

impl TemplateSource for DirTemplateSource {
    fn load(&self, language: LanguageCode) -> Result<IssueTemplate, TemplateError> {
        let file_name = IssueTemplate::file_name(language);
        match self.dir.read_to_string(&file_name) {
            Ok(source) => Ok(IssueTemplate::new(language, source)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(TemplateError::NotFound {
                    language,
                    file_name,
                })
            }
            Err(source) => Err(TemplateError::Io { file_name, source }),
        }
    }
}
