//! Template and generated-document store.
//!
//! All documents live under a single injected root:
//!
//! ```text
//! <root>/templates/   shipped template documents (read-only)
//! <root>/configs/     generated configuration documents (overwritten)
//! <root>/cidrs/       downloaded CIDR list files (merge input)
//! ```
//!
//! Paths are resolved once at construction so tests can point a store at a
//! temporary directory instead of the working directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TproxyError;

/// Named template documents shipped with the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Client-config JSON template (subscription URL, ports).
    Config,
    /// Per-server proxy-client JSON template.
    Ss,
    /// Packet-filter rule text template.
    Pf,
}

/// Named generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Doc {
    /// Persisted client config.
    Config,
    /// Rendered proxy-client config.
    Ss,
    /// Rendered packet-filter config.
    Pf,
    /// Merged CIDR document.
    Cidr,
}

/// Resolved document locations for one invocation.
#[derive(Debug, Clone)]
pub struct Store {
    templates_dir: PathBuf,
    configs_dir: PathBuf,
    cidrs_dir: PathBuf,
}

impl Store {
    /// Create a store rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            templates_dir: root.join("templates"),
            configs_dir: root.join("configs"),
            cidrs_dir: root.join("cidrs"),
        }
    }

    /// Directory holding the CIDR list files merged into the CIDR document.
    pub fn cidrs_dir(&self) -> &Path {
        &self.cidrs_dir
    }

    pub fn template_path(&self, template: Template) -> PathBuf {
        let name = match template {
            Template::Config => "config-template.json",
            Template::Ss => "ss-config-template.json",
            Template::Pf => "pf-template.conf",
        };
        self.templates_dir.join(name)
    }

    pub fn doc_path(&self, doc: Doc) -> PathBuf {
        let name = match doc {
            Doc::Config => "config.json",
            Doc::Ss => "ss-config.json",
            Doc::Pf => "pf.conf",
            Doc::Cidr => "direct_cidr.txt",
        };
        self.configs_dir.join(name)
    }

    /// Load a template document. Missing or unreadable templates are a
    /// [`TproxyError::Template`].
    pub fn read_template(&self, template: Template) -> Result<String, TproxyError> {
        let path = self.template_path(template);
        fs::read_to_string(&path)
            .map_err(|e| TproxyError::Template(format!("cannot read {}: {}", path.display(), e)))
    }

    /// Read a generated document.
    pub fn read_doc(&self, doc: Doc) -> Result<String, TproxyError> {
        Ok(fs::read_to_string(self.doc_path(doc))?)
    }

    pub fn doc_exists(&self, doc: Doc) -> bool {
        self.doc_path(doc).exists()
    }

    /// Write a generated document, fully replacing any previous version.
    ///
    /// The content is written to a temporary file in the destination
    /// directory and renamed into place, so a failed render never leaves a
    /// half-written document behind.
    pub fn write_doc(&self, doc: Doc, contents: &str) -> Result<(), TproxyError> {
        let path = self.doc_path(doc);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
