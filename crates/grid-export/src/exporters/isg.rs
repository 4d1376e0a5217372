use std::io::Write;

use isg_format::{GridModel, IsgVersion};

use super::Exporter;
use crate::error::Result;
use crate::format::OutputFormat;

/// ISG text of a fixed target version.
#[derive(Debug, Clone)]
pub struct IsgExporter {
    version: IsgVersion,
    generator: String,
}

impl IsgExporter {
    pub fn new(version: IsgVersion, generator: impl Into<String>) -> Self {
        Self {
            version,
            generator: generator.into(),
        }
    }
}

impl Exporter for IsgExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Isg(self.version)
    }

    fn export(&self, model: &GridModel, out: &mut dyn Write) -> Result<()> {
        let text = model.to_isg_string(self.version, &self.generator);
        out.write_all(text.as_bytes())?;
        Ok(())
    }
}
