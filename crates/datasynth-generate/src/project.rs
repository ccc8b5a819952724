use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use datasynth_core::{Entity, Record};

use crate::engine::{DataGenerator, SynthesisEngine};
use crate::errors::GenerationError;
use crate::model::ExportSummary;
use crate::output::RecordWriter;

/// A named dataset: entity definitions plus the generator and writer used
/// to turn them into files.
pub struct DatasetProject {
    name: String,
    entities: Vec<Entity>,
    generator: Option<Box<dyn DataGenerator>>,
    writer: Option<Box<dyn RecordWriter>>,
}

impl DatasetProject {
    /// Project with the default engine and no writer. Blank names are
    /// rejected; surrounding whitespace is trimmed.
    pub fn new(name: impl AsRef<str>) -> Result<Self, GenerationError> {
        Self::with_parts(name, Some(Box::new(SynthesisEngine::default())), None)
    }

    pub fn with_parts(
        name: impl AsRef<str>,
        generator: Option<Box<dyn DataGenerator>>,
        writer: Option<Box<dyn RecordWriter>>,
    ) -> Result<Self, GenerationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(GenerationError::InvalidArgument(
                "project name must not be blank".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            entities: Vec::new(),
            generator,
            writer,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.name.as_deref() == Some(name))
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove the first entity with this name.
    pub fn remove_entity(&mut self, name: &str) -> Option<Entity> {
        let index = self
            .entities
            .iter()
            .position(|entity| entity.name.as_deref() == Some(name))?;
        Some(self.entities.remove(index))
    }

    pub fn set_generator(&mut self, generator: Box<dyn DataGenerator>) {
        self.generator = Some(generator);
    }

    pub fn set_writer(&mut self, writer: Box<dyn RecordWriter>) {
        self.writer = Some(writer);
    }

    pub fn has_writer(&self) -> bool {
        self.writer.is_some()
    }

    /// Generate `count` records, binding a default engine first if the
    /// project has none.
    pub fn generate(
        &mut self,
        entity: &Entity,
        count: usize,
    ) -> Result<Vec<Record>, GenerationError> {
        if count == 0 {
            return Err(GenerationError::InvalidArgument(
                "count must be greater than 0".to_string(),
            ));
        }
        let generator = self.generator.get_or_insert_with(|| {
            debug!(project = %self.name, "binding default synthesis engine");
            Box::new(SynthesisEngine::default()) as Box<dyn DataGenerator>
        });
        generator.generate(entity, count)
    }

    /// Write `records` to `path` with the bound writer.
    pub fn export(
        &self,
        records: &[Record],
        path: impl AsRef<Path>,
    ) -> Result<ExportSummary, GenerationError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
            return Err(GenerationError::InvalidArgument(
                "export path must not be blank".to_string(),
            ));
        }
        let writer = self.writer.as_deref().ok_or_else(|| {
            GenerationError::IllegalState(format!(
                "no writer bound to project '{}'",
                self.name
            ))
        })?;

        let bytes_written = writer.export(records, path)?;
        info!(
            project = %self.name,
            format = %writer.format(),
            records = records.len(),
            "project export finished"
        );
        Ok(ExportSummary {
            format: writer.format().to_string(),
            path: path.to_path_buf(),
            records: records.len() as u64,
            bytes_written,
        })
    }
}

impl DataGenerator for DatasetProject {
    fn generate(&mut self, entity: &Entity, count: usize) -> Result<Vec<Record>, GenerationError> {
        DatasetProject::generate(self, entity, count)
    }
}

impl fmt::Debug for DatasetProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetProject")
            .field("name", &self.name)
            .field("entities", &self.entities.len())
            .field("generator", &self.generator.is_some())
            .field("writer", &self.writer.as_ref().map(|writer| writer.format()))
            .finish()
    }
}
